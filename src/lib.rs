//! Orthographic software rasterizer for triangle meshes.
//!
//! A mesh is loaded from OBJ, triangulated, spun in model space and scan
//! converted every frame with painter's ordering plus a depth buffer. Pixels
//! are shaded red by depth and handed to a [`screen::DisplaySurface`].

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod obj;
pub mod pipeline;
pub mod point2d;
pub mod point3d;
pub mod projection;
pub mod raster;
pub mod rectangle;
pub mod screen;
pub mod triangle;
pub mod vector;
#[cfg(feature = "window")]
pub mod window;

pub use error::{MeshError, MeshResult};
pub use geometry::{Axis, BoundingBox};
pub use model::{BoundsPolicy, Model};
pub use obj::{LoadOptions, load_obj, parse_obj, triangulate};
pub use pipeline::{FrameConfig, FrameStats, Renderer};
pub use point2d::Point2D;
pub use point3d::Point3D;
pub use raster::{RasterStats, Rasterizer};
pub use screen::{DisplaySurface, ScreenSpace};
pub use triangle::{Triangle2D, Triangle3D};
pub use vector::Vector;
