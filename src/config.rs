use std::f64::consts::PI;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::color::WHITE;
use crate::model::BoundsPolicy;
use crate::obj::LoadOptions;
use crate::pipeline::FrameConfig;
use crate::point3d::Point3D;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Bounds {
    /// Rebuild the bounding box after every rotation
    Recompute,
    /// Refresh only the rotated axes (legacy shading)
    PerAxis,
}

impl From<Bounds> for BoundsPolicy {
    fn from(bounds: Bounds) -> Self {
        match bounds {
            Bounds::Recompute => BoundsPolicy::Recompute,
            Bounds::PerAxis => BoundsPolicy::PerAxis,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "depth-rasterizer")]
#[command(about = "Spin an OBJ mesh and rasterize it with a depth buffer")]
pub struct Args {
    /// Mesh file (OBJ, triangular faces)
    pub mesh: PathBuf,

    /// Uniform scale applied to the raw vertices
    #[arg(long, default_value_t = 120.0)]
    pub scale: f64,

    /// Where the mesh's bounding box center is placed, as x,y,z
    #[arg(long, default_value = "320,240,0", value_parser = parse_point, allow_hyphen_values = true)]
    pub center: Point3D,

    #[arg(long, default_value_t = 640)]
    pub width: u32,

    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Red intensity of the nearest depth
    #[arg(long, default_value_t = 240)]
    pub max_brightness: u8,

    /// Y rotation per frame, in radians
    #[arg(long, default_value_t = PI / 100.0)]
    pub rotation_step: f64,

    /// Initial rotation about Y, in radians
    #[arg(long, default_value_t = PI - 0.1, allow_hyphen_values = true)]
    pub initial_yaw: f64,

    /// Initial rotation about Z, in radians
    #[arg(long, default_value_t = PI, allow_hyphen_values = true)]
    pub initial_roll: f64,

    #[arg(long, value_enum, default_value_t = Bounds::Recompute)]
    pub bounds: Bounds,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Render headless and save the last frame as PNG
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Worker threads for projection (defaults to logical cores)
    #[arg(long)]
    pub threads: Option<usize>,
}

fn parse_point(s: &str) -> Result<Point3D, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("{c:?}: {e}")))
        .collect::<Result<Vec<f64>, String>>()?;
    if coords.len() != 3 {
        return Err(format!("expected x,y,z, got {} values", coords.len()));
    }
    Ok(Point3D::from_slice(&coords))
}

impl Args {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            center: self.center,
            scale: self.scale,
            bounds: self.bounds.into(),
        }
    }

    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            width: self.width,
            height: self.height,
            max_brightness: self.max_brightness,
            rotation_step: self.rotation_step,
            background: WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let args = Args::try_parse_from(["depth-rasterizer", "cube.obj"]).unwrap();
        let load = args.load_options();
        assert_eq!(load.center, Point3D::new(320.0, 240.0, 0.0));
        assert_eq!(load.scale, 120.0);
        assert_eq!(load.bounds, BoundsPolicy::Recompute);
        assert_eq!(args.frame_config(), FrameConfig::default());
        assert_eq!(args.frames, None);
    }

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "depth-rasterizer",
            "mesh.obj",
            "--center",
            "10,-4.5,2",
            "--scale",
            "2",
            "--bounds",
            "per-axis",
            "--frames",
            "5",
            "--output",
            "out.png",
        ])
        .unwrap();
        assert_eq!(args.load_options().center, Point3D::new(10.0, -4.5, 2.0));
        assert_eq!(args.load_options().bounds, BoundsPolicy::PerAxis);
        assert_eq!(args.frames, Some(5));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn center_needs_three_values() {
        assert!(Args::try_parse_from(["depth-rasterizer", "m.obj", "--center", "1,2"]).is_err());
    }
}
