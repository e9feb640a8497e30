use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or triangulating a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("cannot open mesh file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed reading mesh data: {0}")]
    Io(#[from] io::Error),

    #[error("malformed mesh at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("malformed mesh: no vertex records")]
    NoVertices,

    #[error("face {face} references vertex {index}, but the mesh has {count} vertices")]
    FaceIndexOutOfRange { face: usize, index: usize, count: usize },
}

pub type MeshResult<T> = Result<T, MeshError>;
