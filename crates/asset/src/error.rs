//! Loader error taxonomy. Any of these aborts the whole load; no partial
//! mesh is ever returned.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ObjError>;

#[derive(Debug, Error)]
pub enum ObjError {
    /// Malformed numeric token or wrong field count. Lines are 1-based.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Face with fewer than 3 or more than 4 vertices. The quad split is
    /// only defined for exactly 4.
    #[error("line {line}: face has {count} vertices, expected 3 or 4")]
    UnsupportedFaceArity { line: usize, count: usize },

    /// Position and normal index streams ended up with different lengths.
    #[error("index count mismatch: {positions} position indices vs {normals} normal indices")]
    IndexCountMismatch { positions: usize, normals: usize },

    /// A face referenced an attribute entry that was never declared.
    #[error("{what} index {index} out of bounds ({count} entries declared)")]
    IndexOutOfBounds {
        what: &'static str,
        index: u32,
        count: usize,
    },

    /// All position components are identical; the [-1, 1] remap would
    /// divide by zero.
    #[error("mesh has zero spatial extent")]
    DegenerateMesh,

    /// No positions or no faces in the input.
    #[error("OBJ contained no geometry")]
    EmptyMesh,

    /// Internal consistency check failed. Reaching this is a bug in the
    /// loader, not in the input.
    #[error("internal consistency check failed: {0}")]
    Postcondition(&'static str),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
