use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by canvas operations.
///
/// Malformed event sequences (undo at the first entry, a move without a
/// stroke, ...) are not errors; they are silent no-ops on the engine.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The export target could not be created or written
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The buffer could not be encoded
    #[error("Failed to encode canvas: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
