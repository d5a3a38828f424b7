use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while loading a map image.
#[derive(Debug, Error)]
pub enum EquirectError {
    /// The file could not be opened or decoded.
    #[error("failed to load map image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image has no pixels to sample.
    #[error("map image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
}
