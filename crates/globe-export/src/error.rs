use std::path::PathBuf;

/// Errors returned by the encoders.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Binary STL stores the triangle count in 32 bits.
    #[error("{0} triangles exceed the binary STL limit of {max}", max = u32::MAX)]
    TooManyTriangles(usize),

    /// Writing to the output stream failed.
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),

    /// Creating an output file failed.
    #[error("failed to write {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
