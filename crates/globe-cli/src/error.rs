use std::path::PathBuf;

use globe_equirect::EquirectError;
use globe_export::ExportError;
use globe_flatten::FlattenError;
use globe_mesh::MeshError;

/// Any failure of a globeprint run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Map(#[from] EquirectError),

    #[error("mesh construction failed: {0}")]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported output format {} (expected .stl, .ply or .obj)", path.display())]
    UnsupportedFormat { path: PathBuf },
}
