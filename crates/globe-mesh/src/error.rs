//! Mesh error types.

use globe_geo::Coord3D;

use crate::mesh::TriangleId;
use crate::triangle::Triangle;

/// Result alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised by mesh construction, subdivision and validation.
///
/// Every variant names the triangle or edge that triggered it. None of them is
/// recoverable within a pass: continuing would corrupt the mesh topology.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A triangle's vertices are collinear or coincident, so it has no normal.
    #[error("degenerate triangle {triangle:?} has no normal")]
    DegenerateTriangle {
        /// The offending triangle.
        triangle: Triangle,
    },

    /// An edge that should border exactly two triangles borders a different number.
    #[error("edge {a:?} -> {b:?} borders {count} triangles, expected 2")]
    NonManifoldEdge {
        /// First endpoint.
        a: Coord3D,
        /// Second endpoint.
        b: Coord3D,
        /// Number of live triangles found on the edge.
        count: usize,
    },

    /// A spherical grid too coarse to enclose any volume.
    #[error(
        "invalid spherical grid {lon_stops}x{lat_stops}: need at least 3 longitude and 2 latitude stops"
    )]
    InvalidGrid {
        /// Requested longitude steps.
        lon_stops: usize,
        /// Requested latitude steps.
        lat_stops: usize,
    },

    /// The vertex index disagrees with the live triangle set.
    #[error("vertex index out of sync for {id:?}: {reason}")]
    IndexInconsistent {
        /// Handle whose index entries are wrong.
        id: TriangleId,
        /// What was found.
        reason: String,
    },
}
