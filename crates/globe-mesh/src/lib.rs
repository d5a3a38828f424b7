//! Dynamic triangle meshes for globe surfaces: identity-tracked triangles with
//! vertex adjacency, crack-free batch subdivision, the latitude/longitude sphere
//! builder, adaptive refinement against a radius field, and shell operations for
//! printable solids.

mod error;
mod field;
mod mesh;
mod refine;
mod segment;
mod shell;
mod sphere;
mod subdivide;
mod triangle;

pub use error::{MeshError, MeshResult};
pub use field::{ConstantRadius, MidpointFn, RadiusFn, SurfaceMidpoint};
pub use mesh::{Mesh, TriangleId};
pub use refine::{RefineParams, refine, refine_by, refine_sequential};
pub use segment::Segment;
pub use shell::{remove_floaters, remove_where, split_hemispheres, thicken};
pub use sphere::{SphericalGrid, build_spherical};
pub use subdivide::{SubdivisionStats, Subdivider, split_edge};
pub use triangle::Triangle;

pub use globe_geo::{Coord3D, GeoCoord};
