//! Spherical and Cartesian coordinate primitives: geographic coordinates, 3D points,
//! planar points, the great-circle metric, and the pole-safe inverse embedding.

mod coord2d;
mod coord3d;
mod geo_coord;

pub use coord2d::Coord2D;
pub use coord3d::Coord3D;
pub use geo_coord::{GeoCoord, POLE_EPSILON};
