//! Mesh file encoders: binary STL for printing, vertex-colored PLY and
//! OBJ with an MTL material library for viewers.
//!
//! Every encoder takes a triangle slice. Pass
//! [`Mesh::sorted_triangles`](globe_mesh::Mesh::sorted_triangles) for output that
//! is identical across runs.

mod error;
mod obj;
mod ply;
mod stl;
mod vertices;

pub use error::ExportError;
pub use obj::{MATERIAL_FILE, MaterialObj, OBJECT_FILE, encode_material_obj};
pub use ply::encode_ply;
pub use stl::{HEADER_LEN, RECORD_LEN, encode_stl, write_stl};
