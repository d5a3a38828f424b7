//! ASCII PLY with per-vertex colors.

use std::fmt::Write;

use globe_geo::Coord3D;
use globe_mesh::Triangle;

use crate::vertices::VertexTable;

/// Encodes `triangles` as an ASCII PLY 1.0 document.
///
/// Shared vertices are written once, colored by `color`, and faces refer to
/// them by zero-based index.
pub fn encode_ply<F>(triangles: &[Triangle], mut color: F) -> String
where
    F: FnMut(Coord3D) -> [u8; 3],
{
    let table = VertexTable::from_triangles(triangles);

    let mut out = String::new();
    out.push_str("ply\nformat ascii 1.0\n");
    let _ = writeln!(out, "element vertex {}", table.vertices.len());
    for axis in ["x", "y", "z"] {
        let _ = writeln!(out, "property float {axis}");
    }
    for channel in ["red", "green", "blue"] {
        let _ = writeln!(out, "property uchar {channel}");
    }
    let _ = writeln!(out, "element face {}", triangles.len());
    out.push_str("property list uchar int vertex_index\nend_header\n");

    for &v in &table.vertices {
        let [r, g, b] = color(v);
        let _ = writeln!(out, "{:.6} {:.6} {:.6} {r} {g} {b}", v.x, v.y, v.z);
    }
    for t in triangles {
        let [i, j, k] = table.face(t);
        let _ = writeln!(out, "3 {i} {j} {k}");
    }
    out
}
