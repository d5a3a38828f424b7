//! Binary STL.
//!
//! Layout: an 80-byte zero header, a little-endian `u32` triangle count, then one
//! 50-byte record per triangle holding the unit normal and three vertices as
//! little-endian `f32` triples followed by a zero `u16` attribute word.

use std::io::Write;

use globe_geo::Coord3D;
use globe_mesh::Triangle;
use tracing::debug;

use crate::error::ExportError;

/// Size of the header preceding the triangle count.
pub const HEADER_LEN: usize = 80;

/// Size of one triangle record.
pub const RECORD_LEN: usize = 50;

/// Encodes `triangles` as a binary STL file in memory.
///
/// Degenerate triangles are written with a zero normal.
pub fn encode_stl(triangles: &[Triangle]) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + triangles.len() * RECORD_LEN);
    write_stl(&mut buf, triangles)?;
    Ok(buf)
}

/// Streams `triangles` as binary STL to `writer`.
pub fn write_stl<W: Write>(mut writer: W, triangles: &[Triangle]) -> Result<(), ExportError> {
    let count =
        u32::try_from(triangles.len()).map_err(|_| ExportError::TooManyTriangles(triangles.len()))?;
    writer.write_all(&[0u8; HEADER_LEN])?;
    writer.write_all(&count.to_le_bytes())?;

    let mut degenerate = 0usize;
    let mut record = [0u8; RECORD_LEN];
    for t in triangles {
        let normal = t.compute_normal().unwrap_or_else(|_| {
            degenerate += 1;
            Coord3D::ZERO
        });
        let mut offset = 0;
        for v in std::iter::once(normal).chain(t.vertices().iter().copied()) {
            for component in v.to_f32_array() {
                record[offset..offset + 4].copy_from_slice(&component.to_le_bytes());
                offset += 4;
            }
        }
        record[48..50].copy_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }
    writer.flush()?;

    debug!(triangles = count, degenerate, "Wrote binary STL");
    Ok(())
}
