//! Vertex deduplication shared by the indexed formats.

use globe_geo::Coord3D;
use globe_mesh::Triangle;
use rustc_hash::FxHashMap;

/// Distinct vertices in first-seen order, with a lookup from value to index.
#[derive(Debug, Default)]
pub(crate) struct VertexTable {
    pub(crate) vertices: Vec<Coord3D>,
    index: FxHashMap<Coord3D, usize>,
}

impl VertexTable {
    pub(crate) fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut table = Self::default();
        for t in triangles {
            for &v in t.vertices() {
                table.insert(v);
            }
        }
        table
    }

    fn insert(&mut self, v: Coord3D) -> usize {
        *self.index.entry(v).or_insert_with(|| {
            self.vertices.push(v);
            self.vertices.len() - 1
        })
    }

    /// Zero-based index of a vertex. Only valid for vertices of the triangles the
    /// table was built from.
    pub(crate) fn index_of(&self, v: Coord3D) -> usize {
        self.index[&v]
    }

    /// Zero-based indices of a triangle's corners.
    pub(crate) fn face(&self, t: &Triangle) -> [usize; 3] {
        t.vertices().map(|v| self.index_of(v))
    }
}
