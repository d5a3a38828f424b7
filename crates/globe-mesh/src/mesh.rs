//! Triangle mesh with identity-tracked faces and a vertex adjacency index.
//!
//! Triangles live in a [`SlotMap`] and are addressed by [`TriangleId`] handles.
//! Two triangles with identical vertices are distinct entities, which the
//! double-walled shells built by [`thicken`](crate::thicken) rely on. A
//! [`FxHashMap`] from exact vertex value to incident handles answers neighbor and
//! edge queries without scanning the whole mesh.

use std::cmp::Ordering;

use globe_geo::Coord3D;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{SlotMap, new_key_type};

use crate::error::{MeshError, MeshResult};
use crate::segment::Segment;
use crate::triangle::Triangle;

new_key_type! {
    /// Stable handle to a triangle in a [`Mesh`].
    ///
    /// Handles are minted by [`Mesh::add`] and never reused for a different
    /// triangle while the mesh lives, so a stale handle simply stops resolving.
    pub struct TriangleId;
}

/// A collection of triangles tracked by handle, plus an index from each vertex to
/// the triangles touching it.
///
/// The index is kept consistent with the triangle set on every mutation: each
/// live triangle is listed under each of its distinct vertices, and removed
/// triangles appear nowhere.
///
/// The mesh has no interior locking. Mutation goes through `&mut self`.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    triangles: SlotMap<TriangleId, Triangle>,
    vertex_index: FxHashMap<Coord3D, Vec<TriangleId>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a triangle under a fresh handle and registers it for each vertex.
    ///
    /// Adding a triangle equal in value to one already present creates a second,
    /// distinct entity.
    pub fn add(&mut self, triangle: Triangle) -> TriangleId {
        let id = self.triangles.insert(triangle);
        for v in distinct_vertices(&triangle) {
            self.vertex_index.entry(v).or_default().push(id);
        }
        id
    }

    /// Removes a triangle by handle and purges it from the vertex index.
    ///
    /// Returns `None` (and does nothing) if the handle is not live.
    pub fn remove(&mut self, id: TriangleId) -> Option<Triangle> {
        let triangle = self.triangles.remove(id)?;
        for v in distinct_vertices(&triangle) {
            if let Some(list) = self.vertex_index.get_mut(&v) {
                if let Some(pos) = list.iter().position(|&t| t == id) {
                    list.swap_remove(pos);
                }
                if list.is_empty() {
                    self.vertex_index.remove(&v);
                }
            }
        }
        Some(triangle)
    }

    /// Removes `id` and inserts `children` in one step.
    ///
    /// Returns the handles of the children, or `None` (leaving the mesh untouched)
    /// if `id` is not live.
    pub fn replace<I>(&mut self, id: TriangleId, children: I) -> Option<Vec<TriangleId>>
    where
        I: IntoIterator<Item = Triangle>,
    {
        self.remove(id)?;
        Some(children.into_iter().map(|t| self.add(t)).collect())
    }

    #[must_use]
    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: TriangleId) -> bool {
        self.triangles.contains_key(id)
    }

    /// Number of live triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of distinct vertices referenced by live triangles.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_index.len()
    }

    /// Handles of all live triangles, in arbitrary order.
    #[must_use]
    pub fn ids(&self) -> Vec<TriangleId> {
        self.triangles.keys().collect()
    }

    /// Live triangles with their handles, in arbitrary order.
    pub fn triangles(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> {
        self.triangles.iter()
    }

    /// Handles of the live triangles touching `vertex`.
    #[must_use]
    pub fn incident(&self, vertex: Coord3D) -> &[TriangleId] {
        self.vertex_index
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Calls `visit` once for every triangle live at the moment of the call.
    ///
    /// The set of handles is snapshotted up front. Triangles the visitor adds are
    /// not visited in this pass. Triangles it removes before their turn are
    /// skipped.
    pub fn iterate<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut Mesh, TriangleId),
    {
        let snapshot = self.ids();
        self.visit_snapshot(snapshot, |mesh, id| {
            visit(mesh, id);
            Ok::<(), std::convert::Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
    }

    /// Like [`Mesh::iterate`], but the snapshot is sorted with `cmp` first.
    pub fn iterate_sorted<C, F>(&mut self, cmp: C, mut visit: F)
    where
        C: FnMut(&Triangle, &Triangle) -> Ordering,
        F: FnMut(&mut Mesh, TriangleId),
    {
        self.try_iterate_sorted(cmp, |mesh, id| {
            visit(mesh, id);
            Ok::<(), std::convert::Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
    }

    /// Fallible form of [`Mesh::iterate_sorted`]: stops at the first error and
    /// returns it. Mutations made by earlier visits are kept.
    pub fn try_iterate_sorted<C, E, F>(&mut self, mut cmp: C, visit: F) -> Result<(), E>
    where
        C: FnMut(&Triangle, &Triangle) -> Ordering,
        F: FnMut(&mut Mesh, TriangleId) -> Result<(), E>,
    {
        let mut snapshot = self.ids();
        snapshot.sort_by(|&a, &b| cmp(&self.triangles[a], &self.triangles[b]));
        self.visit_snapshot(snapshot, visit)
    }

    fn visit_snapshot<E, F>(&mut self, snapshot: Vec<TriangleId>, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&mut Mesh, TriangleId) -> Result<(), E>,
    {
        for id in snapshot {
            if self.contains(id) {
                visit(self, id)?;
            }
        }
        Ok(())
    }

    /// Other live triangles sharing at least two vertices (a full edge) with `id`.
    ///
    /// Triangles touching only at a corner are not neighbors. Returns an empty list
    /// for a dead handle. The result is sorted by handle.
    #[must_use]
    pub fn neighbors(&self, id: TriangleId) -> Vec<TriangleId> {
        let Some(triangle) = self.get(id) else {
            return Vec::new();
        };
        let mut shared: FxHashMap<TriangleId, usize> = FxHashMap::default();
        for v in distinct_vertices(triangle) {
            for &other in self.incident(v) {
                if other != id {
                    *shared.entry(other).or_default() += 1;
                }
            }
        }
        let mut out: Vec<TriangleId> = shared
            .into_iter()
            .filter(|&(_, count)| count >= 2)
            .map(|(other, _)| other)
            .collect();
        out.sort_unstable();
        out
    }

    /// Live triangles containing every vertex in `vertices`.
    ///
    /// With two vertices this returns the triangles bordering that edge: two on a
    /// closed manifold, one on a boundary. An empty query matches nothing. The
    /// result is sorted by handle.
    #[must_use]
    pub fn find(&self, vertices: &[Coord3D]) -> Vec<TriangleId> {
        let Some((first, rest)) = vertices.split_first() else {
            return Vec::new();
        };
        let mut out: Vec<TriangleId> = self
            .incident(*first)
            .iter()
            .copied()
            .filter(|&id| {
                let t = &self.triangles[id];
                rest.iter().all(|&v| t.contains(v))
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// Live triangles sorted by their vertices, for deterministic output.
    #[must_use]
    pub fn sorted_triangles(&self) -> Vec<Triangle> {
        let mut out: Vec<Triangle> = self.triangles.values().copied().collect();
        out.sort_by(|a, b| {
            a.0.iter()
                .zip(b.0.iter())
                .map(|(p, q)| p.canonical_cmp(q))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        out
    }

    /// Number of live triangles bordering each undirected edge.
    #[must_use]
    pub fn edge_usage(&self) -> FxHashMap<Segment, usize> {
        let mut usage: FxHashMap<Segment, usize> = FxHashMap::default();
        for t in self.triangles.values() {
            for (a, b) in t.edges() {
                *usage.entry(Segment::new(a, b)).or_default() += 1;
            }
        }
        usage
    }

    /// Edges bordered by exactly one triangle, sorted.
    #[must_use]
    pub fn boundary_edges(&self) -> Vec<Segment> {
        let mut out: Vec<Segment> = self
            .edge_usage()
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|(seg, _)| seg)
            .collect();
        out.sort_unstable();
        out
    }

    /// `true` if the mesh is non-empty and every edge borders exactly two triangles.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        !self.is_empty() && self.edge_usage().values().all(|&count| count == 2)
    }

    /// `true` if no directed edge is traversed by more than one triangle, which on a
    /// watertight mesh means all faces agree on which side is outside.
    #[must_use]
    pub fn is_consistently_oriented(&self) -> bool {
        let mut seen: FxHashSet<(Coord3D, Coord3D)> = FxHashSet::default();
        self.triangles
            .values()
            .flat_map(|t| t.edges())
            .all(|edge| seen.insert(edge))
    }

    /// Verifies the vertex index against the live triangle set.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IndexInconsistent`] naming the first handle that is
    /// missing from, stale in, or duplicated in the index.
    pub fn check_index(&self) -> MeshResult<()> {
        for (id, t) in &self.triangles {
            for v in distinct_vertices(t) {
                let listed = self.incident(v).iter().filter(|&&x| x == id).count();
                if listed != 1 {
                    return Err(MeshError::IndexInconsistent {
                        id,
                        reason: format!("listed {listed} times under vertex {v:?}"),
                    });
                }
            }
        }
        for (v, list) in &self.vertex_index {
            if list.is_empty() {
                continue;
            }
            for &id in list {
                match self.triangles.get(id) {
                    None => {
                        return Err(MeshError::IndexInconsistent {
                            id,
                            reason: format!("dead handle listed under vertex {v:?}"),
                        });
                    }
                    Some(t) if !t.contains(*v) => {
                        return Err(MeshError::IndexInconsistent {
                            id,
                            reason: format!("listed under foreign vertex {v:?}"),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        let mut mesh = Mesh::new();
        mesh.extend(iter);
        mesh
    }
}

impl Extend<Triangle> for Mesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        for t in iter {
            self.add(t);
        }
    }
}

/// The vertices of `t` with repeats dropped, so a degenerate triangle is indexed
/// once per distinct point.
fn distinct_vertices(t: &Triangle) -> impl Iterator<Item = Coord3D> + '_ {
    t.0.iter()
        .enumerate()
        .filter(|&(i, v)| !t.0[..i].contains(v))
        .map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Coord3D {
        Coord3D::new(x, y, z)
    }

    /// Regular tetrahedron with outward-facing winding.
    fn tetrahedron() -> Mesh {
        let a = p(1.0, 1.0, 1.0);
        let b = p(1.0, -1.0, -1.0);
        let c = p(-1.0, 1.0, -1.0);
        let d = p(-1.0, -1.0, 1.0);
        [
            Triangle::new(a, b, c),
            Triangle::new(a, d, b),
            Triangle::new(a, c, d),
            Triangle::new(b, d, c),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert!(!mesh.is_watertight());
        assert!(mesh.find(&[p(0.0, 0.0, 0.0)]).is_empty());
    }

    #[test]
    fn test_add_registers_vertices() {
        let mut mesh = Mesh::new();
        let t = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        let id = mesh.add(t);
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        for v in t.0 {
            assert_eq!(mesh.incident(v), &[id]);
        }
        mesh.check_index().unwrap();
    }

    #[test]
    fn test_identical_values_are_distinct_entities() {
        let mut mesh = Mesh::new();
        let t = Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        let first = mesh.add(t);
        let second = mesh.add(t);
        assert_ne!(first, second);
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.find(&t.0), vec![first, second]);

        mesh.remove(first);
        assert_eq!(mesh.find(&t.0), vec![second]);
        mesh.check_index().unwrap();
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut mesh = tetrahedron();
        let id = mesh.ids()[0];
        assert!(mesh.remove(id).is_some());
        assert!(mesh.remove(id).is_none());
        assert_eq!(mesh.len(), 3);
        for (_, t) in mesh.triangles() {
            for v in t.0 {
                assert!(!mesh.incident(v).contains(&id));
            }
        }
        mesh.check_index().unwrap();
    }

    #[test]
    fn test_remove_last_user_drops_vertex() {
        let mut mesh = tetrahedron();
        let d = p(-1.0, -1.0, 1.0);
        for id in mesh.find(&[d]) {
            mesh.remove(id);
        }
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.incident(d).is_empty());
    }

    #[test]
    fn test_tetrahedron_is_closed_and_oriented() {
        let mesh = tetrahedron();
        assert!(mesh.is_watertight());
        assert!(mesh.is_consistently_oriented());
        assert!(mesh.boundary_edges().is_empty());
        for (_, t) in mesh.triangles() {
            let n = t.compute_normal().unwrap();
            let centroid = (t[0] + t[1] + t[2]).scale(1.0 / 3.0);
            assert!(n.dot(centroid) > 0.0, "face {t:?} points inward");
        }
    }

    #[test]
    fn test_neighbors_require_shared_edge() {
        let mut mesh = Mesh::new();
        let o = p(0.0, 0.0, 0.0);
        let a = mesh.add(Triangle::new(o, p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)));
        let edge = mesh.add(Triangle::new(o, p(0.0, 1.0, 0.0), p(-1.0, 0.0, 0.0)));
        let corner = mesh.add(Triangle::new(o, p(0.0, -1.0, 0.0), p(1.0, -1.0, 0.0)));

        assert_eq!(mesh.neighbors(a), vec![edge]);
        assert_eq!(mesh.neighbors(edge), vec![a]);
        assert!(mesh.neighbors(corner).is_empty());
    }

    #[test]
    fn test_tetrahedron_neighbors() {
        let mesh = tetrahedron();
        for id in mesh.ids() {
            let n = mesh.neighbors(id);
            assert_eq!(n.len(), 3);
            assert!(!n.contains(&id));
        }
    }

    #[test]
    fn test_find_edge() {
        let mesh = tetrahedron();
        let a = p(1.0, 1.0, 1.0);
        let b = p(1.0, -1.0, -1.0);
        assert_eq!(mesh.find(&[a, b]).len(), 2);
        assert_eq!(mesh.find(&[b, a]).len(), 2);
        assert_eq!(mesh.find(&[a]).len(), 3);
        assert!(mesh.find(&[a, p(5.0, 5.0, 5.0)]).is_empty());
    }

    #[test]
    fn test_iterate_snapshot_skips_added() {
        let mut mesh = tetrahedron();
        let mut visited = 0;
        mesh.iterate(|mesh, id| {
            visited += 1;
            let t = *mesh.get(id).unwrap();
            mesh.add(t.scaled(0.5));
        });
        assert_eq!(visited, 4);
        assert_eq!(mesh.len(), 8);
    }

    #[test]
    fn test_iterate_skips_removed_before_turn() {
        let mut mesh = tetrahedron();
        let mut visited = Vec::new();
        mesh.iterate(|mesh, id| {
            visited.push(id);
            for other in mesh.ids() {
                if other != id {
                    mesh.remove(other);
                }
            }
        });
        assert_eq!(visited.len(), 1);
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn test_iterate_sorted_order() {
        let mut mesh = Mesh::new();
        for size in [3.0, 1.0, 2.0] {
            mesh.add(Triangle::new(
                p(0.0, 0.0, 0.0),
                p(size, 0.0, 0.0),
                p(0.0, size, 0.0),
            ));
        }
        let mut sizes = Vec::new();
        mesh.iterate_sorted(
            |a, b| b.max_side_length().total_cmp(&a.max_side_length()),
            |mesh, id| sizes.push(mesh.get(id).unwrap()[1].x),
        );
        assert_eq!(sizes, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_try_iterate_sorted_stops_on_error() {
        let mut mesh = tetrahedron();
        let mut visited = 0;
        let result: Result<(), &str> = mesh.try_iterate_sorted(
            |a, b| a.max_y().total_cmp(&b.max_y()),
            |mesh, id| {
                visited += 1;
                if visited == 2 {
                    mesh.remove(id);
                    Err("stop")
                } else {
                    Ok(())
                }
            },
        );
        assert_eq!(result, Err("stop"));
        assert_eq!(visited, 2);
        assert_eq!(mesh.len(), 3);
    }

    #[test]
    fn test_replace_swaps_parent_for_children() {
        let mut mesh = tetrahedron();
        let id = mesh.ids()[0];
        let parent = *mesh.get(id).unwrap();
        let children = mesh
            .replace(id, [parent.scaled(2.0), parent.scaled(3.0)])
            .unwrap();
        assert_eq!(children.len(), 2);
        assert!(!mesh.contains(id));
        assert_eq!(mesh.len(), 5);
        assert!(mesh.replace(id, [parent]).is_none());
        assert_eq!(mesh.len(), 5);
        mesh.check_index().unwrap();
    }

    #[test]
    fn test_index_consistent_after_churn() {
        let mut mesh = tetrahedron();
        let ids = mesh.ids();
        mesh.remove(ids[1]);
        let extra = mesh.add(Triangle::new(
            p(1.0, 1.0, 1.0),
            p(2.0, 0.0, 0.0),
            p(0.0, 2.0, 0.0),
        ));
        mesh.remove(ids[3]);
        mesh.remove(extra);
        mesh.add(Triangle::new(
            p(1.0, 1.0, 1.0),
            p(1.0, -1.0, -1.0),
            p(1.0, 1.0, 1.0),
        ));
        mesh.check_index().unwrap();
        for id in [ids[1], ids[3], extra] {
            for (_, t) in mesh.triangles() {
                for v in t.0 {
                    assert!(!mesh.incident(v).contains(&id));
                }
            }
        }
    }
}
