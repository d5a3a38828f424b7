//! Crack-free batch subdivision.
//!
//! A [`Subdivider`] collects edges to split, then rewrites every triangle that
//! touches a marked edge in one pass. Both triangles on either side of a marked
//! edge receive the same midpoint vertex, so the result has no T-junctions.

use globe_geo::Coord3D;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{trace, warn};

use crate::error::{MeshError, MeshResult};
use crate::field::MidpointFn;
use crate::mesh::{Mesh, TriangleId};
use crate::segment::Segment;
use crate::triangle::Triangle;

/// Counters for one subdivision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubdivisionStats {
    /// Distinct edges split.
    pub segments: usize,
    /// Triangles rewritten with one marked edge.
    pub single: usize,
    /// Triangles rewritten with two marked edges.
    pub double: usize,
    /// Triangles rewritten with all three edges marked.
    pub triple: usize,
    /// Children whose normal points away from their parent's. Children keep the
    /// parent's winding, so this only happens where displaced midpoints fold the
    /// surface over.
    pub folded: usize,
}

impl SubdivisionStats {
    /// Total number of parent triangles replaced.
    #[must_use]
    pub fn rewritten(&self) -> usize {
        self.single + self.double + self.triple
    }
}

/// Accumulates edges to split and applies them to a mesh in one pass.
#[derive(Clone, Debug, Default)]
pub struct Subdivider {
    pending: FxHashSet<Segment>,
}

impl Subdivider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the edge `(a, b)`. Marking an edge twice, in either direction, has no
    /// further effect.
    pub fn add(&mut self, a: Coord3D, b: Coord3D) {
        self.pending.insert(Segment::new(a, b));
    }

    #[must_use]
    pub fn is_marked(&self, a: Coord3D, b: Coord3D) -> bool {
        self.pending.contains(&Segment::new(a, b))
    }

    /// Number of distinct marked edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Splits every marked edge of `mesh` at the point chosen by `midpoint`.
    ///
    /// Midpoints are computed once per edge, then the children of every affected
    /// triangle are built and checked without touching the mesh. Only when all of
    /// them are valid is each parent replaced by its 2, 3 or 4 children. Children
    /// inherit the parent's winding. Edges marked here but absent from the mesh
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateTriangle`] if a parent or child has no
    /// normal. The mesh is left unchanged.
    pub fn subdivide<M>(&self, mesh: &mut Mesh, midpoint: &M) -> MeshResult<SubdivisionStats>
    where
        M: MidpointFn + ?Sized,
    {
        let midpoints: FxHashMap<Segment, Coord3D> = self
            .pending
            .iter()
            .map(|seg| (*seg, midpoint.midpoint(seg.start(), seg.end())))
            .collect();

        let mut stats = SubdivisionStats {
            segments: midpoints.len(),
            ..SubdivisionStats::default()
        };
        if midpoints.is_empty() {
            return Ok(stats);
        }

        let mut plan: FxHashMap<TriangleId, Vec<Triangle>> = FxHashMap::default();
        for (id, parent) in mesh.triangles() {
            let mids = parent
                .edges()
                .map(|(a, b)| midpoints.get(&Segment::new(a, b)).copied());
            let children = split_children(parent, mids);
            match children.len() {
                0 => continue,
                2 => stats.single += 1,
                3 => stats.double += 1,
                _ => stats.triple += 1,
            }
            stats.folded += count_folded(parent, &children)?;
            plan.insert(id, children);
        }

        mesh.iterate(|mesh, id| {
            if let Some(children) = plan.remove(&id) {
                mesh.replace(id, children);
            }
        });

        if stats.folded > 0 {
            warn!(folded = stats.folded, "Subdivision folded children over their parents");
        }
        trace!(
            segments = stats.segments,
            single = stats.single,
            double = stats.double,
            triple = stats.triple,
            "Subdivision pass applied"
        );
        Ok(stats)
    }
}

/// Splits the single edge `(a, b)` immediately, fanning both bordering triangles
/// around the new vertex.
///
/// Returns the handles of the four children.
///
/// # Errors
///
/// Returns [`MeshError::NonManifoldEdge`] if the edge does not border exactly two
/// live triangles, or [`MeshError::DegenerateTriangle`] if a normal cannot be
/// computed. On error the mesh is left unchanged.
pub fn split_edge<M>(
    mesh: &mut Mesh,
    a: Coord3D,
    b: Coord3D,
    midpoint: &M,
) -> MeshResult<Vec<TriangleId>>
where
    M: MidpointFn + ?Sized,
{
    split_edge_counted(mesh, a, b, midpoint).map(|(created, _)| created)
}

/// [`split_edge`], also returning the number of folded children.
pub(crate) fn split_edge_counted<M>(
    mesh: &mut Mesh,
    a: Coord3D,
    b: Coord3D,
    midpoint: &M,
) -> MeshResult<(Vec<TriangleId>, usize)>
where
    M: MidpointFn + ?Sized,
{
    let found = mesh.find(&[a, b]);
    if found.len() != 2 || a == b {
        return Err(MeshError::NonManifoldEdge {
            a,
            b,
            count: found.len(),
        });
    }

    let mp = midpoint.midpoint(a, b);
    let seg = Segment::new(a, b);
    let mut plan = Vec::with_capacity(2);
    let mut folded = 0;
    for id in found {
        let Some(parent) = mesh.get(id) else {
            continue;
        };
        let mids = parent
            .edges()
            .map(|(x, y)| (Segment::new(x, y) == seg).then_some(mp));
        let children = split_children(parent, mids);
        folded += count_folded(parent, &children)?;
        plan.push((id, children));
    }

    let mut created = Vec::with_capacity(4);
    for (id, children) in plan {
        created.extend(mesh.replace(id, children).unwrap_or_default());
    }
    if folded > 0 {
        warn!(folded, "Edge split folded children over their parents");
    }
    Ok((created, folded))
}

/// Children of `parent` given the midpoint of each of its edges in winding order
/// (`None` for an edge that is not split). Every child keeps the parent's
/// winding, so each directed parent edge survives as directed child edges.
/// Returns no children when no edge is split.
fn split_children(parent: &Triangle, mids: [Option<Coord3D>; 3]) -> Vec<Triangle> {
    match mids {
        [None, None, None] => Vec::new(),
        [Some(m), None, None] => split_one(parent, 0, m),
        [None, Some(m), None] => split_one(parent, 1, m),
        [None, None, Some(m)] => split_one(parent, 2, m),
        [None, Some(m1), Some(m2)] => split_two(parent, 0, m1, m2),
        [Some(m0), None, Some(m2)] => split_two(parent, 1, m2, m0),
        [Some(m0), Some(m1), None] => split_two(parent, 2, m0, m1),
        [Some(m01), Some(m12), Some(m20)] => {
            let [v0, v1, v2] = parent.0;
            vec![
                Triangle::new(v0, m01, m20),
                Triangle::new(m01, v1, m12),
                Triangle::new(m20, m12, v2),
                Triangle::new(m01, m12, m20),
            ]
        }
    }
}

/// Fan for edge `i` (from vertex `i` to vertex `i + 1`) split at `m`.
fn split_one(parent: &Triangle, i: usize, m: Coord3D) -> Vec<Triangle> {
    let v = parent.0;
    let (a, b, apex) = (v[i], v[(i + 1) % 3], v[(i + 2) % 3]);
    vec![Triangle::new(a, m, apex), Triangle::new(m, b, apex)]
}

/// Edge `k` (from `a` to `b`) is kept; `b -> c` is split at `m_bc` and
/// `c -> a` at `m_ca`. Cuts off the corner at `c` and splits the remaining quad.
fn split_two(parent: &Triangle, k: usize, m_bc: Coord3D, m_ca: Coord3D) -> Vec<Triangle> {
    let v = parent.0;
    let (a, b, c) = (v[k], v[(k + 1) % 3], v[(k + 2) % 3]);
    vec![
        Triangle::new(c, m_ca, m_bc),
        Triangle::new(a, b, m_bc),
        Triangle::new(a, m_bc, m_ca),
    ]
}

/// Number of `children` facing away from `parent`.
fn count_folded(parent: &Triangle, children: &[Triangle]) -> MeshResult<usize> {
    let normal = parent.compute_normal()?;
    let mut folded = 0;
    for child in children {
        if child.compute_normal()?.dot(normal) < 0.0 {
            folded += 1;
        }
    }
    Ok(folded)
}
