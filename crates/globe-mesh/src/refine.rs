//! Iterative refinement of a mesh toward a radius field.
//!
//! Each pass marks the edges whose endpoints sit at noticeably different radii
//! (coastlines, on a land/sea field) and splits them onto the surface. Flat
//! regions keep their coarse triangles.

use globe_geo::Coord3D;
use tracing::{debug, info};

use crate::error::MeshResult;
use crate::field::{MidpointFn, RadiusFn, SurfaceMidpoint};
use crate::mesh::Mesh;
use crate::subdivide::{SubdivisionStats, Subdivider, split_edge_counted};

/// Settings for [`refine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefineParams {
    /// Maximum number of subdivision passes.
    pub iterations: usize,
    /// Edges whose endpoint radii differ by more than this are split.
    pub tolerance: f64,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            iterations: 7,
            tolerance: 1e-3,
        }
    }
}

/// Refines `mesh` against `field` for up to `params.iterations` passes.
///
/// Returns the statistics of every pass that split at least one edge.
///
/// # Errors
///
/// Propagates [`MeshError::DegenerateTriangle`](crate::MeshError) from the
/// subdivision passes.
pub fn refine<R>(mesh: &mut Mesh, field: &R, params: RefineParams) -> MeshResult<Vec<SubdivisionStats>>
where
    R: RadiusFn + ?Sized,
{
    let tolerance = params.tolerance;
    refine_by(
        mesh,
        |a: Coord3D, b: Coord3D| (a.norm() - b.norm()).abs() > tolerance,
        &SurfaceMidpoint::new(field),
        params.iterations,
    )
}

/// Runs up to `iterations` passes, splitting every edge for which `mark` returns
/// `true` at the point given by `midpoint`. Stops early once a pass marks
/// nothing.
///
/// # Errors
///
/// Propagates errors from [`Subdivider::subdivide`].
pub fn refine_by<F, M>(
    mesh: &mut Mesh,
    mut mark: F,
    midpoint: &M,
    iterations: usize,
) -> MeshResult<Vec<SubdivisionStats>>
where
    F: FnMut(Coord3D, Coord3D) -> bool,
    M: MidpointFn + ?Sized,
{
    let mut passes = Vec::new();
    for pass in 0..iterations {
        let mut subdivider = Subdivider::new();
        for (_, t) in mesh.triangles() {
            for (a, b) in t.edges() {
                if mark(a, b) {
                    subdivider.add(a, b);
                }
            }
        }
        if subdivider.is_empty() {
            debug!(pass, "No edges marked, refinement converged");
            break;
        }

        let stats = subdivider.subdivide(mesh, midpoint)?;
        debug!(
            pass,
            segments = stats.segments,
            rewritten = stats.rewritten(),
            triangles = mesh.len(),
            "Refinement pass complete"
        );
        passes.push(stats);
    }

    log_summary(mesh, &passes);
    Ok(passes)
}

/// Refines like [`refine`], but splits each edge as soon as it is found instead
/// of batching a whole pass.
///
/// Every pass visits the triangles live at its start, longest side first, and
/// splits each of their out-of-tolerance edges with [`split_edge`]. Children
/// created during a pass wait for the next one. Each pass reports every split as
/// one segment and two single-edge rewrites.
///
/// # Errors
///
/// Returns [`MeshError::NonManifoldEdge`](crate::MeshError) when an edge to split
/// does not border exactly two triangles, which means the input was not a closed
/// surface. Splits made before the error stay applied; each of them leaves a
/// valid surface.
///
/// [`split_edge`]: crate::split_edge
pub fn refine_sequential<R>(
    mesh: &mut Mesh,
    field: &R,
    params: RefineParams,
) -> MeshResult<Vec<SubdivisionStats>>
where
    R: RadiusFn + ?Sized,
{
    let midpoint = SurfaceMidpoint::new(field);
    let mut passes = Vec::new();
    for pass in 0..params.iterations {
        let mut stats = SubdivisionStats::default();
        mesh.try_iterate_sorted(
            |a, b| b.max_side_length().total_cmp(&a.max_side_length()),
            |mesh, id| -> MeshResult<()> {
                let Some(&t) = mesh.get(id) else {
                    return Ok(());
                };
                for (a, b) in t.edges() {
                    if (a.norm() - b.norm()).abs() > params.tolerance {
                        let (_, folded) = split_edge_counted(mesh, a, b, &midpoint)?;
                        stats.segments += 1;
                        stats.single += 2;
                        stats.folded += folded;
                    }
                }
                Ok(())
            },
        )?;
        if stats.segments == 0 {
            debug!(pass, "No edges split, refinement converged");
            break;
        }
        debug!(
            pass,
            segments = stats.segments,
            triangles = mesh.len(),
            "Sequential refinement pass complete"
        );
        passes.push(stats);
    }

    log_summary(mesh, &passes);
    Ok(passes)
}

fn log_summary(mesh: &Mesh, passes: &[SubdivisionStats]) {
    info!(
        passes = passes.len(),
        segments = passes.iter().map(|s| s.segments).sum::<usize>(),
        folded = passes.iter().map(|s| s.folded).sum::<usize>(),
        triangles = mesh.len(),
        "Mesh refinement finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ConstantRadius;
    use crate::error::MeshError;
    use crate::sphere::build_spherical;
    use globe_geo::GeoCoord;

    fn bump(g: GeoCoord) -> f64 {
        if g.lat > 0.5 && g.lon.abs() < 1.0 { 1.1 } else { 1.0 }
    }

    #[test]
    fn test_constant_field_converges_immediately() {
        let mut mesh = build_spherical(&ConstantRadius(1.0), 6).unwrap();
        let before = mesh.len();
        let passes = refine(&mut mesh, &ConstantRadius(1.0), RefineParams::default()).unwrap();
        assert!(passes.is_empty());
        assert_eq!(mesh.len(), before);
    }

    #[test]
    fn test_refinement_adds_detail_and_stays_closed() {
        let mut mesh = build_spherical(&bump, 8).unwrap();
        let before = mesh.len();
        let params = RefineParams {
            iterations: 3,
            tolerance: 0.01,
        };
        let passes = refine(&mut mesh, &bump, params).unwrap();
        assert!(!passes.is_empty());
        assert!(passes.len() <= 3);
        assert!(mesh.len() > before);
        assert!(mesh.is_watertight());
        assert!(mesh.is_consistently_oriented());
        mesh.check_index().unwrap();
    }

    #[test]
    fn test_later_passes_keep_winding() {
        for iterations in 1..=3 {
            let mut mesh = build_spherical(&bump, 8).unwrap();
            let params = RefineParams {
                iterations,
                tolerance: 0.01,
            };
            refine(&mut mesh, &bump, params).unwrap();
            assert!(mesh.is_consistently_oriented(), "after {iterations} passes");
        }
    }

    #[test]
    fn test_sequential_refinement_stays_closed() {
        let mut mesh = build_spherical(&bump, 8).unwrap();
        let before = mesh.len();
        let params = RefineParams {
            iterations: 3,
            tolerance: 0.01,
        };
        let passes = refine_sequential(&mut mesh, &bump, params).unwrap();
        assert!(!passes.is_empty());
        let splits: usize = passes.iter().map(|s| s.segments).sum();
        assert_eq!(mesh.len(), before + 2 * splits);
        assert!(mesh.is_watertight());
        assert!(mesh.is_consistently_oriented());
        mesh.check_index().unwrap();
    }

    #[test]
    fn test_sequential_refinement_rejects_open_surface() {
        let mut mesh = build_spherical(&bump, 8).unwrap();
        // A loose triangle whose first edge spans two radii but borders nothing else.
        let a = Coord3D::new(0.0, -0.7, 0.7);
        let b = Coord3D::new(0.0, -0.7, 0.75);
        mesh.add(crate::Triangle::new(a, b, Coord3D::new(0.1, -0.7, 0.7)));
        let params = RefineParams {
            iterations: 1,
            tolerance: 0.01,
        };
        let err = refine_sequential(&mut mesh, &bump, params).unwrap_err();
        assert!(matches!(err, MeshError::NonManifoldEdge { .. }), "{err:?}");
    }

    #[test]
    fn test_zero_iterations_is_noop() {
        let mut mesh = build_spherical(&bump, 8).unwrap();
        let before = mesh.len();
        let passes = refine_by(&mut mesh, |_, _| true, &|a: Coord3D, b: Coord3D| a.midpoint(b), 0)
            .unwrap();
        assert!(passes.is_empty());
        assert_eq!(mesh.len(), before);
    }

    #[test]
    fn test_refine_by_marks_every_edge() {
        let mut mesh = build_spherical(&ConstantRadius(1.0), 4).unwrap();
        let field = ConstantRadius(1.0);
        let passes = refine_by(&mut mesh, |_, _| true, &SurfaceMidpoint::new(&field), 1).unwrap();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].triple, 24);
        assert_eq!(mesh.len(), 96);
        assert!(mesh.is_watertight());
    }
}
