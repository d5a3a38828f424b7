//! Shell operations that turn a surface mesh into printable parts: cutting away
//! triangles, dropping disconnected fragments, splitting at the equator and
//! giving an open surface a wall thickness.

use std::collections::VecDeque;

use globe_geo::Coord3D;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::mesh::{Mesh, TriangleId};
use crate::triangle::Triangle;

/// Removes every triangle for which `pred` returns `true`. Returns the number
/// removed.
pub fn remove_where<P>(mesh: &mut Mesh, mut pred: P) -> usize
where
    P: FnMut(&Triangle) -> bool,
{
    let mut removed = 0;
    mesh.iterate(|mesh, id| {
        if mesh.get(id).is_some_and(&mut pred) {
            mesh.remove(id);
            removed += 1;
        }
    });
    removed
}

/// Keeps only the edge-connected component containing the triangle whose first
/// vertex is highest along `y`, and removes everything else.
///
/// Returns the number of triangles removed.
pub fn remove_floaters(mesh: &mut Mesh) -> usize {
    let Some(seed) = mesh
        .triangles()
        .max_by(|(_, a), (_, b)| a[0].y.total_cmp(&b[0].y))
        .map(|(id, _)| id)
    else {
        return 0;
    };

    let mut reached: FxHashSet<TriangleId> = FxHashSet::default();
    let mut queue = VecDeque::from([seed]);
    reached.insert(seed);
    while let Some(id) = queue.pop_front() {
        for next in mesh.neighbors(id) {
            if reached.insert(next) {
                queue.push_back(next);
            }
        }
    }

    let mut removed = 0;
    for id in mesh.ids() {
        if !reached.contains(&id) {
            mesh.remove(id);
            removed += 1;
        }
    }
    debug!(kept = reached.len(), removed, "Removed floating fragments");
    removed
}

/// Splits a mesh at the equatorial plane into `(north, south)`.
///
/// A triangle goes north when its lowest vertex lies above `-epsilon` and south
/// when its highest vertex lies below `epsilon`, so triangles lying within the
/// band go to both. A triangle crossing the band (as on a grid with no vertex
/// row at the equator) goes to the side holding its centroid. No triangle is
/// dropped.
pub fn split_hemispheres(mesh: &Mesh, epsilon: f64) -> (Mesh, Mesh) {
    let mut north = Mesh::new();
    let mut south = Mesh::new();
    let mut crossing = 0;
    for (_, t) in mesh.triangles() {
        let above = t.min_y() > -epsilon;
        let below = t.max_y() < epsilon;
        if above || below {
            if above {
                north.add(*t);
            }
            if below {
                south.add(*t);
            }
            continue;
        }
        crossing += 1;
        if t[0].y + t[1].y + t[2].y >= 0.0 {
            north.add(*t);
        } else {
            south.add(*t);
        }
    }
    debug!(
        north = north.len(),
        south = south.len(),
        crossing,
        "Split mesh at the equator"
    );
    (north, south)
}

/// Gives an open surface a wall thickness.
///
/// Adds a copy of every triangle scaled by `scale` about the origin, facing the
/// other way, then joins each boundary edge to its scaled twin with two
/// triangles. A surface with consistent winding comes out closed and
/// consistently wound.
///
/// Returns the number of triangles added.
pub fn thicken(mesh: &mut Mesh, scale: f64) -> usize {
    let boundary: Vec<(Coord3D, Coord3D)> = mesh
        .triangles()
        .flat_map(|(_, t)| t.edges())
        .filter(|&(a, b)| mesh.find(&[a, b]).len() == 1)
        .collect();
    let surface: Vec<Triangle> = mesh.triangles().map(|(_, t)| *t).collect();

    let before = mesh.len();
    for t in &surface {
        mesh.add(t.scaled(scale).flipped());
    }
    for &(a, b) in &boundary {
        let sa = a.scale(scale);
        let sb = b.scale(scale);
        mesh.add(Triangle::new(b, a, sa));
        mesh.add(Triangle::new(b, sa, sb));
    }
    let added = mesh.len() - before;
    debug!(walls = boundary.len(), added, "Thickened surface into a closed shell");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ConstantRadius;
    use crate::sphere::{SphericalGrid, build_spherical};

    fn p(x: f64, y: f64, z: f64) -> Coord3D {
        Coord3D::new(x, y, z)
    }

    #[test]
    fn test_remove_where_counts() {
        let mut mesh = build_spherical(&ConstantRadius(1.0), 4).unwrap();
        let removed = remove_where(&mut mesh, |t| t.min_y() > 0.5);
        assert_eq!(removed, 4);
        assert_eq!(mesh.len(), 20);
        assert_eq!(remove_where(&mut mesh, |_| false), 0);
        mesh.check_index().unwrap();
    }

    #[test]
    fn test_remove_floaters_keeps_top_component() {
        let mut mesh = build_spherical(&ConstantRadius(1.0), 6).unwrap();
        let sphere_len = mesh.len();
        mesh.add(Triangle::new(p(5.0, 0.0, 0.0), p(6.0, 0.0, 0.0), p(5.0, 0.0, 1.0)));
        mesh.add(Triangle::new(p(6.0, 0.0, 0.0), p(6.0, 0.0, 1.0), p(5.0, 0.0, 1.0)));

        assert_eq!(remove_floaters(&mut mesh), 2);
        assert_eq!(mesh.len(), sphere_len);
        assert!(mesh.is_watertight());
    }

    #[test]
    fn test_remove_floaters_empty() {
        let mut mesh = Mesh::new();
        assert_eq!(remove_floaters(&mut mesh), 0);
    }

    #[test]
    fn test_split_hemispheres() {
        let mesh = SphericalGrid::new(8, 4).unwrap().build(&ConstantRadius(1.0));
        let (north, south) = split_hemispheres(&mesh, 1e-4);
        assert_eq!(north.len(), mesh.len() / 2);
        assert_eq!(south.len(), mesh.len() / 2);
        assert!(north.triangles().all(|(_, t)| t.min_y() > -1e-4));
        assert_eq!(north.boundary_edges().len(), 8);
    }

    #[test]
    fn test_split_odd_grid_keeps_equatorial_band() {
        let mesh = build_spherical(&ConstantRadius(1.0), 9).unwrap();
        let (mut north, mut south) = split_hemispheres(&mesh, 1e-4);
        assert_eq!(north.len() + south.len(), mesh.len());
        assert_eq!(north.len(), south.len());
        assert_eq!(north.boundary_edges().len(), 2 * 9);

        thicken(&mut north, 0.9);
        thicken(&mut south, 0.9);
        assert!(north.is_watertight());
        assert!(south.is_watertight());
        assert!(north.is_consistently_oriented());
    }

    #[test]
    fn test_thicken_closes_hemisphere() {
        let mesh = SphericalGrid::new(8, 4).unwrap().build(&ConstantRadius(1.0));
        let (mut north, _) = split_hemispheres(&mesh, 1e-4);
        let surface = north.len();
        let added = thicken(&mut north, 0.9);
        assert_eq!(added, surface + 2 * 8);
        assert!(north.is_watertight());
        assert!(north.is_consistently_oriented());
    }

    #[test]
    fn test_thicken_single_triangle() {
        let mut mesh = Mesh::new();
        mesh.add(Triangle::new(p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(0.0, 0.0, 1.0)));
        assert_eq!(thicken(&mut mesh, 0.5), 1 + 6);
        assert_eq!(mesh.len(), 8);
        assert!(mesh.is_watertight());
        assert!(mesh.is_consistently_oriented());
    }
}
