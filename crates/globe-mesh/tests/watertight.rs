//! Topology checks across the whole pipeline: every operation that is meant to
//! produce a closed solid must leave each edge bordered by exactly two
//! consistently wound triangles.

use globe_mesh::*;

fn land(g: GeoCoord) -> f64 {
    if g.lat > 0.2 && g.lat < 1.2 && g.lon > -1.0 && g.lon < 0.5 {
        1.03
    } else {
        1.0
    }
}

fn assert_closed(mesh: &Mesh) {
    assert!(mesh.is_watertight(), "boundary: {:?}", mesh.boundary_edges());
    assert!(mesh.is_consistently_oriented());
    mesh.check_index().unwrap();
}

/// Marks edges of a sphere chosen so that every rewrite case occurs.
fn mixed_marks(mesh: &Mesh) -> Subdivider {
    let mut sub = Subdivider::new();
    for (i, (_, t)) in mesh.triangles().enumerate() {
        match i % 4 {
            0 => sub.add(t[0], t[1]),
            1 => {
                sub.add(t[0], t[1]);
                sub.add(t[1], t[2]);
            }
            2 => {
                sub.add(t[0], t[1]);
                sub.add(t[1], t[2]);
                sub.add(t[2], t[0]);
            }
            _ => {}
        }
    }
    sub
}

#[test]
fn test_sphere_stops_four_topology() {
    let mesh = build_spherical(&ConstantRadius(1.0), 4).unwrap();
    assert_eq!(mesh.len(), 24);
    assert_eq!(mesh.vertex_count(), 14);
    assert_eq!(mesh.find(&[Coord3D::new(0.0, 1.0, 0.0)]).len(), 4);
    assert_eq!(mesh.find(&[Coord3D::new(0.0, -1.0, 0.0)]).len(), 4);
    assert_closed(&mesh);
}

#[test]
fn test_mixed_subdivision_stays_closed() {
    let field = ConstantRadius(1.0);
    let mut mesh = build_spherical(&field, 12).unwrap();
    let sub = mixed_marks(&mesh);
    let stats = sub
        .subdivide(&mut mesh, &SurfaceMidpoint::new(&field))
        .unwrap();
    assert!(stats.single > 0, "{stats:?}");
    assert!(stats.double > 0, "{stats:?}");
    assert!(stats.triple > 0, "{stats:?}");
    assert_closed(&mesh);
}

#[test]
fn test_repeated_subdivision_stays_closed() {
    let field = ConstantRadius(1.0);
    let mut mesh = build_spherical(&field, 6).unwrap();
    for _ in 0..3 {
        let sub = mixed_marks(&mesh);
        sub.subdivide(&mut mesh, &SurfaceMidpoint::new(&field))
            .unwrap();
        assert_closed(&mesh);
    }
}

#[test]
fn test_children_face_parent_direction() {
    let a = Coord3D::new(0.0, 0.0, 0.0);
    let b = Coord3D::new(4.0, 0.0, 0.0);
    let c = Coord3D::new(1.0, 3.0, 0.0);
    let parent = Triangle::new(a, b, c);
    let parent_normal = parent.compute_normal().unwrap();

    for marks in [vec![(a, b)], vec![(b, c), (c, a)], vec![(a, b), (b, c), (c, a)]] {
        let mut mesh = Mesh::new();
        mesh.add(parent);
        let mut sub = Subdivider::new();
        for (p, q) in &marks {
            sub.add(*p, *q);
        }
        sub.subdivide(&mut mesh, &|p: Coord3D, q: Coord3D| p.midpoint(q))
            .unwrap();
        assert_eq!(mesh.len(), marks.len() + 1);
        let area: f64 = mesh.triangles().map(|(_, t)| t.area()).sum();
        assert!((area - parent.area()).abs() < 1e-9);
        for (_, t) in mesh.triangles() {
            let n = t.compute_normal().unwrap();
            assert!(n.dot(parent_normal) >= 0.0, "child {t:?}");
        }
    }
}

#[test]
fn test_split_edge_on_sphere() {
    let field = ConstantRadius(1.0);
    let mut mesh = build_spherical(&field, 8).unwrap();
    let (_, t) = mesh.triangles().next().unwrap();
    let (a, b) = (t[0], t[1]);
    let created = split_edge(&mut mesh, a, b, &SurfaceMidpoint::new(&field)).unwrap();
    assert_eq!(created.len(), 4);
    assert_eq!(mesh.len(), 8 * 8 * 2 - 16 + 2);
    assert_closed(&mesh);
}

#[test]
fn test_refined_stencil_pipeline() {
    let mut mesh = SphericalGrid::new(16, 8).unwrap().build(&land);
    let params = RefineParams {
        iterations: 2,
        tolerance: 1e-3,
    };
    let passes = refine(&mut mesh, &land, params).unwrap();
    assert!(!passes.is_empty());
    assert_closed(&mesh);

    let (mut north, mut south) = split_hemispheres(&mesh, 1e-4);
    assert!(!north.is_empty());
    assert!(!south.is_empty());
    thicken(&mut north, 0.9);
    thicken(&mut south, 0.9);
    assert_closed(&north);
    assert_closed(&south);
}

#[test]
fn test_floaters_after_cut() {
    let field = ConstantRadius(1.0);
    let mut mesh = SphericalGrid::new(12, 6).unwrap().build(&field);
    // Cut a band around the equator; the southern cap becomes a fragment.
    let removed = remove_where(&mut mesh, |t| t.max_y() < 0.6 && t.min_y() > -0.6);
    assert!(removed > 0);
    let before = mesh.len();
    let floating = remove_floaters(&mut mesh);
    assert!(floating > 0);
    assert_eq!(mesh.len(), before - floating);
    assert!(mesh.triangles().all(|(_, t)| t.min_y() > 0.0));
}
