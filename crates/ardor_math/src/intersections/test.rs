use crate::*;

fn down_ray(x: f64, y: f64) -> Ray3 {
    Ray3::new(Vector3::new(x, y, 3.0), Vector3::NEG_UNIT_Z)
}

#[test]
fn ray_triangle() {
    let v0 = Vector3::new(-1.0, -1.0, -1.0);
    let v1 = Vector3::new(1.0, -1.0, -1.0);
    let v2 = Vector3::new(1.0, 1.0, -1.0);

    // Inside
    let hit = down_ray(0.5, -0.5).intersects_triangle(v0, v1, v2);
    assert_eq!(hit, Some(Vector3::new(0.5, -0.5, -1.0)));
    assert_eq!(down_ray(0.5, -0.5).distance_to_primitive(&[v0, v1, v2]), 4.0);
    assert!(down_ray(0.5, -0.5).intersects_triangle_planar(v0, v1, v2).is_some());

    // Edges and vertices count as hits
    for (x, y) in [(0.0, -1.0), (0.0, 0.0), (1.0, 0.0), (-1.0, -1.0), (1.0, -1.0), (1.0, 1.0)] {
        assert!(down_ray(x, y).intersects_triangle(v0, v1, v2).is_some(), "({x}, {y})");
    }

    // Just outside the horizontal, diagonal and vertical edge
    for (x, y) in [(0.0, -1.1), (-0.1, 0.1), (1.1, 0.0)] {
        assert_eq!(down_ray(x, y).intersects_triangle(v0, v1, v2), None, "({x}, {y})");
        assert_eq!(down_ray(x, y).distance_to_primitive(&[v0, v1, v2]), f64::INFINITY);
    }

    // Pointing away
    let away = Ray3::new(Vector3::new(-0.5, -0.5, 3.0), Vector3::UNIT_Z);
    assert_eq!(away.intersects_triangle(v0, v1, v2), None);

    // Winding does not matter
    assert_eq!(down_ray(0.5, -0.5).intersects_triangle(v0, v2, v1), hit);

    // Parallel
    let parallel = Ray3::new(Vector3::new(-2.0, 0.0, -1.0), Vector3::UNIT_X);
    assert_eq!(parallel.intersects_triangle(v0, v1, v2), None);
}

#[test]
fn ray_triangle_trait() {
    let tri = Triangle::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, -1.0));
    let ray = down_ray(0.5, -0.5);
    assert_eq!(ray.intersect(&tri), Some(4.0));
    assert_eq!(tri.intersect(&ray), Some(4.0));
    assert_eq!(down_ray(-0.1, 0.1).intersect(&tri), None);

    // The parameter scales with the direction's length
    let long_dir = Ray3::new(ray.orig, Vector3::new(0.0, 0.0, -2.0));
    assert_eq!(long_dir.intersect(&tri), Some(2.0));
}

#[test]
fn ray_quad() {
    let v0 = Vector3::new(0.0, 0.0, 0.0);
    let v1 = Vector3::new(5.0, 0.0, 0.0);
    let v2 = Vector3::new(5.0, 5.0, 0.0);
    let v3 = Vector3::new(0.0, 5.0, 0.0);

    let ray_a = Ray3::new(Vector3::new(2.0, 2.0, 10.0), Vector3::NEG_UNIT_Z);
    let ray_b = Ray3::new(Vector3::new(2.0, 4.0, 10.0), Vector3::NEG_UNIT_Z);
    let outside = Ray3::new(Vector3::new(-1.0, 0.0, 10.0), Vector3::NEG_UNIT_Z);

    assert_eq!(ray_a.intersects_quad(v0, v1, v2, v3), Some(Vector3::new(2.0, 2.0, 0.0)));
    // Only hits the second half of the quad
    assert_eq!(ray_b.intersects_triangle(v0, v1, v2), None);
    assert_eq!(ray_b.intersects_quad(v0, v1, v2, v3), Some(Vector3::new(2.0, 4.0, 0.0)));
    assert_eq!(outside.intersects_quad(v0, v1, v2, v3), None);

    assert_eq!(ray_a.distance_to_primitive(&[v0, v1, v2, v3]), 10.0);
    assert_eq!(outside.distance_to_primitive(&[v0, v1, v2, v3]), f64::INFINITY);
}

#[test]
fn ray_rectangle() {
    let rect = Rectangle3::new(Vector3::ZERO, Vector3::new(5.0, 0.0, 0.0), Vector3::new(0.0, 5.0, 0.0));
    let ray_a = Ray3::new(Vector3::new(2.0, 2.0, 10.0), Vector3::NEG_UNIT_Z);
    let ray_b = Ray3::new(Vector3::new(2.0, 4.0, 10.0), Vector3::NEG_UNIT_Z);
    let outside = Ray3::new(Vector3::new(6.0, 2.0, 10.0), Vector3::NEG_UNIT_Z);

    assert_eq!(ray_a.intersect(&rect), Some(10.0));
    assert_eq!(ray_b.intersect(&rect), Some(10.0));
    assert_eq!(outside.intersect(&rect), None);
}

#[test]
fn ray_plane() {
    let plane = Plane::new(Vector3::UNIT_Y, 2.0);
    let hits = |orig: Vector3, dir: Vector3| Ray3::new(orig, dir).intersects_plane(&plane);

    // Parallel, pointing away, and starting on the plane
    assert_eq!(hits(Vector3::new(0.0, 3.0, 0.0), Vector3::UNIT_Z), None);
    assert_eq!(hits(Vector3::new(0.0, 3.0, 0.0), Vector3::UNIT_Y), None);
    assert_eq!(hits(Vector3::new(0.0, 2.0, 0.0), Vector3::UNIT_Y), None);
    assert_eq!(hits(Vector3::ZERO, Vector3::UNIT_X), None);
    assert_eq!(hits(Vector3::new(0.0, -3.0, 0.0), Vector3::UNIT_Z), None);
    assert_eq!(hits(Vector3::new(0.0, -3.0, 0.0), Vector3::set(-1.0)), None);

    assert_eq!(hits(Vector3::new(0.0, 1.0, 0.0), Vector3::UNIT_Y), Some(Vector3::new(0.0, 2.0, 0.0)));
    assert_eq!(hits(Vector3::new(0.0, 3.0, 0.0), Vector3::NEG_UNIT_Y), Some(Vector3::new(0.0, 2.0, 0.0)));
    assert_eq!(hits(Vector3::new(0.0, -3.0, 0.0), Vector3::ONE), Some(Vector3::new(5.0, 2.0, 5.0)));

    let plane = Plane::new(Vector3::ONE, -2.0);
    let ray = |orig: Vector3, dir: Vector3| Ray3::new(orig, dir);
    assert_eq!(ray(Vector3::ZERO, Vector3::new(1.0, -1.0, 1.0)).intersect(&plane), None);
    assert_eq!(ray(Vector3::new(0.0, -1.0, 0.0), Vector3::UNIT_Y).intersect(&plane), None);
    assert_eq!(ray(Vector3::new(0.0, -2.0, 0.0), Vector3::UNIT_Y).intersect(&plane), None);
    assert_eq!(ray(Vector3::new(0.0, -3.0, 0.0), Vector3::UNIT_Y).intersect(&plane), Some(1.0));
    assert_eq!(plane.intersect(&ray(Vector3::new(0.0, -3.0, 0.0), Vector3::UNIT_Y)), Some(1.0));
}
