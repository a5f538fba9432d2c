use crate::geom::{Point3, Transform, Vec3};

fn assert_close(a: Point3, b: Point3) {
    assert!(a.distance_to(b) < 1e-9, "expected {b:?}, got {a:?}");
}

#[test]
fn axis_aligned_maps_index_to_world() {
    let t = Transform::axis_aligned(Point3::new(-10.0, 5.0, 2.0), Vec3::new(2.0, 0.5, 3.0));
    assert_close(t.apply_point(Point3::new(1.0, 2.0, 3.0)), Point3::new(-8.0, 6.0, 11.0));
}

#[test]
fn inverse_round_trips_affine() {
    let t = Transform::from_rows([
        [0.0, -2.0, 0.0, 4.0],
        [1.5, 0.0, 0.0, -1.0],
        [0.0, 0.0, 3.0, 0.5],
    ]);
    let inv = t.inverse().expect("invertible");
    let p = Point3::new(0.3, -7.0, 12.0);
    assert_close(inv.apply_point(t.apply_point(p)), p);
    assert_close(t.compose(inv).apply_point(p), p);
}

#[test]
fn singular_transform_has_no_inverse() {
    let t = Transform::scale(1.0, 0.0, 1.0);
    assert!(t.inverse().is_none());
}

#[test]
fn lerp_and_midpoint_agree() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(2.0, 4.0, -6.0);
    assert_close(a.lerp(b, 0.5), a.midpoint(b));
    assert_close(a.lerp(b, 0.0), a);
    assert_close(a.lerp(b, 1.0), b);
}
