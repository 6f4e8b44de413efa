//! Pure transform math used by the scene graph and the shot rules.
//!
//! Conventions: right-handed coordinates, +Y up, cameras look down their
//! local -Z axis. Angles are radians and positive rotations follow
//! [`Quat::from_axis_angle`], i.e. counter-clockwise when looking from the tip
//! of the axis toward the origin. For an orbit about +Y this means a camera
//! standing in front of its subject (looking along -Z) swings toward its own
//! right as the angle grows.

use glam::{Mat4, Quat, Vec3};

const PARALLEL_EPSILON: f32 = 1e-8;

/// Rotate a world transform about `axis` passing through `point`.
///
/// The rotation does not recenter: the transform keeps its offset from
/// `point`, only turned by `angle` radians.
#[inline]
pub fn rotate_around_point(world: Mat4, point: Vec3, axis: Vec3, angle: f32) -> Mat4 {
    let pivot = Mat4::from_translation(point)
        * Mat4::from_quat(Quat::from_axis_angle(axis.normalize(), angle))
        * Mat4::from_translation(-point);
    pivot * world
}

/// Orientation for an object at `eye` whose -Z axis points at `target`.
///
/// Falls back to an alternative up vector when the view direction is
/// parallel to `up`.
pub fn look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let forward = (target - eye).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let up = if forward.cross(up).length_squared() < PARALLEL_EPSILON {
        if forward.cross(Vec3::Z).length_squared() < PARALLEL_EPSILON {
            Vec3::X
        } else {
            Vec3::Z
        }
    } else {
        up
    };
    // The view matrix holds the inverse of the object's orientation.
    Quat::from_mat4(&Mat4::look_at_rh(eye, target, up))
        .inverse()
        .normalize()
}

/// Shortest distance from `point` to the half-line starting at `origin`.
pub fn distance_to_ray(origin: Vec3, dir: Vec3, point: Vec3) -> f32 {
    let d = dir.normalize_or_zero();
    let v = point - origin;
    let t = v.dot(d);
    if t <= 0.0 {
        return v.length();
    }
    (v - d * t).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn rotate_around_origin_quarter_turn() {
        let world = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0));
        let rotated = rotate_around_point(world, Vec3::ZERO, Vec3::Y, FRAC_PI_2);
        let p = rotated.transform_point3(Vec3::ZERO);
        assert!(approx_eq_vec3(p, Vec3::new(5.0, 0.0, 0.0)), "got {p}");
    }

    #[test]
    fn rotate_around_offset_point_keeps_distance() {
        let point = Vec3::new(2.0, 1.0, -3.0);
        let world = Mat4::from_translation(Vec3::new(4.0, 1.5, 0.0));
        let before = world.transform_point3(Vec3::ZERO);
        let rotated = rotate_around_point(world, point, Vec3::Y, 1.1);
        let after = rotated.transform_point3(Vec3::ZERO);
        assert!(((before - point).length() - (after - point).length()).abs() < EPSILON);
        // Height along the axis is unchanged
        assert!((before.y - after.y).abs() < EPSILON);
    }

    #[test]
    fn rotate_by_zero_is_identity() {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            Quat::from_rotation_x(0.3),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let rotated = rotate_around_point(world, Vec3::new(5.0, 0.0, 1.0), Vec3::Y, 0.0);
        assert!(rotated.abs_diff_eq(world, EPSILON));
    }

    #[test]
    fn look_rotation_points_forward_at_target() {
        let eye = Vec3::new(3.0, 2.0, 4.0);
        let target = Vec3::new(-1.0, 0.5, 0.0);
        let q = look_rotation(eye, target, Vec3::Y);
        let forward = q * Vec3::NEG_Z;
        assert!(approx_eq_vec3(forward, (target - eye).normalize()));
    }

    #[test]
    fn look_rotation_straight_down_is_finite() {
        let q = look_rotation(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(q.is_finite());
        assert!(approx_eq_vec3(q * Vec3::NEG_Z, Vec3::NEG_Y));
    }

    #[test]
    fn distance_to_ray_cases() {
        let origin = Vec3::ZERO;
        let dir = Vec3::NEG_Z;
        assert!(distance_to_ray(origin, dir, Vec3::new(0.0, 0.0, -7.0)) < EPSILON);
        assert!((distance_to_ray(origin, dir, Vec3::new(2.0, 0.0, -7.0)) - 2.0).abs() < EPSILON);
        // Behind the origin measures straight distance
        assert!((distance_to_ray(origin, dir, Vec3::new(0.0, 0.0, 3.0)) - 3.0).abs() < EPSILON);
    }
}
