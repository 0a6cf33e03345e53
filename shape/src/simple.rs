//! Ray intersection and normals for the analytic unit primitives. All
//! functions work in the primitive's local space; the shape tree handles
//! world-to-local conversion before calling in here.

use geometry::ray::Ray;
use math::float::EPSILON;
use math::hcm::{vec3, Point3, Vec3};

/// Unit sphere centered on the origin. Returns both roots even when the ray
/// starts inside or past the sphere; callers filter on sign.
pub fn sphere_intersect(ray: &Ray) -> Vec<f64> {
    let center_to_origin = ray.origin - Point3::ORIGIN;
    let a = ray.dir.dot(ray.dir);
    let b = 2.0 * ray.dir.dot(center_to_origin);
    let c = center_to_origin.dot(center_to_origin) - 1.0;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return vec![];
    }
    let sqrt_d = discriminant.sqrt();
    vec![(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)]
}

pub fn sphere_normal(p: Point3) -> Vec3 {
    p - Point3::ORIGIN
}

/// The xz plane. Rays parallel to it never hit, even when coplanar.
pub fn plane_intersect(ray: &Ray) -> Vec<f64> {
    if ray.dir.y.abs() < EPSILON {
        return vec![];
    }
    vec![-ray.origin.y / ray.dir.y]
}

pub fn plane_normal() -> Vec3 {
    Vec3::Y
}

/// Axis-aligned cube spanning [-1, 1] on every axis.
pub fn cube_intersect(ray: &Ray) -> Vec<f64> {
    let (xt_min, xt_max) = check_axis(ray.origin.x, ray.dir.x);
    let (yt_min, yt_max) = check_axis(ray.origin.y, ray.dir.y);
    let (zt_min, zt_max) = check_axis(ray.origin.z, ray.dir.z);

    let t_min = xt_min.max(yt_min).max(zt_min);
    let t_max = xt_max.min(yt_max).min(zt_max);
    if t_min > t_max {
        vec![]
    } else {
        vec![t_min, t_max]
    }
}

/// On the face with the largest coordinate magnitude. Corner and edge points
/// resolve in x-then-y-then-z order.
pub fn cube_normal(p: Point3) -> Vec3 {
    let max_c = p.x.abs().max(p.y.abs()).max(p.z.abs());
    if max_c == p.x.abs() {
        vec3(p.x, 0.0, 0.0)
    } else if max_c == p.y.abs() {
        vec3(0.0, p.y, 0.0)
    } else {
        vec3(0.0, 0.0, p.z)
    }
}

fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
    let t_min_numerator = -1.0 - origin;
    let t_max_numerator = 1.0 - origin;
    let (t_min, t_max) = if direction.abs() >= EPSILON {
        (t_min_numerator / direction, t_max_numerator / direction)
    } else {
        (
            t_min_numerator * f64::INFINITY,
            t_max_numerator * f64::INFINITY,
        )
    };
    if t_min > t_max {
        (t_max, t_min)
    } else {
        (t_min, t_max)
    }
}
