//! Cylinders and double-napped cones, optionally truncated in y and capped.

use geometry::ray::Ray;
use math::float::EPSILON;
use math::hcm::{vec3, Point3, Vec3};

/// Limits a cylinder or cone along its y axis. The default is the untruncated,
/// uncapped infinite surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Truncation {
    pub min: f64,
    pub max: f64,
    pub closed: bool,
}

impl Default for Truncation {
    fn default() -> Self {
        Truncation {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            closed: false,
        }
    }
}

impl Truncation {
    pub fn new(min: f64, max: f64, closed: bool) -> Self {
        Truncation { min, max, closed }
    }
}

/// Unit cylinder around the y axis, radius 1, limits are exclusive.
pub fn cylinder_intersect(ray: &Ray, trunc: &Truncation) -> Vec<f64> {
    let mut ts = Vec::new();
    let a = ray.dir.x * ray.dir.x + ray.dir.z * ray.dir.z;
    // a vanishes iff the ray runs parallel to the axis; only caps can hit.
    if a.abs() >= EPSILON {
        let b = 2.0 * (ray.origin.x * ray.dir.x + ray.origin.z * ray.dir.z);
        let c = ray.origin.x * ray.origin.x + ray.origin.z * ray.origin.z - 1.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return ts;
        }
        let sqrt_d = discriminant.sqrt();
        let (t0, t1) = math::float::min_max((-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a));
        for &t in [t0, t1].iter() {
            let y = ray.origin.y + t * ray.dir.y;
            if trunc.min < y && y < trunc.max {
                ts.push(t);
            }
        }
    }
    intersect_caps(ray, trunc, |_| 1.0, &mut ts);
    ts.sort_by(f64::total_cmp);
    ts
}

pub fn cylinder_normal(p: Point3, trunc: &Truncation) -> Vec3 {
    let dist = p.x * p.x + p.z * p.z;
    if dist < 1.0 && p.y >= trunc.max - EPSILON {
        Vec3::Y
    } else if dist < 1.0 && p.y <= trunc.min + EPSILON {
        -Vec3::Y
    } else {
        vec3(p.x, 0.0, p.z)
    }
}

/// Double-napped cone with apex at the origin; |y| is the radius at height y.
pub fn cone_intersect(ray: &Ray, trunc: &Truncation) -> Vec<f64> {
    let mut ts = Vec::new();
    let a = ray.dir.x * ray.dir.x - ray.dir.y * ray.dir.y + ray.dir.z * ray.dir.z;
    let b = 2.0
        * (ray.origin.x * ray.dir.x - ray.origin.y * ray.dir.y + ray.origin.z * ray.dir.z);
    let c = ray.origin.x * ray.origin.x - ray.origin.y * ray.origin.y
        + ray.origin.z * ray.origin.z;

    if a.abs() < EPSILON {
        // Parallel to one half of the cone; at most one hit on the other half.
        if b.abs() >= EPSILON {
            let t = -c / (2.0 * b);
            let y = ray.origin.y + t * ray.dir.y;
            if trunc.min < y && y < trunc.max {
                ts.push(t);
            }
        }
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let sqrt_d = discriminant.sqrt();
            let (t0, t1) =
                math::float::min_max((-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a));
            for &t in [t0, t1].iter() {
                let y = ray.origin.y + t * ray.dir.y;
                if trunc.min < y && y < trunc.max {
                    ts.push(t);
                }
            }
        }
    }
    intersect_caps(ray, trunc, f64::abs, &mut ts);
    ts.sort_by(f64::total_cmp);
    ts
}

pub fn cone_normal(p: Point3, trunc: &Truncation) -> Vec3 {
    let dist = p.x * p.x + p.z * p.z;
    if dist < trunc.max * trunc.max && p.y >= trunc.max - EPSILON {
        Vec3::Y
    } else if dist < trunc.min * trunc.min && p.y <= trunc.min + EPSILON {
        -Vec3::Y
    } else {
        let mut y = dist.sqrt();
        if p.y > 0.0 {
            y = -y;
        }
        vec3(p.x, y, p.z)
    }
}

/// Appends hits on the two end caps. `radius_at` maps a cap's y plane to the
/// cap radius (constant 1 for cylinders, |y| for cones).
fn intersect_caps(
    ray: &Ray,
    trunc: &Truncation,
    radius_at: impl Fn(f64) -> f64,
    ts: &mut Vec<f64>,
) {
    if !trunc.closed || ray.dir.y.abs() < EPSILON {
        return;
    }
    for &y_plane in [trunc.min, trunc.max].iter() {
        let t = (y_plane - ray.origin.y) / ray.dir.y;
        let x = ray.origin.x + t * ray.dir.x;
        let z = ray.origin.z + t * ray.dir.z;
        let radius = radius_at(y_plane);
        if x * x + z * z <= radius * radius {
            ts.push(t);
        }
    }
}
