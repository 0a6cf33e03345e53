//! Flat and vertex-normal-interpolated triangles.

use geometry::ray::Ray;
use math::float::EPSILON;
use math::hcm::{Point3, Vec3};

/// A flat triangle with a precomputed face normal. Degenerate (zero-area)
/// triangles get a zero normal and never intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    e1: Vec3,
    e2: Vec3,
    normal: Vec3,
}

impl Triangle {
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let normal = e2.cross(e1).try_hat().unwrap_or(Vec3::ZERO);
        Triangle {
            p0,
            p1,
            p2,
            e1,
            e2,
            normal,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn intersect(&self, ray: &Ray) -> Option<(f64, (f64, f64))> {
        moller_trumbore(ray, self.p0, self.e1, self.e2)
    }
}

/// A triangle that interpolates per-vertex normals over the surface using the
/// barycentric coordinates of the hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothTriangle {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub n0: Vec3,
    pub n1: Vec3,
    pub n2: Vec3,
    e1: Vec3,
    e2: Vec3,
}

impl SmoothTriangle {
    pub fn new(p0: Point3, p1: Point3, p2: Point3, n0: Vec3, n1: Vec3, n2: Vec3) -> Self {
        SmoothTriangle {
            p0,
            p1,
            p2,
            n0,
            n1,
            n2,
            e1: p1 - p0,
            e2: p2 - p0,
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<(f64, (f64, f64))> {
        moller_trumbore(ray, self.p0, self.e1, self.e2)
    }

    pub fn normal_at(&self, u: f64, v: f64) -> Vec3 {
        self.n1 * u + self.n2 * v + self.n0 * (1.0 - u - v)
    }
}

/// Moller-Trumbore intersection. Returns the ray parameter and the (u, v)
/// barycentric coordinates of the hit.
fn moller_trumbore(ray: &Ray, p0: Point3, e1: Vec3, e2: Vec3) -> Option<(f64, (f64, f64))> {
    let dir_cross_e2 = ray.dir.cross(e2);
    let determinant = e1.dot(dir_cross_e2);
    if determinant.abs() < EPSILON {
        return None;
    }
    let f = 1.0 / determinant;
    let p0_to_origin = ray.origin - p0;
    let u = f * p0_to_origin.dot(dir_cross_e2);
    if u < 0.0 || u > 1.0 {
        return None;
    }
    let origin_cross_e1 = p0_to_origin.cross(e1);
    let v = f * ray.dir.dot(origin_cross_e1);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * e2.dot(origin_cross_e1);
    Some((t, (u, v)))
}
