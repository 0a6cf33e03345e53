use std::fmt::{Display, Formatter, Result};

use crate::ray::Ray;
use math::float::{min_max, EPSILON};
use math::hcm::{Point3, Vec3};

/// Axis-aligned 3D bounding box in some shape's local coordinate space.
/// - A fresh box is empty: min = +inf, max = -inf on all axes.
/// - Grow it with `add_point()` / `add_box()` during construction; treat it
///   as immutable afterward.
/// - Check if it `contains_point()` / `contains_box()`, or `intersects()`
///   a `Ray`.
///
/// After any mutation, `min[axis] <= max[axis]` holds on every axis unless
/// the box is still the empty sentinel.
#[derive(Debug, Clone, Copy)]
pub struct BBox {
    min: Point3,
    max: Point3,
}

impl BBox {
    pub fn empty() -> BBox {
        BBox {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(-f64::INFINITY, -f64::INFINITY, -f64::INFINITY),
        }
    }

    pub fn new(p0: Point3, p1: Point3) -> BBox {
        let (xmin, xmax) = min_max(p0.x, p1.x);
        let (ymin, ymax) = min_max(p0.y, p1.y);
        let (zmin, zmax) = min_max(p0.z, p1.z);
        BBox {
            min: Point3::new(xmin, ymin, zmin),
            max: Point3::new(xmax, ymax, zmax),
        }
    }

    pub fn min(&self) -> Point3 {
        self.min
    }
    pub fn max(&self) -> Point3 {
        self.max
    }

    pub fn add_point(&mut self, p: Point3) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    pub fn add_box(&mut self, other: BBox) {
        self.add_point(other.min);
        self.add_point(other.max);
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        for axis in 0..3 {
            if p[axis] < self.min[axis] || p[axis] > self.max[axis] {
                return false;
            }
        }
        true
    }

    pub fn contains_box(&self, other: BBox) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    pub fn diag(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn all_corners(&self) -> [Point3; 8] {
        let mut res = [Point3::ORIGIN; 8];
        for i in 0..8 {
            for axis in 0..3 {
                res[i][axis] = if i & (1 << axis) == 0 {
                    self.min[axis]
                } else {
                    self.max[axis]
                };
            }
        }
        res
    }

    /// Per-axis slab test. A direction component below EPSILON yields
    /// infinite slab bounds on that axis instead of a division.
    pub fn intersects(&self, r: &Ray) -> bool {
        let (mut t_min, mut t_max) = (-f64::INFINITY, f64::INFINITY);
        for axis in 0..3 {
            let (t0, t1) = check_axis(
                r.origin[axis],
                r.dir[axis],
                self.min[axis],
                self.max[axis],
            );
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
        }
        t_min <= t_max
    }

    /// Bisects the box at the midpoint of its greatest extent. The two
    /// halves cover the original exactly, overlapping only on the shared
    /// boundary plane. This is the sole partitioning primitive used for
    /// group subdivision.
    pub fn split(&self) -> (BBox, BBox) {
        let d = self.diag();
        let axis = d.max_dimension();
        let mid = self.min[axis] + d[axis] / 2.0;

        let mut mid_max = self.max;
        mid_max[axis] = mid;
        let mut mid_min = self.min;
        mid_min[axis] = mid;

        (
            BBox {
                min: self.min,
                max: mid_max,
            },
            BBox {
                min: mid_min,
                max: self.max,
            },
        )
    }
}

fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    let t_min_numerator = min - origin;
    let t_max_numerator = max - origin;
    let (t_min, t_max) = if direction.abs() >= EPSILON {
        (t_min_numerator / direction, t_max_numerator / direction)
    } else {
        (
            t_min_numerator * f64::INFINITY,
            t_max_numerator * f64::INFINITY,
        )
    };
    min_max(t_min, t_max)
}

pub fn union(b0: BBox, b1: BBox) -> BBox {
    let mut res = b0;
    res.add_box(b1);
    res
}

impl Display for BBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "box[{} -> {}]", self.min, self.max)
    }
}
