use std::{
    fmt,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub},
};

pub use glam::{DMat4 as Mat4, DVec4 as Vec4};

pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

pub fn point3(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// Represents a 3D direction or displacement. Each component is an `f64`.
/// Components can be accessed as `v.x` `v.y` `v.z`, or by index `v[i]`
/// where i is 0, 1, or 2. Embedded into homogeneous coordinates with w = 0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Represents a 3D location. Translation moves a `Point3` but leaves a
/// `Vec3` alone; the difference of two points is a `Vec3`. Embedded into
/// homogeneous coordinates with w = 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(
            f,
            "({:.p$}, {:.p$}, {:.p$})",
            self.x,
            self.y,
            self.z,
            p = precision
        )
    }
}
impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(
            f,
            "[{:.p$}, {:.p$}, {:.p$}]",
            self.x,
            self.y,
            self.z,
            p = precision
        )
    }
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }
    pub const X: Vec3 = Self::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Self::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Self::new(0.0, 0.0, 1.0);
    pub const ZERO: Vec3 = Self::new(0.0, 0.0, 0.0);

    pub fn as_vec4(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, 0.0)
    }

    pub fn dot(self, v: Vec3) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
    pub fn cross(self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    pub fn norm_squared(self) -> f64 {
        self.dot(self)
    }
    pub fn norm(self) -> f64 {
        self.norm_squared().sqrt()
    }
    pub fn is_zero(self) -> bool {
        self.norm_squared() == 0.0
    }

    /// Returns a normalized (unit-length) `self` vector.
    /// Panics if the vector length is zero, NaN or infinite.
    pub fn hat(self) -> Vec3 {
        let norm2 = self.norm_squared();
        assert!(norm2 != 0.0 && norm2.is_finite());
        self * (1.0 / norm2.sqrt())
    }
    /// `hat()` that maps zero-length and non-finite vectors to `None`.
    pub fn try_hat(self) -> Option<Self> {
        let inv_length = 1.0 / self.norm();
        if inv_length.is_finite() && inv_length != 0.0 {
            Some(self * inv_length)
        } else {
            None
        }
    }

    /// Mirrors `self` about `normal` (which should be unit-length).
    pub fn reflect(self, normal: Vec3) -> Vec3 {
        self - normal * 2.0 * self.dot(normal)
    }

    pub fn max_dimension(self) -> usize {
        if self.x >= self.y && self.x >= self.z {
            0
        } else if self.y >= self.z {
            1
        } else {
            2
        }
    }

    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, v: Vec3) -> Vec3 {
        Vec3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}
impl AddAssign for Vec3 {
    fn add_assign(&mut self, v: Vec3) {
        *self = *self + v;
    }
}
impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, v: Vec3) -> Vec3 {
        Vec3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}
impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}
impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}
impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}
impl Div<f64> for Vec3 {
    type Output = Vec3;
    fn div(self, s: f64) -> Vec3 {
        self * (1.0 / s)
    }
}
impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("invalid index {} into Vec3", i),
        }
    }
}
impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("invalid index {} into Vec3", i),
        }
    }
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Point3 {
        Point3 { x, y, z }
    }
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub fn as_vec4(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, 1.0)
    }

    pub fn distance_to(self, p: Self) -> f64 {
        (self - p).norm()
    }
    pub fn squared_distance_to(self, p: Self) -> f64 {
        (self - p).norm_squared()
    }
    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;
    fn add(self, v: Vec3) -> Point3 {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}
impl Add<Point3> for Vec3 {
    type Output = Point3;
    fn add(self, p: Point3) -> Point3 {
        p + self
    }
}
impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, p: Point3) -> Vec3 {
        Vec3::new(self.x - p.x, self.y - p.y, self.z - p.z)
    }
}
impl Sub<Vec3> for Point3 {
    type Output = Point3;
    fn sub(self, v: Vec3) -> Point3 {
        self + (-v)
    }
}
impl Index<usize> for Point3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("invalid index {} into Point3", i),
        }
    }
}
impl IndexMut<usize> for Point3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("invalid index {} into Point3", i),
        }
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}
impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}
/// Drops the w component. Used after multiplying a matrix with an embedded
/// vector; callers that need the point/vector distinction re-tag explicitly.
impl From<Vec4> for Vec3 {
    fn from(v: Vec4) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}
impl From<Vec4> for Point3 {
    fn from(v: Vec4) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn point_minus_point_is_vector() {
        let d = point3(3.0, 2.0, 1.0) - point3(5.0, 6.0, 7.0);
        assert_eq!(d, vec3(-2.0, -4.0, -6.0));
    }

    #[test]
    fn cross_products() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(2.0, 3.0, 4.0);
        assert_eq!(a.cross(b), vec3(-1.0, 2.0, -1.0));
        assert_eq!(b.cross(a), vec3(1.0, -2.0, 1.0));
    }

    #[test]
    fn reflect_at_45_degrees() {
        let v = vec3(1.0, -1.0, 0.0);
        let r = v.reflect(vec3(0.0, 1.0, 0.0));
        assert_eq!(r, vec3(1.0, 1.0, 0.0));

        let sq = 2f64.sqrt() / 2.0;
        let r = vec3(0.0, -1.0, 0.0).reflect(vec3(sq, sq, 0.0));
        assert!((r - vec3(1.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn homogeneous_tags() {
        assert_eq!(point3(1.0, 2.0, 3.0).as_vec4().w, 1.0);
        assert_eq!(vec3(1.0, 2.0, 3.0).as_vec4().w, 0.0);
    }
}
