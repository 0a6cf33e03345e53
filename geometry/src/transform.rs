use crate::bounds::BBox;
use crate::ray::Ray;
use crate::GeometryError;
use math::hcm::{Mat4, Point3, Vec3};
use std::ops::Mul;

/// Things that a transform can be applied to: points, vectors, rays, boxes.
pub trait Transform<T> {
    fn apply(&self, x: T) -> T;
}

/// An invertible affine map between a shape's local space and the space of
/// its parent. The inverse is computed once at construction and cached, so a
/// degenerate matrix is rejected up front (`GeometryError::SingularMatrix`)
/// instead of poisoning every later intersection.
#[derive(Debug, Clone, Copy)]
pub struct AffineTransform {
    forward: Mat4,
    inverse: Mat4,
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            forward: Mat4::IDENTITY,
            inverse: Mat4::IDENTITY,
        }
    }

    /// Wraps an arbitrary 4x4 matrix, computing and caching its inverse.
    /// A determinant this close to zero indicates a scene-authoring bug.
    pub fn from_matrix(m: Mat4) -> Result<Self, GeometryError> {
        let det = m.determinant();
        if det.abs() < 1e-12 {
            Err(GeometryError::SingularMatrix(det))
        } else {
            Ok(Self {
                forward: m,
                inverse: m.inverse(),
            })
        }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            forward: Mat4::from_translation(glam::DVec3::new(x, y, z)),
            inverse: Mat4::from_translation(glam::DVec3::new(-x, -y, -z)),
        }
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Result<Self, GeometryError> {
        if x == 0.0 || y == 0.0 || z == 0.0 {
            return Err(GeometryError::SingularMatrix(0.0));
        }
        Ok(Self {
            forward: Mat4::from_scale(glam::DVec3::new(x, y, z)),
            inverse: Mat4::from_scale(glam::DVec3::new(1.0 / x, 1.0 / y, 1.0 / z)),
        })
    }

    pub fn rotation_x(radians: f64) -> Self {
        let forward = Mat4::from_rotation_x(radians);
        Self {
            forward,
            inverse: forward.transpose(),
        }
    }
    pub fn rotation_y(radians: f64) -> Self {
        let forward = Mat4::from_rotation_y(radians);
        Self {
            forward,
            inverse: forward.transpose(),
        }
    }
    pub fn rotation_z(radians: f64) -> Self {
        let forward = Mat4::from_rotation_z(radians);
        Self {
            forward,
            inverse: forward.transpose(),
        }
    }

    /// Shears each coordinate in proportion to the other two.  `xy` is the
    /// amount of x added per unit of y, and so on.
    #[rustfmt::skip]
    pub fn shearing(
        xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64,
    ) -> Result<Self, GeometryError> {
        let m = Mat4::from_cols_array(&[
            // glam is column-major: each bracketed row below is one column.
            1.0, yx, zx, 0.0,
            xy, 1.0, zy, 0.0,
            xz, yz, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        Self::from_matrix(m)
    }

    /// The camera orientation transform: world space -> eye space, with the
    /// eye at `from` looking toward `to`. Fails when `up` is parallel to the
    /// gaze direction.
    #[rustfmt::skip]
    pub fn view(from: Point3, to: Point3, up: Vec3) -> Result<Self, GeometryError> {
        let forward = (to - from).hat();
        let left = forward.cross(up.hat());
        let true_up = left.cross(forward);
        let orientation = Mat4::from_cols_array(&[
            left.x, true_up.x, -forward.x, 0.0,
            left.y, true_up.y, -forward.y, 0.0,
            left.z, true_up.z, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        Self::from_matrix(orientation * Mat4::from_translation(glam::DVec3::new(
            -from.x, -from.y, -from.z,
        )))
    }

    /// Returns the inverse transform. Cheap: both matrices are cached.
    pub fn inverse(&self) -> Self {
        Self {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.forward
    }
    pub fn inverse_matrix(&self) -> Mat4 {
        self.inverse
    }

    /// Carries a surface normal from this transform's local space to its
    /// parent space: multiply by the inverse-transpose and drop the w
    /// component. The result is not normalized.
    pub fn apply_normal(&self, n: Vec3) -> Vec3 {
        Vec3::from(self.inverse.transpose() * n.as_vec4())
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;
    fn mul(self, rhs: Self) -> Self::Output {
        // self * rhs -> self.forward * rhs.forward, rhs.inverse * self.inverse.
        Self {
            forward: self.forward * rhs.forward,
            inverse: rhs.inverse * self.inverse,
        }
    }
}

impl Transform<Vec3> for AffineTransform {
    fn apply(&self, x: Vec3) -> Vec3 {
        Vec3::from(self.forward * x.as_vec4())
    }
}
impl Transform<Point3> for AffineTransform {
    fn apply(&self, p: Point3) -> Point3 {
        Point3::from(self.forward * p.as_vec4())
    }
}
impl Transform<Ray> for AffineTransform {
    fn apply(&self, r: Ray) -> Ray {
        Ray::new(self.apply(r.origin), self.apply(r.dir))
    }
}
impl Transform<BBox> for AffineTransform {
    /// An axis-aligned box is not preserved under rotation or shear, so the
    /// image is the box enclosing the images of all 8 corners.
    fn apply(&self, b: BBox) -> BBox {
        let mut res = BBox::empty();
        for corner in b.all_corners().iter() {
            res.add_point(self.apply(*corner));
        }
        res
    }
}
