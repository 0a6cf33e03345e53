use crate::ray::Ray;
use crate::transform::{AffineTransform, Transform};
use crate::GeometryError;
use math::hcm::{Point3, Vec3};

/// Pinhole camera. The canvas sits one unit in front of the eye; `fov` is the
/// angle subtended by the canvas's larger dimension. The view transform moves
/// the world in front of the eye, so rays are generated by carrying canvas
/// points back through its inverse.
#[derive(Debug, Clone)]
pub struct Camera {
    hsize: u32,
    vsize: u32,
    transform: AffineTransform,
    pixel_size: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(hsize: u32, vsize: u32, fov: f64) -> Camera {
        let half_view = (fov / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;
        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };
        Camera {
            hsize,
            vsize,
            transform: AffineTransform::identity(),
            pixel_size: half_width * 2.0 / hsize as f64,
            half_width,
            half_height,
        }
    }

    /// Points the camera at `target` from `from`. Fails if `up` is parallel
    /// to the viewing direction.
    pub fn looking_at(
        self,
        from: Point3,
        target: Point3,
        up: Vec3,
    ) -> Result<Camera, GeometryError> {
        Ok(Camera {
            transform: AffineTransform::view(from, target, up)?,
            ..self
        })
    }

    pub fn with_transform(self, transform: AffineTransform) -> Camera {
        Camera { transform, ..self }
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.hsize, self.vsize)
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// The world-space ray through the center of pixel (`px`, `py`), with
    /// (0, 0) at the canvas's upper left.
    pub fn ray_through_pixel(&self, px: u32, py: u32) -> Ray {
        let x_offset = (px as f64 + 0.5) * self.pixel_size;
        let y_offset = (py as f64 + 0.5) * self.pixel_size;
        // Canvas x runs opposite world x because the view transform mirrors z.
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let inverse = self.transform.inverse();
        let pixel = inverse.apply(Point3::new(world_x, world_y, -1.0));
        let origin = inverse.apply(Point3::ORIGIN);
        Ray::new(origin, (pixel - origin).hat())
    }
}
