use std::fmt::{Display, Formatter, Result};

use math::hcm::{Point3, Vec3};

/// Represents a ray:
///
///   origin + t * direction
///
/// The direction is not required to be unit-length; intersection `t` values
/// are only comparable against distances when it is.
///
/// A `Ray` can be used to intersect shapes, bounding boxes and the whole
/// world. Please see their respective documentation for details.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, dir: Vec3) -> Self {
        Ray { origin, dir }
    }

    pub fn position_at(&self, t: f64) -> Point3 {
        self.origin + self.dir * t
    }
}

impl Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let precision = f.precision().unwrap_or(4);
        write!(
            f,
            "{:.precision$} + t{:.precision$}",
            self.origin,
            self.dir,
            precision = precision
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use math::hcm::{point3, vec3};

    #[test]
    fn position_along_ray() {
        let r = Ray::new(point3(2.0, 3.0, 4.0), vec3(1.0, 0.0, 0.0));
        assert_eq!(r.position_at(0.0), point3(2.0, 3.0, 4.0));
        assert_eq!(r.position_at(1.0), point3(3.0, 3.0, 4.0));
        assert_eq!(r.position_at(-1.0), point3(1.0, 3.0, 4.0));
        assert_eq!(r.position_at(2.5), point3(4.5, 3.0, 4.0));
    }
}
