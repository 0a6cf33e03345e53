//! Intersection records and the precomputed state a shader needs at a hit.

use geometry::ray::Ray;
use math::float::EPSILON;
use math::hcm::{Point3, Vec3};

use crate::tree::{ShapeId, ShapeTree};
use crate::ShapeError;

/// A ray crossing a shape's surface at parameter `t`. Triangles record the
/// barycentric coordinates of the crossing in `uv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub shape: ShapeId,
    pub uv: Option<(f64, f64)>,
}

impl Intersection {
    pub fn new(t: f64, shape: ShapeId) -> Self {
        Intersection { t, shape, uv: None }
    }

    pub fn with_uv(t: f64, shape: ShapeId, uv: (f64, f64)) -> Self {
        Intersection {
            t,
            shape,
            uv: Some(uv),
        }
    }
}

/// The visible hit: the intersection with the smallest positive `t`.
pub fn hit(xs: &[Intersection]) -> Option<&Intersection> {
    xs.iter()
        .filter(|x| x.t > 0.0)
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

/// Everything shading needs at one surface point, precomputed once per hit.
///
/// `over_point` and `under_point` sit an epsilon along the normal on either
/// side of the surface; secondary rays start there so they cannot re-hit the
/// surface that spawned them. `n1` and `n2` are the refractive indices of the
/// media on the incoming and outgoing side of the surface.
#[derive(Debug, Clone, Copy)]
pub struct Interaction {
    pub t: f64,
    pub shape: ShapeId,
    pub point: Point3,
    pub over_point: Point3,
    pub under_point: Point3,
    pub eyev: Vec3,
    pub normal: Vec3,
    pub reflectv: Vec3,
    pub inside: bool,
    pub n1: f64,
    pub n2: f64,
}

impl Interaction {
    /// Precomputes the shading state for `hit`. `xs` must be the full sorted
    /// intersection list the hit came from (`hit` referencing one of its
    /// elements), so that the refractive indices can be read off the shapes
    /// the ray is currently inside.
    pub fn prepare(
        hit: &Intersection,
        ray: &Ray,
        xs: &[Intersection],
        tree: &ShapeTree,
    ) -> Result<Self, ShapeError> {
        let point = ray.position_at(hit.t);
        let eyev = -ray.dir;
        let mut normal = tree.normal_at(hit.shape, point, hit.uv)?;
        let inside = normal.dot(eyev) < 0.0;
        if inside {
            normal = -normal;
        }
        let reflectv = ray.dir.reflect(normal);
        let over_point = point + normal * EPSILON;
        let under_point = point - normal * EPSILON;
        let (n1, n2) = refractive_indices(hit, xs, tree);
        Ok(Interaction {
            t: hit.t,
            shape: hit.shape,
            point,
            over_point,
            under_point,
            eyev,
            normal,
            reflectv,
            inside,
            n1,
            n2,
        })
    }

    /// Schlick's approximation of the Fresnel reflectance, used to blend the
    /// reflected and refracted contributions of a transparent surface.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(self.normal);
        if self.n1 > self.n2 {
            let ratio = self.n1 / self.n2;
            let sin2_t = ratio * ratio * (1.0 - cos * cos);
            if sin2_t > 1.0 {
                return 1.0;
            }
            // Exiting into a thinner medium: use the transmitted angle.
            cos = (1.0 - sin2_t).sqrt();
        }
        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

/// Scans the crossings up to `hit`, maintaining the stack of shapes the ray is
/// inside of. A shape already on the stack is being exited, otherwise entered.
/// Outside of every shape the medium is a vacuum with index 1.
fn refractive_indices(hit: &Intersection, xs: &[Intersection], tree: &ShapeTree) -> (f64, f64) {
    let mut containers: Vec<ShapeId> = Vec::new();
    let (mut n1, mut n2) = (1.0, 1.0);
    for x in xs {
        let is_hit = std::ptr::eq(x, hit);
        if is_hit {
            n1 = containers
                .last()
                .map_or(1.0, |&id| tree.material_of(id).refractive_index);
        }
        if let Some(index) = containers.iter().position(|&id| id == x.shape) {
            containers.remove(index);
        } else {
            containers.push(x.shape);
        }
        if is_hit {
            n2 = containers
                .last()
                .map_or(1.0, |&id| tree.material_of(id).refractive_index);
            break;
        }
    }
    (n1, n2)
}
