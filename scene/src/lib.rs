//! The world: a shape tree, its lights, and the recursive shading that turns
//! a ray into a color.

pub mod preset;

use geometry::camera::Camera;
use geometry::ray::Ray;
use geometry::GeometryError;
use light::Light;
use material::Material;
use math::float::EPSILON;
use math::hcm::Point3;
use radiometry::color::Color;
use shape::{hit, Interaction, Intersection, ShapeError, ShapeId, ShapeTree};
use thiserror::Error;

/// Reflection and refraction recursion limit.
pub const DEFAULT_RECURSION_DEPTH: usize = 5;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Everything a render needs: the world plus the camera observing it.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

#[derive(Default)]
pub struct World {
    shapes: ShapeTree,
    /// Top-level shapes. Children of groups and CSG nodes are reached through
    /// their parents and are not listed here.
    objects: Vec<ShapeId>,
    lights: Vec<Light>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &ShapeTree {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut ShapeTree {
        &mut self.shapes
    }

    pub fn objects(&self) -> &[ShapeId] {
        &self.objects
    }

    /// Registers a root shape. Shapes merely added to the tree but never
    /// registered (or parented into a registered composite) are invisible.
    pub fn add_object(&mut self, id: ShapeId) {
        self.objects.push(id);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut Vec<Light> {
        &mut self.lights
    }

    /// All intersections of `ray` with the world, sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        let mut xs: Vec<_> = self
            .objects
            .iter()
            .flat_map(|&id| self.shapes.intersect(id, ray))
            .collect();
        xs.sort_by(|a, b| a.t.total_cmp(&b.t));
        xs
    }

    /// The color seen along `ray`, recursing up to `remaining` more times for
    /// reflected and refracted contributions. Rays that escape the world are
    /// black.
    pub fn color_at(&self, ray: &Ray, remaining: usize) -> Result<Color, RenderError> {
        let xs = self.intersect(ray);
        match hit(&xs) {
            None => Ok(Color::black()),
            Some(h) => {
                let comps = Interaction::prepare(h, ray, &xs, &self.shapes)?;
                self.shade_hit(&comps, remaining)
            }
        }
    }

    fn shade_hit(&self, comps: &Interaction, remaining: usize) -> Result<Color, RenderError> {
        let material = self.material_at(comps.shape);
        let surface_color = match &material.pattern {
            None => material.color,
            Some(pattern) => {
                let object_point = self.shapes.world_to_object(comps.shape, comps.over_point);
                pattern.color_at_object(object_point)
            }
        };

        let mut surface = Color::black();
        for light in &self.lights {
            let fraction =
                light.intensity_at(|sample| self.is_shadowed(sample, comps.over_point));
            surface += material.lighting(
                surface_color,
                light.position(),
                light.intensity(),
                comps.over_point,
                comps.eyev,
                comps.normal,
                fraction,
            );
        }

        let reflected = self.reflected_color(comps, remaining)?;
        let refracted = self.refracted_color(comps, remaining)?;
        if material.reflective > 0.0 && material.transparency > 0.0 {
            // Fresnel: what is not reflected gets transmitted.
            let reflectance = comps.schlick();
            Ok(surface + reflected * reflectance + refracted * (1.0 - reflectance))
        } else {
            Ok(surface + reflected + refracted)
        }
    }

    /// The contribution of the ray bouncing off a reflective surface at
    /// `comps`, already scaled by the material's reflectivity.
    pub fn reflected_color(
        &self,
        comps: &Interaction,
        remaining: usize,
    ) -> Result<Color, RenderError> {
        let reflective = self.shapes.material_of(comps.shape).reflective;
        if remaining == 0 || reflective == 0.0 {
            return Ok(Color::black());
        }
        let reflect_ray = Ray::new(comps.over_point, comps.reflectv);
        Ok(self.color_at(&reflect_ray, remaining - 1)? * reflective)
    }

    /// The contribution of the ray bending through a transparent surface at
    /// `comps`, scaled by the material's transparency.
    pub fn refracted_color(
        &self,
        comps: &Interaction,
        remaining: usize,
    ) -> Result<Color, RenderError> {
        let transparency = self.shapes.material_of(comps.shape).transparency;
        if remaining == 0 || transparency == 0.0 {
            return Ok(Color::black());
        }
        // Snell: total internal reflection transmits nothing.
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normal);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return Ok(Color::black());
        }
        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normal * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let refract_ray = Ray::new(comps.under_point, direction);
        Ok(self.color_at(&refract_ray, remaining - 1)? * transparency)
    }

    /// Whether the straight path from `light_position` to `point` is blocked
    /// by a shadow-casting shape.
    pub fn is_shadowed(&self, light_position: Point3, point: Point3) -> bool {
        let to_light = light_position - point;
        let distance = to_light.norm();
        let ray = Ray::new(point, to_light / distance);
        self.intersect(&ray)
            .iter()
            .filter(|x| x.t > EPSILON && self.shapes.casts_shadow(x.shape))
            .any(|x| x.t < distance)
    }

    fn material_at(&self, id: ShapeId) -> Material {
        self.shapes.material_of(id).clone()
    }
}
