pub mod pattern;

pub use pattern::Pattern;

use math::float::near_equal;
use math::hcm::{Point3, Vec3};
use radiometry::color::Color;

/// Phong-style surface description. The scalar coefficients feed the local
/// lighting formula; `reflective` / `transparency` / `refractive_index`
/// drive the recursive parts of shading.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
    pub pattern: Option<Pattern>,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            color: Color::white(),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            pattern: None,
        }
    }
}

impl Material {
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
    pub fn with_ambient(self, ambient: f64) -> Self {
        Self { ambient, ..self }
    }
    pub fn with_diffuse(self, diffuse: f64) -> Self {
        Self { diffuse, ..self }
    }
    pub fn with_specular(self, specular: f64) -> Self {
        Self { specular, ..self }
    }
    pub fn with_shininess(self, shininess: f64) -> Self {
        Self { shininess, ..self }
    }
    pub fn with_reflective(self, reflective: f64) -> Self {
        Self { reflective, ..self }
    }
    pub fn with_transparency(self, transparency: f64) -> Self {
        Self { transparency, ..self }
    }
    pub fn with_refractive_index(self, refractive_index: f64) -> Self {
        Self {
            refractive_index,
            ..self
        }
    }
    pub fn with_pattern(self, pattern: Pattern) -> Self {
        Self {
            pattern: Some(pattern),
            ..self
        }
    }

    /// Fully transparent glass, refractive index 1.5.
    pub fn glass() -> Self {
        Material::default()
            .with_transparency(1.0)
            .with_refractive_index(1.5)
    }

    /// Evaluates the Phong formula at a surface point.
    ///
    /// `surface_color` is the already-resolved base color (pattern or plain);
    /// `light_fraction` is the soft-shadow weight in [0, 1]: the fraction of
    /// the light's samples with a clear line of sight. Ambient applies
    /// unconditionally; diffuse and specular scale with the fraction.
    pub fn lighting(
        &self,
        surface_color: Color,
        light_position: Point3,
        light_intensity: Color,
        point: Point3,
        eyev: Vec3,
        normalv: Vec3,
        light_fraction: f64,
    ) -> Color {
        let effective_color = surface_color * light_intensity;
        let ambient = effective_color * self.ambient;
        if light_fraction <= 0.0 {
            return ambient;
        }

        let lightv = (light_position - point).hat();
        let light_dot_normal = lightv.dot(normalv);
        let (diffuse, specular) = if light_dot_normal < 0.0 {
            // The light is on the other side of the surface.
            (Color::black(), Color::black())
        } else {
            let diffuse = effective_color * (self.diffuse * light_dot_normal);
            let reflectv = (-lightv).reflect(normalv);
            let reflect_dot_eye = reflectv.dot(eyev);
            let specular = if reflect_dot_eye <= 0.0 || near_equal(reflect_dot_eye, 0.0) {
                Color::black()
            } else {
                light_intensity * (self.specular * reflect_dot_eye.powf(self.shininess))
            };
            (diffuse, specular)
        };

        ambient + (diffuse + specular) * light_fraction
    }
}
