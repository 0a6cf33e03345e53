//! Light sources: point lights and rectangular area lights.
//!
//! Lights know nothing about scene contents. Occlusion is delegated to a
//! caller-supplied predicate so that shadow fractions can be computed here
//! while ray casting stays in the scene crate.

use std::sync::atomic::{AtomicUsize, Ordering};

use math::hcm::{Point3, Vec3};
use radiometry::color::Color;

/// Offset within a cell of an area light where the sample point is taken.
#[derive(Debug)]
pub enum Jitter {
    /// Every sample at the cell center. Deterministic, banded penumbras.
    Center,
    /// Uniform random offsets, a fresh one per sample.
    Random,
    /// Cycles through a fixed list of offsets. Deterministic but not banded,
    /// which keeps renders reproducible in tests.
    Sequence(Vec<f64>, AtomicUsize),
}

impl Jitter {
    pub fn sequence(offsets: Vec<f64>) -> Jitter {
        Jitter::Sequence(offsets, AtomicUsize::new(0))
    }

    fn next(&self) -> f64 {
        match self {
            Jitter::Center => 0.5,
            Jitter::Random => rand::random(),
            Jitter::Sequence(offsets, cursor) => {
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                offsets[i % offsets.len()]
            }
        }
    }
}

impl Clone for Jitter {
    fn clone(&self) -> Self {
        match self {
            Jitter::Center => Jitter::Center,
            Jitter::Random => Jitter::Random,
            Jitter::Sequence(offsets, cursor) => Jitter::Sequence(
                offsets.clone(),
                AtomicUsize::new(cursor.load(Ordering::Relaxed)),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3,
    pub intensity: Color,
}

/// A flat rectangle of light, sampled on a `usteps` x `vsteps` grid.
#[derive(Debug, Clone)]
pub struct AreaLight {
    corner: Point3,
    /// One grid cell along each edge; the full edges are `uvec * usteps` and
    /// `vvec * vsteps`.
    uvec: Vec3,
    vvec: Vec3,
    usteps: usize,
    vsteps: usize,
    pub intensity: Color,
    jitter: Jitter,
}

impl AreaLight {
    pub fn new(
        corner: Point3,
        full_uvec: Vec3,
        usteps: usize,
        full_vvec: Vec3,
        vsteps: usize,
        intensity: Color,
        jitter: Jitter,
    ) -> Self {
        AreaLight {
            corner,
            uvec: full_uvec / usteps as f64,
            vvec: full_vvec / vsteps as f64,
            usteps,
            vsteps,
            intensity,
            jitter,
        }
    }

    fn point_in_cell(&self, u: usize, v: usize) -> Point3 {
        self.corner
            + self.uvec * (u as f64 + self.jitter.next())
            + self.vvec * (v as f64 + self.jitter.next())
    }

    fn center(&self) -> Point3 {
        self.corner + (self.uvec * self.usteps as f64 + self.vvec * self.vsteps as f64) * 0.5
    }
}

#[derive(Debug, Clone)]
pub enum Light {
    Point(PointLight),
    Area(AreaLight),
}

impl Light {
    pub fn point(position: Point3, intensity: Color) -> Light {
        Light::Point(PointLight {
            position,
            intensity,
        })
    }

    pub fn intensity(&self) -> Color {
        match self {
            Light::Point(l) => l.intensity,
            Light::Area(l) => l.intensity,
        }
    }

    /// A representative position: the point light itself, or the center of an
    /// area light. Specular highlights aim here.
    pub fn position(&self) -> Point3 {
        match self {
            Light::Point(l) => l.position,
            Light::Area(l) => l.center(),
        }
    }

    /// One sample point per grid cell (a single one for point lights).
    pub fn samples(&self) -> Vec<Point3> {
        match self {
            Light::Point(l) => vec![l.position],
            Light::Area(l) => {
                let mut points = Vec::with_capacity(l.usteps * l.vsteps);
                for v in 0..l.vsteps {
                    for u in 0..l.usteps {
                        points.push(l.point_in_cell(u, v));
                    }
                }
                points
            }
        }
    }

    /// The fraction of this light that reaches some surface point, given an
    /// occlusion predicate answering whether the straight path from a light
    /// sample to that point is blocked. 0 is full shadow, 1 fully lit; area
    /// lights return intermediate values inside the penumbra.
    pub fn intensity_at(&self, mut occluded: impl FnMut(Point3) -> bool) -> f64 {
        let samples = self.samples();
        let total = samples.len();
        let visible = samples.into_iter().filter(|&p| !occluded(p)).count();
        visible as f64 / total as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use math::assert_close;
    use math::hcm::{point3, vec3};

    fn close(p: Point3, q: Point3) -> bool {
        (p - q).norm() < 1e-6
    }

    #[test]
    fn area_light_divides_its_edges_into_cells() {
        let light = AreaLight::new(
            Point3::ORIGIN,
            vec3(2.0, 0.0, 0.0),
            4,
            vec3(0.0, 0.0, 1.0),
            2,
            Color::WHITE,
            Jitter::Center,
        );
        assert_eq!(light.uvec, vec3(0.5, 0.0, 0.0));
        assert_eq!(light.vvec, vec3(0.0, 0.0, 0.5));
        assert_eq!(Light::Area(light.clone()).samples().len(), 8);
        assert!(close(Light::Area(light).position(), point3(1.0, 0.0, 0.5)));
    }

    #[test]
    fn centered_samples_fall_mid_cell() {
        let light = AreaLight::new(
            Point3::ORIGIN,
            vec3(2.0, 0.0, 0.0),
            4,
            vec3(0.0, 0.0, 1.0),
            2,
            Color::WHITE,
            Jitter::Center,
        );
        let cases = [
            (0, 0, point3(0.25, 0.0, 0.25)),
            (1, 0, point3(0.75, 0.0, 0.25)),
            (0, 1, point3(0.25, 0.0, 0.75)),
            (2, 0, point3(1.25, 0.0, 0.25)),
            (3, 1, point3(1.75, 0.0, 0.75)),
        ];
        for (u, v, expected) in cases.iter() {
            assert!(close(light.point_in_cell(*u, *v), *expected));
        }
    }

    #[test]
    fn sequence_jitter_cycles_its_offsets() {
        let light = AreaLight::new(
            Point3::ORIGIN,
            vec3(2.0, 0.0, 0.0),
            4,
            vec3(0.0, 0.0, 1.0),
            2,
            Color::WHITE,
            Jitter::sequence(vec![0.3, 0.7]),
        );
        assert!(close(light.point_in_cell(0, 0), point3(0.15, 0.0, 0.35)));
        assert!(close(light.point_in_cell(1, 0), point3(0.65, 0.0, 0.35)));
    }

    #[test]
    fn point_light_intensity_is_all_or_nothing() {
        let light = Light::point(point3(0.0, 0.0, 0.0), Color::WHITE);
        assert_eq!(light.intensity_at(|_| false), 1.0);
        assert_eq!(light.intensity_at(|_| true), 0.0);
    }

    #[test]
    fn area_light_intensity_is_the_visible_fraction() {
        let light = Light::Area(AreaLight::new(
            Point3::ORIGIN,
            vec3(2.0, 0.0, 0.0),
            4,
            vec3(0.0, 0.0, 1.0),
            2,
            Color::WHITE,
            Jitter::Center,
        ));
        // Occlude every sample on the far half of the rectangle.
        let fraction = light.intensity_at(|p| p.x > 1.0);
        assert_close!(fraction, 0.5);
    }
}
