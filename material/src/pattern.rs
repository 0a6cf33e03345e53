use geometry::transform::{AffineTransform, Transform};
use math::hcm::Point3;
use radiometry::color::Color;

/// The closed set of procedural patterns. All are evaluated in pattern space:
/// the caller converts a world point to shape-local space, and the pattern's
/// own transform maps shape space to pattern space.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    /// Alternates along x in unit-wide bands.
    Stripe(Color, Color),
    /// Linearly blends from one color to the other as x goes 0 -> 1.
    Gradient(Color, Color),
    /// Concentric rings around the y axis in the xz plane.
    Ring(Color, Color),
    /// 3D checkers: adjacent unit cubes alternate.
    Checkers(Color, Color),
    /// Reports the pattern-space point as a color. Only useful to make the
    /// shading pipeline observable in tests.
    Positional,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    kind: PatternKind,
    transform: AffineTransform,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.transform.matrix() == other.transform.matrix()
    }
}

impl Pattern {
    pub fn stripe(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Stripe(a, b))
    }
    pub fn gradient(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Gradient(a, b))
    }
    pub fn ring(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Ring(a, b))
    }
    pub fn checkers(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Checkers(a, b))
    }
    pub fn positional() -> Self {
        Self::new(PatternKind::Positional)
    }

    fn new(kind: PatternKind) -> Self {
        Pattern {
            kind,
            transform: AffineTransform::identity(),
        }
    }

    pub fn with_transform(self, transform: AffineTransform) -> Self {
        Self { transform, ..self }
    }

    /// Evaluates the pattern at a point already expressed in the shape's
    /// local space.
    pub fn color_at_object(&self, object_point: Point3) -> Color {
        let p = self.transform.inverse().apply(object_point);
        match &self.kind {
            PatternKind::Stripe(a, b) => {
                if p.x.floor() as i64 % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Gradient(a, b) => *a + (*b - *a) * (p.x - p.x.floor()),
            PatternKind::Ring(a, b) => {
                let radius = (p.x * p.x + p.z * p.z).sqrt();
                if radius.floor() as i64 % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Checkers(a, b) => {
                let parity = p.x.floor() + p.y.floor() + p.z.floor();
                if parity as i64 % 2 == 0 {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Positional => Color::new(p.x, p.y, p.z),
        }
    }
}
