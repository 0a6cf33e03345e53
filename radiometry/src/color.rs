use std::iter::Sum;

use math::float::near_equal;

/// An (r, g, b) radiance triple. Components are unclamped f64 and may run
/// outside [0, 1] during shading; `to_u8()` saturates on image export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Clamps an f64 value to [0, 1], multiplies it by 255 and casts it to u8.
/// Returns 0 if `f` is NaN.
fn saturate_cast_u8(f: f64) -> u8 {
    if f > 1.0 {
        255
    } else if f >= 0.0 {
        (f * 255.0 + 0.5) as u8
    } else {
        0
    }
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub fn black() -> Color {
        Self::BLACK
    }
    pub fn white() -> Color {
        Self::WHITE
    }
    pub fn gray(level: f64) -> Color {
        Color::new(level, level, level)
    }

    pub fn is_black(&self) -> bool {
        self.r <= 0.0 && self.g <= 0.0 && self.b <= 0.0
    }
    pub fn has_nan(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan()
    }

    pub fn to_u8(&self) -> [u8; 3] {
        [
            saturate_cast_u8(self.r),
            saturate_cast_u8(self.g),
            saturate_cast_u8(self.b),
        ]
    }

    /// Component-wise near-equality under the engine epsilon.
    pub fn close_to(&self, other: Color) -> bool {
        near_equal(self.r, other.r) && near_equal(self.g, other.g) && near_equal(self.b, other.b)
    }
}

impl std::ops::Add for Color {
    type Output = Color;
    fn add(self, rhs: Self) -> Self {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}
impl std::ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl std::ops::Sub for Color {
    type Output = Color;
    fn sub(self, rhs: Self) -> Self {
        Color::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}
impl std::ops::Mul<f64> for Color {
    type Output = Color;
    fn mul(self, s: f64) -> Self {
        Color::new(self.r * s, self.g * s, self.b * s)
    }
}
impl std::ops::Mul<Color> for f64 {
    type Output = Color;
    fn mul(self, c: Color) -> Color {
        c * self
    }
}
/// Hadamard (component-wise) product; blends a surface color with a light's
/// intensity color.
impl std::ops::Mul for Color {
    type Output = Color;
    fn mul(self, rhs: Self) -> Self {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}
impl Sum for Color {
    fn sum<I: Iterator<Item = Color>>(iter: I) -> Color {
        iter.fold(Color::black(), |acc, c| acc + c)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = f.precision().unwrap_or(4);
        write!(f, "rgb({:.p$}, {:.p$}, {:.p$})", self.r, self.g, self.b, p = p)
    }
}
