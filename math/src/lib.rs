/// Floating-point helpers shared by every crate in the workspace:
/// - the engine-wide comparison epsilon and `near_equal`,
/// - `min_max` ordering of a pair,
/// - macros to check that two quantities are close / ordered.
pub mod float;

/// Homogeneous-coordinate maths module.
/// - Types: `Point3` and `Vec3` (f64), kept distinct so that translation
///   applies to one and not the other.
/// - 4D vectors and 4x4 matrices come from `glam` (`Vec4` / `Mat4` aliases);
///   `as_vec4()` embeds a point with w = 1 and a vector with w = 0.
/// - Function `reflect()` to mirror a vector about a normal.
pub mod hcm;
