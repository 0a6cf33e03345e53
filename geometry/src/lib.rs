pub mod bounds;
pub mod camera;
pub mod ray;
pub mod transform;

pub use bounds::BBox;
pub use camera::Camera;
pub use ray::Ray;
pub use transform::{AffineTransform, Transform};

/// Errors from scene-authoring mistakes detected in geometric code. These are
/// configuration errors: they abort the render of the offending scene and are
/// never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("matrix is not invertible (determinant is {0})")]
    SingularMatrix(f64),
}
