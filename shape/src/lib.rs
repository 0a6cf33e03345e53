//! Shapes and their aggregation into a renderable tree.
//!
//! Individual primitives (sphere, plane, cube, cylinder, cone, triangles) are
//! implemented as free functions over rays in the primitive's local space.
//! [`tree::ShapeTree`] owns every shape in a scene, threads parent links
//! through groups and constructive solid geometry, and is the only type the
//! renderer talks to.

pub mod interaction;
pub mod quadric;
pub mod simple;
pub mod tree;
pub mod triangle;

pub use interaction::{hit, Interaction, Intersection};
pub use quadric::Truncation;
pub use tree::{CsgOp, Geometry, ShapeId, ShapeTree};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    /// Groups and CSG nodes have no surface of their own. Asking one for a
    /// normal means an intersection record was mislabeled upstream.
    #[error("composite shape {0:?} has no surface normal")]
    CompositeNormal(ShapeId),
    #[error("shape {0:?} is not a group and cannot take children")]
    NotAGroup(ShapeId),
    #[error("shape {0:?} already has a parent")]
    AlreadyParented(ShapeId),
}
