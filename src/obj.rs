use std::path::Path;

use itertools::Itertools;
use log::{info, warn};
use thiserror::Error;

use math::hcm::{Point3, Vec3};
use shape::triangle::{SmoothTriangle, Triangle};
use shape::{Geometry, ShapeError, ShapeId, ShapeTree};

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("cannot load OBJ file: {0}")]
    Load(#[from] tobj::LoadError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Imports a Wavefront OBJ file as a group of triangles: one subgroup per
/// model in the file. Faces with more than three vertices are fanned into
/// triangles, and vertex normals (when present) yield smooth triangles.
pub fn load_into_group(path: &Path, tree: &mut ShapeTree) -> Result<ShapeId, ObjError> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let root = tree.add_group();
    let mut triangle_count = 0usize;
    for model in models.into_iter() {
        let mesh = model.mesh;
        let positions: Vec<Point3> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64))
            .collect();
        let normals: Vec<Vec3> = mesh
            .normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0] as f64, n[1] as f64, n[2] as f64))
            .collect();

        let group = tree.add_group();
        tree.add_child(root, group)?;
        for (a, b, c) in mesh.indices.iter().map(|&i| i as usize).tuples() {
            let geometry = if normals.is_empty() {
                Geometry::Triangle(Triangle::new(positions[a], positions[b], positions[c]))
            } else {
                Geometry::SmoothTriangle(SmoothTriangle::new(
                    positions[a],
                    positions[b],
                    positions[c],
                    normals[a],
                    normals[b],
                    normals[c],
                ))
            };
            let triangle = tree.add(geometry);
            tree.add_child(group, triangle)?;
            triangle_count += 1;
        }
        if mesh.indices.len() % 3 != 0 {
            warn!(
                "model {:?} has {} leftover indices",
                model.name,
                mesh.indices.len() % 3
            );
        }
    }
    info!("loaded {} triangles from {}", triangle_count, path.display());
    Ok(root)
}
