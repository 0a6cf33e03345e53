//! Arena storage for every shape in a scene.
//!
//! Shapes are referenced by [`ShapeId`] indices into the arena. Parent links
//! run child-to-parent so that a surface point can be converted between world
//! and local space through any depth of nested groups, while groups and CSG
//! nodes hold their children by id.

use geometry::bounds::{self, BBox};
use geometry::ray::Ray;
use geometry::transform::{AffineTransform, Transform};
use material::Material;
use math::hcm::{Point3, Vec3};
use partition::partition;

use crate::interaction::Intersection;
use crate::quadric::{self, Truncation};
use crate::simple;
use crate::triangle::{SmoothTriangle, Triangle};
use crate::ShapeError;

/// Index of a shape in its [`ShapeTree`]. Ids are never reused or invalidated;
/// the arena only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Sphere,
    Plane,
    Cube,
    Cylinder(Truncation),
    Cone(Truncation),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
    Group(Vec<ShapeId>),
    Csg {
        op: CsgOp,
        left: ShapeId,
        right: ShapeId,
    },
}

#[derive(Debug, Clone)]
struct ShapeNode {
    geometry: Geometry,
    transform: AffineTransform,
    material: Material,
    /// When set, this node keeps its own material instead of inheriting the
    /// nearest ancestor's. Assigning a material sets it.
    owns_material: bool,
    casts_shadow: bool,
    parent: Option<ShapeId>,
}

#[derive(Debug, Clone, Default)]
pub struct ShapeTree {
    nodes: Vec<ShapeNode>,
}

impl ShapeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add(&mut self, geometry: Geometry) -> ShapeId {
        self.nodes.push(ShapeNode {
            geometry,
            transform: AffineTransform::identity(),
            material: Material::default(),
            owns_material: false,
            casts_shadow: true,
            parent: None,
        });
        ShapeId(self.nodes.len() - 1)
    }

    pub fn add_group(&mut self) -> ShapeId {
        self.add(Geometry::Group(vec![]))
    }

    pub fn geometry(&self, id: ShapeId) -> &Geometry {
        &self.nodes[id.0].geometry
    }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.nodes[id.0].parent
    }

    pub fn set_transform(&mut self, id: ShapeId, transform: AffineTransform) {
        self.nodes[id.0].transform = transform;
    }

    pub fn transform_of(&self, id: ShapeId) -> &AffineTransform {
        &self.nodes[id.0].transform
    }

    pub fn set_material(&mut self, id: ShapeId, material: Material) {
        self.nodes[id.0].material = material;
        self.nodes[id.0].owns_material = true;
    }

    /// The material used when shading this shape: its own if it has been
    /// assigned one, otherwise the nearest ancestor's.
    pub fn material_of(&self, id: ShapeId) -> &Material {
        let node = &self.nodes[id.0];
        match node.parent {
            Some(parent) if !node.owns_material => self.material_of(parent),
            _ => &node.material,
        }
    }

    pub fn set_casts_shadow(&mut self, id: ShapeId, casts_shadow: bool) {
        self.nodes[id.0].casts_shadow = casts_shadow;
    }

    pub fn casts_shadow(&self, id: ShapeId) -> bool {
        self.nodes[id.0].casts_shadow
    }

    /// Appends `child` to a group. Fails if `group` has a different geometry
    /// or `child` is already inside another composite.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) -> Result<(), ShapeError> {
        if self.nodes[child.0].parent.is_some() {
            return Err(ShapeError::AlreadyParented(child));
        }
        match &mut self.nodes[group.0].geometry {
            Geometry::Group(children) => children.push(child),
            _ => return Err(ShapeError::NotAGroup(group)),
        }
        self.nodes[child.0].parent = Some(group);
        Ok(())
    }

    pub fn csg(&mut self, op: CsgOp, left: ShapeId, right: ShapeId) -> Result<ShapeId, ShapeError> {
        if self.nodes[left.0].parent.is_some() {
            return Err(ShapeError::AlreadyParented(left));
        }
        if self.nodes[right.0].parent.is_some() {
            return Err(ShapeError::AlreadyParented(right));
        }
        let id = self.add(Geometry::Csg { op, left, right });
        self.nodes[left.0].parent = Some(id);
        self.nodes[right.0].parent = Some(id);
        Ok(id)
    }

    /// True iff `target` is `ancestor` itself or sits anywhere below it.
    pub fn includes(&self, ancestor: ShapeId, target: ShapeId) -> bool {
        if ancestor == target {
            return true;
        }
        match &self.nodes[ancestor.0].geometry {
            Geometry::Group(children) => {
                children.iter().any(|&c| self.includes(c, target))
            }
            Geometry::Csg { left, right, .. } => {
                self.includes(*left, target) || self.includes(*right, target)
            }
            _ => false,
        }
    }

    /// All intersections of `ray` (given in the parent's space, or world space
    /// for roots) with the subtree under `id`, sorted by `t`. Negative `t`
    /// values are kept; callers pick the hit.
    pub fn intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        let node = &self.nodes[id.0];
        let local_ray = node.transform.inverse().apply(*ray);
        match &node.geometry {
            Geometry::Sphere => to_intersections(simple::sphere_intersect(&local_ray), id),
            Geometry::Plane => to_intersections(simple::plane_intersect(&local_ray), id),
            Geometry::Cube => to_intersections(simple::cube_intersect(&local_ray), id),
            Geometry::Cylinder(trunc) => {
                to_intersections(quadric::cylinder_intersect(&local_ray, trunc), id)
            }
            Geometry::Cone(trunc) => {
                to_intersections(quadric::cone_intersect(&local_ray, trunc), id)
            }
            Geometry::Triangle(tri) => tri
                .intersect(&local_ray)
                .map(|(t, uv)| vec![Intersection::with_uv(t, id, uv)])
                .unwrap_or_default(),
            Geometry::SmoothTriangle(tri) => tri
                .intersect(&local_ray)
                .map(|(t, uv)| vec![Intersection::with_uv(t, id, uv)])
                .unwrap_or_default(),
            Geometry::Group(children) => {
                // Bounds test first so that subdivided groups prune whole
                // subtrees per ray.
                if !self.bounds_of(id).intersects(&local_ray) {
                    return vec![];
                }
                let mut xs: Vec<_> = children
                    .iter()
                    .flat_map(|&c| self.intersect(c, &local_ray))
                    .collect();
                xs.sort_by(|a, b| a.t.total_cmp(&b.t));
                xs
            }
            Geometry::Csg { op, left, right } => {
                if !self.bounds_of(id).intersects(&local_ray) {
                    return vec![];
                }
                let mut xs = self.intersect(*left, &local_ray);
                xs.extend(self.intersect(*right, &local_ray));
                xs.sort_by(|a, b| a.t.total_cmp(&b.t));
                self.filter_csg_intersections(*op, *left, xs)
            }
        }
    }

    /// Walks the sorted crossings of both CSG operands, tracking which solids
    /// the ray is currently inside, and keeps only the crossings that lie on
    /// the combined surface.
    fn filter_csg_intersections(
        &self,
        op: CsgOp,
        left: ShapeId,
        xs: Vec<Intersection>,
    ) -> Vec<Intersection> {
        let mut inside_left = false;
        let mut inside_right = false;
        let mut kept = Vec::new();
        for x in xs {
            let left_hit = self.includes(left, x.shape);
            if csg_allows(op, left_hit, inside_left, inside_right) {
                kept.push(x);
            }
            if left_hit {
                inside_left = !inside_left;
            } else {
                inside_right = !inside_right;
            }
        }
        kept
    }

    /// The world-space surface normal at a point on shape `id`. `uv` carries
    /// the barycentric coordinates when the hit came from a smooth triangle.
    pub fn normal_at(
        &self,
        id: ShapeId,
        world_point: Point3,
        uv: Option<(f64, f64)>,
    ) -> Result<Vec3, ShapeError> {
        let local_point = self.world_to_object(id, world_point);
        let local_normal = match &self.nodes[id.0].geometry {
            Geometry::Sphere => simple::sphere_normal(local_point),
            Geometry::Plane => simple::plane_normal(),
            Geometry::Cube => simple::cube_normal(local_point),
            Geometry::Cylinder(trunc) => quadric::cylinder_normal(local_point, trunc),
            Geometry::Cone(trunc) => quadric::cone_normal(local_point, trunc),
            Geometry::Triangle(tri) => tri.normal(),
            Geometry::SmoothTriangle(tri) => match uv {
                Some((u, v)) => tri.normal_at(u, v),
                None => (tri.p2 - tri.p0)
                    .cross(tri.p1 - tri.p0)
                    .try_hat()
                    .unwrap_or(Vec3::ZERO),
            },
            Geometry::Group(_) | Geometry::Csg { .. } => {
                return Err(ShapeError::CompositeNormal(id))
            }
        };
        Ok(self.normal_to_world(id, local_normal))
    }

    /// Converts a world-space point into `id`'s local space, applying every
    /// ancestor transform outermost first.
    pub fn world_to_object(&self, id: ShapeId, point: Point3) -> Point3 {
        let node = &self.nodes[id.0];
        let point = match node.parent {
            Some(parent) => self.world_to_object(parent, point),
            None => point,
        };
        node.transform.inverse().apply(point)
    }

    /// Converts a local-space normal into world space, renormalizing at every
    /// level on the way up.
    pub fn normal_to_world(&self, id: ShapeId, normal: Vec3) -> Vec3 {
        let node = &self.nodes[id.0];
        let normal = node
            .transform
            .apply_normal(normal)
            .try_hat()
            .unwrap_or(Vec3::ZERO);
        match node.parent {
            Some(parent) => self.normal_to_world(parent, normal),
            None => normal,
        }
    }

    /// The bounding box of `id` in its own local space. Untransformable
    /// extents (planes, open cylinders and cones) are infinite on the
    /// unbounded axes.
    pub fn bounds_of(&self, id: ShapeId) -> BBox {
        match &self.nodes[id.0].geometry {
            Geometry::Sphere | Geometry::Cube => BBox::new(
                Point3::new(-1.0, -1.0, -1.0),
                Point3::new(1.0, 1.0, 1.0),
            ),
            Geometry::Plane => BBox::new(
                Point3::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
                Point3::new(f64::INFINITY, 0.0, f64::INFINITY),
            ),
            Geometry::Cylinder(trunc) => BBox::new(
                Point3::new(-1.0, trunc.min, -1.0),
                Point3::new(1.0, trunc.max, 1.0),
            ),
            Geometry::Cone(trunc) => {
                let limit = trunc.min.abs().max(trunc.max.abs());
                BBox::new(
                    Point3::new(-limit, trunc.min, -limit),
                    Point3::new(limit, trunc.max, limit),
                )
            }
            Geometry::Triangle(tri) => triangle_bounds(tri.p0, tri.p1, tri.p2),
            Geometry::SmoothTriangle(tri) => triangle_bounds(tri.p0, tri.p1, tri.p2),
            Geometry::Group(children) => children
                .iter()
                .map(|&c| self.parent_space_bounds_of(c))
                .fold(BBox::empty(), bounds::union),
            Geometry::Csg { left, right, .. } => bounds::union(
                self.parent_space_bounds_of(*left),
                self.parent_space_bounds_of(*right),
            ),
        }
    }

    /// `bounds_of(id)` carried through `id`'s own transform, so that a parent
    /// group can aggregate it.
    pub fn parent_space_bounds_of(&self, id: ShapeId) -> BBox {
        self.nodes[id.0].transform.apply(self.bounds_of(id))
    }

    /// Recursively splits groups with at least `threshold` children into a
    /// pair of tighter subgroups. Children straddling the split plane stay in
    /// the original group. CSG nodes forward to both operands.
    pub fn divide(&mut self, id: ShapeId, threshold: usize) {
        match &self.nodes[id.0].geometry {
            Geometry::Group(children) => {
                let mut children = children.clone();
                if children.len() >= threshold {
                    let (left_box, right_box) = self.bounds_of(id).split();
                    let (fit_left, rest) = partition(&mut children, |&c| {
                        left_box.contains_box(self.parent_space_bounds_of(c))
                    });
                    let left_bucket = fit_left.to_vec();
                    let (fit_right, straddling) = partition(rest, |&c| {
                        right_box.contains_box(self.parent_space_bounds_of(c))
                    });
                    let right_bucket = fit_right.to_vec();
                    let mut remaining = straddling.to_vec();
                    if !left_bucket.is_empty() {
                        remaining.push(self.adopt_subgroup(id, left_bucket));
                    }
                    if !right_bucket.is_empty() {
                        remaining.push(self.adopt_subgroup(id, right_bucket));
                    }
                    children = remaining;
                    log::debug!(
                        "split group {:?} into {} direct children",
                        id,
                        children.len()
                    );
                    self.nodes[id.0].geometry = Geometry::Group(children.clone());
                }
                for child in children {
                    self.divide(child, threshold);
                }
            }
            Geometry::Csg { left, right, .. } => {
                let (left, right) = (*left, *right);
                self.divide(left, threshold);
                self.divide(right, threshold);
            }
            _ => {}
        }
    }

    /// Wraps `members` of group `id` into a fresh subgroup parented to `id`.
    fn adopt_subgroup(&mut self, id: ShapeId, members: Vec<ShapeId>) -> ShapeId {
        let subgroup = self.add(Geometry::Group(members.clone()));
        for member in members {
            self.nodes[member.0].parent = Some(subgroup);
        }
        self.nodes[subgroup.0].parent = Some(id);
        subgroup
    }
}

fn to_intersections(ts: Vec<f64>, id: ShapeId) -> Vec<Intersection> {
    ts.into_iter().map(|t| Intersection::new(t, id)).collect()
}

fn triangle_bounds(p0: Point3, p1: Point3, p2: Point3) -> BBox {
    let mut bbox = BBox::empty();
    bbox.add_point(p0);
    bbox.add_point(p1);
    bbox.add_point(p2);
    bbox
}

fn csg_allows(op: CsgOp, left_hit: bool, inside_left: bool, inside_right: bool) -> bool {
    match op {
        CsgOp::Union => (left_hit && !inside_right) || (!left_hit && !inside_left),
        CsgOp::Intersection => (left_hit && inside_right) || (!left_hit && inside_left),
        CsgOp::Difference => (left_hit && !inside_right) || (!left_hit && inside_left),
    }
}
