use std::f64::consts::{FRAC_PI_2, PI};

use geometry::ray::Ray;
use geometry::transform::AffineTransform;
use material::Material;
use math::assert_close;
use math::hcm::{point3, vec3};
use radiometry::color::Color;
use shape::{Geometry, ShapeError, ShapeTree};

#[test]
fn fresh_shapes_have_defaults() {
    let mut tree = ShapeTree::new();
    let s = tree.add(Geometry::Sphere);
    assert!(tree.parent(s).is_none());
    assert!(tree.casts_shadow(s));
    assert_eq!(tree.transform_of(s).matrix(), AffineTransform::identity().matrix());
    assert_eq!(*tree.material_of(s), Material::default());
}

#[test]
fn intersecting_a_scaled_sphere() {
    let mut tree = ShapeTree::new();
    let s = tree.add(Geometry::Sphere);
    tree.set_transform(s, AffineTransform::scaling(2.0, 2.0, 2.0).unwrap());
    let ray = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
    let xs = tree.intersect(s, &ray);
    assert_eq!(xs.iter().map(|x| x.t).collect::<Vec<_>>(), vec![3.0, 7.0]);

    tree.set_transform(s, AffineTransform::translation(5.0, 0.0, 0.0));
    assert!(tree.intersect(s, &ray).is_empty());
}

#[test]
fn normal_of_a_transformed_sphere() {
    let mut tree = ShapeTree::new();
    let s = tree.add(Geometry::Sphere);
    tree.set_transform(s, AffineTransform::translation(0.0, 1.0, 0.0));
    let n = tree.normal_at(s, point3(0.0, 1.70711, -0.70711), None).unwrap();
    assert_close!((n - vec3(0.0, 0.70711, -0.70711)).norm(), 0.0);

    let squashed_rotated = AffineTransform::scaling(1.0, 0.5, 1.0).unwrap()
        * AffineTransform::rotation_z(PI / 5.0);
    tree.set_transform(s, squashed_rotated);
    let sq = 2.0f64.sqrt() / 2.0;
    let n = tree.normal_at(s, point3(0.0, sq, -sq), None).unwrap();
    assert_close!((n - vec3(0.0, 0.97014, -0.24254)).norm(), 0.0);
}

#[test]
fn intersecting_a_group_collects_sorted_child_hits() {
    let mut tree = ShapeTree::new();
    let g = tree.add_group();
    let s1 = tree.add(Geometry::Sphere);
    let s2 = tree.add(Geometry::Sphere);
    let s3 = tree.add(Geometry::Sphere);
    tree.set_transform(s2, AffineTransform::translation(0.0, 0.0, -3.0));
    tree.set_transform(s3, AffineTransform::translation(5.0, 0.0, 0.0));
    for s in [s1, s2, s3].iter() {
        tree.add_child(g, *s).unwrap();
    }

    let empty_group_ray = Ray::new(point3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0));
    let e = tree.add_group();
    assert!(tree.intersect(e, &empty_group_ray).is_empty());

    let ray = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
    let xs = tree.intersect(g, &ray);
    let hit_shapes: Vec<_> = xs.iter().map(|x| x.shape).collect();
    assert_eq!(hit_shapes, vec![s2, s2, s1, s1]);
}

#[test]
fn group_and_child_transforms_compose() {
    let mut tree = ShapeTree::new();
    let g = tree.add_group();
    tree.set_transform(g, AffineTransform::scaling(2.0, 2.0, 2.0).unwrap());
    let s = tree.add(Geometry::Sphere);
    tree.set_transform(s, AffineTransform::translation(5.0, 0.0, 0.0));
    tree.add_child(g, s).unwrap();

    let ray = Ray::new(point3(10.0, 0.0, -10.0), vec3(0.0, 0.0, 1.0));
    let xs = tree.intersect(g, &ray);
    assert_eq!(xs.len(), 2);
}

#[test]
fn world_to_object_descends_the_ancestry() {
    let mut tree = ShapeTree::new();
    let g1 = tree.add_group();
    tree.set_transform(g1, AffineTransform::rotation_y(FRAC_PI_2));
    let g2 = tree.add_group();
    tree.set_transform(g2, AffineTransform::scaling(2.0, 2.0, 2.0).unwrap());
    tree.add_child(g1, g2).unwrap();
    let s = tree.add(Geometry::Sphere);
    tree.set_transform(s, AffineTransform::translation(5.0, 0.0, 0.0));
    tree.add_child(g2, s).unwrap();

    let p = tree.world_to_object(s, point3(-2.0, 0.0, -10.0));
    assert_close!((p - point3(0.0, 0.0, -1.0)).norm(), 0.0);
}

#[test]
fn normal_to_world_climbs_the_ancestry() {
    let mut tree = ShapeTree::new();
    let g1 = tree.add_group();
    tree.set_transform(g1, AffineTransform::rotation_y(FRAC_PI_2));
    let g2 = tree.add_group();
    tree.set_transform(g2, AffineTransform::scaling(1.0, 2.0, 3.0).unwrap());
    tree.add_child(g1, g2).unwrap();
    let s = tree.add(Geometry::Sphere);
    tree.set_transform(s, AffineTransform::translation(5.0, 0.0, 0.0));
    tree.add_child(g2, s).unwrap();

    let frac = 3.0f64.sqrt() / 3.0;
    let n = tree.normal_to_world(s, vec3(frac, frac, frac));
    assert_close!((n - vec3(0.2857, 0.4286, -0.8571)).norm(), 0.0, 1e-3);

    let n = tree
        .normal_at(s, point3(1.7321, 1.1547, -5.5774), None)
        .unwrap();
    assert_close!((n - vec3(0.2857, 0.4285, -0.8572)).norm(), 0.0, 1e-3);
}

#[test]
fn materials_inherit_from_the_nearest_ancestor() {
    let mut tree = ShapeTree::new();
    let g = tree.add_group();
    let red = Material::default().with_color(Color::new(1.0, 0.0, 0.0));
    tree.set_material(g, red.clone());
    let inheriting = tree.add(Geometry::Sphere);
    let exempt = tree.add(Geometry::Sphere);
    tree.add_child(g, inheriting).unwrap();
    tree.add_child(g, exempt).unwrap();
    tree.set_material(exempt, Material::glass());

    assert_eq!(*tree.material_of(inheriting), red);
    assert_eq!(*tree.material_of(exempt), Material::glass());
}

#[test]
fn composite_shapes_reject_normal_queries() {
    let mut tree = ShapeTree::new();
    let g = tree.add_group();
    assert_eq!(
        tree.normal_at(g, point3(0.0, 0.0, 0.0), None),
        Err(ShapeError::CompositeNormal(g))
    );
}

#[test]
fn add_child_rejects_bad_arguments() {
    let mut tree = ShapeTree::new();
    let g = tree.add_group();
    let s = tree.add(Geometry::Sphere);
    assert_eq!(tree.add_child(s, g), Err(ShapeError::NotAGroup(s)));

    tree.add_child(g, s).unwrap();
    let g2 = tree.add_group();
    assert_eq!(tree.add_child(g2, s), Err(ShapeError::AlreadyParented(s)));
}

#[test]
fn group_bounds_enclose_transformed_children() {
    let mut tree = ShapeTree::new();
    let g = tree.add_group();
    let s = tree.add(Geometry::Sphere);
    tree.set_transform(
        s,
        AffineTransform::translation(2.0, 5.0, -3.0)
            * AffineTransform::scaling(2.0, 2.0, 2.0).unwrap(),
    );
    let c = tree.add(Geometry::Cylinder(shape::Truncation::new(-2.0, 2.0, false)));
    tree.set_transform(
        c,
        AffineTransform::translation(-4.0, -1.0, 4.0)
            * AffineTransform::scaling(0.5, 1.0, 0.5).unwrap(),
    );
    tree.add_child(g, s).unwrap();
    tree.add_child(g, c).unwrap();

    let bbox = tree.bounds_of(g);
    assert_eq!(bbox.min(), point3(-4.5, -3.0, -5.0));
    assert_eq!(bbox.max(), point3(4.0, 7.0, 4.5));
}

#[test]
fn dividing_a_group_partitions_its_children() {
    let mut tree = ShapeTree::new();
    let g = tree.add_group();
    let s1 = tree.add(Geometry::Sphere);
    tree.set_transform(s1, AffineTransform::translation(-2.0, -2.0, 0.0));
    let s2 = tree.add(Geometry::Sphere);
    tree.set_transform(s2, AffineTransform::translation(-2.0, 2.0, 0.0));
    let s3 = tree.add(Geometry::Sphere);
    tree.set_transform(s3, AffineTransform::scaling(4.0, 4.0, 4.0).unwrap());
    for s in [s1, s2, s3].iter() {
        tree.add_child(g, *s).unwrap();
    }

    tree.divide(g, 1);

    let top_children = match tree.geometry(g) {
        Geometry::Group(children) => children.clone(),
        other => panic!("expected a group, got {:?}", other),
    };
    // The oversized sphere straddles the split; the two small spheres go into
    // one subgroup that then splits again along y.
    assert_eq!(top_children[0], s3);
    assert_eq!(top_children.len(), 2);
    let subgroup = top_children[1];
    assert_eq!(tree.parent(subgroup), Some(g));
    let inner = match tree.geometry(subgroup) {
        Geometry::Group(children) => children.clone(),
        other => panic!("expected a group, got {:?}", other),
    };
    assert_eq!(inner.len(), 2);
    for half in inner {
        match tree.geometry(half) {
            Geometry::Group(members) => assert_eq!(members.len(), 1),
            other => panic!("expected a group, got {:?}", other),
        }
    }

    // Hits still come out the same after subdivision.
    let ray = Ray::new(point3(-2.0, -2.0, -10.0), vec3(0.0, 0.0, 1.0));
    let xs = tree.intersect(g, &ray);
    assert!(xs.iter().all(|x| x.shape == s1 || x.shape == s3));
    assert_eq!(xs.len(), 4);
}

#[test]
fn dividing_a_small_group_recurses_into_children() {
    let mut tree = ShapeTree::new();
    let outer = tree.add_group();
    let inner = tree.add_group();
    tree.add_child(outer, inner).unwrap();
    for x in [-2.0, -1.0, 0.0, 1.0, 2.0].iter() {
        let s = tree.add(Geometry::Sphere);
        tree.set_transform(s, AffineTransform::translation(*x, 0.0, 0.0));
        tree.add_child(inner, s).unwrap();
    }

    // Threshold larger than the outer group's size: the outer group keeps its
    // single child but the inner group still gets subdivided.
    tree.divide(outer, 3);
    match tree.geometry(outer) {
        Geometry::Group(children) => assert_eq!(children.as_slice(), &[inner]),
        other => panic!("expected a group, got {:?}", other),
    }
    match tree.geometry(inner) {
        Geometry::Group(children) => assert!(children.len() < 5),
        other => panic!("expected a group, got {:?}", other),
    }
}
