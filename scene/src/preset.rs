//! Built-in scenes, both the fixture the shading tests run against and the
//! demo scenes reachable from the command line.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_6, PI};

use geometry::camera::Camera;
use geometry::transform::AffineTransform;
use light::{AreaLight, Jitter, Light};
use material::{Material, Pattern};
use math::hcm::{point3, vec3, Point3};
use radiometry::color::Color;
use shape::{CsgOp, Geometry, ShapeId, ShapeTree, Truncation};

use crate::{RenderError, Scene, World};

/// Two concentric spheres lit by a single point light. The fixture most of
/// the shading tests are written against.
pub fn default_world() -> World {
    let mut world = World::new();
    world.add_light(Light::point(point3(-10.0, 10.0, -10.0), Color::white()));

    let s1 = world.shapes_mut().add(Geometry::Sphere);
    world.shapes_mut().set_material(
        s1,
        Material::default()
            .with_color(Color::new(0.8, 1.0, 0.6))
            .with_diffuse(0.7)
            .with_specular(0.2),
    );
    world.add_object(s1);

    let s2 = world.shapes_mut().add(Geometry::Sphere);
    // Scaling by one half cannot fail.
    world
        .shapes_mut()
        .set_transform(s2, AffineTransform::scaling(0.5, 0.5, 0.5).unwrap());
    world.add_object(s2);
    world
}

/// A unit sphere of fully transparent glass.
pub fn glass_sphere(tree: &mut ShapeTree) -> ShapeId {
    let s = tree.add(Geometry::Sphere);
    tree.set_material(s, Material::glass());
    s
}

pub fn build(name: &str, width: u32, height: u32) -> Option<Result<Scene, RenderError>> {
    match name {
        "three_spheres" => Some(three_spheres(width, height)),
        "soft_shadow" => Some(soft_shadow(width, height)),
        "glass_csg" => Some(glass_csg(width, height)),
        "hexagon" => Some(hexagon(width, height)),
        _ => None,
    }
}

pub const SCENE_NAMES: [&str; 4] = ["three_spheres", "soft_shadow", "glass_csg", "hexagon"];

/// Three glossy spheres over a checkered reflective floor.
pub fn three_spheres(width: u32, height: u32) -> Result<Scene, RenderError> {
    let mut world = World::new();
    world.add_light(Light::point(point3(-10.0, 10.0, -10.0), Color::white()));
    let shapes = world.shapes_mut();

    let floor = shapes.add(Geometry::Plane);
    shapes.set_material(
        floor,
        Material::default()
            .with_pattern(Pattern::checkers(Color::gray(0.85), Color::gray(0.3)))
            .with_specular(0.0)
            .with_reflective(0.08),
    );

    let middle = shapes.add(Geometry::Sphere);
    shapes.set_transform(middle, AffineTransform::translation(-0.5, 1.0, 0.5));
    shapes.set_material(
        middle,
        Material::default()
            .with_color(Color::new(0.1, 1.0, 0.5))
            .with_diffuse(0.7)
            .with_specular(0.3)
            .with_reflective(0.15),
    );

    let right = shapes.add(Geometry::Sphere);
    shapes.set_transform(
        right,
        AffineTransform::translation(1.5, 0.5, -0.5)
            * AffineTransform::scaling(0.5, 0.5, 0.5)?,
    );
    shapes.set_material(
        right,
        Material::default()
            .with_color(Color::new(0.5, 1.0, 0.1))
            .with_diffuse(0.7)
            .with_specular(0.3),
    );

    let left = shapes.add(Geometry::Sphere);
    shapes.set_transform(
        left,
        AffineTransform::translation(-1.5, 0.33, -0.75)
            * AffineTransform::scaling(0.33, 0.33, 0.33)?,
    );
    shapes.set_material(
        left,
        Material::default()
            .with_color(Color::new(1.0, 0.8, 0.1))
            .with_diffuse(0.7)
            .with_specular(0.3),
    );

    for id in [floor, middle, right, left].iter() {
        world.add_object(*id);
    }

    let camera = Camera::new(width, height, FRAC_PI_3).looking_at(
        point3(0.0, 1.5, -5.0),
        point3(0.0, 1.0, 0.0),
        vec3(0.0, 1.0, 0.0),
    )?;
    Ok(Scene { world, camera })
}

/// A sphere between a rectangular light and a wall, showing the penumbra.
pub fn soft_shadow(width: u32, height: u32) -> Result<Scene, RenderError> {
    let mut world = World::new();
    world.add_light(Light::Area(AreaLight::new(
        point3(-1.0, 2.0, 4.0),
        vec3(2.0, 0.0, 0.0),
        10,
        vec3(0.0, 2.0, 0.0),
        10,
        Color::new(1.5, 1.5, 1.5),
        Jitter::Random,
    )));
    let shapes = world.shapes_mut();

    let floor = shapes.add(Geometry::Plane);
    shapes.set_material(
        floor,
        Material::default()
            .with_color(Color::white())
            .with_ambient(0.025)
            .with_diffuse(0.67)
            .with_specular(0.0),
    );

    let glow = shapes.add(Geometry::Sphere);
    shapes.set_transform(
        glow,
        AffineTransform::translation(0.0, 3.0, 4.0)
            * AffineTransform::scaling(0.1, 0.1, 0.1)?,
    );
    shapes.set_material(
        glow,
        Material::default()
            .with_color(Color::new(1.5, 1.5, 1.5))
            .with_ambient(1.0)
            .with_diffuse(0.0)
            .with_specular(0.0),
    );
    shapes.set_casts_shadow(glow, false);

    let red = shapes.add(Geometry::Sphere);
    shapes.set_transform(
        red,
        AffineTransform::translation(0.5, 0.5, 0.0)
            * AffineTransform::scaling(0.5, 0.5, 0.5)?,
    );
    shapes.set_material(
        red,
        Material::default()
            .with_color(Color::new(1.0, 0.0, 0.0))
            .with_ambient(0.1)
            .with_diffuse(0.6)
            .with_specular(0.0)
            .with_reflective(0.3),
    );

    let blue = shapes.add(Geometry::Sphere);
    shapes.set_transform(
        blue,
        AffineTransform::translation(-0.25, 0.33, 0.0)
            * AffineTransform::scaling(0.33, 0.33, 0.33)?,
    );
    shapes.set_material(
        blue,
        Material::default()
            .with_color(Color::new(0.0, 0.0, 1.0))
            .with_ambient(0.1)
            .with_diffuse(0.6)
            .with_specular(0.0)
            .with_reflective(0.3),
    );

    for id in [floor, glow, red, blue].iter() {
        world.add_object(*id);
    }

    let camera = Camera::new(width, height, 0.7854).looking_at(
        point3(-3.0, 1.0, 2.5),
        point3(0.0, 0.5, 0.0),
        vec3(0.0, 1.0, 0.0),
    )?;
    Ok(Scene { world, camera })
}

/// A glass lens carved from two spheres, over a striped backdrop.
pub fn glass_csg(width: u32, height: u32) -> Result<Scene, RenderError> {
    let mut world = World::new();
    world.add_light(Light::point(point3(-6.0, 8.0, -10.0), Color::white()));
    let shapes = world.shapes_mut();

    let backdrop = shapes.add(Geometry::Plane);
    shapes.set_transform(
        backdrop,
        AffineTransform::translation(0.0, 0.0, 3.0) * AffineTransform::rotation_x(FRAC_PI_2),
    );
    shapes.set_material(
        backdrop,
        Material::default()
            .with_pattern(
                Pattern::stripe(Color::white(), Color::new(0.2, 0.4, 0.9)).with_transform(
                    AffineTransform::scaling(0.33, 0.33, 0.33)?,
                ),
            )
            .with_specular(0.0),
    );

    let a = shapes.add(Geometry::Sphere);
    shapes.set_transform(a, AffineTransform::translation(0.0, 1.0, -0.4));
    let b = shapes.add(Geometry::Sphere);
    shapes.set_transform(b, AffineTransform::translation(0.0, 1.0, 0.4));
    let lens = shapes.csg(CsgOp::Intersection, a, b)?;
    shapes.set_material(
        lens,
        Material::glass().with_reflective(0.9).with_ambient(0.0),
    );

    let pedestal = shapes.add(Geometry::Cylinder(Truncation::new(0.0, 0.3, true)));
    shapes.set_transform(pedestal, AffineTransform::translation(0.0, -0.3, 0.0));
    shapes.set_material(
        pedestal,
        Material::default().with_color(Color::gray(0.4)).with_specular(0.1),
    );

    world.add_object(backdrop);
    world.add_object(lens);
    world.add_object(pedestal);

    let camera = Camera::new(width, height, FRAC_PI_3).looking_at(
        point3(0.0, 1.5, -4.0),
        point3(0.0, 1.0, 0.0),
        vec3(0.0, 1.0, 0.0),
    )?;
    Ok(Scene { world, camera })
}

/// Six spheres joined by cylinder edges into a hexagonal ring, built as one
/// group and subdivided so the bounds tests earn their keep.
pub fn hexagon(width: u32, height: u32) -> Result<Scene, RenderError> {
    let mut world = World::new();
    world.add_light(Light::point(point3(-5.0, 10.0, -10.0), Color::white()));
    let shapes = world.shapes_mut();

    let ring = shapes.add_group();
    for side in 0..6 {
        let corner = shapes.add(Geometry::Sphere);
        shapes.set_transform(
            corner,
            AffineTransform::rotation_y(side as f64 * FRAC_PI_3)
                * AffineTransform::translation(0.0, 0.0, -1.0)
                * AffineTransform::scaling(0.25, 0.25, 0.25)?,
        );
        shapes.add_child(ring, corner)?;

        let edge = shapes.add(Geometry::Cylinder(Truncation::new(0.0, 1.0, false)));
        shapes.set_transform(
            edge,
            AffineTransform::rotation_y(side as f64 * FRAC_PI_3)
                * AffineTransform::translation(0.0, 0.0, -1.0)
                * AffineTransform::rotation_y(-FRAC_PI_6)
                * AffineTransform::rotation_z(-FRAC_PI_2)
                * AffineTransform::scaling(0.25, 1.0, 0.25)?,
        );
        shapes.add_child(ring, edge)?;
    }
    shapes.set_material(
        ring,
        Material::default()
            .with_color(Color::new(0.9, 0.6, 0.2))
            .with_specular(0.6)
            .with_shininess(50.0),
    );
    shapes.divide(ring, 4);

    let floor = shapes.add(Geometry::Plane);
    shapes.set_transform(floor, AffineTransform::translation(0.0, -0.3, 0.0));
    shapes.set_material(
        floor,
        Material::default()
            .with_pattern(Pattern::ring(Color::gray(0.8), Color::gray(0.5)))
            .with_specular(0.0),
    );
    world.add_object(ring);
    world.add_object(floor);

    let camera = Camera::new(width, height, PI / 4.0).looking_at(
        point3(2.0, 3.5, -5.0),
        Point3::ORIGIN,
        vec3(0.0, 1.0, 0.0),
    )?;
    Ok(Scene { world, camera })
}

