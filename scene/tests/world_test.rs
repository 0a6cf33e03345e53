use geometry::ray::Ray;
use geometry::transform::AffineTransform;
use light::{AreaLight, Jitter, Light};
use material::{Material, Pattern};
use math::assert_close;
use math::hcm::{point3, vec3};
use radiometry::color::Color;
use scene::preset::{default_world, glass_sphere};
use scene::{World, DEFAULT_RECURSION_DEPTH};
use shape::{hit, Geometry, Interaction};

fn assert_color_close(actual: Color, expected: Color) {
    assert!(
        actual.close_to(expected),
        "expected {} to be close to {}",
        actual,
        expected
    );
}

fn color_close(actual: Color, expected: Color, tol: f64) {
    for (a, e) in [
        (actual.r, expected.r),
        (actual.g, expected.g),
        (actual.b, expected.b),
    ]
    .iter()
    {
        assert_close!(*a, *e, tol);
    }
}

#[test]
fn world_intersections_come_out_sorted() {
    let world = default_world();
    let ray = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
    let xs = world.intersect(&ray);
    let ts: Vec<f64> = xs.iter().map(|x| x.t).collect();
    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shading_an_outer_and_an_inner_hit() {
    let world = default_world();
    let ray = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    color_close(color, Color::new(0.38066, 0.47583, 0.2855), 1e-4);

    // From inside the outer sphere, looking at the inner one.
    let mut world = default_world();
    world.lights_mut()[0] = Light::point(point3(0.0, 0.25, 0.0), Color::white());
    let ray = Ray::new(point3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    color_close(color, Color::new(0.90498, 0.90498, 0.90498), 1e-4);
}

#[test]
fn missing_every_shape_gives_black() {
    let world = default_world();
    let ray = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 1.0, 0.0));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    assert_eq!(color, Color::black());
}

#[test]
fn color_uses_the_hit_from_behind_the_camera() {
    let mut world = default_world();
    let (outer, inner) = (world.objects()[0], world.objects()[1]);
    let outer_material = world.shapes().material_of(outer).clone();
    world
        .shapes_mut()
        .set_material(outer, outer_material.with_ambient(1.0));
    let inner_material = world
        .shapes()
        .material_of(inner)
        .clone()
        .with_ambient(1.0)
        .with_color(Color::new(0.3, 0.3, 1.0));
    world.shapes_mut().set_material(inner, inner_material.clone());

    let ray = Ray::new(point3(0.0, 0.0, 0.75), vec3(0.0, 0.0, -1.0));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    assert_color_close(color, inner_material.color);
}

#[test]
fn shadow_queries_against_the_default_world() {
    let world = default_world();
    let light_position = point3(-10.0, 10.0, -10.0);
    // Nothing between the point and the light.
    assert!(!world.is_shadowed(light_position, point3(0.0, 10.0, 0.0)));
    // The unit sphere blocks the path.
    assert!(world.is_shadowed(light_position, point3(10.0, -10.0, 10.0)));
    // Point on the light's side of every shape.
    assert!(!world.is_shadowed(light_position, point3(-20.0, 20.0, -20.0)));
    assert!(!world.is_shadowed(light_position, point3(-2.0, 2.0, -2.0)));
}

#[test]
fn shade_hit_inside_a_shadow() {
    let mut world = World::new();
    world.add_light(Light::point(point3(0.0, 0.0, -10.0), Color::white()));
    let s1 = world.shapes_mut().add(Geometry::Sphere);
    world.add_object(s1);
    let s2 = world.shapes_mut().add(Geometry::Sphere);
    world
        .shapes_mut()
        .set_transform(s2, AffineTransform::translation(0.0, 0.0, 10.0));
    world.add_object(s2);

    let ray = Ray::new(point3(0.0, 0.0, 5.0), vec3(0.0, 0.0, 1.0));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    assert_color_close(color, Color::gray(0.1));
}

#[test]
fn shapes_can_opt_out_of_shadows() {
    let mut world = World::new();
    world.add_light(Light::point(point3(0.0, 0.0, -10.0), Color::white()));
    let blocker = world.shapes_mut().add(Geometry::Sphere);
    world
        .shapes_mut()
        .set_transform(blocker, AffineTransform::translation(0.0, 0.0, -5.0));
    world.shapes_mut().set_casts_shadow(blocker, false);
    world.add_object(blocker);

    assert!(!world.is_shadowed(point3(0.0, 0.0, -10.0), point3(0.0, 0.0, 0.0)));
}

#[test]
fn reflected_color_of_a_tilted_mirror_floor() {
    let mut world = default_world();
    let floor = world.shapes_mut().add(Geometry::Plane);
    world
        .shapes_mut()
        .set_transform(floor, AffineTransform::translation(0.0, -1.0, 0.0));
    world
        .shapes_mut()
        .set_material(floor, Material::default().with_reflective(0.5));
    world.add_object(floor);

    let sq = 2.0f64.sqrt() / 2.0;
    let ray = Ray::new(point3(0.0, 0.0, -3.0), vec3(0.0, -sq, sq));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    color_close(color, Color::new(0.87677, 0.92436, 0.82918), 1e-3);

    // With no recursion budget left the mirror contributes nothing.
    let xs = world.intersect(&ray);
    let h = hit(&xs).unwrap();
    let comps = Interaction::prepare(h, &ray, &xs, world.shapes()).unwrap();
    assert!(!comps.inside);
    assert_eq!(world.reflected_color(&comps, 0).unwrap(), Color::black());
    let reflected = world.reflected_color(&comps, 1).unwrap();
    color_close(reflected, Color::new(0.19032, 0.2379, 0.14274), 1e-3);
}

#[test]
fn parallel_mirrors_terminate() {
    let mut world = World::new();
    world.add_light(Light::point(point3(0.0, 0.0, 0.0), Color::white()));
    let lower = world.shapes_mut().add(Geometry::Plane);
    world
        .shapes_mut()
        .set_transform(lower, AffineTransform::translation(0.0, -1.0, 0.0));
    world
        .shapes_mut()
        .set_material(lower, Material::default().with_reflective(1.0));
    world.add_object(lower);
    let upper = world.shapes_mut().add(Geometry::Plane);
    world
        .shapes_mut()
        .set_transform(upper, AffineTransform::translation(0.0, 1.0, 0.0));
    world
        .shapes_mut()
        .set_material(upper, Material::default().with_reflective(1.0));
    world.add_object(upper);

    let ray = Ray::new(point3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
    // Terminates because the recursion budget runs out.
    assert!(world.color_at(&ray, DEFAULT_RECURSION_DEPTH).is_ok());
}

#[test]
fn refracted_color_under_total_internal_reflection() {
    let mut world = default_world();
    let outer = world.objects()[0];
    let glass = world
        .shapes()
        .material_of(outer)
        .clone()
        .with_transparency(1.0)
        .with_refractive_index(1.5);
    world.shapes_mut().set_material(outer, glass);

    let sq = 2.0f64.sqrt() / 2.0;
    let ray = Ray::new(point3(0.0, 0.0, sq), vec3(0.0, 1.0, 0.0));
    let xs = world.intersect(&ray);
    assert_eq!(xs.len(), 2);
    // The second crossing is the one inside the sphere, past the critical
    // angle: nothing refracts through.
    let comps = Interaction::prepare(&xs[1], &ray, &xs, world.shapes()).unwrap();
    let refracted = world
        .refracted_color(&comps, DEFAULT_RECURSION_DEPTH)
        .unwrap();
    assert_eq!(refracted, Color::black());
}

#[test]
fn refracted_color_passes_through_glass() {
    let mut world = default_world();
    let (outer, inner) = (world.objects()[0], world.objects()[1]);
    let a = world
        .shapes()
        .material_of(outer)
        .clone()
        .with_ambient(1.0)
        .with_pattern(Pattern::positional());
    world.shapes_mut().set_material(outer, a);
    let b = world
        .shapes()
        .material_of(inner)
        .clone()
        .with_transparency(1.0)
        .with_refractive_index(1.5);
    world.shapes_mut().set_material(inner, b);

    let ray = Ray::new(point3(0.0, 0.0, 0.1), vec3(0.0, 1.0, 0.0));
    let xs = world.intersect(&ray);
    assert_eq!(xs.len(), 4);
    // The hit on the glass inner sphere: the refracted ray continues on to
    // the patterned outer sphere, whose pattern reports the point it struck.
    let h = hit(&xs).unwrap();
    let comps = Interaction::prepare(h, &ray, &xs, world.shapes()).unwrap();
    let refracted = world
        .refracted_color(&comps, DEFAULT_RECURSION_DEPTH)
        .unwrap();
    color_close(refracted, Color::new(0.0, 0.99888, 0.04725), 1e-2);
}

#[test]
fn shade_hit_blends_reflectance_with_schlick() {
    let mut world = default_world();
    let floor = world.shapes_mut().add(Geometry::Plane);
    world
        .shapes_mut()
        .set_transform(floor, AffineTransform::translation(0.0, -1.0, 0.0));
    world.shapes_mut().set_material(
        floor,
        Material::default()
            .with_reflective(0.5)
            .with_transparency(0.5)
            .with_refractive_index(1.5),
    );
    world.add_object(floor);
    let ball = world.shapes_mut().add(Geometry::Sphere);
    world
        .shapes_mut()
        .set_transform(ball, AffineTransform::translation(0.0, -3.5, -0.5));
    world.shapes_mut().set_material(
        ball,
        Material::default()
            .with_color(Color::new(1.0, 0.0, 0.0))
            .with_ambient(0.5),
    );
    world.add_object(ball);

    let sq = 2.0f64.sqrt() / 2.0;
    let ray = Ray::new(point3(0.0, 0.0, -3.0), vec3(0.0, -sq, sq));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    color_close(color, Color::new(0.93391, 0.69643, 0.69243), 1e-3);
}

#[test]
fn glass_floor_shows_the_ball_below() {
    // Same scene as above but with an opaque-reflection-free floor variant:
    // transparency only, no reflectivity, exercising the plain sum path.
    let mut world = default_world();
    let floor = world.shapes_mut().add(Geometry::Plane);
    world
        .shapes_mut()
        .set_transform(floor, AffineTransform::translation(0.0, -1.0, 0.0));
    world.shapes_mut().set_material(
        floor,
        Material::default()
            .with_transparency(0.5)
            .with_refractive_index(1.5),
    );
    world.add_object(floor);
    let ball = world.shapes_mut().add(Geometry::Sphere);
    world
        .shapes_mut()
        .set_transform(ball, AffineTransform::translation(0.0, -3.5, -0.5));
    world.shapes_mut().set_material(
        ball,
        Material::default()
            .with_color(Color::new(1.0, 0.0, 0.0))
            .with_ambient(0.5),
    );
    world.add_object(ball);

    let sq = 2.0f64.sqrt() / 2.0;
    let ray = Ray::new(point3(0.0, 0.0, -3.0), vec3(0.0, -sq, sq));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    color_close(color, Color::new(0.93642, 0.68642, 0.68642), 1e-3);
}

#[test]
fn area_light_gives_fractional_shadow() {
    let mut world = default_world();
    world.lights_mut().clear();
    world.add_light(Light::Area(AreaLight::new(
        point3(-0.5, -0.5, -5.0),
        vec3(1.0, 0.0, 0.0),
        2,
        vec3(0.0, 1.0, 0.0),
        2,
        Color::white(),
        Jitter::Center,
    )));

    let cases = [
        (point3(0.0, 0.0, 2.0), 0.0),
        (point3(1.0, -1.0, 2.0), 0.25),
        (point3(1.5, 0.0, 2.0), 0.5),
        (point3(1.25, 1.25, 3.0), 0.75),
        (point3(0.0, 0.0, -2.0), 1.0),
    ];
    let light = &world.lights()[0];
    for (point, expected) in cases.iter() {
        let fraction = light.intensity_at(|sample| world.is_shadowed(sample, *point));
        assert_close!(fraction, *expected);
    }
}

#[test]
fn nested_glass_spheres_shade_without_error() {
    let mut world = World::new();
    world.add_light(Light::point(point3(-10.0, 10.0, -10.0), Color::white()));
    let outer = glass_sphere(world.shapes_mut());
    let inner = glass_sphere(world.shapes_mut());
    world
        .shapes_mut()
        .set_transform(inner, AffineTransform::scaling(0.5, 0.5, 0.5).unwrap());
    world.add_object(outer);
    world.add_object(inner);

    let ray = Ray::new(point3(0.0, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
    let color = world.color_at(&ray, DEFAULT_RECURSION_DEPTH).unwrap();
    assert!(!color.has_nan());
}
