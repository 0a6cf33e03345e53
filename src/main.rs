mod cli_options;
mod film;
mod obj;

use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;
use log::{error, info};
use rayon::prelude::*;
use thiserror::Error;

use geometry::camera::Camera;
use light::Light;
use material::Material;
use math::hcm::vec3;
use radiometry::color::Color;
use scene::preset;
use scene::{RenderError, Scene, World};

use film::Film;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Geometry(#[from] geometry::GeometryError),
    #[error(transparent)]
    Obj(#[from] obj::ObjError),
    #[error(transparent)]
    Film(#[from] film::FilmError),
}

fn main() {
    env_logger::init();
    let options = match cli_options::parse_args(std::env::args().collect()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: {}", cli_options::CliOptions::message());
            std::process::exit(1);
        }
    };
    if let Err(e) = run(options) {
        error!("render failed: {}", e);
        std::process::exit(1);
    }
}

fn run(options: cli_options::CliOptions) -> Result<(), AppError> {
    let scene = match &options.obj_file {
        Some(path) => obj_scene(Path::new(path), options.width, options.height)?,
        None => {
            let name = options.scene_name.as_deref().unwrap_or("three_spheres");
            match preset::build(name, options.width, options.height) {
                Some(scene) => scene?,
                None => {
                    eprintln!(
                        "Unknown scene {:?}; available: {}",
                        name,
                        preset::SCENE_NAMES.join(", ")
                    );
                    std::process::exit(1);
                }
            }
        }
    };

    let start = Instant::now();
    let film = render(&scene, options.depth, options.use_multi_thread)?;
    info!("rendered in {:.2?}", start.elapsed());

    film.write_png(Path::new(&options.output))?;
    info!("wrote {}", options.output);
    Ok(())
}

fn render(scene: &Scene, depth: usize, use_multi_thread: bool) -> Result<Film, RenderError> {
    let (width, height) = scene.camera.resolution();
    let progress = ProgressBar::new(height as u64);
    let render_row = |y: u32| -> Result<Vec<Color>, RenderError> {
        let row = (0..width)
            .map(|x| {
                let ray = scene.camera.ray_through_pixel(x, y);
                scene.world.color_at(&ray, depth)
            })
            .collect();
        progress.inc(1);
        row
    };

    let rows: Result<Vec<Vec<Color>>, RenderError> = if use_multi_thread {
        (0..height).into_par_iter().map(render_row).collect()
    } else {
        (0..height).map(render_row).collect()
    };
    progress.finish_and_clear();
    Ok(Film::from_rows(width, height, rows?))
}

/// Builds a scene around an imported OBJ model: the model over a pale floor,
/// with the camera pulled back far enough to frame its bounding box.
fn obj_scene(path: &Path, width: u32, height: u32) -> Result<Scene, AppError> {
    let mut world = World::new();
    let model = obj::load_into_group(path, world.shapes_mut())?;
    world.shapes_mut().set_material(
        model,
        Material::default()
            .with_color(Color::new(0.75, 0.7, 0.6))
            .with_specular(0.3)
            .with_shininess(40.0),
    );
    world.shapes_mut().divide(model, 8);

    let bbox = world.shapes().parent_space_bounds_of(model);
    let center = bbox.min() + bbox.diag() * 0.5;
    let radius = bbox.diag().norm().max(1e-3) * 0.5;

    let floor = world.shapes_mut().add(shape::Geometry::Plane);
    world.shapes_mut().set_transform(
        floor,
        geometry::AffineTransform::translation(0.0, bbox.min().y, 0.0),
    );
    world
        .shapes_mut()
        .set_material(floor, Material::default().with_color(Color::gray(0.8)));

    world.add_object(model);
    world.add_object(floor);
    world.add_light(Light::point(
        center + vec3(-2.0, 3.0, -4.0) * radius,
        Color::white(),
    ));

    let eye = center + vec3(0.0, 0.6, -2.2) * radius;
    let camera = Camera::new(width, height, std::f64::consts::FRAC_PI_3).looking_at(
        eye,
        center,
        vec3(0.0, 1.0, 0.0),
    )?;
    Ok(Scene { world, camera })
}
