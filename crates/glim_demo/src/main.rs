//! Command line front end rendering the built-in demo scenes to PNG.

mod scenes;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use image::{Rgb, RgbImage};

use glim_renderer::{Film, ImageTexture, RenderEngine, RenderSettings};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DemoScene {
    /// Cornell box with a fuzzy metal sphere
    Cornell,
    /// Open scene with a mesh, glass, a metal ring and a checker sky
    Showcase,
    /// Gray sphere in a white environment; renders flat if energy is
    /// conserved
    Furnace,
}

/// Render a built-in demo scene to a PNG file.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Width of the rendered image
    #[arg(long = "width")]
    width: u32,

    /// Height of the rendered image
    #[arg(long = "height")]
    height: u32,

    /// Samples per pixel
    #[arg(short = 's', long = "spp", default_value_t = 20)]
    spp: u32,

    /// Number of render threads, defaulting to the available parallelism
    #[arg(short = 't', long = "threads")]
    threads: Option<u32>,

    /// Tile edge length in pixels
    #[arg(long = "tilesize", default_value_t = 64)]
    tile_size: u32,

    /// Base seed for the pixel samplers
    #[arg(long = "seed", default_value_t = 0)]
    seed: u64,

    /// Scene to render
    #[arg(long = "scene", value_enum, default_value = "cornell")]
    scene: DemoScene,

    /// Image to use as the environment, overriding the scene's skybox
    #[arg(long = "skybox")]
    skybox: Option<PathBuf>,

    /// Output PNG path
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let threads = args.threads.unwrap_or_else(|| num_cpus::get() as u32);
    let settings = RenderSettings {
        image_width: args.width,
        image_height: args.height,
        samples_per_pixel: args.spp,
        threads,
        tile_size: args.tile_size,
        seed: args.seed,
    };

    let mut scene = match args.scene {
        DemoScene::Cornell => scenes::cornell_box(settings.aspect_ratio()),
        DemoScene::Showcase => scenes::showcase(settings.aspect_ratio()),
        DemoScene::Furnace => scenes::furnace(settings.aspect_ratio()),
    };

    if let Some(path) = &args.skybox {
        let environment = image::open(path)
            .with_context(|| format!("reading skybox {}", path.display()))?
            .to_rgb8();
        let (width, height) = environment.dimensions();
        scene.set_skybox_texture(Arc::new(ImageTexture::from_raw(
            environment.into_raw(),
            width,
            height,
        )));
    }

    let mut engine = RenderEngine::new();
    engine.init(&settings);

    let start = Instant::now();
    engine.execute(&settings, &mut scene)?;
    log::info!(
        "rendered {}x{} at {} spp in {:.2?}",
        settings.image_width,
        settings.image_height,
        settings.samples_per_pixel,
        start.elapsed()
    );

    let film = engine.film().context("engine has no film after init")?;
    film_to_image(&film)
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());

    Ok(())
}

/// Convert the film to an image buffer. Film row 0 is the bottom of the
/// image, PNG row 0 is the top, so rows flip here.
fn film_to_image(film: &Film) -> RgbImage {
    let width = film.width();
    let height = film.height();
    let data = film.to_rgb8();

    let mut image = RgbImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let film_y = height - 1 - y;
        let index = ((film_y * width + x) * 3) as usize;
        *pixel = Rgb([data[index], data[index + 1], data[index + 2]]);
    }
    image
}
