use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::{Mat4, Vec3};
use scanline_engine::logging::{LoggingConfig, init_logging};
use scanline_engine::paint::Color;
use scanline_engine::pipeline::{Camera, ExecutionMode, RenderConfig, RenderContext};
use scanline_engine::vertex::{ColorFormat, ColorVertex, FlatFormat, Vertex};

/// Renders a small test scene with the CPU scanline pipeline and writes a PNG.
#[derive(Parser, Debug)]
#[command(name = "scanline-studio")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Raster worker threads; 0 renders on the calling thread
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Output PNG path
    #[arg(long, value_name = "PATH", default_value = "scanline.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let args = Args::parse();
    let (width, height) = (args.width as usize, args.height as usize);

    let mode = match args.workers {
        0 => ExecutionMode::SingleThreaded,
        workers => ExecutionMode::Pooled { workers },
    };
    let config = RenderConfig {
        width,
        height,
        mode,
        clear_color: Color::new(0.05, 0.06, 0.09, 1.0),
        camera: Camera::default().with_aspect_of(width, height),
        ..Default::default()
    };
    let pixel_format = config.pixel_format;
    let mut ctx = RenderContext::new(config).context("failed to create render context")?;

    let started = Instant::now();

    // Ground triangle reaching behind the camera, so it is cut by the near plane.
    let ground = FlatFormat::new(pixel_format.pack(Color::new(0.22, 0.3, 0.26, 1.0)));
    ctx.draw(
        &ground,
        &[
            FlatFormat::vertex(-6.0, -1.0, -1.0),
            FlatFormat::vertex(6.0, -1.0, -1.0),
            FlatFormat::vertex(0.0, -1.0, 12.0),
        ],
    );

    let model = Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0))
        * Mat4::from_rotation_y(0.6)
        * Mat4::from_rotation_x(0.45);
    let (vertices, indices) = cube(model);
    ctx.draw_indexed(&ColorFormat::new(), &vertices, &indices);

    let stats = ctx.stats();
    log::info!(
        "rendered {}x{} ({:?}) in {:.2?}: {} triangles, {} rasterized, {} fragments",
        args.width,
        args.height,
        ctx.mode(),
        started.elapsed(),
        stats.triangles_submitted,
        stats.triangles_rasterized,
        stats.fragments_shaded
    );

    let image = image::RgbaImage::from_raw(args.width, args.height, ctx.target().to_rgba8())
        .context("color buffer does not match image size")?;
    image
        .save(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    log::info!("wrote {}", args.out.display());
    Ok(())
}

/// Unit cube with one color per face, transformed into view space.
fn cube(model: Mat4) -> (Vec<Vertex>, Vec<u32>) {
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z, Color::new(0.9, 0.25, 0.2, 1.0)),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y, Color::new(0.2, 0.75, 0.3, 1.0)),
        (Vec3::Y, Vec3::Z, Vec3::X, Color::new(0.25, 0.4, 0.95, 1.0)),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z, Color::new(0.95, 0.85, 0.2, 1.0)),
        (Vec3::Z, Vec3::X, Vec3::Y, Color::new(0.85, 0.3, 0.85, 1.0)),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X, Color::WHITE),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v, color) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = model.transform_point3((normal + u * su + v * sv) * 0.5);
            vertices.push(ColorVertex::new(corner.extend(1.0), color).to_vertex());
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}
