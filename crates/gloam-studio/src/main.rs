//! Renders the frames of a JSON scene file to PNG images.
//!
//! ```text
//! gloam-studio <scene.json> [--out-dir DIR] [--log FILTER]
//! ```

mod scene;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use gloam_engine::coords::Vec2;
use gloam_engine::logging::{LoggingConfig, init_logging};
use gloam_engine::raster::Surface;
use gloam_fow::ids::ShapeId;
use gloam_fow::layer::LayerManager;
use gloam_fow::vision::OpenFieldOracle;

use scene::{FrameConfig, SceneFile, floor_by_name, translated};

#[derive(Debug, Default)]
struct Args {
    scene: PathBuf,
    out_dir: Option<PathBuf>,
    log: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Args::default();
        let mut scene = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => parsed.out_dir = Some(args.next().context("--out-dir needs a value")?.into()),
                "--log" => parsed.log = Some(args.next().context("--log needs a value")?),
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                _ if scene.is_none() => scene = Some(PathBuf::from(&arg)),
                _ => bail!("unexpected argument {arg}"),
            }
        }
        parsed.scene = scene.context("usage: gloam-studio <scene.json> [--out-dir DIR] [--log FILTER]")?;
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter),
        None => LoggingConfig::default(),
    });

    let text = std::fs::read_to_string(&args.scene)
        .with_context(|| format!("failed to read {}", args.scene.display()))?;
    let file = SceneFile::from_json(&text).with_context(|| format!("in {}", args.scene.display()))?;

    let mut manager = file.build()?;
    let oracle = OpenFieldOracle::new(file.world_bounds(manager.transform()));
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| args.scene.parent().map(Path::to_path_buf).unwrap_or_default());

    if file.frames.is_empty() {
        log::warn!("{} has no frames, nothing to render", args.scene.display());
    }
    for (i, frame) in file.frames.iter().enumerate() {
        apply_frame(&mut manager, frame).with_context(|| format!("frame {i}"))?;
        manager.draw(&oracle);

        let image = frame_image(&manager, frame).with_context(|| format!("frame {i}"))?;
        let path = out_dir.join(&frame.output);
        write_png(&image, &path)?;
        log::info!("frame {i} -> {}", path.display());
    }

    Ok(())
}

/// Applies a frame's floor switch and shape moves.
fn apply_frame(manager: &mut LayerManager, frame: &FrameConfig) -> Result<()> {
    if let Some(name) = &frame.current_floor {
        let id = floor_by_name(manager, name)?;
        manager.set_current_floor(id)?;
    }
    for mv in &frame.moves {
        let shape = manager
            .shapes()
            .get(ShapeId(mv.shape))
            .with_context(|| format!("cannot move unknown shape {}", mv.shape))?;
        let moved = translated(shape, Vec2::new(mv.by[0], mv.by[1]));
        manager.update_shape(moved)?;
    }
    Ok(())
}

fn frame_image(manager: &LayerManager, frame: &FrameConfig) -> Result<Surface> {
    let Some(name) = &frame.layer else {
        return Ok(manager.composite());
    };
    let floor = manager.floors().current_floor().context("scene has no floors")?;
    let layer = manager
        .get_layer(floor.id, name)
        .with_context(|| format!("no layer {name:?} on {}", floor.name))?;
    Ok(layer.surface().clone())
}

fn write_png(surface: &Surface, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let image = image::RgbaImage::from_raw(surface.width(), surface.height(), surface.to_rgba8())
        .context("surface size does not match its pixel buffer")?;
    image.save(path).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
