//! Load, embed, write, draw.

use crate::config::Settings;
use anyhow::{bail, Context, Result};
use stargen_core::{run_restarts, LabeledPoint, Optimizer, RunResult, TracingProgress};
use stargen_render::{render_to_file, Scene};
use std::path::Path;
use tracing::info;

/// Read a JSON array of points.
pub fn load_points(path: &Path) -> Result<Vec<LabeledPoint>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading points {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing points {}", path.display()))
}

/// Seeds for `count` restarts starting at `base`.
pub fn restart_seeds(base: u64, count: usize) -> Vec<u64> {
    (0..count as u64).map(|i| base.wrapping_add(i)).collect()
}

/// Run the optimizer once, or once per restart keeping the best result.
pub fn embed(points: &[LabeledPoint], settings: &Settings) -> Result<RunResult> {
    if settings.restarts == 0 {
        bail!("restarts must be at least 1");
    }

    let result = if settings.restarts == 1 {
        Optimizer::new(settings.optimizer.clone())
            .run_with_progress(points, &mut TracingProgress)?
    } else {
        let base = settings.optimizer.seed.unwrap_or_else(rand::random::<u64>);
        let seeds = restart_seeds(base, settings.restarts);
        info!("Running {} restarts from seed {}", seeds.len(), base);
        run_restarts(points, &settings.optimizer, &seeds)?
    };
    Ok(result)
}

/// Pretty JSON to `output`, or stdout when absent.
pub fn write_result(result: &RunResult, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("writing result {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

/// Draw `result` to `image`.
pub fn draw(result: &RunResult, settings: &Settings, image: &Path) -> Result<()> {
    let pair_errors = result
        .pair_errors
        .as_deref()
        .context("pair errors are required to draw an image")?;
    let scene = Scene::build(&result.points, pair_errors, &settings.render)?;
    render_to_file(&scene, image)?;
    Ok(())
}
