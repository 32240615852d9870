mod cli;
mod config;
mod logging;
mod run;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use config::Settings;
use tracing::info;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_with_filter(logging::level_directive(&args.log_level));

    info!("stargen {}", env!("CARGO_PKG_VERSION"));

    let base = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = args.apply(base);

    let points = run::load_points(&args.input)?;
    info!(
        "Loaded {} points from {}",
        points.len(),
        args.input.display()
    );

    let result = run::embed(&points, &settings)?;
    run::write_result(&result, args.output.as_deref())?;

    if let Some(image) = &args.image {
        run::draw(&result, &settings, image)?;
    }

    Ok(())
}
