use crate::config::Settings;
use clap::Parser;
use stargen_render::{Indicator, Rgb};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stargen")]
#[command(about = "Embed labeled points into fewer dimensions while keeping their distances")]
#[command(version)]
pub struct Args {
    /// JSON array of input points
    pub input: PathBuf,

    /// JSON settings file; flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of sweeps
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Output dimensionality
    #[arg(short, long)]
    pub dimensions: Option<usize>,

    /// Seed for the initial placement (restart i uses seed + i)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Independent runs, keeping the lowest error
    #[arg(long)]
    pub restarts: Option<usize>,

    /// Log progress every this many iterations
    #[arg(long)]
    pub progress_every: Option<usize>,

    /// Include per-pair errors in the result
    #[arg(long)]
    pub pair_errors: bool,

    /// Significant figures for the convergence test
    #[arg(long)]
    pub precision: Option<usize>,

    /// Largest error change still counted as stagnation
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Write the JSON result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Draw the embedding to this file (.svg, .png, .bmp, .jpg)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Point radius in pixels
    #[arg(long)]
    pub radius: Option<i32>,

    /// Name of one unit in the legend
    #[arg(long)]
    pub unit: Option<String>,

    /// Trace pairs whose error is at least this value
    #[arg(long)]
    pub line_threshold: Option<f64>,

    /// Color of traced pairs
    #[arg(long, default_value = "red")]
    pub line_color: Rgb,

    /// Write the pair error next to each traced pair
    #[arg(long)]
    pub line_labels: bool,

    /// Draw error halos in this color
    #[arg(long)]
    pub halo: Option<Rgb>,

    /// Write per-point errors in this color
    #[arg(long)]
    pub text: Option<Rgb>,

    #[arg(long)]
    pub background: Option<Rgb>,

    #[arg(long)]
    pub point_color: Option<Rgb>,

    #[arg(long)]
    pub text_color: Option<Rgb>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Layer the flags over `settings`.
    ///
    /// Indicator flags add to the indicators already in `settings`. Asking
    /// for an image always turns on pair errors.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        let optimizer = &mut settings.optimizer;
        if let Some(n) = self.iterations {
            optimizer.max_iterations = n;
        }
        if let Some(d) = self.dimensions {
            optimizer.output_dimension = d;
        }
        if self.seed.is_some() {
            optimizer.seed = self.seed;
        }
        if let Some(k) = self.progress_every {
            optimizer.progress_every = k;
        }
        if self.precision.is_some() {
            optimizer.precision = self.precision;
        }
        if let Some(t) = self.tolerance {
            optimizer.stagnation_tolerance = t;
        }
        optimizer.want_pair_errors |= self.pair_errors || self.image.is_some();

        if let Some(r) = self.restarts {
            settings.restarts = r;
        }

        let render = &mut settings.render;
        if let Some(w) = self.width {
            render.width = w;
        }
        if let Some(r) = self.radius {
            render.radius = r;
        }
        if let Some(unit) = &self.unit {
            render.unit = unit.clone();
        }
        if let Some(c) = self.background {
            render.background = c;
        }
        if let Some(c) = self.point_color {
            render.point_color = c;
        }
        if let Some(c) = self.text_color {
            render.text_color = c;
        }
        if let Some(threshold) = self.line_threshold {
            render.indicators.push(Indicator::Line {
                threshold,
                color: self.line_color,
                label: self.line_labels,
            });
        }
        if let Some(color) = self.halo {
            render.indicators.push(Indicator::Halo { color });
        }
        if let Some(color) = self.text {
            render.indicators.push(Indicator::Text { color });
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("stargen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn bare_input_keeps_defaults() {
        let args = parse(&["stars.json"]);
        assert_eq!(args.input, PathBuf::from("stars.json"));
        assert_eq!(args.log_level, "info");
        assert_eq!(args.apply(Settings::default()), Settings::default());
    }

    #[test]
    fn flags_override_settings() {
        let args = parse(&[
            "stars.json",
            "-n",
            "40",
            "--dimensions",
            "3",
            "--seed",
            "7",
            "--restarts",
            "4",
            "--precision",
            "6",
            "--tolerance",
            "0.001",
        ]);
        let mut base = Settings::default();
        base.optimizer.max_iterations = 900;
        base.optimizer.seed = Some(1);

        let settings = args.apply(base);
        assert_eq!(settings.optimizer.max_iterations, 40);
        assert_eq!(settings.optimizer.output_dimension, 3);
        assert_eq!(settings.optimizer.seed, Some(7));
        assert_eq!(settings.optimizer.precision, Some(6));
        assert_eq!(settings.optimizer.stagnation_tolerance, 0.001);
        assert_eq!(settings.restarts, 4);
        assert!(!settings.optimizer.want_pair_errors);
    }

    #[test]
    fn absent_flags_leave_settings_alone() {
        let mut base = Settings::default();
        base.optimizer.seed = Some(3);
        base.render.width = 640;
        let settings = parse(&["stars.json"]).apply(base.clone());
        assert_eq!(settings, base);
    }

    #[test]
    fn image_turns_on_pair_errors() {
        let settings = parse(&["stars.json", "--image", "map.svg"]).apply(Settings::default());
        assert!(settings.optimizer.want_pair_errors);
    }

    #[test]
    fn indicator_flags_append_in_order() {
        let settings = parse(&[
            "stars.json",
            "--text",
            "yellow",
            "--halo",
            "#808080",
            "--line-threshold",
            "0.05",
            "--line-labels",
        ])
        .apply(Settings::default());

        assert_eq!(
            settings.render.indicators,
            vec![
                Indicator::Line {
                    threshold: 0.05,
                    color: Rgb::RED,
                    label: true,
                },
                Indicator::Halo { color: Rgb::GRAY },
                Indicator::Text {
                    color: Rgb::YELLOW
                },
            ]
        );
    }

    #[test]
    fn rejects_unknown_colors() {
        let result = Args::try_parse_from(["stargen", "stars.json", "--halo", "mauve"]);
        assert!(result.is_err());
    }
}
