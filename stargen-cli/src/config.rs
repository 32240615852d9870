//! Settings file for the driver
//!
//! A JSON document with optional `optimizer`, `restarts` and `render`
//! sections. Missing fields take their defaults, so `{}` is a valid file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stargen_core::OptimizerConfig;
use stargen_render::RenderOptions;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub optimizer: OptimizerConfig,
    /// Independent runs; the best one is kept (default: 1)
    pub restarts: usize,
    pub render: RenderOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            optimizer: OptimizerConfig::default(),
            restarts: 1,
            render: RenderOptions::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stargen_render::{Indicator, Rgb};
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.restarts, 1);
    }

    #[test]
    fn loads_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "optimizer": {{"max_iterations": 50, "seed": 9}},
                "restarts": 3,
                "render": {{"width": 1024, "indicators": [{{"kind": "halo", "color": "gray"}}], "background": "#000080"}}
            }}"##
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.optimizer.max_iterations, 50);
        assert_eq!(settings.optimizer.seed, Some(9));
        assert_eq!(settings.optimizer.output_dimension, 2);
        assert_eq!(settings.restarts, 3);
        assert_eq!(settings.render.width, 1024);
        assert_eq!(
            settings.render.indicators,
            vec![Indicator::Halo { color: Rgb::GRAY }]
        );
        assert_eq!(settings.render.background, Rgb(0, 0, 128));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Settings::load(Path::new("/nonexistent/stargen.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/stargen.json"));
    }
}
