//! Independent restarts
//!
//! The sweep loop is inherently sequential, but separate runs share nothing.
//! With the `parallel` feature the restarts run on the rayon pool; without it
//! they run one after another. Either way the chosen result is the same.

use crate::error::{EmbedError, EmbedResult};
use crate::optimizer::{Optimizer, OptimizerConfig, RunResult};
use crate::point::LabeledPoint;
use crate::progress::TracingProgress;
use tracing::{debug, info_span};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run once per seed and keep the lowest aggregate error.
///
/// Ties go to the earliest seed. `config.seed` is ignored. When
/// `config.progress_every` is set, each run logs its progress through
/// [`TracingProgress`] inside a `restart` span carrying its seed.
pub fn run_restarts(
    input: &[LabeledPoint],
    config: &OptimizerConfig,
    seeds: &[u64],
) -> EmbedResult<RunResult> {
    if seeds.is_empty() {
        return Err(EmbedError::InvalidConfig(
            "at least one restart seed is required".to_string(),
        ));
    }

    let run_seed = |&seed: &u64| {
        let config = OptimizerConfig {
            seed: Some(seed),
            ..config.clone()
        };
        info_span!("restart", seed)
            .in_scope(|| Optimizer::new(config).run_with_progress(input, &mut TracingProgress))
    };

    #[cfg(feature = "parallel")]
    let results = seeds
        .par_iter()
        .map(run_seed)
        .collect::<EmbedResult<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let results = seeds
        .iter()
        .map(run_seed)
        .collect::<EmbedResult<Vec<_>>>()?;

    for r in &results {
        debug!(
            "restart seed {} finished with error {} ({})",
            r.seed, r.aggregate_error, r.termination
        );
    }

    results
        .into_iter()
        .min_by(|a, b| a.aggregate_error.total_cmp(&b.aggregate_error))
        .ok_or_else(|| EmbedError::InvalidConfig("no restart produced a result".to_string()))
}
