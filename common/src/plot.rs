use serde::{Deserialize, Serialize};

use crate::{
    config::FigureConfig,
    error::FigureError,
    metric::{MetricKind, MetricMap},
};

/// One figure over a loaded sample set. Each crate under `plots/`
/// implements this for the figure it owns.
pub trait Plot {
    /// The name of the figure, used for logging.
    fn name(&self) -> &'static str;
    /// Renders the figure to `config.output_path`.
    fn render(&self, samples: &MetricMap, config: &FigureConfig) -> Result<(), FigureError>;
}

/// One plotted line: the backend's display label and its
/// (thread count, value) points in ascending thread order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(u32, f64)>,
}

/// Selects one (depth, metric) slice of the sample set as one series per
/// backend, in configured backend order. Fails with the missing key before
/// any drawing starts, so a renderer that calls this first never leaves a
/// partial output file behind.
pub fn collect_series(
    samples: &MetricMap,
    config: &FigureConfig,
    depth: u32,
    metric: MetricKind,
) -> Result<Vec<Series>, FigureError> {
    config
        .backends
        .iter()
        .map(|backend| {
            let points = config
                .threads
                .iter()
                .map(|&threads| {
                    samples
                        .get(depth, threads, &backend.id, metric)
                        .map(|value| (threads, value))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Series {
                label: backend.label.clone(),
                points,
            })
        })
        .collect()
}
