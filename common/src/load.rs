use std::{fs, io, path::Path};

use itertools::iproduct;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    config::FigureConfig,
    error::FigureError,
    metric::{MetricKind, MetricMap, SampleKey},
};

/// Reads every result file named by the config and extracts all three
/// metrics from each. The reads are independent, so the sweep runs on the
/// rayon pool and the results are merged by key afterwards. Any missing or
/// malformed file fails the whole pass.
pub fn load_samples(config: &FigureConfig) -> Result<MetricMap, FigureError> {
    let runs = iproduct!(&config.backends, &config.depths, &config.threads)
        .map(|(backend, &depth, &threads)| (backend.id.clone(), depth, threads))
        .collect::<Vec<_>>();
    debug!("loading {} result files", runs.len());

    let samples = runs
        .into_par_iter()
        .map(|(backend, depth, threads)| {
            let path = config.result_path(depth, threads, &backend);
            load_run(&path, depth, threads, &backend)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(samples.into_iter().flatten().collect())
}

fn load_run(
    path: &Path,
    depth: u32,
    threads: u32,
    backend: &str,
) -> Result<Vec<(SampleKey, f64)>, FigureError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            FigureError::FileNotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            FigureError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let mut samples = Vec::with_capacity(MetricKind::ALL.len());
    for metric in MetricKind::ALL {
        let value = metric.extract(&content, path)?;
        samples.push(((depth, threads, backend.to_owned(), metric), value));
    }
    Ok(samples)
}
