use std::path::PathBuf;

use thiserror::Error;

use crate::metric::MetricKind;

#[derive(Error, Debug)]
pub enum FigureError {
    #[error("result file not found: {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no {metric} marker in {path}")]
    MarkerNotFound { metric: MetricKind, path: PathBuf },
    #[error("bad {metric} value `{value}` in {path}")]
    InvalidNumber {
        metric: MetricKind,
        value: String,
        path: PathBuf,
    },
    #[error("no sample for depth {depth}, {threads} threads, backend `{backend}`, {metric}")]
    KeyNotFound {
        depth: u32,
        threads: u32,
        backend: String,
        metric: MetricKind,
    },
    #[error("failed to render figure to {path}: {message}")]
    Render { path: PathBuf, message: String },
}
