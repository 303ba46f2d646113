use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One I/O backend under benchmark: the identifier used in result file
/// names and the label shown in figure legends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backend {
    pub id: String,
    pub label: String,
}

impl Backend {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
        }
    }
}

/// Everything the load and render passes need to know about one figure:
/// which result files exist, which slice of them to draw, and where the
/// output goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    pub backends: Vec<Backend>,
    pub depths: Vec<u32>,
    pub threads: Vec<u32>,
    pub depth_to_plot: u32,
    pub result_dir: PathBuf,
    pub file_template: String,
    pub output_path: PathBuf,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            backends: vec![
                Backend::new("spdk", "SPDK"),
                Backend::new("iouring", "io_uring"),
                Backend::new("read", "read"),
                Backend::new("xrp", "XRP"),
            ],
            depths: vec![3, 6],
            threads: (1..=12).collect(),
            depth_to_plot: 3,
            result_dir: PathBuf::from("result"),
            file_template: "{depth}-layer-{threads}-threads-{backend}.txt".to_owned(),
            output_path: PathBuf::from("5a.pdf"),
        }
    }
}

impl FigureConfig {
    /// Expands the file template for one (depth, threads, backend) run.
    pub fn result_path(&self, depth: u32, threads: u32, backend_id: &str) -> PathBuf {
        let name = self
            .file_template
            .replace("{depth}", &depth.to_string())
            .replace("{threads}", &threads.to_string())
            .replace("{backend}", backend_id);
        self.result_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_bpfkv_layout() {
        let config = FigureConfig::default();
        let ids: Vec<&str> = config.backends.iter().map(|b| b.id.as_str()).collect();
        let labels: Vec<&str> = config.backends.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(ids, ["spdk", "iouring", "read", "xrp"]);
        assert_eq!(labels, ["SPDK", "io_uring", "read", "XRP"]);
        assert_eq!(config.depths, vec![3, 6]);
        assert_eq!(config.threads, (1..=12).collect::<Vec<_>>());
        assert_eq!(config.depth_to_plot, 3);
        assert_eq!(config.output_path, PathBuf::from("5a.pdf"));
        assert_eq!(
            config.result_path(3, 12, "spdk"),
            PathBuf::from("result/3-layer-12-threads-spdk.txt")
        );
    }
}
