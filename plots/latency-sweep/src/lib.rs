use std::fs;

use common::{
    config::FigureConfig,
    error::FigureError,
    metric::{MetricKind, MetricMap},
    plot::{Plot, Series, collect_series},
};
use plotters::prelude::*;
use svg2pdf::usvg;
use tracing::debug;

/// Figure 5a: p99 latency of every backend over the thread-count sweep at
/// the configured tree depth, log-scale y axis.
#[derive(Debug, Default, Clone)]
pub struct P99LatencySweep;

impl Plot for P99LatencySweep {
    fn name(&self) -> &'static str {
        "p99-latency-sweep"
    }

    fn render(&self, samples: &MetricMap, config: &FigureConfig) -> Result<(), FigureError> {
        // Resolve every point up front so a missing cell fails before the
        // output file is created.
        let series = collect_series(samples, config, config.depth_to_plot, MetricKind::P99Latency)?;
        debug!(
            "rendering {} series to {}",
            series.len(),
            config.output_path.display()
        );

        let (y_min, y_max) = value_bounds(&series);
        let x_min = *config.threads.first().unwrap_or(&1);
        let x_max = *config.threads.last().unwrap_or(&1);

        let render_err = |message: String| FigureError::Render {
            path: config.output_path.clone(),
            message,
        };

        // Draw into an in-memory SVG; the output path is only touched once
        // the whole figure has rendered and converted.
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (900, 600)).into_drawing_area();
            root.fill(&WHITE).map_err(|e| render_err(e.to_string()))?;

            let mut chart = ChartBuilder::on(&root)
                .margin(10)
                .x_label_area_size(50)
                .y_label_area_size(70)
                .build_cartesian_2d(x_min..x_max, (y_min * 0.8..y_max * 1.25).log_scale())
                .map_err(|e| render_err(e.to_string()))?;

            chart
                .configure_mesh()
                .x_labels(config.threads.len())
                .x_desc("Threads")
                .y_desc("99th Latency (µs)")
                .label_style(("sans-serif", 16))
                .axis_desc_style(("sans-serif", 20))
                .draw()
                .map_err(|e| render_err(e.to_string()))?;

            for (idx, line) in series.iter().enumerate() {
                let color = Palette99::pick(idx);
                chart
                    .draw_series(
                        LineSeries::new(line.points.iter().copied(), color.stroke_width(2))
                            .point_size(3),
                    )
                    .map_err(|e| render_err(e.to_string()))?
                    .label(&line.label)
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 16))
                .draw()
                .map_err(|e| render_err(e.to_string()))?;

            root.present().map_err(|e| render_err(e.to_string()))?;
        }

        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default())
            .map_err(|e| render_err(e.to_string()))?;
        let pdf = svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|e| render_err(format!("{e:?}")))?;
        fs::write(&config.output_path, pdf).map_err(|e| render_err(e.to_string()))?;
        Ok(())
    }
}

/// Lowest and highest plotted value across all series, for the y range.
fn value_bounds(series: &[Series]) -> (f64, f64) {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
