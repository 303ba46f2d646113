use common::{config::FigureConfig, load::load_samples, plot::Plot};
use eyre::Result;
use latency_sweep::P99LatencySweep;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!("bpfkv_figures={log_level}"));
    for module in ["common", "latency_sweep"] {
        env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    let config = FigureConfig::default();
    if let Err(err) = run(&config) {
        error!("{err:#?}");
        return Err(err);
    }
    Ok(())
}

fn run(config: &FigureConfig) -> Result<()> {
    let samples = load_samples(config)?;
    info!("loaded {} metric samples", samples.len());

    let figure = P99LatencySweep;
    figure.render(&samples, config)?;
    info!(
        "wrote {} to {}",
        figure.name(),
        config.output_path.display()
    );
    Ok(())
}
