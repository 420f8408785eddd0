//! Demo entry point.

use std::process::ExitCode;

use demo::config::{Config, LogFormat};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    // 1. Initialize tracing
    init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder();
    let metrics_handle = match recorder {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!(error = %err, "metrics recorder unavailable");
            None
        }
    };

    // 3. Run the script
    tracing::info!(capacity = config.event_capacity, "starting event management demo");
    let run = match demo::run(&config) {
        Ok(run) => run,
        Err(err) => {
            tracing::error!(error = %err, "demo aborted");
            return ExitCode::FAILURE;
        }
    };

    // 4. Present the outcome
    println!("{}", run.report.summary());

    if config.dump_journal {
        match run.registry.journal().to_json_lines() {
            Ok(lines) => print!("{lines}"),
            Err(err) => tracing::error!(error = %err, "failed to serialize journal"),
        }
    }

    if let Some(handle) = metrics_handle {
        tracing::info!(metrics = %handle.render(), "metrics snapshot");
    }

    tracing::info!(
        rejections = run.rejections.len(),
        journal_entries = run.registry.journal().len(),
        "demo finished"
    );
    ExitCode::SUCCESS
}
