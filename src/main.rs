//! heartscope: Heart-disease risk predictor
//!
//! Main entry point for the terminal application.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heartscope::adapters::sanitize::SanitizingMakeWriter;
use heartscope::adapters::CsvDatasetSource;
use heartscope::application::{ModelTrainer, PredictionService};
use heartscope::tui::App;
use heartscope::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Initialize logging.
    //
    // Writing logs to the terminal would corrupt the TUI (alternate screen), so
    // an interactive session logs to a file and anything else logs to stdout.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting heartscope...");

    // No model, no app: training failures abort startup.
    let source = CsvDatasetSource::new(&config.dataset_path);
    let trained = ModelTrainer::new(config.training_options())
        .train_from(&source)
        .with_context(|| {
            format!(
                "Failed to train model from {}",
                config.dataset_path.display()
            )
        })?;

    let service = PredictionService::from_trained(trained);
    tracing::info!("{}", service.accuracy_caption());

    let mut app = App::new(service);
    app.run()?;

    tracing::info!("heartscope shutdown complete.");
    Ok(())
}
