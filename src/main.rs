//! LG Deploy Service entry point.
//!
//! Initializes tracing, loads configuration from a TOML file, binds the HTTP
//! listener and serves until SIGTERM/SIGINT triggers a graceful shutdown.

use clap::Parser;

use lg_deploy::config::{AppConfig, DEFAULT_CONFIG_PATH};
use lg_deploy::http::{start_server, Application};
use lg_deploy::logging::{init_tracing, resolve_filter};

/// LG Deploy Service: health and readiness probes with request correlation
#[derive(Parser, Debug)]
#[command(name = "lg-deploy", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "lg_deploy=debug,lg_deploy::request=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override http.port from the configuration file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logging format lives in the config file, so load it before tracing is up
    let (mut config, from_file) =
        AppConfig::load_or_default(&args.config, args.config == DEFAULT_CONFIG_PATH)?;
    if let Some(port) = args.port {
        config.http.port = port;
    }

    let log_filter = resolve_filter(args.log_level, std::env::var("RUST_LOG").ok());
    init_tracing(&log_filter, &config.logging);

    if from_file {
        tracing::info!(path = %args.config, "Loaded configuration");
    } else {
        tracing::warn!(
            path = %args.config,
            "Configuration file not found, using built-in defaults"
        );
    }

    let app = Application::build(config)?;
    tracing::info!("Listening on http://{}", app.local_addr());

    start_server(app).await?;

    Ok(())
}
