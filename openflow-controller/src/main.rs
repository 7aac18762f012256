#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use openflow_proto::config::{load_from_path, ServerConfig};
use openflow_proto::server::{LoggingHandler, OpenFlowServer};
use openflow_proto::telemetry::init_tracing;
use tokio::sync::watch;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "OpenFlow 1.0 controller")]
struct Cli {
    /// Path to the controller's configuration TOML file. If omitted, the
    /// server runs with built-in defaults (listening on 0.0.0.0:6633).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = init_tracing("info", false) {
        eprintln!("failed to initialize tracing: {err}");
        std::process::exit(1);
    }

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => match load_from_path(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                error!(%err, path = %path.display(), "failed to load configuration");
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };

    info!(addr = %config.listen, max_connections = ?config.max_connections, "starting openflow controller");

    let server = OpenFlowServer::new(config, Arc::new(LoggingHandler));
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, beginning graceful shutdown");
            let _ = shutdown_tx.send(true);
        }
    });

    if let Err(err) = server.run(&mut shutdown_rx).await {
        error!(%err, "server exited with error");
        std::process::exit(1);
    }
}
