use anyhow::Result;
use clap::Parser;
use credcheck::app::App;
use credcheck::models::Config;
use credcheck::web;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "credcheck")]
#[command(about = "Serve credibility analysis for text, URLs and images")]
struct CliArgs {
    /// Address to listen on.
    #[arg(long, env = "CREDCHECK_BIND", default_value = "0.0.0.0:5000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credcheck=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    info!("Starting credcheck");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app = match App::from_config(&config) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = web::serve(app, args.bind, config.max_upload_bytes).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
