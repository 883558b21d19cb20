mod config;

use std::process;

use config::Cli;
use factcheck_kv::KvClient;
use factcheck_server::ServiceState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        tracing::error!(target: "factcheck_cli", %error, "server exited with an error");
        eprintln!("error: {error:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::init();
    cli.validate()?;
    cli.log();

    let kv = KvClient::new(cli.kv.clone())?;
    let max_file_mb = cli.middleware.max_file_mb;
    let state = ServiceState::new(kv, cli.llm.clone(), max_file_mb)?;
    let router = factcheck_server::create_router(state, &cli.middleware);

    let listener = tokio::net::TcpListener::bind(cli.server.bind_addr()).await?;
    tracing::info!(target: "factcheck_cli", addr = %cli.server.bind_addr(), "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!(target: "factcheck_cli", "shutdown signal received");
}
