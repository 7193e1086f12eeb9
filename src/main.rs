use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;

use travellers_server::config::{AppState, Config};
use travellers_server::{logger, server};

/// Famous explorers lookup server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file, extension optional
    #[arg(short, long, default_value = "config")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cfg = Config::load_from(&args.config)?;
    logger::init(&cfg.logging);

    // Size the runtime from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let state = Arc::new(AppState::from_config(cfg)?);
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&listener.local_addr()?, &state.config, state.explorers.len());

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    server::serve(listener, state, shutdown).await?;
    tracing::info!("Server stopped");
    Ok(())
}
