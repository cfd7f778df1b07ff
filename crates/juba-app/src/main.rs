use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use juba_config::Config;

mod cli;
mod commands;
mod controller;
mod logging;
mod protocol;
mod state;


use self::cli::{Arguments, Command};
use self::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let args = Arguments::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Arguments) -> anyhow::Result<()> {
    let mut config = Config::new();
    if let Some(backend) = args.store {
        config.store.backend = backend;
    }
    if let Some(path) = args.data {
        config.store.data_path = path;
    }
    if let Command::Serve { addr: Some(addr) } = &args.command {
        config.network.addr = addr.clone();
    }

    tracing::debug!(
        "Store: {} ({})",
        config.store.backend,
        config.store.data_path.display()
    );

    let state = Arc::new(AppState::new(config).await?);
    commands::run(args.command, state).await
}
