#![forbid(unsafe_code)]

//! `peer-chat`: two-party terminal chat binary.
//!
//! Parses arguments, loads configuration and localized strings, then runs
//! the server or client role until the conversation ends.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use peer_chat::cli::{Cli, LogFormat, Role};
use peer_chat::config::ChatConfig;
use peer_chat::localization::{Bundle, Localizer};
use peer_chat::net::{run_client, run_server};
use peer_chat::session::StdinInput;
use peer_chat::{AppError, Result};

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("peer-chat bootstrap");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?;

    let result = runtime.block_on(run(args));

    // A stdin read parked on the blocking pool would otherwise hold the
    // process open after the session has ended.
    runtime.shutdown_background();
    result
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let working_dir = std::env::current_dir()
        .map_err(|err| AppError::Config(format!("cannot resolve working directory: {err}")))?;
    let config = ChatConfig::discover(args.config.as_deref(), &working_dir)?;
    let localizer = Localizer::new(&config.application.locale);
    info!(
        name = %config.application.name,
        locale = localizer.locale(),
        "configuration loaded"
    );

    // ── Run the selected role ───────────────────────────
    let (outcome, error_key) = match args.role() {
        Role::Server => {
            info!("starting chat server");
            let outcome = run_server(&config, &localizer, StdinInput::new()).await;
            (outcome, "error.server")
        }
        Role::Client(addr) => {
            info!(peer = %addr, "starting chat client");
            let outcome = run_client(&addr, &config, &localizer, StdinInput::new()).await;
            (outcome, "error.client")
        }
    };

    if let Err(err) = &outcome {
        error!(%err, "chat application error");
        eprintln!(
            "{} ({}): {err}",
            localizer.message(Bundle::Errors, "error.application"),
            localizer.message(Bundle::Errors, error_key)
        );
    }

    outcome
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
