// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mqlog - MQTT v5 event logger

mod args;
mod error;

use clap::Parser;
use mqlog_adapters::{
    MqttConfig, MqttTransport, SshAdapter, TracedRemoteShell, TracedTransport, TransportEvent,
};
use mqlog_core::{Clock, SystemClock};
use mqlog_engine::{EngineError, EventLogger, Precheck};
use mqlog_storage::StorageError;
use std::io;
use std::process::ExitCode;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::args::Args;
use crate::error::CliError;

/// Transport events buffered between the network task and the logger
const EVENT_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    if let Some(check) = args.precheck(prompt_password)? {
        precheck(&check).await?;
    }

    let mut logger = EventLogger::initialize(&args.csv, &args.team, SystemClock, io::stdout())
        .map_err(|e| match e {
            EngineError::Storage(StorageError::Io(e)) => {
                CliError::log_unwritable(&args.csv, e)
            }
            other => CliError::from(other),
        })?;

    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone())?;

    let config = MqttConfig::for_team(&args.host, args.port, &args.team);
    let now = logger.clock().now();
    logger.say(
        now,
        format_args!("CONNECTING to {} ... (team={})", config.addr(), args.team),
    );

    let (tx, mut events) = mpsc::channel::<TransportEvent>(EVENT_CAPACITY);
    let connected = tokio::select! {
        _ = shutdown.cancelled() => None,
        result = MqttTransport::connect(config, tx, shutdown.clone()) => Some(result),
    };
    let Some(connected) = connected else {
        println!("\nbye.");
        return Ok(());
    };
    let (transport, pump) = connected.map_err(|e| CliError::from(EngineError::from(e)))?;
    let transport = TracedTransport::new(transport);

    let result = mqlog_engine::run(&mut logger, &transport, &mut events, &shutdown).await;

    shutdown.cancel();
    drop(events);
    if let Err(e) = pump.await {
        warn!(error = %e, "network task ended abnormally");
    }

    let summary = result?;
    info!(
        recorded = summary.recorded,
        connections = summary.connections,
        total = logger.sequence(),
        "logger stopped"
    );
    drop(logger);
    println!("\nbye.");
    Ok(())
}

async fn precheck(check: &Precheck) -> Result<(), CliError> {
    let shell = TracedRemoteShell::new(SshAdapter::new());
    let mut console = io::stdout();
    check.run(&shell, &SystemClock, &mut console).await?;
    Ok(())
}

fn prompt_password(user: &str, host: &str) -> Result<String, CliError> {
    dialoguer::Password::new()
        .with_prompt(format!("SSH password for {}@{} (empty for key auth)", user, host))
        .allow_empty_password(true)
        .interact()
        .map_err(|e| {
            CliError::new("cannot read SSH password")
                .detail(e)
                .hint("Pass it via MQLOG_SSH_PASS when running without a terminal")
        })
}

/// Cancel `shutdown` on SIGINT or SIGTERM.
fn spawn_signal_handler(shutdown: CancellationToken) -> Result<(), CliError> {
    let install = |kind: SignalKind| {
        signal(kind).map_err(|e| {
            CliError::new("cannot install signal handler").detail(e)
        })
    };
    let mut sigterm = install(SignalKind::terminate())?;
    let mut sigint = install(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => info!("interrupted"),
            _ = sigterm.recv() => info!("terminated"),
        }
        shutdown.cancel();
    });
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // stdout belongs to the console stream
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}
