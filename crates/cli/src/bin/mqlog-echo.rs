// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mqlog-echo - send one message to a TCP endpoint and print the reply

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "mqlog-echo",
    version,
    about = "Send one message over raw TCP and print the first reply"
)]
struct Args {
    /// Server address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Text to send
    #[arg(long, default_value = "hello")]
    message: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let reply = mqlog_adapters::probe::exchange(&addr, &args.message)
        .await
        .with_context(|| format!("echo exchange with {} failed", addr))?;

    println!("Message sent: {}", args.message);
    println!("Received: {}", reply);
    Ok(())
}
