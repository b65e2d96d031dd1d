// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot TCP send/receive exchange

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Largest reply read back in one exchange
pub const MAX_REPLY: usize = 1024;

/// Errors from a probe exchange
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Send `message` to `addr` and return whatever arrives in the first read.
///
/// No framing and no retry. A peer that closes without replying yields an
/// empty string.
pub async fn exchange(addr: &str, message: &str) -> Result<String, ProbeError> {
    let mut stream = TcpStream::connect(addr)
        .await
        .map_err(|source| ProbeError::Connect {
            addr: addr.to_string(),
            source,
        })?;

    stream.write_all(message.as_bytes()).await?;
    tracing::debug!(addr, bytes = message.len(), "sent");

    let mut buf = vec![0u8; MAX_REPLY];
    let n = stream.read(&mut buf).await?;
    tracing::debug!(addr, bytes = n, "received");

    Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
