// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;
use tempfile::TempDir;

/// Empty scratch directory, removed on drop.
pub fn setup_test_env() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    port
}

/// One-shot echo server: accepts a single connection and writes back the
/// first chunk it reads.
pub fn echo_once() -> (u16, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept failed");
        let mut buf = [0u8; 1024];
        let n = stream.read(&mut buf).expect("read failed");
        stream.write_all(&buf[..n]).expect("write failed");
    });
    (port, handle)
}
