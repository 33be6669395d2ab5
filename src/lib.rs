//! Core library for the `httpstat-probe` CLI.
//!
//! The binary requests each given status code from a status-simulation
//! endpoint and prints how the HTTP client reported it. This crate exposes the
//! pieces it is built from: CLI argument types, the endpoint client, the
//! outcome classifier, and the sequential and concurrent runners.
pub mod args;
pub mod error;
pub mod probe;
pub mod shutdown;
pub mod shutdown_handlers;
