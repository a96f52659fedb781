//! # aarch64-core
//!
//! Core types and utilities for talking to the aarch64 console API.
//!
//! This crate provides the shared error type, typed identifiers, configuration and the
//! HTTP transport that service clients dispatch requests through.
//!
//! ## Modules
//!
//! - [`error`] - Error type and `Result` alias
//! - [`ids`] - Strongly-typed identifiers for console resources
//! - [`config`] - Serializable, validated client configuration
//! - [`client`] - HTTP transport configuration and the [`client::Transport`] seam

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod ids;

pub use error::{Error, Result};

/// Base URL of the hosted console API.
pub const DEFAULT_BASE_URL: &str = "https://console.aarch64.com/api";
