//! Client and data models for the aarch64 console API.
//!
//! Provides typed structures and an asynchronous client for account signup and login,
//! project management and VM lifecycle on `console.aarch64.com`.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use aarch64_core::ids::{ProjectId, VmId};
pub use aarch64_core::{Error, DEFAULT_BASE_URL};
pub use client::{ConsoleClient, ConsoleClientBuilder};
pub use models::{
    AddUserRequest, ApiMeta, ApiResponse, CreateProjectRequest, CreateVmRequest, Credentials,
    DeleteVmRequest, Envelope, Project, ProjectsResponse, Vm,
};
pub use reqwest::Method;

/// Convenient result alias that reuses the shared console error type.
pub type Result<T> = aarch64_core::Result<T>;
