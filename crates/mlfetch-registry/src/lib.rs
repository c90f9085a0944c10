#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultMlflowClient is used through RegistryClientPort, not its generic internals
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultMlflowClient;

// Configuration
pub use config::{
    Credentials, ENV_TRACKING_PASSWORD, ENV_TRACKING_TOKEN, ENV_TRACKING_USERNAME,
    RegistryClientConfig,
};
