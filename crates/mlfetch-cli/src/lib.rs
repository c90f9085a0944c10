#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by the binary entry point
use anyhow as _;
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::build_registry_client;
pub use error::CliError;
pub use parser::Cli;
