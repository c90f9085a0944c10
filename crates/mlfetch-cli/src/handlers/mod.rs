//! Pipeline handlers.
//!
//! Handlers take the invocation config and a `RegistryClientPort`, print
//! progress for the terminal and return a `CliError` on failure.

pub mod fetch;
