//! Fetch pipeline services.
//!
//! Each service takes the registry port explicitly; nothing here holds
//! state between calls.

mod materializer;
mod resolver;

pub use materializer::{
    DirectoryStatus, MaterializeError, ensure_destination, marker_contents, materialize,
    write_marker,
};
pub use resolver::{ResolveError, resolve_latest_version};
