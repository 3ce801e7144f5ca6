//! Shell script bundler library.
//!
//! This library packages a directory of shell scripts into a single
//! self-contained native executable. The produced binary extracts its
//! embedded scripts into a per-version cache directory on first run and
//! executes the designated entry script with full argument, stream, and
//! exit-code passthrough.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundle;
pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::BundleConfig;
pub use error::{Error, Result};
