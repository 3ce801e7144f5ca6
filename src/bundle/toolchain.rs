//! External compiler lookup.
//!
//! The final binary is produced by the ambient Rust toolchain, not by this
//! crate. `$CARGO` wins when set (so builds launched from cargo itself reuse
//! the same toolchain), then `PATH` via `which`.

use std::path::PathBuf;
use std::sync::LazyLock;

/// Resolved `cargo` executable, cached for the lifetime of the process.
pub static CARGO: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Some(cargo) = std::env::var_os("CARGO") {
        return PathBuf::from(cargo);
    }

    match which::which("cargo") {
        Ok(path) => {
            log::debug!("found cargo at: {}", path.display());
            path
        }
        Err(e) => {
            log::debug!("cargo not found in PATH ({e}); deferring to the OS lookup");
            PathBuf::from("cargo")
        }
    }
});
