//! Error types for bundling operations.
//!
//! Every failure carries enough context (the offending path, the wrapped
//! underlying error) to diagnose a build without re-running it. All errors
//! are terminal for the current invocation; there are no retries anywhere in
//! the pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all bundling operations
#[derive(Error, Debug)]
pub enum Error {
    /// Config file exists but could not be read
    #[error("failed to read config file {}: {}", .path.display(), .source)]
    ConfigRead {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed as TOML
    #[error("failed to parse config file {}: {}", .path.display(), .source)]
    ConfigParse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// Discovery yielded no scripts at all
    #[error("no scripts found under {}", .root.display())]
    NoScriptsFound {
        /// Scripts root that was walked
        root: PathBuf,
    },

    /// Declared entry script is absent from disk or unreachable relative to
    /// the scripts root
    #[error("entry script not found: {}", .entry.display())]
    EntryNotFound {
        /// The declared entry path
        entry: PathBuf,
    },

    /// I/O failure at any pipeline stage, with the operation and path that
    /// failed
    #[error("{} {}: {}", .context, .path.display(), .source)]
    Io {
        /// What the pipeline was doing
        context: &'static str,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Two distinct script paths sanitized to the same embedded-data symbol
    #[error("identifier collision: `{first}` and `{second}` both map to `{ident}`")]
    IdentCollision {
        /// First relative path involved
        first: String,
        /// Second relative path involved
        second: String,
        /// The colliding identifier
        ident: String,
    },

    /// Runtime template failed to parse
    #[error("bundle template is invalid: {0}")]
    TemplateParse(#[from] Box<handlebars::TemplateError>),

    /// Runtime template failed to render
    #[error("failed to render bundle source: {0}")]
    Template(#[from] Box<handlebars::RenderError>),

    /// Build module descriptor could not be written
    #[error("failed to initialize build module in {}: {}", .dir.display(), .source)]
    ModuleInit {
        /// Ephemeral workspace directory
        dir: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// External compiler could not be started at all
    #[error("failed to invoke `{command}`: {source}")]
    CompilerSpawn {
        /// The compiler command
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// External compiler ran and reported failure
    #[error("compilation failed ({status}); compiler output:\n{output}")]
    Compile {
        /// Compiler exit status
        status: std::process::ExitStatus,
        /// Captured combined stdout/stderr for diagnostics
        output: String,
    },
}

/// Extension trait attaching an operation and path to raw I/O results.
pub trait IoResultExt<T> {
    /// Wrap an I/O error with what was being done and to which path.
    fn fs_context(self, context: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn fs_context(self, context: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Io {
            context,
            path: path.to_path_buf(),
            source,
        })
    }
}
