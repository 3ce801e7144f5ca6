//! Command line interface.
//!
//! Argument parsing lives in [`args`], command bodies in [`commands`]. Any
//! reported error aborts the current command with a non-zero exit; zero means
//! the command's contract was met (for `build` and `make`, that the binary
//! exists at the output path).

mod args;
mod commands;

pub use args::{Args, Command};

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    match args.command {
        Command::Build { dir, output } => commands::build(&dir, output).await?,
        Command::Make { dir } => commands::make(&dir).await?,
        Command::Init { dir } => commands::init(&dir).await?,
        Command::Version => println!("shellpack {}", env!("CARGO_PKG_VERSION")),
    }

    Ok(0)
}
