//! Command line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shell script bundler
#[derive(Parser, Debug)]
#[command(
    name = "shellpack",
    version,
    about = "Shell script bundler",
    long_about = "Packages a directory of shell scripts into a single self-extracting executable.

The produced binary extracts its embedded scripts into a per-version cache
directory on first run and executes the entry script, forwarding arguments,
standard streams, and exit code.

Usage:
  shellpack build              # Build from current directory
  shellpack make ./myscripts   # Quick build from folder (auto-setup)
  shellpack init ./newproject  # Initialize new project

Exit code 0 = binary guaranteed to exist at the output path."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an executable from a project directory
    Build {
        /// Project directory containing shellpack.toml
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Output path for the produced binary
        ///
        /// Defaults to `<DIR>/build/<name>`. A relative path is resolved
        /// against the invoking directory, not the project directory.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Quick build from an existing folder of scripts
    Make {
        /// Folder containing the scripts; its `main.sh` becomes the entry
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Initialize a new project
    Init {
        /// Directory to scaffold
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Show version
    Version,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
