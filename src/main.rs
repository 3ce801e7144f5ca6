//! shellpack - shell script bundler.
//!
//! This binary packages a directory of shell scripts into a single
//! self-extracting executable with proper error handling and exit-code
//! propagation.

mod bundle;
mod cli;
mod config;
mod error;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
