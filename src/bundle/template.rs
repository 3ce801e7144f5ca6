//! Runtime launcher template.
//!
//! This is the full source of the program compiled into every bundle. It is
//! rendered once per build by [`crate::bundle::generate`] with literal values
//! for the tool name, version, baked cache key, entry script path, and the
//! per-script embedding directives.
//!
//! The generated program deliberately uses only the standard library: the
//! cache key is computed at bundle time, so no hashing dependency is needed
//! at run time, and the ephemeral module compiles without touching a
//! registry.
//!
//! Runtime state machine: compute cache directory, extract embedded scripts
//! if any target path is missing, then exec the entry script with forwarded
//! arguments, inherited stdio, and the parent environment plus
//! `SHELLPACK_SCRIPT_DIR` and `SHELLPACK_VERSION`. The child's exit code is
//! propagated verbatim; extraction races between two first runs of the same
//! version write identical bytes and are benign.

/// Handlebars template for the generated `main.rs`.
pub const RUNTIME_TEMPLATE: &str = r##"//! Generated by shellpack. Do not edit.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{self, Command};

const TOOL_NAME: &str = "{{name}}";
const BUNDLE_VERSION: &str = "{{version}}";
const VERSION_KEY: &str = "{{version_key}}";
const ENTRY_SCRIPT: &str = "{{entry}}";

{{#each scripts}}
const {{this.ident}}: &[u8] = include_bytes!("{{this.path}}");
{{/each}}

static SCRIPTS: &[(&str, &[u8])] = &[
{{#each scripts}}
    ("{{this.path}}", {{this.ident}}),
{{/each}}
];

fn main() {
    let cache_dir = match cache_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{}: cannot determine cache directory: {}", TOOL_NAME, err);
            process::exit(1);
        }
    };

    if needs_extraction(&cache_dir) {
        if let Err(err) = extract(&cache_dir) {
            eprintln!("{}: failed to extract scripts: {}", TOOL_NAME, err);
            process::exit(1);
        }
    }

    let entry = cache_dir.join(ENTRY_SCRIPT);
    let status = Command::new(&entry)
        .args(env::args_os().skip(1))
        .current_dir(&cache_dir)
        .env("SHELLPACK_SCRIPT_DIR", &cache_dir)
        .env("SHELLPACK_VERSION", BUNDLE_VERSION)
        .status();

    match status {
        Ok(status) => match status.code() {
            Some(code) => process::exit(code),
            None => {
                eprintln!("{}: {} terminated abnormally", TOOL_NAME, entry.display());
                process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("{}: failed to execute {}: {}", TOOL_NAME, entry.display(), err);
            process::exit(1);
        }
    }
}

/// Per-version extraction target: `<cache root>/<tool>/<version key>`.
fn cache_dir() -> Result<PathBuf, String> {
    let base = if let Some(dir) = env::var_os("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        PathBuf::from(dir)
    } else if let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) {
        PathBuf::from(home).join(".cache")
    } else {
        return Err("neither XDG_CACHE_HOME nor HOME is set".to_string());
    };
    Ok(base.join(TOOL_NAME).join(VERSION_KEY))
}

/// Presence check only: a hand-edited script is not repaired without a
/// version bump.
fn needs_extraction(cache_dir: &Path) -> bool {
    if !cache_dir.exists() {
        return true;
    }
    SCRIPTS.iter().any(|(rel, _)| !cache_dir.join(rel).exists())
}

fn extract(cache_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(cache_dir)?;
    for (rel, bytes) in SCRIPTS {
        let target = cache_dir.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, bytes)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(0o755))?;
        }
    }
    Ok(())
}
"##;
