//! Bundle source generation.
//!
//! Renders the runtime launcher template into a complete `main.rs` for the
//! ephemeral build module: one `include_bytes!` directive per script bound to
//! its sanitized identifier, a path-to-bytes table covering every discovered
//! script, and the launcher itself parameterized with literal tool name,
//! version, baked cache key, and entry path.
//!
//! Output is deterministic for a given script set: the set iterates in path
//! order and the sanitizer is a pure function. Identifier collisions are
//! checked explicitly here and fail the build with both offending paths.

use crate::bundle::sanitize::sanitize;
use crate::bundle::template::RUNTIME_TEMPLATE;
use crate::config::BundleConfig;
use crate::error::{Error, IoResultExt, Result};
use handlebars::Handlebars;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// One embedded script as the template sees it.
#[derive(Debug, Serialize)]
struct ScriptRecord {
    /// Path relative to the scripts root, forward-slash separated
    path: String,
    /// Symbol the script's bytes are bound to
    ident: String,
}

#[derive(Debug, Serialize)]
struct TemplateData {
    name: String,
    version: String,
    version_key: String,
    entry: String,
    scripts: Vec<ScriptRecord>,
}

/// First 8 hex characters of `sha256(version)`; the per-version cache key.
pub fn version_key(version: &str) -> String {
    let digest = Sha256::digest(version.as_bytes());
    hex::encode(digest)[..8].to_string()
}

/// Renders the bundle source for `scripts` and writes it to `out_path`.
///
/// `scripts` holds project-relative paths as returned by discovery; each is
/// re-expressed relative to the configured scripts root before embedding.
///
/// # Errors
///
/// - [`Error::EntryNotFound`] if the entry path is not reachable relative to
///   the scripts root
/// - [`Error::IdentCollision`] if two paths sanitize to the same symbol
/// - [`Error::TemplateParse`] / [`Error::Template`] on templating failures
/// - [`Error::Io`] if the output cannot be written
pub async fn generate(
    out_path: &Path,
    config: &BundleConfig,
    scripts: &BTreeSet<PathBuf>,
) -> Result<()> {
    let scripts_root = Path::new(&config.scripts);

    let mut records = Vec::with_capacity(scripts.len());
    let mut seen: HashMap<String, String> = HashMap::new();

    for script in scripts {
        let rel = relative_to_root(script, scripts_root, Path::new(&config.entry))?;
        let ident = embed_symbol(&rel);

        // sanitize() is not injective; refuse ambiguous bundles up front.
        if let Some(first) = seen.insert(ident.clone(), rel.clone()) {
            return Err(Error::IdentCollision {
                first,
                second: rel,
                ident,
            });
        }

        records.push(ScriptRecord {
            path: escape(&rel),
            ident,
        });
    }

    let entry_rel = relative_to_root(Path::new(&config.entry), scripts_root, Path::new(&config.entry))?;

    let data = TemplateData {
        name: escape(&config.name),
        version: escape(&config.version),
        version_key: version_key(&config.version),
        entry: escape(&entry_rel),
        scripts: records,
    };

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("runtime", RUNTIME_TEMPLATE)
        .map_err(|e| Error::TemplateParse(Box::new(e)))?;

    let source = handlebars
        .render("runtime", &data)
        .map_err(|e| Error::Template(Box::new(e)))?;

    tokio::fs::write(out_path, source)
        .await
        .fs_context("writing generated bundle source", out_path)?;

    log::debug!(
        "generated bundle source at {} ({} embedded script(s))",
        out_path.display(),
        scripts.len()
    );
    Ok(())
}

/// Re-expresses a project-relative script path relative to the scripts root,
/// forward-slash separated.
///
/// Both sides are normalized first so `.`-spelled config values (`scripts =
/// "."`, `entry = "./scripts/main.sh"`) resolve like any other spelling.
fn relative_to_root(script: &Path, scripts_root: &Path, entry: &Path) -> Result<String> {
    let script = crate::bundle::lexical_normal(script);
    let root = crate::bundle::lexical_normal(scripts_root);
    let rel = script.strip_prefix(&root).map_err(|_| {
        // Only the force-included entry can land here; everything else was
        // discovered under the root.
        Error::EntryNotFound {
            entry: entry.to_path_buf(),
        }
    })?;
    Ok(rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Symbol name for a script's embedded bytes.
///
/// Uppercased to follow const naming rules; the collision check runs on the
/// final symbol so case-folded clashes are caught too.
fn embed_symbol(rel: &str) -> String {
    format!("SCRIPT_{}", sanitize(rel).to_uppercase())
}

/// Escapes a value for interpolation into a Rust string literal.
fn escape(value: &str) -> String {
    value.chars().flat_map(char::escape_default).collect()
}
