//! Build orchestration: workspace lifecycle and compiler invocation.
//!
//! The pipeline is linear with no branching back: create an ephemeral
//! workspace, copy every script to its scripts-root-relative path, render the
//! generated source, write the build module descriptor, invoke the external
//! compiler, and install the binary at the final output path. The workspace
//! is a scoped [`tempfile::TempDir`]; it is removed on every exit path, so a
//! failed build leaves no residue. On success exactly one file is written at
//! the output path.

use crate::bundle::generate::generate;
use crate::bundle::sanitize::crate_name;
use crate::bundle::toolchain::CARGO;
use crate::config::BundleConfig;
use crate::error::{Error, IoResultExt, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Builds the bundle binary at `output_path` (resolved against the caller's
/// working directory if relative).
///
/// `scripts` holds project-relative paths as returned by
/// [`crate::bundle::discover`]. The entry script must exist on disk under
/// `project_dir`; force-inclusion during discovery does not create it.
pub async fn build(
    project_dir: &Path,
    config: &BundleConfig,
    scripts: &BTreeSet<PathBuf>,
    output_path: &Path,
) -> Result<()> {
    let entry = project_dir.join(&config.entry);
    if !entry.is_file() {
        return Err(Error::EntryNotFound {
            entry: PathBuf::from(&config.entry),
        });
    }

    // Dropped on every exit path, success or failure.
    let workspace = tempfile::Builder::new()
        .prefix("shellpack-build-")
        .tempdir()
        .fs_context("creating build workspace in", &std::env::temp_dir())?;

    stage_scripts(project_dir, config, scripts, workspace.path()).await?;
    generate(&workspace.path().join("main.rs"), config, scripts).await?;

    let package = crate_name(&config.name);
    write_manifest(workspace.path(), &package).await?;
    compile(workspace.path()).await?;

    install(workspace.path(), &package, output_path).await
}

/// Copies every script into the workspace at its scripts-root-relative path.
async fn stage_scripts(
    project_dir: &Path,
    config: &BundleConfig,
    scripts: &BTreeSet<PathBuf>,
    workspace: &Path,
) -> Result<()> {
    // Normalized like the generator's relative paths, so `.`-spelled roots
    // stage to the same layout the embedding directives expect.
    let scripts_root = crate::bundle::lexical_normal(Path::new(&config.scripts));

    for script in scripts {
        let normalized = crate::bundle::lexical_normal(script);
        let rel = normalized.strip_prefix(&scripts_root).map_err(|_| {
            // Only the force-included entry can lie outside the root.
            Error::EntryNotFound {
                entry: script.clone(),
            }
        })?;

        let src = project_dir.join(script);
        let dest = workspace.join(rel);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating script subdirectory", parent)?;
        }
        tokio::fs::copy(&src, &dest)
            .await
            .fs_context("copying script", &src)?;
    }

    Ok(())
}

/// Writes the build module descriptor naming the module after the tool.
///
/// The `[workspace]` table keeps the ephemeral module standalone even when
/// the temp directory happens to sit under some enclosing cargo workspace.
async fn write_manifest(workspace: &Path, package: &str) -> Result<()> {
    let manifest = format!(
        r#"[package]
name = "{package}"
version = "0.1.0"
edition = "2021"

[[bin]]
name = "{package}"
path = "main.rs"

[workspace]

[profile.release]
strip = true
"#
    );

    tokio::fs::write(workspace.join("Cargo.toml"), manifest)
        .await
        .map_err(|source| Error::ModuleInit {
            dir: workspace.to_path_buf(),
            source,
        })
}

/// Invokes the external compiler against the workspace.
///
/// Output is captured combined and attached to the error on failure so a
/// broken build is diagnosable without re-running.
async fn compile(workspace: &Path) -> Result<()> {
    log::info!("compiling bundle in {}", workspace.display());

    let output = tokio::process::Command::new(&*CARGO)
        .args(["build", "--release", "--quiet"])
        .arg("--target-dir")
        .arg(workspace.join("target"))
        .current_dir(workspace)
        .output()
        .await
        .map_err(|source| Error::CompilerSpawn {
            command: CARGO.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(Error::Compile {
            status: output.status,
            output: combined,
        });
    }

    Ok(())
}

/// Copies the compiled binary to the final output path.
async fn install(workspace: &Path, package: &str, output_path: &Path) -> Result<()> {
    let built = workspace.join("target").join("release").join(package);

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }

    // fs::copy preserves the executable bit set by the compiler.
    tokio::fs::copy(&built, output_path)
        .await
        .fs_context("installing binary", &built)?;

    Ok(())
}
