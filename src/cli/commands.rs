//! Command execution.
//!
//! Every command takes explicit directories; the process working directory is
//! read (to resolve relative output paths) but never mutated, so two commands
//! could in principle run back to back against different trees without
//! ambient state leaking between them.

use crate::bundle::{discover, orchestrator};
use crate::config::{BundleConfig, CONFIG_FILE};
use crate::error::{Error, IoResultExt, Result};
use chrono::{Datelike, Timelike};
use std::path::{Path, PathBuf};

/// Sample config written by `init`.
const SAMPLE_CONFIG: &str = r#"name = "mytool"
entry = "scripts/main.sh"
scripts = "scripts"
version = "1.0.0"
"#;

/// Sample entry script written by `init`.
const SAMPLE_ENTRY: &str = "#!/bin/bash\n# Main entry point script\n";

/// `build [dir]`: bundle the project at `dir` into `<dir>/build/<name>`.
pub async fn build(dir: &Path, output: Option<PathBuf>) -> Result<()> {
    let project_dir = dir
        .canonicalize()
        .fs_context("resolving project directory", dir)?;
    log::info!("building from {}", project_dir.display());

    let config = BundleConfig::load(&project_dir)?;
    let scripts = discover(
        &project_dir,
        Path::new(&config.scripts),
        Some(Path::new(&config.entry)),
    )?;

    let output_path = match output {
        Some(path) => absolutize(path)?,
        None => project_dir.join("build").join(&config.name),
    };

    println!("Building {}...", config.name);
    orchestrator::build(&project_dir, &config, &scripts, &output_path).await?;
    println!("✓ Built successfully: {}", output_path.display());
    Ok(())
}

/// `make <dir>`: quick build from a bare folder of scripts.
///
/// Stages every `*.sh` into a temporary project laid out the way `build`
/// expects, names the tool after the folder, and stamps a fresh
/// timestamp-derived version so the produced binary never resolves to a stale
/// cache directory.
pub async fn make(dir: &Path) -> Result<()> {
    let source = dir
        .canonicalize()
        .fs_context("resolving source directory", dir)?;

    let tool_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());

    println!("Making {} from: {}", tool_name, source.display());

    let staging = tempfile::Builder::new()
        .prefix("shellpack-make-")
        .tempdir()
        .fs_context("creating staging directory in", &std::env::temp_dir())?;

    let entry_found = stage_tree(&source, &staging.path().join("scripts")).await?;
    if !entry_found {
        return Err(Error::EntryNotFound {
            entry: source.join("main.sh"),
        });
    }

    let config = BundleConfig {
        name: tool_name.clone(),
        entry: "scripts/main.sh".to_string(),
        scripts: "scripts".to_string(),
        version: fresh_version(),
    };

    let scripts = discover(
        staging.path(),
        Path::new(&config.scripts),
        Some(Path::new(&config.entry)),
    )?;

    let output_path = absolutize(PathBuf::from(&tool_name))?;

    println!("Building {}...", config.name);
    orchestrator::build(staging.path(), &config, &scripts, &output_path).await?;
    println!("✓ Built successfully: {}", output_path.display());
    println!("  (version: {} - fresh build, no cache)", config.version);
    Ok(())
}

/// `init [dir]`: scaffold a new project.
pub async fn init(dir: &Path) -> Result<()> {
    for sub in ["scripts", "build"] {
        let path = dir.join(sub);
        tokio::fs::create_dir_all(&path)
            .await
            .fs_context("creating project directory", &path)?;
    }

    let config_path = dir.join(CONFIG_FILE);
    tokio::fs::write(&config_path, SAMPLE_CONFIG)
        .await
        .fs_context("writing sample config", &config_path)?;

    let entry_path = dir.join("scripts").join("main.sh");
    tokio::fs::write(&entry_path, SAMPLE_ENTRY)
        .await
        .fs_context("writing sample entry script", &entry_path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(&entry_path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("marking entry script executable", &entry_path)?;
    }

    println!("✓ Initialized shellpack project");
    Ok(())
}

/// Copies every `*.sh` under `source` into `dest` preserving relative paths.
///
/// Returns whether a `main.sh` was seen anywhere in the tree.
async fn stage_tree(source: &Path, dest: &Path) -> Result<bool> {
    let mut entry_found = false;

    for dir_entry in walkdir::WalkDir::new(source).follow_links(false) {
        let dir_entry = dir_entry.map_err(|e| Error::Io {
            context: "walking source directory",
            path: source.to_path_buf(),
            source: e.into(),
        })?;

        if !dir_entry.file_type().is_file() {
            continue;
        }
        let name = dir_entry.file_name().to_string_lossy();
        if !name.ends_with(".sh") {
            continue;
        }
        if name == "main.sh" {
            entry_found = true;
        }

        let rel = dir_entry
            .path()
            .strip_prefix(source)
            .unwrap_or_else(|_| unreachable!());
        let target = dest.join(rel);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating staging subdirectory", parent)?;
        }
        tokio::fs::copy(dir_entry.path(), &target)
            .await
            .fs_context("staging script", dir_entry.path())?;
    }

    Ok(entry_found)
}

/// Resolves a possibly-relative path against the invoking directory.
fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().fs_context("resolving working directory", Path::new("."))?;
    Ok(cwd.join(path))
}

/// Timestamp-derived version: `year.dayOfYear.secondOfDay`.
fn fresh_version() -> String {
    let now = chrono::Local::now();
    format!(
        "{}.{:03}.{:05}",
        now.year(),
        now.ordinal(),
        now.num_seconds_from_midnight()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_scaffolds_a_buildable_project() {
        let dir = tempfile::tempdir().expect("tempdir");
        init(dir.path()).await.expect("init");

        assert!(dir.path().join(CONFIG_FILE).is_file());
        assert!(dir.path().join("scripts/main.sh").is_file());
        assert!(dir.path().join("build").is_dir());

        let config = BundleConfig::load(dir.path()).expect("load");
        assert_eq!(config.name, "mytool");
    }

    #[tokio::test]
    async fn stage_tree_copies_scripts_and_reports_entry() {
        let source = tempfile::tempdir().expect("tempdir");
        let dest = tempfile::tempdir().expect("tempdir");
        std::fs::write(source.path().join("main.sh"), "#!/bin/sh\n").expect("write");
        std::fs::create_dir_all(source.path().join("lib")).expect("mkdir");
        std::fs::write(source.path().join("lib/util.sh"), "#!/bin/sh\n").expect("write");
        std::fs::write(source.path().join("notes.txt"), "skip me").expect("write");

        let found = stage_tree(source.path(), dest.path()).await.expect("stage");
        assert!(found);
        assert!(dest.path().join("main.sh").is_file());
        assert!(dest.path().join("lib/util.sh").is_file());
        assert!(!dest.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn stage_tree_without_main_reports_missing_entry() {
        let source = tempfile::tempdir().expect("tempdir");
        let dest = tempfile::tempdir().expect("tempdir");
        std::fs::write(source.path().join("other.sh"), "#!/bin/sh\n").expect("write");

        let found = stage_tree(source.path(), dest.path()).await.expect("stage");
        assert!(!found);
    }

    #[test]
    fn fresh_version_has_three_numeric_fields() {
        let version = fresh_version();
        let parts: Vec<_> = version.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
    }
}
