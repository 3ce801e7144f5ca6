//! Script discovery under the scripts root.
//!
//! Pure read of the filesystem tree: recursively visits the scripts root and
//! collects every file whose base name matches the shell-script glob. The
//! entry script, when given, is force-included even if it does not match the
//! glob or lies outside the root; whether it actually exists on disk is
//! validated later, before copying (see the build command).

use crate::error::{Error, Result};
use glob::Pattern;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Glob matched against each file's base name.
pub const SCRIPT_GLOB: &str = "*.sh";

/// Discovers scripts under `scripts_root`, resolved against `base_dir`.
///
/// Returned paths are relative to `base_dir` (e.g. `scripts/main.sh`).
/// A `BTreeSet` gives set semantics plus the stable ordering the generator
/// needs for reproducible output.
///
/// # Errors
///
/// [`Error::NoScriptsFound`] when the walk matches nothing and no entry was
/// given to force-include.
pub fn discover(
    base_dir: &Path,
    scripts_root: &Path,
    entry: Option<&Path>,
) -> Result<BTreeSet<PathBuf>> {
    // Cannot fail: SCRIPT_GLOB is a valid pattern.
    let pattern = Pattern::new(SCRIPT_GLOB).unwrap_or_else(|_| unreachable!());

    let mut scripts = BTreeSet::new();
    let root = base_dir.join(scripts_root);

    for dir_entry in WalkDir::new(&root).follow_links(false) {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            // A missing or unreadable root is indistinguishable from an empty
            // one at this stage; the emptiness check below reports it.
            Err(e) => {
                log::debug!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };

        if !dir_entry.file_type().is_file() {
            continue;
        }
        let matched = dir_entry
            .path()
            .file_name()
            .map(|name| pattern.matches(&name.to_string_lossy()))
            .unwrap_or(false);
        if !matched {
            continue;
        }

        if let Ok(rel) = dir_entry.path().strip_prefix(base_dir) {
            scripts.insert(rel.to_path_buf());
        }
    }

    // Force-include the entry script regardless of glob or location. The
    // path is normalized so a `./`-spelled entry collapses with the same
    // script found by the walk.
    if let Some(entry) = entry {
        scripts.insert(crate::bundle::lexical_normal(entry));
    }

    if scripts.is_empty() {
        return Err(Error::NoScriptsFound {
            root: scripts_root.to_path_buf(),
        });
    }

    log::debug!("discovered {} script(s) under {}", scripts.len(), root.display());
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, "#!/bin/sh\n").expect("write");
    }

    #[test]
    fn finds_nested_scripts_and_skips_non_scripts() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("scripts/main.sh"));
        touch(&dir.path().join("scripts/lib/helpers.sh"));
        touch(&dir.path().join("scripts/README.md"));

        let scripts = discover(dir.path(), Path::new("scripts"), None).expect("discover");
        let got: Vec<_> = scripts.iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(got, ["scripts/lib/helpers.sh", "scripts/main.sh"]);
    }

    #[test]
    fn entry_is_force_included_even_without_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("scripts/lib/helpers.sh"));

        let scripts = discover(
            dir.path(),
            Path::new("scripts"),
            Some(Path::new("scripts/run")),
        )
        .expect("discover");
        assert!(scripts.contains(Path::new("scripts/run")));
    }

    #[test]
    fn duplicate_entry_collapses() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("scripts/main.sh"));

        let scripts = discover(
            dir.path(),
            Path::new("scripts"),
            Some(Path::new("scripts/main.sh")),
        )
        .expect("discover");
        assert_eq!(scripts.len(), 1);
    }

    #[test]
    fn dot_spelled_entry_collapses_with_discovered_script() {
        let dir = tempfile::tempdir().expect("tempdir");
        touch(&dir.path().join("scripts/main.sh"));

        let scripts = discover(
            dir.path(),
            Path::new("scripts"),
            Some(Path::new("./scripts/main.sh")),
        )
        .expect("discover");
        assert_eq!(scripts.len(), 1);
        assert!(scripts.contains(Path::new("scripts/main.sh")));
    }

    #[test]
    fn empty_root_without_entry_is_no_scripts_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("scripts")).expect("mkdir");

        let err = discover(dir.path(), Path::new("scripts"), None).expect_err("must fail");
        assert!(matches!(err, Error::NoScriptsFound { .. }));
    }

    #[test]
    fn missing_root_without_entry_is_no_scripts_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = discover(dir.path(), Path::new("scripts"), None).expect_err("must fail");
        assert!(matches!(err, Error::NoScriptsFound { .. }));
    }
}
