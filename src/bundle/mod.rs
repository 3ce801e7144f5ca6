//! Bundle pipeline: discovery, generation, and build orchestration.
//!
//! # Overview
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`discover`] walks the scripts root and collects every `*.sh` file,
//!    force-including the entry script.
//! 2. [`generate`] renders a self-contained Rust source embedding every
//!    script's bytes together with the runtime launcher logic.
//! 3. [`orchestrator`] assembles an ephemeral workspace, hands the generated
//!    module to the external Rust compiler, and installs the binary at the
//!    final output path.
//!
//! No locking is performed: two simultaneous builds targeting the same output
//! path are last-writer-wins.
//!
//! # Module Organization
//!
//! - [`discover`] - script discovery under the scripts root
//! - [`sanitize`] - relative-path to identifier mapping
//! - [`generate`] - runtime source generation (Handlebars)
//! - [`template`] - the runtime launcher template text
//! - [`orchestrator`] - workspace lifecycle and compiler invocation
//! - [`toolchain`] - external compiler lookup

pub mod discover;
pub mod generate;
pub mod orchestrator;
pub mod sanitize;
pub mod template;
pub mod toolchain;

pub use discover::discover;
pub use orchestrator::build;

use std::path::{Component, Path, PathBuf};

/// Drops `.` components so `./scripts` and `scripts` name the same root.
///
/// Config values may spell paths with a leading `./`; `Path::strip_prefix`
/// is purely lexical and would otherwise refuse the match.
pub(crate) fn lexical_normal(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_normal_drops_cur_dir_components() {
        assert_eq!(lexical_normal(Path::new("./scripts")), Path::new("scripts"));
        assert_eq!(
            lexical_normal(Path::new("scripts/./lib/a.sh")),
            Path::new("scripts/lib/a.sh")
        );
        assert_eq!(lexical_normal(Path::new(".")), Path::new(""));
        assert_eq!(lexical_normal(Path::new("scripts")), Path::new("scripts"));
    }
}
