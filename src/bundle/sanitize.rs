//! Relative-path to identifier sanitization.
//!
//! Embedded script bytes are bound to symbols in the generated source, so
//! every script's relative path must map to a syntactically valid identifier.
//! The mapping is a pure character substitution; it is not injective (e.g.
//! `a/b.sh` and `a_b.sh` both map to `a_b_sh`), so the generator performs an
//! explicit collision check before rendering.

/// Maps a relative script path to an identifier fragment.
///
/// Path separators (`/` and `\`), dots, and hyphens become underscores; all
/// other characters pass through unchanged. Deterministic and total over all
/// strings.
pub fn sanitize(rel_path: &str) -> String {
    rel_path
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' | '-' => '_',
            other => other,
        })
        .collect()
}

/// Maps a tool name to a valid package name for the generated build module.
///
/// Lowercases and keeps `[a-z0-9_-]`; everything else becomes `_`. A leading
/// digit gets a `tool-` prefix and an empty result falls back to `bundle`,
/// since the compiler rejects both.
pub fn crate_name(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| match c.to_ascii_lowercase() {
            c @ ('a'..='z' | '0'..='9' | '_' | '-') => c,
            _ => '_',
        })
        .collect();

    match mapped.chars().next() {
        None => "bundle".to_string(),
        Some('0'..='9') => format!("tool-{mapped}"),
        Some(_) => mapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_separators_dots_and_hyphens() {
        assert_eq!(sanitize("scripts/my-lib.sh"), "scripts_my_lib_sh");
        assert_eq!(sanitize("a\\b.sh"), "a_b_sh");
    }

    #[test]
    fn passes_other_characters_through() {
        assert_eq!(sanitize("lib_utils01.sh"), "lib_utils01_sh");
    }

    #[test]
    fn is_deterministic() {
        let p = "deep/nested/dir/run-all.sh";
        assert_eq!(sanitize(p), sanitize(p));
    }

    #[test]
    fn distinct_paths_can_collide() {
        // Known limitation of pure substitution; the generator catches this.
        assert_eq!(sanitize("a/b.sh"), sanitize("a_b.sh"));
    }

    #[test]
    fn crate_name_normalizes() {
        assert_eq!(crate_name("My Tool"), "my_tool");
        assert_eq!(crate_name("demo"), "demo");
        assert_eq!(crate_name("3proxy"), "tool-3proxy");
        assert_eq!(crate_name(""), "bundle");
    }
}
