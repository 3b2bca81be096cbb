//! Filepath: src/core/reconcile.rs
//! Path reconciler: a table-driven corrective pass that relocates file entries
//! to the directory they conventionally belong to. Rules only ever move an
//! existing file to an already-discovered directory; a missing destination is
//! a silent no-op and no rule fires more than once per entry.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::parse::{Entry, parent_of};

/// `(hidden directory, file base name) -> conventional subdirectory`.
/// Applies only to files sitting directly under a top-level hidden directory.
static HIDDEN_DIR_CONVENTIONS: LazyLock<IndexMap<&'static str, IndexMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        IndexMap::from([
            (
                ".github",
                IndexMap::from([
                    ("build.yml", "workflows"),
                    ("ci.yml", "workflows"),
                    ("release.yml", "workflows"),
                    ("settings.yml", "settings"),
                ]),
            ),
            (
                ".vscode",
                IndexMap::from([
                    ("tasks.json", "tasks"),
                    ("settings.json", "settings"),
                    ("launch.json", "launch"),
                ]),
            ),
            (
                ".config",
                IndexMap::from([("app.config", "app"), ("user.settings", "user")]),
            ),
        ])
    });

/// File stems conventionally housed in a differently named sibling directory.
static STEM_ALIASES: LazyLock<IndexMap<&'static str, &'static str>> =
    LazyLock::new(|| IndexMap::from([("code", "ui")]));

/// The well-known test fixture and its conventional home.
const FIXTURE_FILE: &str = "test_problem.json";
const FIXTURE_DEST: &str = "testdata/problems";
const FIXTURE_HOMES: &[&str] = &["testdata/problems", "problems"];

/// Relocate misplaced file entries in place. Directories are never moved and
/// the entry set never grows or shrinks.
pub fn relocate(entries: &mut [Entry]) {
    let dirs: HashSet<String> = entries
        .iter()
        .filter(|e| e.is_dir)
        .map(|e| e.cmp_path().to_owned())
        .collect();

    for entry in entries.iter_mut() {
        if entry.is_dir {
            continue;
        }
        let target = hidden_convention_target(entry, &dirs)
            .or_else(|| same_stem_target(entry, &dirs))
            .or_else(|| fixture_target(entry, &dirs));
        if let Some(path) = target {
            debug!(from = %entry.path, to = %path, "relocated entry");
            entry.path = path;
        }
    }
}

/// Rule 1: a file directly under a top-level hidden directory whose name has a
/// conventional subdirectory (e.g. `.github/build.yml` -> `.github/workflows/`).
fn hidden_convention_target(entry: &Entry, dirs: &HashSet<String>) -> Option<String> {
    let parent = parent_of(entry.cmp_path());
    if parent.is_empty() || parent.contains('/') || !parent.starts_with('.') {
        return None;
    }
    let base = entry.base_name();
    let sub = HIDDEN_DIR_CONVENTIONS.get(parent)?.get(base)?;
    let dest = format!("{parent}/{sub}");
    dirs.contains(&dest).then(|| format!("{dest}/{base}"))
}

/// Rule 2: a file whose stem (or stem minus a `_test` suffix, or a convention
/// alias) names a sibling directory nests inside it, e.g. `internal/ui.go`
/// with a sibling `internal/ui/` becomes `internal/ui/ui.go`.
fn same_stem_target(entry: &Entry, dirs: &HashSet<String>) -> Option<String> {
    let parent = parent_of(entry.cmp_path());
    if parent.is_empty() {
        return None;
    }
    let base = entry.base_name();
    let stem = stem_of(base);

    let mut candidates: Vec<&str> = vec![stem];
    if let Some(module) = stem.strip_suffix("_test") {
        candidates.push(module);
    }
    if let Some(alias) = STEM_ALIASES.get(stem) {
        candidates.push(alias);
    }

    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        let dest = format!("{parent}/{candidate}");
        if dirs.contains(&dest) {
            return Some(format!("{dest}/{base}"));
        }
    }
    None
}

/// Rule 3: the fixture file at the top level moves into its fixed two-level
/// conventional path when that area of the tree exists.
fn fixture_target(entry: &Entry, dirs: &HashSet<String>) -> Option<String> {
    if entry.cmp_path() != FIXTURE_FILE {
        return None;
    }
    FIXTURE_HOMES
        .iter()
        .any(|home| dirs.contains(*home))
        .then(|| format!("{FIXTURE_DEST}/{FIXTURE_FILE}"))
}

/// Base name minus its extension; hidden names keep their leading dot.
fn stem_of(base: &str) -> &str {
    match base.char_indices().rev().find(|&(i, c)| c == '.' && i > 0) {
        Some((i, _)) => &base[..i],
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> Entry {
        Entry::new(path, false, "")
    }

    fn dir(path: &str) -> Entry {
        Entry::new(format!("{path}/"), true, "")
    }

    fn path_of<'a>(entries: &'a [Entry], base: &str) -> &'a str {
        entries
            .iter()
            .find(|e| e.base_name() == base)
            .map(|e| e.path.as_str())
            .unwrap()
    }

    #[test]
    fn workflow_file_moves_into_workflows() {
        let mut entries = vec![
            dir(".github"),
            dir(".github/workflows"),
            file(".github/build.yml"),
        ];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "build.yml"), ".github/workflows/build.yml");
        assert!(!entries.iter().any(|e| e.path == ".github/build.yml"));
    }

    #[test]
    fn workflow_file_stays_without_destination() {
        let mut entries = vec![dir(".github"), file(".github/build.yml")];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "build.yml"), ".github/build.yml");
    }

    #[test]
    fn vscode_conventions() {
        let mut entries = vec![
            dir(".vscode"),
            dir(".vscode/launch"),
            file(".vscode/launch.json"),
            file(".vscode/settings.json"),
        ];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "launch.json"), ".vscode/launch/launch.json");
        // No .vscode/settings directory exists, so settings.json stays put
        assert_eq!(path_of(&entries, "settings.json"), ".vscode/settings.json");
    }

    #[test]
    fn hidden_rule_skips_nested_parents() {
        // Already inside the conventional subdirectory; parent has two segments
        let mut entries = vec![
            dir(".github"),
            dir(".github/workflows"),
            file(".github/workflows/build.yml"),
        ];
        relocate(&mut entries);
        assert_eq!(
            path_of(&entries, "build.yml"),
            ".github/workflows/build.yml"
        );
    }

    #[test]
    fn same_stem_file_nests_into_sibling_directory() {
        let mut entries = vec![dir("internal"), dir("internal/ui"), file("internal/ui.go")];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "ui.go"), "internal/ui/ui.go");
    }

    #[test]
    fn test_suffix_strips_to_module_directory() {
        let mut entries = vec![dir("internal"), dir("internal/ui"), file("internal/ui_test.go")];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "ui_test.go"), "internal/ui/ui_test.go");
    }

    #[test]
    fn stem_alias_routes_code_into_ui() {
        let mut entries = vec![dir("internal"), dir("internal/ui"), file("internal/code.go")];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "code.go"), "internal/ui/code.go");
    }

    #[test]
    fn correctly_placed_file_is_untouched() {
        let mut entries = vec![dir("internal"), dir("internal/ui"), file("internal/ui/ui.go")];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "ui.go"), "internal/ui/ui.go");
    }

    #[test]
    fn fixture_file_moves_into_conventional_path() {
        let mut entries = vec![
            dir("testdata"),
            dir("testdata/problems"),
            file("test_problem.json"),
        ];
        relocate(&mut entries);
        assert_eq!(
            path_of(&entries, "test_problem.json"),
            "testdata/problems/test_problem.json"
        );
    }

    #[test]
    fn fixture_file_stays_without_home() {
        let mut entries = vec![file("test_problem.json")];
        relocate(&mut entries);
        assert_eq!(path_of(&entries, "test_problem.json"), "test_problem.json");
    }

    #[test]
    fn relocation_preserves_kind_and_comment() {
        let mut entries = vec![
            dir(".github"),
            dir(".github/workflows"),
            Entry::new(".github/ci.yml", false, "CI pipeline"),
        ];
        relocate(&mut entries);
        let moved = &entries[2];
        assert_eq!(moved.path, ".github/workflows/ci.yml");
        assert!(!moved.is_dir);
        assert_eq!(moved.comment, "CI pipeline");
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn single_pass_reaches_fixpoint() {
        let mut entries = vec![
            dir(".github"),
            dir(".github/workflows"),
            file(".github/release.yml"),
            dir("internal"),
            dir("internal/ui"),
            file("internal/ui.go"),
        ];
        relocate(&mut entries);
        let once = entries.clone();
        relocate(&mut entries);
        assert_eq!(once, entries);
    }

    #[test]
    fn stem_extraction() {
        assert_eq!(stem_of("ui.go"), "ui");
        assert_eq!(stem_of("ui_test.go"), "ui_test");
        assert_eq!(stem_of("Makefile"), "Makefile");
        assert_eq!(stem_of(".gitignore"), ".gitignore");
        assert_eq!(stem_of("archive.tar.gz"), "archive.tar");
    }
}
