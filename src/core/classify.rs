//! Filepath: src/core/classify.rs
//! Directory classifier: two idempotent whole-set passes that upgrade file
//! entries to directories.
//!
//! Pass A (lexical) matches base names against a closed vocabulary of
//! conventional directory names. Pass B (structural) marks any entry whose
//! path is literally the parent of another entry's path; it scans all pairs
//! because a directory and its children are not necessarily adjacent once the
//! path builder has run.

use std::sync::LazyLock;

use indexmap::IndexSet;
use tracing::trace;

use crate::core::parse::{Entry, parent_of};

/// Base names treated as directories by convention, even without a trailing
/// slash or discoverable children.
static CONVENTIONAL_DIR_NAMES: LazyLock<IndexSet<&'static str>> = LazyLock::new(|| {
    IndexSet::from([
        ".github", "cmd", "internal", "pkg", "api", "test", "testdata", "config", "workflows",
        "server", "problems", "license", "session", "stats", "ui",
    ])
});

/// True when `base` carries an extension. A leading dot (hidden names like
/// `.github`) is not an extension separator.
fn has_extension(base: &str) -> bool {
    base.char_indices().any(|(i, c)| c == '.' && i > 0)
}

/// Run both classification passes with the built-in vocabulary.
pub fn mark_directories(entries: &mut [Entry]) {
    mark_directories_with(entries, &[]);
}

/// Run both classification passes, extending the lexical vocabulary with
/// `extra` names from configuration.
pub fn mark_directories_with(entries: &mut [Entry], extra: &[String]) {
    // Pass A: lexical
    for entry in entries.iter_mut() {
        if entry.is_dir {
            continue;
        }
        let hit = {
            let base = entry.base_name();
            !has_extension(base)
                && (CONVENTIONAL_DIR_NAMES.contains(base)
                    || extra.iter().any(|name| name == base))
        };
        if hit {
            trace!(path = %entry.path, "lexical pass marked directory");
            entry.mark_dir();
        }
    }

    // Pass B: structural, exhaustive over all ordered pairs
    for i in 0..entries.len() {
        if entries[i].is_dir {
            continue;
        }
        let own_path = entries[i].cmp_path().to_owned();
        let has_child = entries
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && parent_of(other.cmp_path()) == own_path);
        if has_child {
            trace!(path = %entries[i].path, "structural pass marked directory");
            entries[i].mark_dir();
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn file(path: &str) -> Entry {
        Entry::new(path, false, "")
    }

    fn dir(path: &str) -> Entry {
        Entry::new(path, true, "")
    }

    #[test]
    fn lexical_pass_marks_conventional_names() {
        let mut entries = vec![file("cmd"), file("internal/ui"), file(".github"), file("main.go")];
        mark_directories(&mut entries);

        assert_eq!(entries[0], dir("cmd/"));
        assert_eq!(entries[1], dir("internal/ui/"));
        assert_eq!(entries[2], dir(".github/"));
        // Not in the vocabulary and carries an extension
        assert_eq!(entries[3], file("main.go"));
    }

    #[test]
    fn lexical_pass_requires_no_extension() {
        // Vocabulary name with an extension stays a file
        let mut entries = vec![file("config.yaml"), file("test.go")];
        mark_directories(&mut entries);
        assert!(entries.iter().all(|e| !e.is_dir));
    }

    #[test]
    fn extra_vocabulary_from_config() {
        let mut entries = vec![file("handlers"), file("models")];
        mark_directories_with(&mut entries, &["handlers".to_string()]);
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
    }

    #[test]
    fn structural_pass_marks_parents() {
        let mut entries = vec![file("src"), file("src/lib.rs")];
        mark_directories(&mut entries);
        assert_eq!(entries[0], dir("src/"));
        assert!(!entries[1].is_dir);
    }

    #[test]
    fn structural_pass_is_exhaustive_over_non_adjacent_pairs() {
        // The declaration and its child are separated by unrelated entries
        let mut entries = vec![
            file("deep"),
            file("readme.md"),
            file("other.txt"),
            file("deep/nested/leaf.go"),
            file("deep/nested"),
        ];
        mark_directories(&mut entries);
        assert!(entries[0].is_dir, "deep has a child two hops away");
        assert!(entries[4].is_dir, "deep/nested is leaf.go's parent");
        assert!(!entries[1].is_dir);
        assert!(!entries[3].is_dir);
    }

    #[test]
    fn classification_is_idempotent() {
        let mut once = vec![file("cmd"), file("cmd/app"), file("cmd/app/main.go"), file("notes.txt")];
        mark_directories(&mut once);
        let mut twice = once.clone();
        mark_directories(&mut twice);
        assert_eq!(once, twice);
    }

    /// Strategy: small entry sets over a tiny segment alphabet so that
    /// parent/child collisions actually happen.
    fn arb_entries() -> impl Strategy<Value = Vec<Entry>> {
        let segment = prop_oneof![
            Just("a".to_string()),
            Just("b".to_string()),
            Just("cmd".to_string()),
            Just("x.go".to_string()),
        ];
        let path = prop::collection::vec(segment, 1..4).prop_map(|segs| segs.join("/"));
        prop::collection::vec((path, any::<bool>()), 0..12).prop_map(|items| {
            items
                .into_iter()
                .map(|(p, d)| {
                    let path = if d { format!("{p}/") } else { p };
                    Entry::new(path, d, "")
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_idempotent(mut entries in arb_entries()) {
            mark_directories(&mut entries);
            let mut again = entries.clone();
            mark_directories(&mut again);
            prop_assert_eq!(entries, again);
        }

        #[test]
        fn prop_parent_implies_directory(mut entries in arb_entries()) {
            mark_directories(&mut entries);
            for a in &entries {
                for b in &entries {
                    if a.cmp_path() != b.cmp_path()
                        && a.cmp_path() == parent_of(b.cmp_path())
                    {
                        prop_assert!(a.is_dir, "{} is parent of {} but not a dir", a.path, b.path);
                    }
                }
            }
        }
    }
}
