//! Filepath: src/core/parse.rs
//! Text-to-structure normalization: turns a pasted tree sketch into an ordered
//! sequence of [`Entry`] records with full relative paths.
//!
//! Accepted input styles:
//! - classic `tree` output (connector glyphs `│ ├ └ ─`), with or without the
//!   leading root-directory line
//! - flat path lists, one per line, with optional trailing `# comment`
//!
//! The pipeline is batch-oriented: all lines are read up front, paths are
//! rebuilt from a depth-indexed ancestor stack, and two whole-set correction
//! passes (classification, reconciliation) run afterwards because they need
//! global context. Unparsable lines are skipped, never errors; the only hard
//! failure is a read error on the input source.

use std::io::Read;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::{classify, reconcile};

/// Name plus optional trailing `# comment`. Shared by both input styles and
/// the root line of a complete tree.
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\s#]+)\s*(?:#\s*(.+))?$").expect("line pattern is valid")
});

/// One normalized filesystem entry.
///
/// `path` is a forward-slash relative path; directories carry a trailing slash
/// as their canonical form. All comparisons in the correction passes use the
/// slash-stripped form via [`Entry::cmp_path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub path: String,
    pub is_dir: bool,
    pub comment: String,
}

impl Entry {
    pub fn new(path: impl Into<String>, is_dir: bool, comment: impl Into<String>) -> Self {
        Self { path: path.into(), is_dir, comment: comment.into() }
    }

    /// Path with any trailing directory slash stripped, for comparisons.
    pub fn cmp_path(&self) -> &str {
        self.path.strip_suffix('/').unwrap_or(&self.path)
    }

    /// Final path segment.
    pub fn base_name(&self) -> &str {
        let p = self.cmp_path();
        match p.rfind('/') {
            Some(i) => &p[i + 1..],
            None => p,
        }
    }

    /// Immediate parent path, `""` for top-level entries.
    pub fn parent(&self) -> &str {
        parent_of(self.cmp_path())
    }

    /// Reclassify as a directory and normalize the trailing slash.
    pub(crate) fn mark_dir(&mut self) {
        self.is_dir = true;
        if !self.path.ends_with('/') {
            self.path.push('/');
        }
    }
}

/// Parent of a slash-stripped relative path, `""` at the top level.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

/// Input classification produced by the format detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// No tree-drawing glyphs anywhere; one path per line at depth 0.
    Simple,
    /// Tree glyphs present and the first line is a standalone root name.
    TreeComplete,
    /// Tree glyphs present but the sketch starts mid-structure.
    TreePartial,
}

/// Tunables for the normalization pipeline.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Extra base names treated as directories by the lexical classifier,
    /// on top of the built-in vocabulary.
    pub extra_dir_names: Vec<String>,
}

/// Raw token extracted from one accepted line.
#[derive(Debug)]
struct Token {
    name: String,
    comment: String,
    /// The line carried an explicit trailing `/` directory marker.
    explicit_dir: bool,
}

/// Classify the (blank-stripped) line set.
pub fn detect_format(lines: &[&str]) -> InputFormat {
    if !lines.iter().any(|l| contains_tree_glyph(l)) {
        return InputFormat::Simple;
    }
    let starts_mid_structure = lines
        .first()
        .map(|l| l.trim_start().starts_with(['├', '└', '│']))
        .unwrap_or(false);
    if starts_mid_structure {
        InputFormat::TreePartial
    } else {
        InputFormat::TreeComplete
    }
}

fn contains_tree_glyph(line: &str) -> bool {
    line.chars().any(|c| matches!(c, '│' | '├' | '└' | '─'))
}

/// Split `name  # comment` out of a line that has already had any structural
/// prefix removed. Returns `None` when no name can be extracted.
fn tokenize(tail: &str) -> Option<Token> {
    let caps = LINE_RE.captures(tail.trim())?;
    let raw = caps.get(1)?.as_str();
    let comment = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    let explicit_dir = raw.ends_with('/');
    let name = raw.trim_end_matches('/');
    if name.is_empty() {
        return None;
    }
    Some(Token {
        name: name.to_string(),
        comment: comment.to_string(),
        explicit_dir,
    })
}

/// Depth of a tree-style line from its leading glyph run.
///
/// Each nesting level is a 4-character unit (`"│   "` or `"    "`) before the
/// branch glyph, plus one level for the branch itself. Lines without any
/// structural prefix resolve to depth 0.
fn tree_depth(line: &str) -> usize {
    let mut run = 0usize;
    let mut branch = false;
    for ch in line.chars() {
        match ch {
            '│' | ' ' => run += 1,
            '├' | '└' => {
                branch = true;
                break;
            }
            _ => break,
        }
    }
    run / 4 + usize::from(branch)
}

/// Byte offset where the name starts, past any glyph/whitespace run.
fn structural_prefix_end(line: &str) -> usize {
    for (i, ch) in line.char_indices() {
        if !matches!(ch, '│' | '├' | '└' | '─' | ' ' | '\t') {
            return i;
        }
    }
    line.len()
}

/// Depth-indexed stack of ancestor names. Slot `depth` holds the current name
/// at that nesting level; joining skips empty slots so partial trees (which
/// never fill slot 0) still produce top-level paths.
#[derive(Debug, Default)]
struct AncestorStack {
    slots: Vec<String>,
}

impl AncestorStack {
    /// Overwrite the slot at `depth` and return the joined path up through it.
    /// Depths beyond the current stack extend it rather than panic, which
    /// absorbs malformed indentation.
    fn assign(&mut self, depth: usize, name: &str) -> String {
        while depth >= self.slots.len() {
            self.slots.push(String::new());
        }
        self.slots.truncate(depth + 1);
        self.slots[depth] = name.to_string();
        self.slots
            .iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Parse a full text buffer with default options.
pub fn parse_text(input: &str) -> Vec<Entry> {
    parse_text_with(input, &ParseOptions::default())
}

/// Parse a full text buffer into the finished entry sequence: detect, build,
/// classify, reconcile. Infallible; unusable lines are dropped.
pub fn parse_text_with(input: &str, opts: &ParseOptions) -> Vec<Entry> {
    let lines: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let format = detect_format(&lines);
    debug!(?format, lines = lines.len(), "detected input format");

    let mut entries = match format {
        InputFormat::Simple => parse_simple(&lines),
        InputFormat::TreeComplete | InputFormat::TreePartial => parse_tree(&lines, format),
    };

    classify::mark_directories_with(&mut entries, &opts.extra_dir_names);
    reconcile::relocate(&mut entries);

    debug!(entries = entries.len(), "normalization complete");
    entries
}

/// Read everything from `r` and parse it. A read failure is the only error
/// this module surfaces.
pub fn parse_reader(mut r: impl Read) -> Result<Vec<Entry>> {
    let mut buf = String::new();
    r.read_to_string(&mut buf).context("reading tree input")?;
    Ok(parse_text(&buf))
}

/// Flat path list: every accepted line is a depth-0 entry.
fn parse_simple(lines: &[&str]) -> Vec<Entry> {
    let mut entries = Vec::new();
    for line in lines {
        let Some(tok) = tokenize(line) else {
            trace!(line, "skipping untokenizable line");
            continue;
        };
        let mut path = tok.name;
        if tok.explicit_dir {
            path.push('/');
        }
        entries.push(Entry::new(path, tok.explicit_dir, tok.comment));
    }
    entries
}

/// Tree-style input: rebuild full paths from the ancestor stack, stripping the
/// root name captured from a complete tree's first line.
fn parse_tree(lines: &[&str], format: InputFormat) -> Vec<Entry> {
    let mut root_prefix = String::new();
    let mut body = lines;

    if format == InputFormat::TreeComplete {
        if let Some(tok) = tokenize(lines[0]) {
            root_prefix = format!("{}/", tok.name);
        }
        body = &lines[1..];
    }

    let mut stack = AncestorStack::default();
    let mut entries = Vec::new();

    for line in body {
        let depth = tree_depth(line);
        let tail = &line[structural_prefix_end(line)..];
        let Some(tok) = tokenize(tail) else {
            trace!(line, "skipping untokenizable line");
            continue;
        };

        let mut path = stack.assign(depth, &tok.name);
        if !root_prefix.is_empty()
            && let Some(stripped) = path.strip_prefix(root_prefix.as_str())
        {
            path = stripped.to_string();
        }
        if path.is_empty() {
            continue;
        }
        if tok.explicit_dir {
            path.push('/');
        }
        entries.push(Entry::new(path, tok.explicit_dir, tok.comment));
    }

    entries
}
