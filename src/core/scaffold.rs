//! Filepath: src/core/scaffold.rs
//! Materializes a normalized entry sequence on disk: directory creation, stub
//! file writing with comment inheritance, conflict validation up front, and a
//! structure verification pass afterwards.
//!
//! Also hosts the `apply` and `preview` command runners that tie input
//! acquisition, parsing, and materialization together.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexSet;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use tracing::{debug, info, warn};

use crate::cli::{AppContext, ApplyArgs, PreviewArgs};
use crate::core::generate::ContentGenerator;
use crate::core::parse::{Entry, ParseOptions, parent_of, parse_text_with};
use crate::infra::config::load_config;
use crate::infra::input::read_input;

/// Conflicts the materializer refuses to resolve on its own.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("cannot create directory {0}: a file with the same name already exists")]
    FileBlocksDirectory(PathBuf),

    #[error("structure verification failed: {missing} paths missing, including {sample:?}")]
    Incomplete { missing: usize, sample: Vec<String> },
}

/// Creates the directory and file structure an entry sequence describes.
pub struct Scaffolder {
    force: bool,
    generator: ContentGenerator,
}

impl Default for Scaffolder {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaffolder {
    pub fn new() -> Self {
        Self { force: false, generator: ContentGenerator::new() }
    }

    /// Force mode removes existing files that block required directories.
    pub fn with_force() -> Self {
        Self { force: true, generator: ContentGenerator::new() }
    }

    /// Dry-run conflict check: every directory the plan needs must not exist
    /// on disk as a regular file.
    pub fn validate(&self, root: &Path, entries: &[Entry]) -> Result<(), ScaffoldError> {
        for dir in directory_plan(entries) {
            let path = root.join(&dir);
            if let Ok(meta) = fs::metadata(&path)
                && !meta.is_dir()
            {
                return Err(ScaffoldError::FileBlocksDirectory(path));
            }
        }
        Ok(())
    }

    /// Create all planned directories, then write file stubs. `on_create` is
    /// invoked once per mkdir/write for progress reporting. Existing files are
    /// left alone; files blocking directories are removed (aggressively under
    /// force mode).
    pub fn apply(
        &self,
        root: &Path,
        entries: &[Entry],
        mut on_create: impl FnMut(&Path, bool),
    ) -> Result<()> {
        for dir in directory_plan(entries) {
            let path = root.join(&dir);

            if let Ok(meta) = fs::metadata(&path)
                && !meta.is_dir()
            {
                match fs::remove_file(&path) {
                    Ok(()) => warn!(path = %path.display(), "converted existing file to directory"),
                    Err(_) if self.force => {
                        fs::remove_dir_all(&path).with_context(|| {
                            format!(
                                "cannot convert file to directory even in force mode: {}",
                                path.display()
                            )
                        })?;
                    }
                    Err(err) => {
                        return Err(err).with_context(|| {
                            format!("cannot convert file to directory: {}", path.display())
                        });
                    }
                }
            }

            on_create(&path, true);
            fs::create_dir_all(&path)
                .with_context(|| format!("creating directory {}", path.display()))?;
        }

        for entry in entries.iter().filter(|e| !e.is_dir) {
            let path = root.join(entry.cmp_path());

            if let Ok(meta) = fs::metadata(&path) {
                if meta.is_dir() {
                    // A directory occupies this path; nothing sensible to write
                    continue;
                }
                warn!(path = %path.display(), "skipping existing file");
                continue;
            }

            let comment = if entry.comment.is_empty() {
                inherited_comment(entries, entry)
            } else {
                entry.comment.as_str()
            };

            on_create(&path, false);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating parent of {}", path.display()))?;
            }
            let content = self.generator.content_for(entry.cmp_path(), comment);
            fs::write(&path, content)
                .with_context(|| format!("writing stub {}", path.display()))?;
        }

        info!(entries = entries.len(), root = %root.display(), "scaffold applied");
        Ok(())
    }

    /// Post-apply existence check over every entry path.
    pub fn verify(&self, root: &Path, entries: &[Entry]) -> Result<(), ScaffoldError> {
        let missing: Vec<String> = entries
            .iter()
            .filter(|e| !root.join(e.cmp_path()).exists())
            .map(|e| e.path.clone())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            let sample = missing.iter().take(3).cloned().collect();
            Err(ScaffoldError::Incomplete { missing: missing.len(), sample })
        }
    }
}

/// Every directory the plan requires, deduplicated, with each parent appearing
/// before its children: explicit directory entries plus all ancestor chains.
pub fn directory_plan(entries: &[Entry]) -> IndexSet<String> {
    let mut dirs = IndexSet::new();
    for entry in entries {
        let mut chain = Vec::new();
        if entry.is_dir {
            chain.push(entry.cmp_path().to_owned());
        }
        let mut dir = parent_of(entry.cmp_path());
        while !dir.is_empty() {
            chain.push(dir.to_owned());
            dir = parent_of(dir);
        }
        // Parents before children
        for dir in chain.into_iter().rev() {
            dirs.insert(dir);
        }
    }
    dirs
}

/// Comment of the nearest ancestor directory entry that has one; files with
/// no comment of their own adopt it for their stub header.
fn inherited_comment<'a>(entries: &'a [Entry], file: &Entry) -> &'a str {
    let mut dir = parent_of(file.cmp_path());
    while !dir.is_empty() {
        let found = entries
            .iter()
            .find(|e| e.is_dir && e.cmp_path() == dir && !e.comment.is_empty());
        if let Some(entry) = found {
            return &entry.comment;
        }
        dir = parent_of(dir);
    }
    ""
}

/// `scaf apply`: parse the sketch, show the plan, validate, and create.
pub fn run_apply(args: ApplyArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();
    let text = read_input(args.from_clipboard)?;

    let opts = ParseOptions { extra_dir_names: config.parse.extra_dir_names.clone() };
    let entries = parse_text_with(&text, &opts);
    if entries.is_empty() {
        if !ctx.quiet {
            println!("Nothing to create.");
        }
        return Ok(());
    }

    let root = resolve_root(&args.root)?;
    debug!(root = %root.display(), entries = entries.len(), "resolved scaffold target");

    if !ctx.quiet {
        print_plan(&entries);
    }

    let force = args.force || config.scaffold.force;
    let scaffolder = if force { Scaffolder::with_force() } else { Scaffolder::new() };

    if !force && let Err(err) = scaffolder.validate(&root, &entries) {
        eprintln!("Validation error: {err}");
        eprintln!("Options:");
        eprintln!("  1. Remove conflicting files manually before running again");
        eprintln!("  2. Use the --force flag to overwrite conflicting files");
        return Err(err.into());
    }

    if ctx.dry_run && !args.yes && !confirm()? {
        println!("Aborted.");
        return Ok(());
    }

    let total = directory_plan(&entries).len() + entries.iter().filter(|e| !e.is_dir).count();
    let progress = if ctx.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };

    scaffolder.apply(&root, &entries, |path, is_dir| {
        let rel = path.strip_prefix(&root).unwrap_or(path);
        if is_dir {
            progress.println(format!("{} {}", "mkdir".blue(), rel.display()));
        } else {
            progress.println(format!("{} {}", "write".green(), rel.display()));
        }
        progress.inc(1);
    })?;
    progress.finish_and_clear();

    if config.scaffold.verify {
        scaffolder.verify(&root, &entries)?;
    }

    if !ctx.quiet {
        println!(
            "Scaffolded {} entries under {}",
            entries.len(),
            root.display()
        );
    }
    Ok(())
}

/// `scaf preview`: print the plan (or JSON entry dump) without writing.
pub fn run_preview(args: PreviewArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();
    let text = read_input(args.from_clipboard)?;

    let opts = ParseOptions { extra_dir_names: config.parse.extra_dir_names.clone() };
    let entries = parse_text_with(&text, &opts);

    if args.json {
        println!("{}", serde_json::to_string(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !ctx.quiet {
            println!("Nothing to create.");
        }
        return Ok(());
    }

    print_plan(&entries);

    let root = resolve_root(&args.root)?;
    let scaffolder = Scaffolder::new();
    if let Err(err) = scaffolder.validate(&root, &entries) {
        eprintln!("Validation error: {err}");
    }
    Ok(())
}

fn print_plan(entries: &[Entry]) {
    println!("{}", "Will create:".yellow());
    for entry in entries {
        if entry.is_dir {
            println!("    {}  {}", "dir: ".blue(), entry.path);
        } else {
            println!("    {} {}", "file:".green(), entry.path);
        }
    }
}

/// Expand `~`/`$VAR` and canonicalize the scaffold root where possible.
fn resolve_root(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("expanding root path {raw}"))?
        .into_owned();
    let path = PathBuf::from(expanded);
    Ok(dunce::canonicalize(&path).unwrap_or(path))
}

fn confirm() -> Result<bool> {
    print!("Proceed? [y/N]: ");
    io::stdout().flush().context("flushing prompt")?;
    let mut response = String::new();
    io::stdin()
        .read_line(&mut response)
        .context("reading confirmation")?;
    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
