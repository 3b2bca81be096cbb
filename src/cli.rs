use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "treescaffold", bin_name = "scaf")]
#[command(
    about = "A fast, lightweight CLI that turns ASCII tree sketches into real directories and stub files"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be created and ask before writing
    #[arg(long, short = 'd', global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the directories and stub files a tree sketch describes
    Apply(ApplyArgs),

    /// Show the parsed plan without touching the filesystem
    Preview(PreviewArgs),

    /// Initialize a treescaffold.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Project root to scaffold under (supports ~ and $VAR)
    #[arg(default_value = ".")]
    pub root: String,

    /// Read the tree sketch from the clipboard instead of stdin
    #[arg(long)]
    pub from_clipboard: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite existing files that conflict with directories
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// Project root the plan would be applied under
    #[arg(default_value = ".")]
    pub root: String,

    /// Read the tree sketch from the clipboard instead of stdin
    #[arg(long)]
    pub from_clipboard: bool,

    /// Emit the entry sequence as JSON (single line)
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
