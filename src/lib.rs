//! **treescaffold** - Turn pasted ASCII tree sketches into real directories and stub files
//!
//! Reads `tree`-style output, indented listings, or flat path lists (with
//! trailing `#` comments) from stdin or the clipboard, normalizes them into an
//! ordered entry sequence, and materializes that sequence on disk.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - Text-to-structure normalization and on-disk materialization
pub mod core {
    /// Format detection, line tokenizing, depth resolution, and path building
    pub mod parse;
    pub use parse::{Entry, InputFormat, ParseOptions, parse_reader, parse_text, parse_text_with};

    /// Lexical + structural directory classification passes
    pub mod classify;
    pub use classify::mark_directories;

    /// Table-driven relocation of conventionally misplaced file entries
    pub mod reconcile;
    pub use reconcile::relocate;

    /// Directory/file creation with validation, conflict handling, and verification
    pub mod scaffold;
    pub use scaffold::{Scaffolder, run_apply as apply_run, run_preview as preview_run};

    /// Stub content generation (comment headers, Go package stubs)
    pub mod generate;
    pub use generate::ContentGenerator;
}

/// Infrastructure - Configuration and input acquisition
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use self::config::{Config, init as config_init, load_config};

    /// Piped-stdin / clipboard input acquisition
    pub mod input;
    pub use input::read_input;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use infra::{Config, load_config, read_input};
pub use self::core::{apply_run, preview_run};

// Core types for external consumers
pub use self::core::parse::{Entry, parse_text};
