use clap::Parser;
use treescaffold::cli::{ApplyArgs, Cli, Commands, PreviewArgs};

#[test]
fn apply_flag_parsing() {
    // Given
    let argv = vec!["scaf", "apply", "~/projects/demo", "--yes", "--force"];

    // When
    let cmd = Cli::parse_from(argv);

    // Then
    match cmd.command {
        Commands::Apply(ApplyArgs { root, yes, force, from_clipboard }) => {
            assert_eq!(root, "~/projects/demo");
            assert!(yes);
            assert!(force);
            assert!(!from_clipboard);
        }
        _ => panic!("expected Apply command"),
    }
}

#[test]
fn preview_defaults_to_current_dir() {
    let cmd = Cli::parse_from(vec!["scaf", "preview", "--json"]);

    match cmd.command {
        Commands::Preview(PreviewArgs { root, json, .. }) => {
            assert_eq!(root, ".");
            assert!(json);
        }
        _ => panic!("expected Preview command"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cmd = Cli::parse_from(vec!["scaf", "apply", "--quiet", "--dry-run"]);
    assert!(cmd.quiet);
    assert!(cmd.dry_run);
    assert!(!cmd.no_color);
}
