use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use treescaffold::cli::{AppContext, Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Apply(args) => treescaffold::apply_run(args, &ctx),
        Commands::Preview(args) => treescaffold::preview_run(args, &ctx),
        Commands::Init(args) => treescaffold::infra::config::init(args, &ctx),
        Commands::Completions(args) => treescaffold::completion::run(args),
    }
}
