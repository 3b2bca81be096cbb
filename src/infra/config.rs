use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config
{
    /// Normalization pipeline settings
    #[serde(default)]
    pub parse: ParseSection,

    /// Materialization settings
    #[serde(default)]
    pub scaffold: ScaffoldSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ParseSection
{
    /// Extra base names the classifier treats as directories
    #[serde(default)]
    pub extra_dir_names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScaffoldSection
{
    /// Remove existing files that block required directories
    #[serde(default)]
    pub force: bool,

    /// Verify the created structure after applying
    #[serde(default = "default_verify")]
    pub verify: bool,
}

fn default_verify() -> bool
{
    true
}

impl Default for ScaffoldSection
{
    fn default() -> Self
    {
        Self { force: false, verify: true }
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["treescaffold.toml", ".treescaffold.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with TREESCAFFOLD_ prefix
    builder =
        builder.add_source(config::Environment::with_prefix("TREESCAFFOLD").separator("__"));

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("treescaffold.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
