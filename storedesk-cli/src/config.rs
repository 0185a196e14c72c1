use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storedesk_core::StoredeskConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default settings
    Init(InitArgs),
    /// Print the effective config as TOML
    Show(ShowArgs),
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Write here instead of ~/.storedesk/config.toml
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Read this file instead of ~/.storedesk/config.toml
    #[arg(long)]
    pub path: Option<PathBuf>,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = args.path.unwrap_or_else(StoredeskConfig::config_path);

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        ));
    }

    StoredeskConfig::default()
        .save_to(&config_path)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!("Created config at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", config_path.display());
    println!("  2. Point [postgres] and [mongo] at your databases");
    println!("  3. Run: storedesk migrate");

    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = StoredeskConfig::load_or_default(args.path.as_deref())?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", StoredeskConfig::config_path().display());
    Ok(())
}
