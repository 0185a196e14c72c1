//! storedesk CLI - store, product and manager administration server
//!
//! - `serve`: run the HTTP server over Postgres + MongoDB (or in-memory data)
//! - `migrate`: create the relational schema
//! - `config`: manage ~/.storedesk/config.toml

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "storedesk",
    author,
    version,
    about = "Store, product and manager administration over Postgres and MongoDB"
)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create the relational schema (idempotent)
    Migrate(commands::migrate::MigrateArgs),
    /// Manage storedesk configuration (init, show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Config(args) => config::run_config(args)?,
    }

    Ok(())
}
