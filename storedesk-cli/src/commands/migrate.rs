//! Create the relational schema without starting the server

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use storedesk_core::StoredeskConfig;
use storedesk_server::db::{create_pool, migrations};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Postgres URL (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Config file (default: ~/.storedesk/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = match args.database_url {
        Some(url) => url,
        None => {
            StoredeskConfig::load_or_default(args.config.as_deref())
                .context("Failed to load config")?
                .postgres
                .url
        }
    };

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool).await.context("Migration failed")?;

    println!("Schema ready: store, product, product_store");
    Ok(())
}
