//! HTTP server command
//!
//! Flags win over environment variables, which win over the config file.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use storedesk_core::StoredeskConfig;
use storedesk_server::db::{create_pool_with_options, migrations};
use storedesk_server::http::{run_server, AppState, ServerConfig};
use storedesk_server::{seed_demo, InMemoryCatalog, InMemoryManagers, MongoManagers, PgCatalog};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Postgres URL for stores and products
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// MongoDB URI for the managers collection
    #[arg(long, env = "MONGODB_URI")]
    pub mongo_uri: Option<String>,

    /// MongoDB database name
    #[arg(long)]
    pub mongo_database: Option<String>,

    /// Config file (default: ~/.storedesk/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Serve seeded in-memory data instead of connecting to databases
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = StoredeskConfig::load_or_default(args.config.as_deref())
        .context("Failed to load config")?;

    let server = ServerConfig {
        bind_addr: match args.bind {
            Some(addr) => addr,
            None => config.bind_addr()?,
        },
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    let state = if args.in_memory {
        in_memory_state().await?
    } else {
        database_state(&args, &config).await?
    };

    tracing::info!("Starting storedesk server on {}", server.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, server).await.context("Server error")?;

    Ok(())
}

async fn in_memory_state() -> Result<AppState> {
    let catalog = Arc::new(InMemoryCatalog::new());
    let managers = Arc::new(InMemoryManagers::new());
    seed_demo(&catalog, &managers)
        .await
        .context("Failed to seed in-memory data")?;

    tracing::warn!("Serving in-memory demo data; nothing is persisted");
    Ok(AppState::new(catalog, managers))
}

async fn database_state(args: &ServeArgs, config: &StoredeskConfig) -> Result<AppState> {
    let database_url = args.database_url.as_deref().unwrap_or(&config.postgres.url);
    let mongo_uri = args.mongo_uri.as_deref().unwrap_or(&config.mongo.uri);
    let mongo_database = args
        .mongo_database
        .as_deref()
        .unwrap_or(&config.mongo.database);

    let pool = create_pool_with_options(database_url, config.postgres.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to prepare relational schema")?;

    let managers = MongoManagers::connect(mongo_uri, mongo_database, &config.mongo.collection)
        .await
        .context("Failed to connect to MongoDB")?;

    Ok(AppState::new(
        Arc::new(PgCatalog::new(pool)),
        Arc::new(managers),
    ))
}
