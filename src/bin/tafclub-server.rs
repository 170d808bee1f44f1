// ABOUTME: Server binary for the TAF Club calorie and weight tracker
// ABOUTME: Loads configuration, initializes logging and the database, then serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # TAF Club Server Binary

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tafclub_server::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "tafclub-server")]
#[command(about = "TAF Club - social calorie and weight tracker API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(url);
    }
    info!("{}", config.summary());

    let database = Database::connect(&config.database_url).await?;
    let resources = Arc::new(ServerResources::with_open_food_facts(database, config)?);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }
    Ok(())
}
