// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod routes;

#[cfg(test)]
mod tests;

use axum::Router;
use clap::Parser;
use contest_vote::{MediaStore, NoopMediaStore};
use contest_vote_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::routes::build_router;

/// Contest Vote Server - HTTP server for the Contest Vote backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "CONTEST_VOTE_DATABASE")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, env = "CONTEST_VOTE_MYSQL_URL")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a single async mutex, so every
/// request runs its store operation in isolation.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer for contests, participants and votes.
    pub persistence: Arc<Mutex<Persistence>>,
    /// Media host used for best-effort photo cleanup.
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    fn new(persistence: Persistence, media: Arc<dyn MediaStore>) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            media,
        }
    }
}

fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL database");
        return Ok(Persistence::new_with_mysql(url)?);
    }

    if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Ok(Persistence::new_with_file(db_path)?)
    } else {
        info!("Using in-memory database");
        Ok(Persistence::new_in_memory()?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Contest Vote Server");

    let persistence: Persistence = open_persistence(&args)?;
    let app_state: AppState = AppState::new(persistence, Arc::new(NoopMediaStore));

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
