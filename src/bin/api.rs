//! TODO API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use todos::api::{self, ApiError, Config};
use todos::db::{Database, DbError, SqliteDatabase};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(todos::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(todos::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(todos::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "todos-api")]
#[command(author, version, about = "TODO API server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Database file path
    #[arg(long, env = "TODOS_DB", default_value = "todos.db")]
    db: PathBuf,

    /// Per-request timeout in seconds (overrides TODOS_REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run(Cli::parse()).await?;
    Ok(())
}

async fn run(cli: Cli) -> Result<(), BinaryError> {
    api::init_tracing();

    println!("Opening database at {:?}", cli.db);

    // Ensure parent directory exists
    if let Some(parent) = cli.db.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&cli.db).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    println!("Database migrations complete");

    let mut config = Config::new();
    config.host = cli.host;
    config.port = cli.port;
    if let Some(secs) = cli.timeout.filter(|secs| *secs > 0) {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }

    // Pass the abstract Database to the API layer
    api::run(config, db).await?;

    Ok(())
}
