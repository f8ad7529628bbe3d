use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use clio::app::api::{serve, AppState};
use clio::db::Database;
use clio::environment::{env_var_or, require_env_var};
use clio::llm::{GeminiClient, DEFAULT_GEMINI_MODEL};
use clio::logging::configure_logging;

/// HTTP service answering "which political entities existed on continent X
/// in year Y, and what happened to them", backed by a generative text API
/// and a persistent cache.
#[derive(Parser)]
#[command(name = "clio")]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on; falls back to PORT, then 8080
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite cache database; falls back to DATABASE_PATH
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    configure_logging();
    let args = Args::parse();

    let api_key = require_env_var("GEMINI_API_KEY")?;
    let model = env_var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let generator = GeminiClient::new(&api_key, &model)?;

    let database_path = args
        .database
        .unwrap_or_else(|| env_var_or("DATABASE_PATH", "clio.db"));
    let db = Database::new(&database_path).await?;

    let port: u16 = args
        .port
        .unwrap_or_else(|| env_var_or("PORT", "8080").parse().unwrap_or(8080));
    let addr = format!("{}:{}", args.host, port);

    info!("Using model {} with cache at {}", model, database_path);

    let state = AppState {
        db,
        generator: Arc::new(generator),
    };

    serve(state, &addr).await
}
