//! mixdesk-ui - web admin console for the audio-console configuration tool
//!
//! Lets an operator pick a user, view that user's latest saved mixer
//! configuration, and edit it through form widgets.

use anyhow::Result;
use clap::Parser;
use mixdesk_common::config::resolve_database_path;
use mixdesk_common::db::init_database;
use mixdesk_ui::{build_router, AppState};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mixdesk-ui", about = "MixDesk web admin console")]
struct Args {
    /// Database file path (overrides env var and config file)
    #[arg(long)]
    database: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5730)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting MixDesk admin console v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let db_path = resolve_database_path(args.database.as_deref())?;
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("mixdesk-ui listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
