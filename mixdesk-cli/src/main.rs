//! mixdesk-cli - print a user's saved mixer configurations
//!
//! Opens the database read-only, looks the user up by numeric id and writes
//! their configurations to stdout, newest first. Any failure (bad id,
//! unknown user, unreadable database) exits with status 1.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mixdesk_common::config::resolve_database_path;
use mixdesk_common::db::{configurations, connect_readonly, users};

mod render;

#[derive(Debug, Parser)]
#[command(name = "mixdesk-cli", about = "Show a user's saved MixDesk configurations")]
struct Args {
    /// Numeric id of the user
    user_id: String,

    /// Database file path (overrides env var and config file)
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Parsed by hand so a non-numeric argument exits 1, same as any
    // other failure
    let user_id: i64 = args
        .user_id
        .parse()
        .map_err(|_| anyhow!("user id must be a number, got '{}'", args.user_id))?;

    let db_path = resolve_database_path(args.database.as_deref())?;
    let pool = connect_readonly(&db_path)
        .await
        .with_context(|| format!("cannot open database at {}", db_path.display()))?;

    let user = users::get_by_id(&pool, user_id).await?;

    let saved = configurations::get_for_user(&pool, user.id).await?;
    if saved.is_empty() {
        println!("{} has no saved configurations", user.email);
        return Ok(());
    }

    for configuration in &saved {
        let detail = configurations::get_detail(&pool, configuration.id).await?;
        print!("{}", render::format_configuration(&detail));
    }

    Ok(())
}
