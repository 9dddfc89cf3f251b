//! `jobly` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `migrate` — run pending database migrations.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "jobly", about = "Companies and jobs REST backend", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Connection settings shared by every sub-command.
#[derive(Args)]
struct DatabaseArgs {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "JOBLY_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "JOBLY_BIND", default_value = "0.0.0.0:3001")]
        bind: String,

        /// Apply pending migrations before accepting requests.
        #[arg(long)]
        migrate: bool,

        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Run pending database migrations.
    Migrate {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cli=info,db=info,api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, migrate, database } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections)
                .await
                .context("failed to connect to database")?;
            if migrate {
                db::pool::run_migrations(&pool)
                    .await
                    .context("migration failed")?;
            }
            info!("starting API server on {bind}");
            api::serve(&bind, pool).await?;
        }
        Command::Migrate { database } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections.min(2))
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("migrations applied successfully");
        }
    }

    Ok(())
}
