use std::process::ExitCode;

use clap::Parser;
use fyyur::config::{Config, ConfigError};
use fyyur::DatabaseState;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DbErr, SqlxPostgresConnector};
use sqlx::postgres::PgPoolOptions;
use tokio::main;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, short, default_value_t = 3)]
    verbosity: usize,
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
    #[arg(long, short)]
    config: String,
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("error connecting to database: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("error running migrations: {0}")]
    Migrate(#[from] DbErr),
    #[error("error serving on {address}: {source}")]
    Serve {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Could not listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn run(args: Args) -> Result<(), StartupError> {
    info!("Configuration path: {}", args.config);
    let config = Config::load(&args.config)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.postgres)
        .await?;
    let connection = SqlxPostgresConnector::from_sqlx_postgres_pool(pool);
    if config.migrate {
        info!("Applying pending migrations");
        Migrator::up(&connection, None).await?;
    }

    let app = fyyur::router(DatabaseState { connection });
    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Serve {
            address: address.clone(),
            source,
        })?;

    info!("Listening on {}", address);
    info!("Welcome to Fyyur!");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| StartupError::Serve { address, source })
}

#[main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = stderrlog::new()
        .verbosity(args.verbosity)
        .quiet(args.quiet)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
    {
        eprintln!("Could not start logging: {}", err);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
