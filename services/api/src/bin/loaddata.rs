//! Seed ingredients, tags and users from header-less CSV files.
//!
//! ```text
//! loaddata ingredients data/ingredients.csv
//! loaddata tags data/tags.csv
//! loaddata users data/users.csv
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sea_orm::{Database, DatabaseConnection};
use serde::de::DeserializeOwned;
use tracing::info;

use foodgram_api::domain::types::SeedReport;
use foodgram_api::error::FoodgramError;
use foodgram_api::infra::db::{DbCatalogRepository, DbUserRepository};
use foodgram_api::infra::seed_file::read_records;
use foodgram_api::usecase::seed::{SeedIngredientsUseCase, SeedTagsUseCase, SeedUsersUseCase};
use foodgram_core::tracing::init_cli_tracing;

#[derive(Parser)]
#[command(name = "loaddata", about = "Bulk-load Foodgram seed data")]
struct Cli {
    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rows of `name,measurement_unit`.
    Ingredients { file: PathBuf },
    /// Rows of `name,color,slug`.
    Tags { file: PathBuf },
    /// Rows of `username,password,first_name,last_name,email`.
    Users { file: PathBuf },
}

fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_records(file).with_context(|| format!("read {}", path.display()))
}

/// Render store errors with their context chain instead of the opaque
/// message meant for HTTP clients.
fn describe(err: FoodgramError) -> anyhow::Error {
    match err {
        FoodgramError::Internal(e) => e,
        FoodgramError::Validation(errors) => anyhow::anyhow!(
            "invalid seed data: {}",
            serde_json::to_string(&errors).unwrap_or_default()
        ),
        other => anyhow::anyhow!(other),
    }
}

async fn run(db: DatabaseConnection, command: Command) -> anyhow::Result<(&'static str, SeedReport)> {
    let report = match command {
        Command::Ingredients { file } => {
            let records = load(&file)?;
            let usecase = SeedIngredientsUseCase {
                repo: DbCatalogRepository { db },
            };
            ("ingredients", usecase.execute(records).await.map_err(describe)?)
        }
        Command::Tags { file } => {
            let records = load(&file)?;
            let usecase = SeedTagsUseCase {
                repo: DbCatalogRepository { db },
            };
            ("tags", usecase.execute(records).await.map_err(describe)?)
        }
        Command::Users { file } => {
            let records = load(&file)?;
            let usecase = SeedUsersUseCase {
                repo: DbUserRepository { db },
            };
            ("users", usecase.execute(records).await.map_err(describe)?)
        }
    };
    Ok(report)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_cli_tracing("loaddata=info,foodgram_api=info");
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url)
        .await
        .context("failed to connect to database")?;

    let (kind, report) = run(db, cli.command).await?;
    info!(
        created = report.created,
        skipped = report.skipped,
        "loaded {kind}"
    );
    Ok(())
}
