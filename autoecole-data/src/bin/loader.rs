use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use autoecole_data::TarifLoader;
use autoecole_db_sqlite::SqliteRepository;
use clap::Parser;

/// Load tariff overrides from a CSV file into the database.
///
/// The CSV file has two columns:
/// - cle: one of the known tariff keys (e.g. scolarite_AB)
/// - montant: the amount in whole FCFA
#[derive(Parser, Debug)]
#[command(name = "autoecole-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tariff overrides
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g. sqlite:autoecole.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:autoecole.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        repo.run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!("Loading tariffs from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = TarifLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let inserted = TarifLoader::load(&repo, &records)
        .await
        .context("Failed to load tariffs into database")?;

    println!("Successfully loaded {} tariffs into the database.", inserted);

    Ok(())
}
