//! Storefront Catalog Admin CLI
//!
//! Command-line interface for operating a catalog database: migration
//! status/up/down/validate, demo seeding, and summary inspection.

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;

use storefront_catalog::config::DatabaseConfig;
use storefront_catalog::migration::Migrator;
use storefront_catalog::service::CatalogService;
use storefront_catalog::{connect, seed, MayPostgresExecutor, PgCatalogRepository};

#[derive(Parser)]
#[command(name = "catalog-admin")]
#[command(about = "Operational tool for the storefront catalog database")]
#[command(version = "0.1.0")]
struct Cli {
    /// Database connection URL (falls back to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show migration status (applied vs pending)
    Status,

    /// Apply pending migrations
    Up {
        /// Number of migrations to apply (default: all pending)
        #[arg(long)]
        steps: Option<usize>,

        /// Dry run - list pending migrations without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Rollback migrations
    Down {
        /// Number of migrations to rollback (default: 1)
        #[arg(long, default_value = "1")]
        steps: usize,
    },

    /// Validate checksums of applied migrations
    Validate,

    /// Migrate and insert the demo catalog into an empty database
    Seed,

    /// Print the summary view for a category as JSON
    Summary {
        /// Category id
        category_id: i32,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    } else if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    dotenv::dotenv().ok();

    if let Err(err) = run(cli) {
        eprintln!("{} {err}", "error:".red());
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = match cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
    {
        Some(url) => url,
        None => {
            DatabaseConfig::load()
                .map_err(|e| anyhow!("failed to load configuration: {e}"))?
                .url
        }
    };

    let client =
        connect(&database_url).map_err(|e| anyhow!("failed to connect to database: {e}"))?;
    let executor = MayPostgresExecutor::new(client);

    match cli.command {
        Commands::Status => {
            let migrator = Migrator::with_catalog_migrations(&executor);
            for status in migrator
                .status()
                .map_err(|e| anyhow!("failed to read migration status: {e}"))?
            {
                let state = if status.applied {
                    "applied".green()
                } else {
                    "pending".yellow()
                };
                println!("{:>14}  {}  {}", status.version, state, status.name);
            }
        }
        Commands::Up { steps, dry_run } => {
            let migrator = Migrator::with_catalog_migrations(&executor);
            if dry_run {
                let statuses = migrator
                    .status()
                    .map_err(|e| anyhow!("failed to read migration status: {e}"))?;
                let pending: Vec<_> = statuses.iter().filter(|s| !s.applied).collect();
                if pending.is_empty() {
                    println!("nothing to apply");
                }
                for status in pending {
                    println!("would apply {} ({})", status.version, status.name);
                }
            } else {
                let applied = migrator
                    .up(steps)
                    .map_err(|e| anyhow!("migration failed: {e}"))?;
                println!("applied {applied} migration(s)");
            }
        }
        Commands::Down { steps } => {
            let migrator = Migrator::with_catalog_migrations(&executor);
            let reverted = migrator
                .down(steps)
                .map_err(|e| anyhow!("rollback failed: {e}"))?;
            println!("rolled back {reverted} migration(s)");
        }
        Commands::Validate => {
            let migrator = Migrator::with_catalog_migrations(&executor);
            migrator
                .validate()
                .map_err(|e| anyhow!("validation failed: {e}"))?;
            println!("{}", "all applied migrations match their checksums".green());
        }
        Commands::Seed => {
            {
                let migrator = Migrator::with_catalog_migrations(&executor);
                migrator
                    .up(None)
                    .map_err(|e| anyhow!("migration failed: {e}"))?;
            }
            let repository = PgCatalogRepository::new(executor);
            let seeded = seed::seed_demo_catalog(&repository)
                .map_err(|e| anyhow!("seeding failed: {e}"))?;
            if seeded {
                println!("demo catalog seeded");
            } else {
                println!("catalog already has data; nothing seeded");
            }
        }
        Commands::Summary { category_id } => {
            let service = CatalogService::new(PgCatalogRepository::new(executor));
            let summary = service
                .category_summary(category_id)
                .map_err(|e| anyhow!("summary failed: {e}"))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
