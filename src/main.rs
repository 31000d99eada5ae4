use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use folio::config::Config;
use folio::db;
use folio::db::sqlite::SqliteDatabase;
use folio::db::traits::Database;
use folio::output::terminal;
use folio::segmenter;
use folio::web;

/// Folio: storage and segmentation backend for interactive e-books.
///
/// Stores chapters, topics, hotspots, and annotations; segments raw prose
/// into topics with auto-placed keyword hotspots; proxies image generation
/// to Kie.ai.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Segment a content file into topics and print the result
    Segment {
        /// Path to a UTF-8 text file with the raw chapter content
        file: PathBuf,

        /// Print the topics as JSON instead of a human-readable summary
        #[arg(long)]
        json: bool,
    },

    /// Show database status (path, tables, chapter count)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("folio=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Folio database...");
            let config = Config::load()?;
            let conn = db::initialize(&config.db_path)?;
            let table_count = db::schema::table_count(&conn)?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nFolio is ready. Next step: run the API server");
            println!("  cargo run -- serve");
        }

        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let conn = db::initialize(&config.db_path)?;
            let database: Arc<dyn Database> = Arc::new(SqliteDatabase::new(conn));
            web::run_server(config, database, port, &bind).await?;
        }

        Commands::Segment { file, json } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let topics = segmenter::segment(&content);

            if json {
                println!("{}", serde_json::to_string_pretty(&topics)?);
            } else {
                terminal::display_topics(&topics);
                println!(
                    "{}",
                    "This is a preview — POST /api/chapters persists the result.".dimmed()
                );
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            let conn = db::open(&config.db_path)?;
            let database = SqliteDatabase::new(conn);

            let tables = database.table_count().await?;
            let chapters = database.count_chapters().await?;

            println!("\n{}", "=== Folio Status ===".bold());
            println!("  Database: {}", config.db_path);
            println!("  Tables:   {tables}");
            println!("  Chapters: {chapters}");
            if config.kie_api_key.is_empty() {
                println!(
                    "  Imaging:  {}",
                    "KIE_API_KEY not set — generation disabled".yellow()
                );
            } else {
                println!("  Imaging:  configured ({})", config.kie_api_base);
            }
            println!();
        }
    }

    Ok(())
}
