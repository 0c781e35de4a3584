use anyhow::Context;
use clap::{Parser, Subcommand};
use nd_core::NewsStore;
use nd_scrapers::{scheduler, Pipeline, Site};
use nd_storage::SqliteStore;
use nd_web::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "newsdesk", version, about = "Scrape world news listings into SQLite and serve them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the API server with the recurring scrape schedule
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
        #[arg(long, default_value = "news.db")]
        db: PathBuf,
        /// Seconds between scrapes of each site
        #[arg(long, default_value_t = 3600)]
        interval: u64,
    },
    /// Scrape once and print what was found
    Scrape {
        /// Restrict to one site (cbs, bbc); default is all
        #[arg(long)]
        site: Option<Site>,
        #[arg(long, default_value = "news.db")]
        db: PathBuf,
    },
    /// Print stored item counts and the most recent rows
    CheckDb {
        #[arg(long, default_value = "news.db")]
        db: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { port, db, interval } => serve(port, &db, interval).await,
        Commands::Scrape { site, db } => scrape(site, &db).await,
        Commands::CheckDb { db } => check_db(&db).await,
    }
}

async fn open_pipeline(db: &PathBuf) -> anyhow::Result<(Arc<dyn NewsStore>, Arc<Pipeline>)> {
    let store: Arc<dyn NewsStore> = Arc::new(
        SqliteStore::open(db)
            .await
            .with_context(|| format!("failed to open database at {}", db.display()))?,
    );
    let pipeline = Arc::new(Pipeline::new(store.clone())?);
    Ok((store, pipeline))
}

async fn serve(port: u16, db: &PathBuf, interval: u64) -> anyhow::Result<()> {
    let (store, pipeline) = open_pipeline(db).await?;

    scheduler::spawn(pipeline.clone(), Duration::from_secs(interval));

    let app = nd_web::create_app(AppState { store, pipeline }).await;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn scrape(site: Option<Site>, db: &PathBuf) -> anyhow::Result<()> {
    let (_, pipeline) = open_pipeline(db).await?;

    let records = match site {
        Some(site) => pipeline.run(site).await,
        None => pipeline.run_all().await,
    };

    println!("Scraped {} items", records.len());
    for (i, record) in records.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, record.source, record.title);
    }
    Ok(())
}

async fn check_db(db: &PathBuf) -> anyhow::Result<()> {
    if !db.exists() {
        anyhow::bail!("database file does not exist: {}", db.display());
    }

    let store = SqliteStore::open(db).await?;
    let count = store.count().await?;
    println!("{} items in {}", count, db.display());

    if count > 0 {
        println!("Most recent:");
        for item in store.recent(5).await? {
            println!("  #{} [{}] {} ({})", item.id, item.source, item.title, item.url);
        }
    }
    Ok(())
}
