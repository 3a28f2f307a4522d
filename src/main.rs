use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;

use kamptrail_scraper::apis::campflare::CampflareClient;
use kamptrail_scraper::apis::overpass::OverpassClient;
use kamptrail_scraper::apis::ridb::RidbClient;
use kamptrail_scraper::audit;
use kamptrail_scraper::config::Config;
use kamptrail_scraper::constants::{
    CAMPFLARE_API_KEY_ENV, CAMPSITES_DIR, OPENCAMPINGMAP_DIR, RIDB_API_KEY_ENV,
};
use kamptrail_scraper::error::{Result, ScraperError};
use kamptrail_scraper::logging;
use kamptrail_scraper::pipeline::{run_poi_update, FetchPipeline, FetchSummary};
use kamptrail_scraper::quality::{clean_dir, CleanMode};
use kamptrail_scraper::states;
use kamptrail_scraper::types::CampsiteSource;

#[derive(Parser)]
#[command(name = "kamptrail_scraper")]
#[command(about = "KampTrail campsite and POI data fetcher")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch camping facilities from the Recreation.gov RIDB API
    Ridb {
        /// RIDB API key (falls back to RIDB_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        /// Specific state code (e.g. CA, CO). If omitted, fetches all states.
        #[arg(long)]
        state: Option<String>,
        /// Max facilities per page
        #[arg(long, default_value_t = 50)]
        limit: u32,
        /// Output directory
        #[arg(long, default_value = "data/campsites")]
        output_dir: PathBuf,
    },
    /// Fetch campgrounds from the Campflare API
    Campflare {
        /// Campflare API key (falls back to CAMPFLARE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long, default_value = "data/campsites")]
        output_dir: PathBuf,
    },
    /// Fetch campsites from OpenStreetMap via the Overpass API
    Osm {
        #[arg(long)]
        state: Option<String>,
        #[arg(long, default_value = "data/opencampingmap")]
        output_dir: PathBuf,
    },
    /// Rebuild the dump/water/propane POI layer
    Poi {
        /// Data root holding the campsites directory
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Remove placeholder and low-quality entries from region files in place
    Clean {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Only remove placeholder/test entries, keep generic names
        #[arg(long)]
        placeholders_only: bool,
        /// Report what would be removed without rewriting files
        #[arg(long)]
        dry_run: bool,
    },
    /// Audit 50-state coverage and data quality across both sources
    Audit {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

/// Key from the flag when given, otherwise from the environment.
fn resolve_api_key(flag: Option<String>, env_var: &str) -> Result<String> {
    flag.filter(|k| !k.trim().is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|k| !k.trim().is_empty()))
        .ok_or_else(|| {
            ScraperError::Config(format!("no API key given; pass --api-key or set {env_var}"))
        })
}

/// One state when requested, all 50 otherwise.
fn resolve_states(state: Option<String>) -> Vec<String> {
    match state {
        Some(code) => vec![code.to_uppercase()],
        None => states::codes().map(String::from).collect(),
    }
}

fn print_fetch_summary(summary: &FetchSummary) {
    println!("\n📊 Fetch results for {}:", summary.source);
    println!("   States with data: {}", summary.state_counts.len());
    println!("   Total campsites: {}", summary.total_sites);
    if let Some(index_path) = &summary.index_path {
        println!("   Index updated: {}", index_path.display());
    }
    if !summary.errors.is_empty() {
        println!("\n⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("   - {error}");
        }
    }
}

async fn run_fetch(
    source: &dyn CampsiteSource,
    state: Option<String>,
    output_dir: &std::path::Path,
) -> Result<()> {
    let states = resolve_states(state);
    let summary = FetchPipeline::run(source, &states, output_dir).await?;
    print_fetch_summary(&summary);
    Ok(())
}

async fn run_command(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Ridb { api_key, state, limit, output_dir } => {
            let api_key = resolve_api_key(api_key, RIDB_API_KEY_ENV)?;
            let client = RidbClient::new(api_key, &config.ridb, limit)?;
            println!("🔄 Fetching Recreation.gov campsite data...");
            run_fetch(&client, state, &output_dir).await
        }
        Commands::Campflare { api_key, state, output_dir } => {
            let api_key = resolve_api_key(api_key, CAMPFLARE_API_KEY_ENV)?;
            let client = CampflareClient::new(api_key, &config.campflare)?;
            println!("Testing API connection...");
            client.verify_connection().await?;
            println!("🔄 Fetching Campflare campsite data...");
            run_fetch(&client, state, &output_dir).await
        }
        Commands::Osm { state, output_dir } => {
            let client = OverpassClient::new(&config.overpass)?;
            println!("🔄 Fetching OpenStreetMap campsite data (no API key needed)...");
            run_fetch(&client, state, &output_dir).await
        }
        Commands::Poi { data_dir } => {
            let client = OverpassClient::new(&config.overpass)?;
            println!("🔄 Updating POI layer (water/dump/propane)...");
            let summary = run_poi_update(&client, &data_dir).await?;
            println!("\n📊 POI summary:");
            println!("   Water stations:   {:5} (Recreation.gov)", summary.water);
            println!("   Dump stations:    {:5} (OpenStreetMap)", summary.dump);
            println!("   Propane stations: {:5} (OpenStreetMap)", summary.propane);
            println!("   TOTAL POIs:       {:5}", summary.total());
            println!("\n✅ Saved to {}", summary.output_path.display());
            Ok(())
        }
        Commands::Clean { data_dir, placeholders_only, dry_run } => {
            let mode = if placeholders_only {
                CleanMode::PlaceholdersOnly
            } else {
                CleanMode::Full
            };
            println!("🧹 Cleaning low-quality campsite data under {}...", data_dir.display());
            let summary = clean_dir(&data_dir, mode, dry_run)?;
            for (path, outcome) in &summary.files_cleaned {
                println!("  ✓ {}: removed {}/{} entries", path.display(), outcome.removed, outcome.original);
            }
            if !summary.errors.is_empty() {
                println!("\n⚠️  Files skipped due to errors:");
                for error in &summary.errors {
                    println!("   - {error}");
                }
            }
            if summary.total_removed > 0 {
                let verb = if dry_run { "Would remove" } else { "Removed" };
                println!("\n✅ {verb} {} low-quality entries from {} files", summary.total_removed, summary.files_cleaned.len());
            } else {
                println!("\n✅ No low-quality data found - database is clean!");
            }
            Ok(())
        }
        Commands::Audit { data_dir } => {
            let report = audit::run(
                &data_dir.join(CAMPSITES_DIR),
                &data_dir.join(OPENCAMPINGMAP_DIR),
            );
            print!("{}", audit::render(&report));
            if !report.is_complete_and_clean() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    if let Err(e) = run_command(cli, config).await {
        error!("Run failed: {e}");
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
    Ok(())
}
