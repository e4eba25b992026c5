use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use prospect_scraper::address::{extract_city_ca, extract_province_ca, parse_yellow_pages_ca_address};
use prospect_scraper::config::Config;
use prospect_scraper::extractor::extract_listings;
use prospect_scraper::fetcher::PageFetcher;
use prospect_scraper::importer::import_prospects_csv;
use prospect_scraper::logging;
use prospect_scraper::stats::{gather_call_stats, CityTimes};
use prospect_scraper::storage::InMemoryStorage;

#[derive(Parser)]
#[command(name = "prospect_scraper")]
#[command(about = "Cold-call prospect importer and Yellow Pages Canada listing extractor")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a search-results page and save the HTML
    Fetch {
        /// Page URL to fetch
        #[arg(long)]
        url: String,
        /// Where to write the HTML (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Extract business listings from a saved HTML page
    Extract {
        /// Saved HTML file
        #[arg(long)]
        input: PathBuf,
        /// Where to write the JSON records (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Import prospects from a directory CSV export
    Import {
        /// CSV export file
        #[arg(long)]
        file: PathBuf,
        /// Industry to attach to every imported prospect
        #[arg(long)]
        industry: String,
    },
    /// Parse one address with both parsers and print the results
    Address {
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Fetch { url, output } => {
            let fetcher = PageFetcher::new(&config.fetcher)?;
            let html = fetcher.fetch(&url).await?;
            match output {
                Some(path) => {
                    fs::write(&path, &html)?;
                    println!("💾 Saved {} bytes to {}", html.len(), path.display());
                }
                None => println!("{}", html),
            }
        }
        Commands::Extract { input, output } => {
            let html = fs::read_to_string(&input)?;
            let listings = extract_listings(&html)?;
            info!("Extracted {} listings from {}", listings.len(), input.display());

            let json = serde_json::to_string_pretty(&listings)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("💾 Wrote {} listings to {}", listings.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Import { file, industry } => {
            println!("🔄 Importing prospects from {}...", file.display());
            let storage = InMemoryStorage::new();
            let csv_file = fs::File::open(&file)?;

            match import_prospects_csv(csv_file, &industry, &storage).await {
                Ok(report) => {
                    println!("\n📊 Import results:");
                    println!("   Imported: {}", report.imported);
                    println!("   Updated: {}", report.updated);
                    println!("   Duplicate rows: {}", report.duplicate_rows);
                    println!("   Row errors: {}", report.row_errors.len());

                    if !report.row_errors.is_empty() {
                        println!("\n⚠️  Rows skipped:");
                        for row_error in &report.row_errors {
                            println!("   - line {}: {}", row_error.line, row_error.message);
                        }
                    }

                    let stats = gather_call_stats(&storage).await?;
                    println!("\n   Prospects in storage: {}", stats.total_prospects);

                    let times = CityTimes::now();
                    println!(
                        "   Local times: Halifax {}, Toronto {}, Winnipeg {}, Edmonton {}, Vancouver {}",
                        times.halifax, times.toronto, times.winnipeg, times.edmonton, times.vancouver
                    );
                }
                Err(e) => {
                    error!("Import failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Address { address } => {
            match parse_yellow_pages_ca_address(&address) {
                Ok(parsed) => println!(
                    "Comma parser:  city='{}' province='{}'",
                    parsed.city, parsed.province
                ),
                Err(e) => println!("Comma parser:  {}", e),
            }
            println!(
                "Tagger:        city='{}' province='{}'",
                extract_city_ca(&address),
                extract_province_ca(&address)
            );
        }
    }

    Ok(())
}
