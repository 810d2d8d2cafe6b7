mod config;
mod error;
mod output;
mod parser;
mod record;
mod render;
mod scrape;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use crate::render::{Browser, HttpFetcher, Render};

#[derive(Parser)]
#[command(name = "cis_scraper", about = "CIS people directory scraper")]
struct Cli {
    /// Fetch over plain HTTP instead of driving headless Chrome
    #[arg(long)]
    no_browser: bool,
    /// Directory the output files land in
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Also save each rendered page under the output directory
    #[arg(long)]
    dump_html: bool,
}

// The pages are fetched one at a time on purpose; a single thread is all
// the runtime needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    println!("CIS People Scraper");
    println!("==================\n");

    std::fs::create_dir_all(&cli.out_dir)?;

    let renderer: Box<dyn Render> = if cli.no_browser {
        info!("browser disabled, fetching over plain HTTP");
        Box::new(HttpFetcher::new()?)
    } else {
        let endpoint = config::webdriver_url();
        let browser = Browser::new(&endpoint);
        browser.probe().await?;
        info!("webdriver ready at {}", endpoint);
        Box::new(browser)
    };

    let dump_dir = cli.dump_html.then(|| cli.out_dir.clone());
    println!(
        "Scraping {} pages from {}...",
        config::SUBPAGES.len(),
        config::BASE_URL
    );
    let outcome = scrape::scrape_people(
        renderer.as_ref(),
        config::BASE_URL,
        config::SUBPAGES,
        dump_dir.as_deref(),
    )
    .await?;

    if outcome.pages_failed > 0 {
        println!(
            "Warning: {} of {} pages failed to render; results are partial.",
            outcome.pages_failed,
            config::SUBPAGES.len()
        );
    }

    if outcome.records.is_empty() {
        println!("No people found. Nothing written; existing output files left alone.");
        return Ok(());
    }

    println!("\nFound {} people:", outcome.records.len());
    for (category, n) in outcome.category_counts() {
        println!("  {:<24} {:>4}", category, n);
    }

    println!("\nSample:");
    for rec in outcome.records.iter().take(3) {
        println!(
            "  {} | {} | {}",
            rec.display_name(),
            rec.title.as_deref().unwrap_or("-"),
            rec.category
        );
    }

    let json_path = cli.out_dir.join(config::JSON_FILE);
    let csv_path = cli.out_dir.join(config::CSV_FILE);
    output::write_json(&outcome.records, &json_path)?;
    output::write_csv(&outcome.records, &csv_path)?;
    println!("\nSaved {} and {}", json_path.display(), csv_path.display());

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
