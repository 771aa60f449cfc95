use anyhow::Result;

use kiosk_scrape::config::ScrapeConfig;
use kiosk_scrape::{images, persist, pipeline, scraping};

fn main() -> Result<()> {
    let config = ScrapeConfig::load();

    println!("{} Kiosk - Event Scraper", config.locality);
    println!("{}", "=".repeat(60));

    let sources = scraping::active_sources();
    let (mut events, report) = pipeline::run(&sources, &config);

    for source in &report.sources {
        match &source.error {
            Some(error) => println!("  {} failed: {error}", source.source_id),
            None => println!(
                "  {}: {} fetched, {} skipped",
                source.source_id, source.fetched, source.skipped
            ),
        }
    }
    println!(
        "  {} duplicates removed, {} past events filtered",
        report.duplicates_removed, report.past_filtered
    );

    images::localize_images(&mut events, &config);

    persist::save_events(&config.output_file, &events, &config.locality, &config.region)?;
    println!("{} events saved to {:?}", report.kept, config.output_file);

    Ok(())
}
