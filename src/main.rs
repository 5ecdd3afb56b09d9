use anyhow::{bail, Context, Result};
use langswap::config::Config;
use langswap::{DatasetFetcher, FileStore, InitOutcome, LanguageManager, MemoryDocument};
use tokio::sync::broadcast;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("langswap=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let page_file = config
        .page_file
        .as_ref()
        .context("LANGSWAP_PAGE_FILE not set")?;
    let page = std::fs::read_to_string(page_file)
        .with_context(|| format!("Failed to read page file {}", page_file.display()))?;
    let document = MemoryDocument::from_json(&page)
        .with_context(|| format!("Failed to parse page file {}", page_file.display()))?;
    info!("Loaded page with {} element(s)", document.len());

    let fetcher = DatasetFetcher::from_options(&config.fetch_options())?;
    let store = FileStore::new(&config.cache_dir);
    let mut manager = LanguageManager::new(document, store, fetcher);
    let mut events = manager.subscribe();

    // Step 1: Load the dataset and apply the default language
    let outcome = manager.init(&config.dataset_url, config.use_cache).await?;
    if outcome == InitOutcome::Unavailable {
        bail!(
            "Language dataset could not be loaded from {}",
            config.dataset_url
        );
    }
    log_events(&mut events);

    let codes = manager.language_codes();
    let names = manager.language_names();
    for (code, name) in codes.iter().zip(&names) {
        info!("  {} - {}", code, name);
    }
    info!("Default language: {}", manager.current_language_code()?);

    // Step 2: Switch to the requested language, if any
    if let Some(code) = &config.language {
        manager.set_language(code)?;
        log_events(&mut events);
    }

    let report = manager.metrics().report();
    info!(
        "Metrics: {} fetch(es), {} cache hit(s), {} language(s) applied",
        report.fetches, report.cache_hits, report.languages_applied
    );
    debug!("Metrics report: {}", serde_json::to_string(&report)?);

    println!("{}", serde_json::to_string_pretty(manager.document())?);
    Ok(())
}

fn log_events(events: &mut broadcast::Receiver<langswap::LanguageEvent>) {
    while let Ok(event) = events.try_recv() {
        match event.code() {
            Some(code) => info!("Event {} ({})", event.name(), code),
            None => info!("Event {}", event.name()),
        }
    }
}
