// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use serde::Serialize;
use std::fs;
use std::sync::Arc;
use swapi_bridge::output::{deliver, render_json, DeliveryTarget};
use swapi_bridge::{
    AppError, BridgeConfig, Catalog, CatalogEntity, CommandLineInput, Film, Listing, OneBased,
    Operation, PagingArgs, Pagination, Person, RecordUid, Resource, ScanOptions, ScanStop, Starship,
    SwapiHttpClient, UpstreamCatalog, Vehicle,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("swapi_bridge.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Results go to stdout, so the console log goes to stderr.
    let console_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the catalog the configured upstream sits behind.
fn connect(config: &BridgeConfig) -> Result<Catalog, AppError> {
    let client = SwapiHttpClient::new(config)?;
    log::info!("Using upstream at {}", client.base_url());

    let scan_options = ScanOptions::default().with_deadline(config.scan_deadline);
    let upstream = UpstreamCatalog::new(Arc::new(client)).with_scan_options(scan_options);
    Ok(Catalog::new(upstream))
}

/// Runs the configured operation and renders its result as JSON.
async fn execute(catalog: &Catalog, operation: &Operation) -> Result<String, AppError> {
    let resource = match operation {
        Operation::List { resource, .. }
        | Operation::Get { resource, .. }
        | Operation::Search { resource, .. }
        | Operation::Lookup { resource, .. } => *resource,
    };

    match resource {
        Resource::Films => execute_for::<Film>(catalog, operation).await,
        Resource::People => execute_for::<Person>(catalog, operation).await,
        Resource::Starships => execute_for::<Starship>(catalog, operation).await,
        Resource::Vehicles => execute_for::<Vehicle>(catalog, operation).await,
    }
}

async fn execute_for<E>(catalog: &Catalog, operation: &Operation) -> Result<String, AppError>
where
    E: CatalogEntity + Serialize,
{
    match operation {
        Operation::List { paging, .. } => {
            let listing = catalog.list::<E, OneBased>(pagination(paging)?).await;
            render_listing(listing)
        }
        Operation::Get { uid, .. } => {
            let uid = RecordUid::parse(uid)?;
            match catalog.find::<E>(&uid).await {
                Some(record) => render_json(&record),
                None => Err(AppError::RecordNotFound {
                    resource: E::RESOURCE.to_string(),
                    uid: uid.to_string(),
                }),
            }
        }
        Operation::Search {
            field, term, paging, ..
        } => {
            let listing = catalog
                .search::<E, OneBased>(*field, term, pagination(paging)?)
                .await?;
            render_listing(listing)
        }
        Operation::Lookup {
            field, term, paging, ..
        } => {
            let listing = catalog
                .lookup::<E, OneBased>(*field, term, pagination(paging)?)
                .await?;
            render_listing(listing)
        }
    }
}

fn pagination(paging: &PagingArgs) -> Result<Pagination<OneBased>, AppError> {
    Ok(Pagination::from_params(paging.page, paging.size)?)
}

fn render_listing<E: Serialize>(listing: Listing<E, OneBased>) -> Result<String, AppError> {
    if listing.is_truncated() {
        report_truncation(listing.scan_stop.as_ref());
    }
    render_json(&listing.page)
}

/// Tells the user a full scan did not see the whole collection.
fn report_truncation(stop: Option<&ScanStop>) {
    match stop {
        Some(ScanStop::PageBoundReached) => eprintln!(
            "⚠️  Full scan stopped at its page limit. Records beyond it are not included."
        ),
        Some(ScanStop::DeadlineElapsed) => {
            eprintln!("⚠️  Full scan deadline elapsed. Results are partial.")
        }
        Some(ScanStop::Aborted { cause }) => {
            eprintln!("⚠️  Full scan aborted ({}). Results are partial.", cause)
        }
        Some(ScanStop::Exhausted) | None => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = BridgeConfig::resolve(cli)?;
    let catalog = connect(&config)?;

    let rendered = execute(&catalog, &config.operation).await?;
    let target = DeliveryTarget::from_output_file(config.output_file.clone());
    deliver(&rendered, &target)?;

    if let DeliveryTarget::File(path) = &target {
        eprintln!("✓ Result saved to {}", path.display());
    }

    Ok(())
}
