//! `review-lifecycle <snapshot.json|snapshot.yaml>`
//!
//! Loads cycles and plans from a snapshot file and prints the deadline
//! dashboard as JSON.

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use review_lifecycle::adapters::{Snapshot, SystemClock};
use review_lifecycle::application::{GetDeadlineOverviewHandler, GetDeadlineOverviewQuery};
use review_lifecycle::config::{AppConfig, LoggingConfig};
use review_lifecycle::ports::Clock;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: review-lifecycle <snapshot.json|snapshot.yaml>")?;

    let snapshot = Snapshot::load(&path).await?;
    let as_of = snapshot.as_of;
    let (cycles, plans) = snapshot.into_repositories();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let handler = GetDeadlineOverviewHandler::new(
        Arc::new(cycles),
        Arc::new(plans),
        clock,
        config.classifier(),
    );
    let report = handler
        .handle(GetDeadlineOverviewQuery {
            owner_id: None,
            as_of,
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
