//! ActorLens binary entry point
//!
//! Resolves each identifier given on the command line and prints the
//! normalized profile as JSON.

use actorlens::{ProfileResolver, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize tracing/logging
    let log_format =
        std::env::var("ACTORLENS__LOGGING__FORMAT").unwrap_or_else(|_| "pretty".to_string());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "actorlens=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "actorlens=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    // 2. Initialize metrics
    actorlens::metrics::init_metrics();

    // 3. Load configuration
    let config = config::AppConfig::load()?;
    tracing::debug!(
        user_agent = %config.http.user_agent,
        timeout_seconds = config.http.timeout_seconds,
        "Configuration loaded"
    );

    let identifiers: Vec<String> = std::env::args().skip(1).collect();
    if identifiers.is_empty() {
        eprintln!("Usage: actorlens <@user@domain | actor-url> ...");
        std::process::exit(2);
    }

    // 4. Resolve each identifier
    let resolver = ProfileResolver::from_config(&config)?;
    let mut failures = 0usize;

    for identifier in &identifiers {
        match resolver.resolve(identifier).await {
            Ok(profile) => {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            }
            Err(error) => {
                failures += 1;
                eprintln!("{identifier}: {error}");
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
