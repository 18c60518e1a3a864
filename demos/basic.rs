//! Basic example showing how to use redis-tracing.
//!
//! Run with: cargo run --example basic
//!
//! Expects a redis server on 127.0.0.1:6379 (REDIS_URL to override).

use redis_tracing::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,redis_tracing=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());

    tracing::info!("Connecting to redis...");

    // Option 1: An instrumented client; every connection it hands out is traced
    let client = TracedClient::open(redis_url.as_str())?;
    let mut con = client.get_connection()?;

    // Option 2: Wrap an existing connection with the extension trait
    // let mut con = redis::Client::open(redis_url.as_str())?
    //     .get_connection()?
    //     .with_tracing();

    // Option 3: With custom configuration
    // let mut con = redis::Client::open(redis_url.as_str())?
    //     .get_connection()?
    //     .with_tracing_config(
    //         TracingConfig::default()
    //             .with_command_logging(true)
    //             .with_server_address("127.0.0.1", 6379),
    //     );

    // Every command through `con` is now instrumented
    let () = redis::cmd("HSET")
        .arg("programs")
        .arg("space")
        .arg(1961)
        .query(&mut con)?;

    let launched: i64 = redis::cmd("HGET").arg("programs").arg("space").query(&mut con)?;
    tracing::info!(launched, "Fetched value through traced connection");

    Ok(())
}
