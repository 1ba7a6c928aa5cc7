//! Ask the explanation service about a topic.
//!
//! Usage: `cargo run --example explain -- <topic> [side] [config.json]`
//!
//! Reads the API key from the variable named in the config (`API_KEY` by
//! default). Without one the fallback text is printed.

use anyhow::{Context, Result};
use pixelbits::{AppConfig, ExplanationClient};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let topic = args.next().unwrap_or_else(|| "像素".to_string());
    let side: usize = match args.next() {
        Some(s) => s.parse().context("side must be a number")?,
        None => 8,
    };
    let config = match args.next() {
        Some(path) => AppConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => AppConfig::default(),
    };

    let client = ExplanationClient::from_config(&config.explain);
    println!("{}", client.explain(&topic, side));
    Ok(())
}
