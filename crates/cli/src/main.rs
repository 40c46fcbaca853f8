//! soq command line entry point.
//!
//! Thin consumer of the search pipeline: parse arguments, load config, run
//! one search, print the results. Logging goes to stderr so stdout stays
//! clean for output.

use anyhow::Result;
use clap::Parser;
use soq_client::SearchClient;
use soq_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "soq", about = "Search Stack Overflow from the terminal, with an on-disk result cache")]
struct Cli {
    /// Search query
    query: String,

    /// Results page to request (1-based)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    page: Option<u32>,

    /// Print results as JSON instead of formatted text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let mut client = SearchClient::new(&cli.query, &config)?;
    if let Some(page) = cli.page {
        client.set_page(page);
    }

    let results = client.exec().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("no results for \"{}\"", client.query());
        return Ok(());
    }

    for (idx, result) in results.iter().enumerate() {
        println!("{}. {}", idx + 1, result.title);
        println!("   {}", result.link);
        for line in result.desc.lines() {
            println!("   {line}");
        }
        println!();
    }

    Ok(())
}
