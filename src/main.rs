use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use apbridge::bridge::{ApNewsBridge, NormalizedItem, Topic, TopicSelector};
use apbridge::config::Config;
use apbridge::transport::ReqwestTransport;

/// Get the default config file path (~/.config/apbridge/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("apbridge")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "apbridge", about = "Fetch an Associated Press News topic feed")]
struct Args {
    /// Standard topic selector (see --list-topics)
    #[arg(long, value_name = "TOPIC", conflicts_with = "custom")]
    topic: Option<String>,

    /// Custom topic tag, e.g. "europe"
    #[arg(long, value_name = "TEXT")]
    custom: Option<String>,

    /// Config file (default: ~/.config/apbridge/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the standard topics and exit
    #[arg(long)]
    list_topics: bool,
}

fn print_topics() {
    let default = Topic::default();
    for topic in Topic::ALL {
        let marker = if topic == default { " (default)" } else { "" };
        println!("{:<16} {}{}", topic.selector(), topic.label(), marker);
    }
}

fn print_item(item: &NormalizedItem) {
    println!("* {}", item.title);
    println!("  {}", item.uri);
    if let Some(timestamp) = &item.timestamp {
        println!("  published: {timestamp}");
    }
    if let Some(author) = &item.author {
        println!("  by: {author}");
    }
    for enclosure in &item.enclosures {
        println!("  image: {enclosure}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_topics {
        print_topics();
        return Ok(());
    }

    let selector = TopicSelector::from_inputs(args.topic.as_deref(), args.custom.as_deref())
        .context("Invalid topic")?;

    let config = match args.config {
        Some(path) => Config::load_required(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => match default_config_path() {
            Ok(path) => Config::load(&path).context("Failed to load config")?,
            Err(e) => {
                tracing::warn!(error = %e, "No config location, using defaults");
                Config::default()
            }
        },
    };

    let transport =
        ReqwestTransport::from_config(&config).context("Failed to build HTTP client")?;
    let mut bridge = ApNewsBridge::new(transport).with_endpoint(config.endpoint.clone());

    let (metadata, items) = match bridge.fetch_feed(selector.as_str()).await {
        Ok(feed) => feed,
        Err(e) if e.is_client_error() => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to fetch feed for {selector}"));
        }
    };

    println!("{}", bridge.display_name());
    println!("{}", metadata.uri);
    println!();
    for item in &items {
        print_item(item);
    }

    Ok(())
}
