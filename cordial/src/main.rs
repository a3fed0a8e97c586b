use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use cordial_client::Client;
use cordial_core::{chain, truncate};

mod bot;
mod config;

use crate::config::Config;

/// A small IRC bot: answers pings and CTCP requests, joins its channels
#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// Overrides the address from the config file
    #[arg(short, long)]
    address: Option<String>,

    /// Overrides the port from the config file
    #[arg(short, long)]
    port: Option<u16>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut config = Config::load_from_path(&args.config)?;
    if let Some(address) = args.address {
        config.address = address;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let mut conn = cordial_client::connect(&config.address, config.port).await?;
    for message in bot::registration(&config) {
        conn.encode(&message).await?;
    }

    let mux = bot::mux(&config)?;
    let handler = chain(Box::new(mux), vec![truncate(config.max_line_length)]);
    let client = Client::new(Arc::from(handler));
    client.run(conn).await?;

    log::info!("connection closed");
    Ok(())
}
