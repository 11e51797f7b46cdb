use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::coingecko::CoinGeckoClient;
use commands::{Outcome, Session};
use config::Config;

fn prompt() {
    print!("crypto-era> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crypto_era=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("🪙 Starting Crypto-Era v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let client = match CoinGeckoClient::with_base_url(config.api_base_url.clone(), config.request_timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            std::process::exit(2);
        }
    };

    let mut session = Session::new(client, config);

    // Load the market table up front; commands retry on demand if this fails
    if let Err(e) = commands::markets::execute_refresh(&mut session).await {
        warn!("{}", e);
    }

    // One-shot mode: `crypto-era chart bitcoin`
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        match commands::dispatch(&mut session, &args.join(" ")).await {
            Ok(Outcome::Output(output)) => print!("{}", output),
            Ok(Outcome::Quit) => {}
            Err(e) => {
                println!("❌ {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Crypto-Era: type `help` for commands, `quit` to leave.");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if !commands::handle_line(&mut session, &line).await {
                    break;
                }
                prompt();
            }
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }

    info!("👋 Bye");
}
