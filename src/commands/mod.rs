pub mod chart;
pub mod help;
pub mod markets;
pub mod view;
pub mod watch;

use tracing::{debug, warn};

use crate::api::coingecko::CoinGeckoClient;
use crate::config::Config;
use crate::models::DashboardState;

/// Everything a command can read or update
pub struct Session {
    pub client: CoinGeckoClient,
    pub config: Config,
    pub state: DashboardState,
}

impl Session {
    pub fn new(client: CoinGeckoClient, config: Config) -> Self {
        Self {
            client,
            config,
            state: DashboardState::default(),
        }
    }
}

/// What a successfully dispatched line produced
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Output(String),
    Quit,
}

/// Run one command line against the session
pub async fn dispatch(session: &mut Session, line: &str) -> Result<Outcome, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Ok(Outcome::Output(String::new()));
    };

    debug!("Dispatching '{}' with args {:?}", command, args);

    let output = match command.to_lowercase().as_str() {
        "markets" | "m" | "list" => markets::execute(session, args).await?,
        "refresh" => markets::execute_refresh(session).await?,
        "search" | "s" => markets::execute_search(session, args).await?,
        "view" | "v" => view::execute(session, args).await?,
        "back" | "b" => view::execute_back(session),
        "watch" | "w" => watch::execute(session, args)?,
        "watchlist" | "wl" => watch::execute_watchlist(session),
        "recent" | "r" => watch::execute_recent(session),
        "chart" | "c" => chart::execute(session, args).await?,
        "help" | "h" | "?" => help::execute(),
        "quit" | "exit" | "q" => return Ok(Outcome::Quit),
        _ => {
            return Err(format!(
                "Unknown command '{}'. Type `help` for the list of commands.",
                command
            ))
        }
    };

    Ok(Outcome::Output(output))
}

/// Run one line and print its result. Returns false once the user quits.
pub async fn handle_line(session: &mut Session, line: &str) -> bool {
    match dispatch(session, line).await {
        Ok(Outcome::Output(output)) => {
            print!("{}", output);
            true
        }
        Ok(Outcome::Quit) => false,
        Err(e) => {
            warn!("Command '{}' failed: {}", line.trim(), e);
            println!("❌ {}", e);
            true
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::services::dashboard_service;
    use crate::services::market_service::tests::sample_markets;
    use std::time::Duration;

    /// Session with a loaded market table and a client that must not be used
    pub fn offline_session() -> Session {
        let client =
            CoinGeckoClient::with_base_url("http://127.0.0.1:9".to_string(), Duration::from_millis(200))
                .unwrap();
        let mut session = Session::new(client, Config::default());
        session.state = dashboard_service::with_markets(&session.state, sample_markets());
        session
    }

    #[tokio::test]
    async fn test_quit_and_blank_lines() {
        let mut session = offline_session();

        assert_eq!(dispatch(&mut session, "   ").await, Ok(Outcome::Output(String::new())));
        assert_eq!(dispatch(&mut session, "QUIT").await, Ok(Outcome::Quit));
        assert!(!handle_line(&mut session, "q").await);
        assert!(handle_line(&mut session, "help").await);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut session = offline_session();

        let err = dispatch(&mut session, "sell bitcoin").await.unwrap_err();

        assert!(err.starts_with("Unknown command 'sell'"));
        assert!(handle_line(&mut session, "sell bitcoin").await);
    }

    #[tokio::test]
    async fn test_watch_then_recent_flow() {
        let mut session = offline_session();

        dispatch(&mut session, "w ethereum").await.unwrap();
        dispatch(&mut session, "watch Bitcoin").await.unwrap();

        let Outcome::Output(list) = dispatch(&mut session, "wl").await.unwrap() else {
            panic!("expected output");
        };
        assert_eq!(list, "Watchlist:\n  • Bitcoin (bitcoin)\n  • Ethereum (ethereum)\n");

        let Outcome::Output(recent) = dispatch(&mut session, "recent").await.unwrap() else {
            panic!("expected output");
        };
        assert_eq!(recent, "Recently Viewed: (empty)\n");
    }
}
