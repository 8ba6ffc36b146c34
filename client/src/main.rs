use std::io::{self, BufRead};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::warn;

use friendexing_client::{
    admin::AdminDriver,
    config::{Cli, Command},
    connection::WsConnection,
    console::{parse_admin_line, parse_player_line, ConsolePresenter, ADMIN_HELP},
    identity::IdentityStore,
    player::PlayerDriver,
    session, Client,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "friendexing_client=debug,info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Admin { target } => {
            let endpoint = target.endpoint()?;
            let url = endpoint.admin_url()?;
            let connection = WsConnection::connect(&url)
                .await
                .with_context(|| format!("Failed to connect to {url}"))?;

            let (tx, rx) = mpsc::unbounded_channel();
            spawn_input_reader(move |line| match parse_admin_line(&line) {
                Ok(actions) => actions.into_iter().try_for_each(|a| tx.send(a)).is_ok(),
                Err(message) => {
                    println!("{message}");
                    true
                }
            });

            println!("{ADMIN_HELP}");
            let client = Client::new(AdminDriver::new(), ConsolePresenter::stdout());
            session::run(connection, client, rx).await;
        }
        Command::Play {
            target,
            participant,
        } => {
            let endpoint = target.endpoint()?;
            let store = IdentityStore::new();
            let participant_id = store.resolve(&endpoint.game_id, participant.as_deref())?;
            let url = endpoint.player_url(&participant_id)?;
            let connection = WsConnection::connect(&url)
                .await
                .with_context(|| format!("Failed to connect to {url}"))?;

            let (tx, rx) = mpsc::unbounded_channel();
            spawn_input_reader(move |line| {
                parse_player_line(&line)
                    .into_iter()
                    .try_for_each(|a| tx.send(a))
                    .is_ok()
            });

            let client = Client::new(PlayerDriver::new(), ConsolePresenter::stdout());
            session::run(connection, client, rx).await;
        }
    }

    Ok(())
}

/// Feed stdin lines to `on_line` until it returns false or input ends.
/// A plain thread, so a pending read never holds up shutdown.
fn spawn_input_reader<F>(mut on_line: F)
where
    F: FnMut(String) -> bool + Send + 'static,
{
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if !on_line(line) {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
}
