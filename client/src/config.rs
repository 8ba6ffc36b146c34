use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use crate::endpoint::Endpoint;

#[derive(Parser, Debug)]
#[command(name = "friendexing", version, about = "Terminal client for friendexing games")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a game as its admin: start rounds and pick the correct answers.
    Admin {
        #[command(flatten)]
        target: Target,
    },
    /// Join a game as a player and submit guesses.
    Play {
        #[command(flatten)]
        target: Target,
        /// Participant id handed out when joining the game. Remembered for
        /// later runs.
        #[arg(long)]
        participant: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct Target {
    /// Address of the game page, e.g. https://example.com/games/<game id>/
    #[arg(long, env = "FRIENDEXING_PAGE")]
    pub page: Option<String>,
    /// Server host (with port) when not using --page.
    #[arg(long, requires = "game")]
    pub server: Option<String>,
    /// Game id when not using --page.
    #[arg(long, requires = "server")]
    pub game: Option<String>,
    /// Use an encrypted connection with --server.
    #[arg(long, requires = "server")]
    pub secure: bool,
}

impl Target {
    pub fn endpoint(&self) -> Result<Endpoint> {
        match (&self.server, &self.game, &self.page) {
            (Some(server), Some(game), _) => Ok(Endpoint::new(server, self.secure, game)),
            (None, None, Some(page)) => Endpoint::from_page_url(page),
            _ => bail!("Pass either --page or both --server and --game"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_with_page() {
        let cli = Cli::try_parse_from([
            "friendexing",
            "play",
            "--page",
            "https://example.com/games/g1/",
            "--participant",
            "p1",
        ])
        .unwrap();
        let Command::Play {
            target,
            participant,
        } = cli.command
        else {
            panic!("expected play");
        };
        assert_eq!(participant.as_deref(), Some("p1"));
        assert_eq!(
            target.endpoint().unwrap(),
            Endpoint::new("example.com", true, "g1")
        );
    }

    #[test]
    fn test_admin_with_server() {
        let cli = Cli::try_parse_from([
            "friendexing",
            "admin",
            "--server",
            "localhost:8000",
            "--game",
            "g1",
        ])
        .unwrap();
        let Command::Admin { target } = cli.command else {
            panic!("expected admin");
        };
        assert_eq!(
            target.endpoint().unwrap(),
            Endpoint::new("localhost:8000", false, "g1")
        );
    }

    #[test]
    fn test_server_requires_game() {
        assert!(Cli::try_parse_from(["friendexing", "admin", "--server", "localhost"]).is_err());
    }
}
