pub mod admin;
pub mod client;
pub mod codec;
pub mod config;
pub mod connection;
pub mod console;
pub mod endpoint;
pub mod error;
pub mod identity;
pub mod leaderboard;
pub mod phase;
pub mod player;
pub mod presenter;
pub mod protocol;
pub mod session;
pub mod viewer;

pub use client::{Client, ConnectionState, RoleDriver};
pub use error::{ClientError, MalformedMessage};
pub use phase::RoundPhase;
