use anyhow::{anyhow, bail, Context, Result};
use url::Url;

/// Where the game server lives, as seen from the hosting game page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host with the port, if the page had one.
    pub host: String,
    /// Use `wss` instead of `ws`.
    pub secure: bool,
    pub game_id: String,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, secure: bool, game_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            secure,
            game_id: game_id.into(),
        }
    }

    /// Parse a game page address such as `https://example.com/games/<game_id>/`.
    /// The game id is the second path segment.
    pub fn from_page_url(page: &str) -> Result<Self> {
        let url = Url::parse(page.trim()).with_context(|| format!("Invalid page URL `{page}`"))?;
        let secure = match url.scheme() {
            "https" => true,
            "http" => false,
            other => bail!("Unsupported page scheme `{other}`"),
        };
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("Page URL `{page}` has no host"))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let game_id = url
            .path_segments()
            .and_then(|mut segments| segments.nth(1))
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| anyhow!("Page URL `{page}` does not name a game"))?;

        Ok(Self::new(host, secure, game_id))
    }

    pub fn admin_url(&self) -> Result<Url> {
        self.socket_url(&["ws", "admin", &self.game_id])
    }

    pub fn player_url(&self, participant_id: &str) -> Result<Url> {
        self.socket_url(&["ws", "play", &self.game_id, participant_id])
    }

    fn socket_url(&self, segments: &[&str]) -> Result<Url> {
        let scheme = if self.secure { "wss" } else { "ws" };
        let mut url = Url::parse(&format!("{scheme}://{}/", self.host))
            .with_context(|| format!("Invalid server host `{}`", self.host))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Server URL cannot have a path"))?
            .clear()
            .extend(segments)
            // Trailing slash
            .push("");
        Ok(url)
    }
}
