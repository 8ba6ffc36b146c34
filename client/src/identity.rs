use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::warn;

/// Remembers which participant id this machine plays as in each game.
pub struct IdentityStore {
    path: PathBuf,
    cached: Mutex<BTreeMap<String, String>>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::at(Self::resolve_path())
    }

    pub fn at(path: PathBuf) -> Self {
        let cached = Self::read_from_disk(&path);
        Self {
            path,
            cached: Mutex::new(cached),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self, game_id: &str) -> Option<String> {
        self.cached.lock().get(game_id).cloned()
    }

    pub fn save(&self, game_id: &str, participant_id: &str) -> Result<()> {
        let mut cached = self.cached.lock();
        cached.insert(game_id.to_string(), participant_id.to_string());
        self.write_to_disk(&cached)
    }

    pub fn forget(&self, game_id: &str) -> Result<()> {
        let mut cached = self.cached.lock();
        if cached.remove(game_id).is_some() {
            self.write_to_disk(&cached)?;
        }
        Ok(())
    }

    /// The participant to play as: an explicitly given id is remembered for
    /// later runs, otherwise the remembered one is used.
    pub fn resolve(&self, game_id: &str, explicit: Option<&str>) -> Result<String> {
        if let Some(participant_id) = explicit {
            self.save(game_id, participant_id)?;
            return Ok(participant_id.to_string());
        }
        self.load(game_id).ok_or_else(|| {
            anyhow!(
                "No participant id stored for game `{game_id}` in {}; join the game first or pass --participant",
                self.path().display()
            )
        })
    }

    fn write_to_disk(&self, identities: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create identity store directory")?;
        }
        let payload = serde_json::to_vec_pretty(identities)?;
        fs::write(&self.path, payload).context("Failed to write identity store")?;
        Ok(())
    }

    /// A missing file is an empty store. An unreadable one is logged; one
    /// that does not parse is moved aside so the next save cannot destroy it.
    fn read_from_disk(path: &Path) -> BTreeMap<String, String> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), "Failed to read identity store: {}", e);
                return BTreeMap::new();
            }
        };

        match serde_json::from_slice(&data) {
            Ok(identities) => identities,
            Err(e) => {
                let backup = Self::backup_path(path);
                warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "Identity store is corrupt, moving it aside: {}",
                    e
                );
                if let Err(e) = fs::rename(path, &backup) {
                    warn!(path = %path.display(), "Failed to move corrupt identity store: {}", e);
                }
                BTreeMap::new()
            }
        }
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".corrupt");
        path.with_file_name(name)
    }

    fn resolve_path() -> PathBuf {
        if let Some(portable_path) = Self::portable_data_path() {
            return portable_path;
        }
        if let Some(dirs) = ProjectDirs::from("com", "friendexing", "Friendexing") {
            dirs.data_dir().join("identities.json")
        } else {
            env::temp_dir().join("friendexing-identities.json")
        }
    }

    /// `portable.txt` next to the executable keeps data in `./data` beside it.
    fn portable_data_path() -> Option<PathBuf> {
        let exe_path = env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        if !exe_dir.join("portable.txt").exists() {
            return None;
        }
        Some(exe_dir.join("data").join("identities.json"))
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}
