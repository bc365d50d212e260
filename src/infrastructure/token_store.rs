// Token persistence backends
use crate::application::session::TokenStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Stores the token in a small TOML file, e.g. `~/.config/water-quality/session.toml`
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let file: SessionFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Some(file.token))
    }

    /// Writes a private (0600 on unix) temp file next to the session file and
    /// renames it into place, so readers never see a partial token.
    fn save(&self, token: &str) -> anyhow::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let contents = toml::to_string(&SessionFile {
            token: token.to_string(),
        })?;
        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create a temp file in {}", dir.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write {}", file.path().display()))?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

/// Process-local store, used when nothing should touch the disk
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Ok(self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token store poisoned"))?
            .clone())
    }

    fn save(&self, token: &str) -> anyhow::Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token store poisoned"))? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self
            .token
            .lock()
            .map_err(|_| anyhow::anyhow!("token store poisoned"))? = None;
        Ok(())
    }
}
