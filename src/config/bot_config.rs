//! Bot admin file store
//!
//! Loads the owner/admin list from a JSON file, writing an example file on
//! first run. A malformed file is replaced by the example rather than
//! aborting startup.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{error, info, warn};

use crate::models::BotConfig;
use crate::transport::jid;
use crate::utils::errors::{GroupWardenError, Result};

/// Shared handle to the bot admin configuration
#[derive(Debug, Clone)]
pub struct BotConfigStore {
    path: PathBuf,
    current: Arc<RwLock<BotConfig>>,
}

impl BotConfigStore {
    /// Load the config file, creating it with placeholder values if needed
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let config = read_or_create(&path).await?;

        Ok(Self {
            path,
            current: Arc::new(RwLock::new(config)),
        })
    }

    /// Store holding the given config without touching disk
    pub fn in_memory(config: BotConfig) -> Self {
        Self {
            path: PathBuf::new(),
            current: Arc::new(RwLock::new(config)),
        }
    }

    /// Current configuration
    pub fn snapshot(&self) -> BotConfig {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Re-read the file and replace the current configuration
    pub async fn reload(&self) -> Result<BotConfig> {
        if self.path.as_os_str().is_empty() {
            return Ok(self.snapshot());
        }

        let config = read_or_create(&self.path).await?;
        match self.current.write() {
            Ok(mut guard) => *guard = config.clone(),
            Err(poisoned) => *poisoned.into_inner() = config.clone(),
        }

        info!(admins = config.admins.len(), "Bot configuration reloaded");
        Ok(config)
    }
}

async fn read_or_create(path: &Path) -> Result<BotConfig> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => match parse(&raw) {
            Ok(config) => {
                info!(admins = config.admins.len(), path = %path.display(), "Bot configuration loaded");
                Ok(config)
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "Invalid bot configuration, writing example file");
                write_example(path).await
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Bot configuration not found, writing example file");
            write_example(path).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse and canonicalize the numbers in a config file
fn parse(raw: &str) -> Result<BotConfig> {
    let mut config: BotConfig = serde_json::from_str(raw)?;

    config.owner_number = jid::canonical_number(&config.owner_number);
    config.admins = config
        .admins
        .iter()
        .map(|n| jid::canonical_number(n))
        .filter(|n| !n.is_empty())
        .collect();

    if config.prefix.is_empty() {
        return Err(GroupWardenError::Config("Command prefix must not be empty".to_string()));
    }

    Ok(config)
}

async fn write_example(path: &Path) -> Result<BotConfig> {
    let config = BotConfig::example();
    let serialized = serde_json::to_string_pretty(&config)?;
    tokio::fs::write(path, serialized).await?;

    info!(path = %path.display(), "Example bot configuration written; edit it with the admin numbers");
    Ok(config)
}
