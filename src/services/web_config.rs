//! Web configuration store
//!
//! Persists dashboard-managed state (active groups, custom commands,
//! settings, donation details) to a JSON file. The file is read on every access so manual edits
//! are picked up, and every mutation is written through before returning and
//! broadcast to dashboard clients as `config_updated`.
//!
//! Mutations are serialized through a single async lock, so concurrent API
//! calls in one process cannot drop each other's updates. Writers in other
//! processes are not coordinated.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::models::{
    canonical_command_name, CommandUpdate, CustomCommand, DashboardEvent, DashboardSettings, DonationInfo,
    DonationPatch, NewCommand, SettingsPatch, WebConfig,
};
use crate::utils::errors::{GroupWardenError, Result};

/// File-backed store for [`WebConfig`]
#[derive(Debug, Clone)]
pub struct WebConfigStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
    events: broadcast::Sender<DashboardEvent>,
}

impl WebConfigStore {
    pub fn new(path: impl AsRef<Path>, events: broadcast::Sender<DashboardEvent>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
            events,
        }
    }

    /// Current configuration, creating the file with defaults if absent
    pub async fn load(&self) -> Result<WebConfig> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => match serde_json::from_str::<WebConfig>(&raw) {
                Ok(config) => Ok(config),
                Err(e) => {
                    error!(error = %e, path = %self.path.display(), "Invalid web configuration, restoring defaults");
                    self.write_defaults().await
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Creating default web configuration");
                self.write_defaults().await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_defaults(&self) -> Result<WebConfig> {
        let config = WebConfig::default();
        self.persist(&config).await?;
        Ok(config)
    }

    async fn persist(&self, config: &WebConfig) -> Result<()> {
        let serialized = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }

    /// Load, apply `mutate`, persist and broadcast, under the write lock.
    ///
    /// Nothing is written if `mutate` fails.
    async fn mutate<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut WebConfig) -> Result<T>,
    {
        let _guard = self.write_lock.lock().await;

        let mut config = self.load().await?;
        let value = mutate(&mut config)?;
        self.persist(&config).await?;

        if self.events.send(DashboardEvent::ConfigUpdated(config)).is_err() {
            debug!("No dashboard clients listening for config updates");
        }

        Ok(value)
    }

    /// Mark a group active or inactive
    pub async fn set_group_active(&self, group_id: &str, active: bool) -> Result<()> {
        if group_id.is_empty() {
            return Err(GroupWardenError::InvalidInput("Group id is required".to_string()));
        }

        let group_id = group_id.to_string();
        self.mutate(move |config| {
            config.active_groups.insert(group_id, active);
            Ok(())
        })
        .await
    }

    /// Create a custom command; names are canonicalized and must be unique
    pub async fn add_command(&self, request: NewCommand) -> Result<CustomCommand> {
        if request.command.trim().is_empty() || request.response.trim().is_empty() {
            return Err(GroupWardenError::InvalidInput(
                "Command and response are required".to_string(),
            ));
        }

        let name = canonical_command_name(&request.command);
        if name.is_empty() {
            return Err(GroupWardenError::InvalidInput(format!(
                "Command name '{}' has no letters or digits",
                request.command
            )));
        }

        let command = self
            .mutate(move |config| {
                if config.find_command(&name).is_some() {
                    return Err(GroupWardenError::CommandExists(name));
                }

                let now = Utc::now();
                let id = next_command_id(config, now.timestamp_millis());
                let command = CustomCommand::from_request(id, name, request, now);
                config.custom_commands.push(command.clone());
                Ok(command)
            })
            .await?;

        info!(command = %command.command, id = %command.id, "Custom command created");
        Ok(command)
    }

    /// Apply a partial update to a command
    pub async fn update_command(&self, id: &str, update: CommandUpdate) -> Result<CustomCommand> {
        let new_name = match update.command.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                let name = canonical_command_name(raw);
                if name.is_empty() {
                    return Err(GroupWardenError::InvalidInput(format!(
                        "Command name '{}' has no letters or digits",
                        raw
                    )));
                }
                Some(name)
            }
            _ => None,
        };

        let id = id.to_string();
        self.mutate(move |config| {
            let index = config
                .position_of(&id)
                .ok_or_else(|| GroupWardenError::CommandNotFound(id.clone()))?;

            if let Some(name) = &new_name {
                let collides = config
                    .custom_commands
                    .iter()
                    .any(|c| c.id != id && &c.command == name);
                if collides {
                    return Err(GroupWardenError::CommandExists(name.clone()));
                }
            }

            let command = &mut config.custom_commands[index];
            if let Some(name) = new_name {
                command.command = name;
            }
            if let Some(response) = update.response.filter(|r| !r.trim().is_empty()) {
                command.response = response;
            }
            if let Some(admin_only) = update.admin_only {
                command.admin_only = admin_only;
            }
            if let Some(description) = update.description {
                command.description = description;
            }
            command.updated_at = Some(Utc::now());

            Ok(command.clone())
        })
        .await
    }

    /// Remove a command by id
    pub async fn delete_command(&self, id: &str) -> Result<CustomCommand> {
        let id = id.to_string();
        let removed = self
            .mutate(move |config| {
                let index = config
                    .position_of(&id)
                    .ok_or_else(|| GroupWardenError::CommandNotFound(id.clone()))?;
                Ok(config.custom_commands.remove(index))
            })
            .await?;

        info!(command = %removed.command, "Custom command deleted");
        Ok(removed)
    }

    /// Increment the usage counter of a command
    pub async fn record_usage(&self, id: &str) -> Result<CustomCommand> {
        let id = id.to_string();
        self.mutate(move |config| {
            let index = config
                .position_of(&id)
                .ok_or_else(|| GroupWardenError::CommandNotFound(id.clone()))?;
            let command = &mut config.custom_commands[index];
            command.usage += 1;
            Ok(command.clone())
        })
        .await
    }

    /// Merge a settings patch
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<DashboardSettings> {
        self.mutate(move |config| {
            config.settings.merge(patch);
            Ok(config.settings)
        })
        .await
    }

    /// Merge a donation patch
    pub async fn update_donation(&self, patch: DonationPatch) -> Result<DonationInfo> {
        self.mutate(move |config| {
            config.donation.merge(patch);
            Ok(config.donation.clone())
        })
        .await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Time-based id, bumped past any id already in use
fn next_command_id(config: &WebConfig, millis: i64) -> String {
    let mut candidate = millis;
    while config.custom_commands.iter().any(|c| c.id == candidate.to_string()) {
        warn!(id = candidate, "Command id collision, bumping");
        candidate += 1;
    }
    candidate.to_string()
}
