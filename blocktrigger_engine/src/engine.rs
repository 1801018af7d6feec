//! The assembled engine: registry, player state and event handling wired
//! to one host.

use std::io;
use std::sync::Arc;

use blocktrigger_data::TriggerFile;
use log::info;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::dispatch::EffectDispatcher;
use crate::events::EventAdapter;
use crate::host::Host;
use crate::loader::{ConfigError, load_trigger_file};
use crate::player_state::PlayerStates;
use crate::registry::TriggerRegistry;

pub struct BlockTrigger {
    config: EngineConfig,
    registry: Arc<TriggerRegistry>,
    states: Arc<PlayerStates>,
    events: EventAdapter,
}

impl BlockTrigger {
    /// Build an engine with an empty registry. Call [`BlockTrigger::reload`]
    /// to load triggers.
    pub fn new(config: EngineConfig, host: Arc<dyn Host>, clock: Arc<dyn Clock>) -> Self {
        let registry = Arc::new(TriggerRegistry::new());
        let states = Arc::new(PlayerStates::new());
        let dispatcher = EffectDispatcher::new(Arc::clone(&host), Arc::clone(&states), clock)
            .with_transfer_channel(config.transfer_channel.clone());
        let events = EventAdapter::new(Arc::clone(&registry), Arc::clone(&states), dispatcher, host);
        Self {
            config,
            registry,
            states,
            events,
        }
    }

    /// Re-read the configured trigger file and replace the registry.
    ///
    /// # Errors
    /// - if the file cannot be read, parsed or validated; triggers stay as they were
    pub fn reload(&self) -> Result<u64, ConfigError> {
        info!("reloading triggers from {}", self.config.config_path.display());
        let file = load_trigger_file(&self.config.config_path)?;
        self.reload_from(&file)
    }

    /// Like [`BlockTrigger::reload`], but a trigger file that does not exist
    /// yet is not an error. Returns `None` in that case.
    ///
    /// # Errors
    /// - if the file exists but cannot be read, parsed or validated
    pub fn reload_if_present(&self) -> Result<Option<u64>, ConfigError> {
        match self.reload() {
            Ok(generation) => Ok(Some(generation)),
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Replace the registry with already parsed definitions.
    ///
    /// # Errors
    /// - if any definition is invalid; triggers stay as they were
    pub fn reload_from(&self, file: &TriggerFile) -> Result<u64, ConfigError> {
        let generation = self.registry.reload(file)?;
        self.states.prune_stale(generation);
        Ok(generation)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn states(&self) -> &PlayerStates {
        &self.states
    }

    pub fn events(&self) -> &EventAdapter {
        &self.events
    }
}
