//! The trigger registry.
//!
//! The registry holds one immutable [`TriggerSet`] at a time behind a shared
//! pointer. A reload builds the complete replacement set first and then swaps
//! the pointer, so a lookup running concurrently sees either the old set or
//! the new one in full. Readers clone the pointer and scan without holding
//! the lock.

use std::sync::Arc;

use blocktrigger_data::TriggerFile;
use log::info;
use parking_lot::{Mutex, RwLock};

use crate::loader::{ConfigError, build_triggers};
use crate::trigger::Trigger;

/// One generation of triggers, in declaration order.
#[derive(Debug, Default)]
pub struct TriggerSet {
    generation: u64,
    triggers: Vec<Arc<Trigger>>,
}

impl TriggerSet {
    pub fn new(generation: u64, triggers: Vec<Trigger>) -> Self {
        Self {
            generation,
            triggers: triggers.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// First trigger, in declaration order, covering the block.
    ///
    /// Overlapping regions are allowed; the earlier declaration wins. This is
    /// a linear scan, which is fine for the tens of triggers a server carries.
    pub fn lookup(&self, world: &str, x: i32, y: i32, z: i32) -> Option<&Arc<Trigger>> {
        self.triggers.iter().find(|t| t.covers(world, x, y, z))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Trigger>> {
        self.triggers.iter().find(|t| t.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Trigger>> {
        self.triggers.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.name())
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

/// Shared, atomically replaceable trigger list.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    current: RwLock<Arc<TriggerSet>>,
    /// Serializes reloads and remembers the last generation handed out.
    reload_lock: Mutex<u64>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current trigger set. Holding it keeps that generation alive.
    pub fn snapshot(&self) -> Arc<TriggerSet> {
        Arc::clone(&self.current.read())
    }

    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Replace every trigger with the definitions in `file`.
    ///
    /// Returns the new generation number. On error the current set is left
    /// untouched.
    ///
    /// # Errors
    /// - if any definition in `file` is invalid
    pub fn reload(&self, file: &TriggerFile) -> Result<u64, ConfigError> {
        let mut last_generation = self.reload_lock.lock();
        let generation = *last_generation + 1;
        let set = TriggerSet::new(generation, build_triggers(file, generation)?);
        let count = set.len();

        *self.current.write() = Arc::new(set);
        *last_generation = generation;
        info!("{count} triggers loaded (generation {generation})");
        Ok(generation)
    }

    /// See [`TriggerSet::lookup`].
    pub fn lookup(&self, world: &str, x: i32, y: i32, z: i32) -> Option<Arc<Trigger>> {
        self.snapshot().lookup(world, x, y, z).cloned()
    }

    /// Trigger names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.snapshot().names().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}
