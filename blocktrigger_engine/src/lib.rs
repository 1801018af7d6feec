#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const BLOCKTRIGGER_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod admin;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod events;
pub mod host;
pub mod loader;
pub mod player_state;
pub mod region;
pub mod registry;
pub mod transfer;
pub mod trigger;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use config::EngineConfig;
pub use dispatch::{EffectDispatcher, FireOutcome};
pub use engine::BlockTrigger;
pub use events::{EventAdapter, Interaction};
pub use host::{BlockPos, ClickAction, Hand, Host, PlayerRef, SelectionSource};
pub use loader::ConfigError;
pub use region::{Region, Vec3i};
pub use registry::TriggerRegistry;
pub use trigger::{Effect, Trigger, TriggerId, TriggerType};
