//! Test doubles shared by the unit and integration tests.
//!
//! The integration tests include this file with `#[path]`, so it names the
//! host types through `super::host` rather than `crate::host`.

use std::collections::HashSet;

use parking_lot::Mutex;

use super::host::{Host, PlayerRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PlayerCommand(String, String),
    ConsoleCommand(String),
    PluginMessage(String, String, Vec<u8>),
    TeleportToSpawn(String, String),
}

/// A host that records every request and grants only listed permissions.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<Call>>,
    grants: Mutex<HashSet<(String, String)>>,
}

impl RecordingHost {
    pub fn grant(&self, player: &str, permission: &str) {
        self.grants.lock().insert((player.to_string(), permission.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.lock())
    }
}

impl Host for RecordingHost {
    fn has_permission(&self, player: &PlayerRef, permission: &str) -> bool {
        self.grants
            .lock()
            .contains(&(player.name.clone(), permission.to_string()))
    }

    fn perform_command(&self, player: &PlayerRef, command: &str) {
        self.calls
            .lock()
            .push(Call::PlayerCommand(player.name.clone(), command.to_string()));
    }

    fn dispatch_console_command(&self, command: &str) {
        self.calls.lock().push(Call::ConsoleCommand(command.to_string()));
    }

    fn send_plugin_message(&self, player: &PlayerRef, channel: &str, payload: Vec<u8>) {
        self.calls
            .lock()
            .push(Call::PluginMessage(player.name.clone(), channel.to_string(), payload));
    }

    fn teleport_to_spawn(&self, player: &PlayerRef, world: &str) {
        self.calls
            .lock()
            .push(Call::TeleportToSpawn(player.name.clone(), world.to_string()));
    }
}
