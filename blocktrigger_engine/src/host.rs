//! Ports to the game server hosting the engine.
//!
//! The engine never talks to a world, a player connection or a command
//! system directly. Everything observable goes out through [`Host`], and
//! everything it needs to know about a player arrives as plain values.

use std::fmt;

use uuid::Uuid;

use crate::region::{Region, Vec3i};

/// The identity of an online player as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerRef {
    pub id: Uuid,
    pub name: String,
}

impl PlayerRef {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A block in a named world.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub world: String,
    pub pos: Vec3i,
}

impl BlockPos {
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            pos: Vec3i::new(x, y, z),
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.world, self.pos)
    }
}

/// What kind of click produced an interaction signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    LeftClickBlock,
    RightClickBlock,
    LeftClickAir,
    RightClickAir,
    /// Pressure plates, tripwires and similar.
    Physical,
}

impl ClickAction {
    pub fn is_block_click(self) -> bool {
        matches!(self, ClickAction::LeftClickBlock | ClickAction::RightClickBlock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

/// Outbound port: everything the engine asks the game server to do.
///
/// All calls are fire-and-forget handoffs; implementations must not block
/// the calling thread on I/O.
pub trait Host: Send + Sync {
    fn has_permission(&self, player: &PlayerRef, permission: &str) -> bool;

    /// Run `command` with the player's own authority.
    fn perform_command(&self, player: &PlayerRef, command: &str);

    /// Run `command` with console authority.
    fn dispatch_console_command(&self, command: &str);

    /// Send a raw plugin message on `channel` over the player's connection.
    fn send_plugin_message(&self, player: &PlayerRef, channel: &str, payload: Vec<u8>);

    fn teleport_to_spawn(&self, player: &PlayerRef, world: &str);
}

/// Source of region selections made with an external selection tool.
pub trait SelectionSource {
    /// The caller's current selection, if any.
    fn selection(&self, player: &PlayerRef) -> Option<Region>;
}

/// A selection that is known up front, e.g. passed on a command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSelection(pub Option<Region>);

impl SelectionSource for FixedSelection {
    fn selection(&self, _player: &PlayerRef) -> Option<Region> {
        self.0
    }
}
