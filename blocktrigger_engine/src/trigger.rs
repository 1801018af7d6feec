//! Trigger module --
//!
//! A Trigger binds a region of one world to an activation type and an ordered
//! list of `Effects`. Triggers are built once per configuration load and never
//! change afterwards; a reload replaces the whole set.

pub mod effect;

pub use effect::*;

use std::fmt;

pub use blocktrigger_data::TriggerType;

use crate::region::Region;

/// Identity of a trigger within one registry generation.
///
/// Player state remembers triggers by id rather than by reference, so an id
/// from an older generation stays comparable but never equals a current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerId {
    pub name: String,
    pub generation: u64,
}

impl TriggerId {
    pub fn new(name: impl Into<String>, generation: u64) -> Self {
        Self {
            name: name.into(),
            generation,
        }
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.generation)
    }
}

/// A configured point-of-interest trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub id: TriggerId,
    pub world: String,
    pub region: Region,
    pub kind: TriggerType,
    /// Empty means anyone may fire it.
    pub permission: String,
    /// Zero disables the cooldown.
    pub cooldown_secs: u64,
    pub effects: Vec<Effect>,
}

impl Trigger {
    pub fn name(&self) -> &str {
        &self.id.name
    }

    /// True if the block at (`x`, `y`, `z`) in `world` lies inside this trigger.
    pub fn covers(&self, world: &str, x: i32, y: i32, z: i32) -> bool {
        self.world == world && self.region.contains(x, y, z)
    }

    pub fn requires_permission(&self) -> bool {
        !self.permission.is_empty()
    }

    pub fn cooldown_millis(&self) -> u64 {
        self.cooldown_secs.saturating_mul(1000)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}:{}",
            self.name(),
            self.kind.as_key(),
            self.world,
            self.region
        )
    }
}
