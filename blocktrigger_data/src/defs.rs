use serde::{Deserialize, Serialize};

/// Stable identifier used to key trigger definitions.
pub type Id = String;

/// Block coordinate triple as written in configuration (`[x, y, z]`).
pub type Coords = [i32; 3];

/// Top-level trigger configuration file.
///
/// Definitions are kept as an array of tables so that declaration order
/// survives parsing; the engine resolves overlapping regions by that order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TriggerFile {
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
}

impl TriggerFile {
    /// Find a definition by name.
    pub fn get(&self, name: &str) -> Option<&TriggerDef> {
        self.triggers.iter().find(|t| t.name == name)
    }

    /// Names of all definitions in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.name.as_str())
    }
}

/// Activation type of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// Fires on every qualifying left/right click of a block inside the region.
    Interact,
    /// Fires once when a player walks into the region.
    Move,
}

impl TriggerType {
    pub fn as_key(self) -> &'static str {
        match self {
            TriggerType::Interact => "interact",
            TriggerType::Move => "move",
        }
    }
}

/// One named trigger as it appears in the configuration file.
///
/// Required fields are still `Option` here so that a missing `world` or `type`
/// is reported by [`crate::validate_triggers`] with the trigger's name attached,
/// rather than as an anonymous deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerDef {
    pub name: Id,
    pub world: Option<String>,
    /// Single-block form.
    pub at: Option<Coords>,
    /// Range form, lower corner. Used as-is, never normalized.
    pub from: Option<Coords>,
    /// Range form, upper corner.
    pub to: Option<Coords>,
    #[serde(rename = "type")]
    pub kind: Option<TriggerType>,
    #[serde(default)]
    pub permission: String,
    #[serde(default)]
    pub cooldown: i64,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub console: Vec<String>,
    pub server: Option<String>,
}

impl TriggerDef {
    /// Resolve the lower and upper corners of this definition.
    ///
    /// The point form wins when both forms are present. Returns `None` when
    /// neither `at` nor a complete `from`/`to` pair is given.
    pub fn corners(&self) -> Option<(Coords, Coords)> {
        if let Some(at) = self.at {
            return Some((at, at));
        }
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}
