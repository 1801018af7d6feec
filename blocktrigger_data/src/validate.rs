use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for a malformed trigger definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateName { name: String },
    MissingField { trigger: String, field: &'static str },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateName { name } => {
                write!(f, "duplicate trigger name '{name}'")
            },
            ValidationError::MissingField { trigger, field } => {
                write!(f, "trigger '{trigger}' is missing {field}")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate every definition in a trigger file, collecting all problems.
///
/// ```
/// use blocktrigger_data::{TriggerDef, TriggerFile, TriggerType, validate_triggers};
///
/// let file = TriggerFile {
///     triggers: vec![TriggerDef {
///         name: "pad".into(),
///         world: Some("spawn".into()),
///         at: Some([0, 64, 0]),
///         kind: Some(TriggerType::Move),
///         ..TriggerDef::default()
///     }],
/// };
/// assert!(validate_triggers(&file).is_empty());
/// ```
pub fn validate_triggers(file: &TriggerFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for def in &file.triggers {
        if def.name.trim().is_empty() {
            errors.push(ValidationError::InvalidValue {
                context: "trigger name is empty".to_string(),
            });
        } else if !seen.insert(def.name.as_str()) {
            errors.push(ValidationError::DuplicateName { name: def.name.clone() });
        }
        validate_def(def, &mut errors);
    }

    errors
}

fn validate_def(def: &TriggerDef, errors: &mut Vec<ValidationError>) {
    let missing = |field| ValidationError::MissingField {
        trigger: def.name.clone(),
        field,
    };

    if def.world.as_deref().is_none_or(|w| w.trim().is_empty()) {
        errors.push(missing("world"));
    }
    if def.kind.is_none() {
        errors.push(missing("type"));
    }
    if def.at.is_none() {
        match (def.from, def.to) {
            (Some(_), Some(_)) => {},
            (Some(_), None) => errors.push(missing("to")),
            (None, Some(_)) => errors.push(missing("from")),
            (None, None) => errors.push(missing("at or from/to")),
        }
    }
    if def.cooldown < 0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("trigger '{}' cooldown is negative ({})", def.name, def.cooldown),
        });
    }
    if def.server.as_deref().is_some_and(|s| s.trim().is_empty()) {
        errors.push(ValidationError::InvalidValue {
            context: format!("trigger '{}' server is empty", def.name),
        });
    }
}
