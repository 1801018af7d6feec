//! Helpers for turning raw [`TriggerDef`]s into runtime [`Trigger`]s.
//!
//! The raw definitions are validated as a set first; each definition is then
//! "cooked" into an immutable trigger stamped with the registry generation
//! it will belong to.

use blocktrigger_data::{TriggerDef, TriggerFile, ValidationError, validate_triggers};
use log::warn;

use crate::loader::ConfigError;
use crate::region::{Region, Vec3i};
use crate::trigger::{Effect, Trigger, TriggerId};

/// Validate and convert every definition in `file`, preserving order.
///
/// # Errors
/// - if any definition fails validation; no triggers are returned in that case
pub fn build_triggers(file: &TriggerFile, generation: u64) -> Result<Vec<Trigger>, ConfigError> {
    let errors = validate_triggers(file);
    if !errors.is_empty() {
        return Err(ConfigError::Invalid(errors));
    }
    file.triggers
        .iter()
        .map(|def| cook_trigger(def, generation))
        .collect()
}

fn cook_trigger(def: &TriggerDef, generation: u64) -> Result<Trigger, ConfigError> {
    let missing = |field| {
        ConfigError::Invalid(vec![ValidationError::MissingField {
            trigger: def.name.clone(),
            field,
        }])
    };
    let world = def.world.clone().ok_or_else(|| missing("world"))?;
    let kind = def.kind.ok_or_else(|| missing("type"))?;
    let (from, to) = def.corners().ok_or_else(|| missing("at or from/to"))?;
    let region = Region::new(Vec3i::from(from), Vec3i::from(to));
    if from.iter().zip(to.iter()).any(|(lo, hi)| lo > hi) {
        warn!(
            "trigger '{}' has from {} above to {} on some axis and will never match",
            def.name,
            region.min(),
            region.max()
        );
    }

    Ok(Trigger {
        id: TriggerId::new(def.name.clone(), generation),
        world,
        region,
        kind,
        permission: def.permission.clone(),
        cooldown_secs: u64::try_from(def.cooldown).unwrap_or_default(),
        effects: cook_effects(def),
    })
}

/// Effects run player commands first, then console commands, then the transfer.
fn cook_effects(def: &TriggerDef) -> Vec<Effect> {
    def.commands
        .iter()
        .cloned()
        .map(Effect::PlayerCommand)
        .chain(def.console.iter().cloned().map(Effect::ConsoleCommand))
        .chain(def.server.iter().cloned().map(Effect::ServerTransfer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_trigger_file;
    use crate::trigger::TriggerType;

    const SAMPLE: &str = r#"
        [[triggers]]
        name = "portal"
        world = "spawn"
        from = [0, 64, 0]
        to = [2, 66, 0]
        type = "move"
        permission = "server.survival"
        cooldown = 5
        commands = ["spawn"]
        console = ["say {player} left", "log {uuid}"]
        server = "survival"

        [[triggers]]
        name = "button"
        world = "spawn"
        at = [5, 6, 7]
        type = "interact"
    "#;

    #[test]
    fn builds_triggers_in_declaration_order() {
        let file = parse_trigger_file(SAMPLE).expect("parse");
        let triggers = build_triggers(&file, 3).expect("build");
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].id, TriggerId::new("portal", 3));
        assert_eq!(triggers[1].id, TriggerId::new("button", 3));
    }

    #[test]
    fn point_form_becomes_single_block_region() {
        let file = parse_trigger_file(SAMPLE).expect("parse");
        let button = &build_triggers(&file, 1).expect("build")[1];
        assert_eq!(button.region.min(), Vec3i::new(5, 6, 7));
        assert_eq!(button.region.max(), Vec3i::new(5, 6, 7));
        assert_eq!(button.region.volume(), 1);
        assert_eq!(button.kind, TriggerType::Interact);
        assert!(button.effects.is_empty());
        assert_eq!(button.cooldown_secs, 0);
    }

    #[test]
    fn effects_follow_field_order() {
        let file = parse_trigger_file(SAMPLE).expect("parse");
        let portal = &build_triggers(&file, 1).expect("build")[0];
        assert_eq!(
            portal.effects,
            vec![
                Effect::PlayerCommand("spawn".into()),
                Effect::ConsoleCommand("say {player} left".into()),
                Effect::ConsoleCommand("log {uuid}".into()),
                Effect::ServerTransfer("survival".into()),
            ]
        );
        assert_eq!(portal.permission, "server.survival");
        assert_eq!(portal.cooldown_secs, 5);
    }

    #[test]
    fn range_corners_are_not_normalized() {
        let text = r#"
            [[triggers]]
            name = "backwards"
            world = "w"
            from = [5, 0, 0]
            to = [0, 0, 0]
            type = "move"
        "#;
        let file = parse_trigger_file(text).expect("parse");
        let t = &build_triggers(&file, 1).expect("build")[0];
        assert_eq!(t.region.min(), Vec3i::new(5, 0, 0));
        assert!(!t.region.contains(2, 0, 0));
    }

    #[test]
    fn one_bad_definition_rejects_the_whole_file() {
        let text = r#"
            [[triggers]]
            name = "good"
            world = "w"
            at = [0, 0, 0]
            type = "move"

            [[triggers]]
            name = "bad"
            from = [0, 0, 0]
            type = "move"
        "#;
        let file = parse_trigger_file(text).expect("parse");
        let Err(ConfigError::Invalid(errors)) = build_triggers(&file, 1) else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.len(), 2);
    }
}
