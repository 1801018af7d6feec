//! Per-player trigger memory.
//!
//! Two things are remembered per player: the last move trigger they entered
//! (so standing inside a region does not re-fire it every tick) and when each
//! trigger's cooldown runs out for them. Records are created on first use and
//! dropped explicitly when the player disconnects.

use std::collections::HashMap;

use dashmap::DashMap;
use log::debug;
use uuid::Uuid;

use crate::clock::Millis;
use crate::trigger::{Trigger, TriggerId};

/// What the engine remembers about one player.
#[derive(Debug, Clone, Default)]
pub struct PlayerTriggerState {
    pub last_move_trigger: Option<TriggerId>,
    pub cooldown_until: HashMap<TriggerId, Millis>,
}

/// Process-wide map of player id to [`PlayerTriggerState`].
///
/// Each record sits behind its own map entry lock, so the read-modify-write in
/// [`PlayerStates::check_and_consume_cooldown`] is atomic for a player even
/// if the host delivers that player's events from several threads.
#[derive(Debug, Default)]
pub struct PlayerStates {
    states: DashMap<Uuid, PlayerTriggerState>,
}

impl PlayerStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the player's last move trigger (they left every region).
    pub fn clear(&self, player: Uuid) {
        if let Some(mut state) = self.states.get_mut(&player) {
            state.last_move_trigger = None;
        }
    }

    /// Drop everything known about the player.
    pub fn forget(&self, player: Uuid) {
        if self.states.remove(&player).is_some() {
            debug!("dropped trigger state for {player}");
        }
    }

    /// Record that the player now stands in `trigger`.
    ///
    /// Returns false if that was already the last trigger they entered, true
    /// on a transition. An id left over from an earlier registry generation
    /// never matches, so the first entry after a reload counts as new.
    pub fn try_enter_move(&self, player: Uuid, trigger: &Trigger) -> bool {
        let mut state = self.states.entry(player).or_default();
        if state.last_move_trigger.as_ref() == Some(&trigger.id) {
            return false;
        }
        state.last_move_trigger = Some(trigger.id.clone());
        true
    }

    /// Pass the cooldown gate if it is open, closing it behind the player.
    ///
    /// Returns true, and starts a new cooldown window, when the trigger has no
    /// cooldown or the previous window ended at or before `now`. Returns
    /// false, leaving the window unchanged, while it is still running.
    pub fn check_and_consume_cooldown(&self, player: Uuid, trigger: &Trigger, now: Millis) -> bool {
        if trigger.cooldown_secs == 0 {
            return true;
        }
        let mut state = self.states.entry(player).or_default();
        match state.cooldown_until.get(&trigger.id) {
            Some(&until) if until > now => false,
            _ => {
                state
                    .cooldown_until
                    .insert(trigger.id.clone(), now.saturating_add(trigger.cooldown_millis()));
                true
            },
        }
    }

    /// Drop cooldown entries belonging to generations before `generation`.
    ///
    /// Those ids can never match a live trigger again. Last-move ids are kept
    /// because they still need to compare unequal on the next entry.
    ///
    /// A dispatch that took its trigger from the previous snapshot can still
    /// record an old-generation cooldown after this runs. Such an entry never
    /// blocks a current trigger and is dropped by the next prune or when the
    /// player disconnects.
    pub fn prune_stale(&self, generation: u64) {
        for mut state in self.states.iter_mut() {
            state.cooldown_until.retain(|id, _| id.generation >= generation);
        }
    }

    pub fn last_move_trigger(&self, player: Uuid) -> Option<TriggerId> {
        self.states.get(&player).and_then(|s| s.last_move_trigger.clone())
    }

    pub fn get(&self, player: Uuid) -> Option<PlayerTriggerState> {
        self.states.get(&player).map(|s| s.clone())
    }

    /// Number of players with a live record.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{Region, Vec3i};
    use crate::trigger::TriggerType;

    fn trigger(name: &str, generation: u64, cooldown_secs: u64) -> Trigger {
        Trigger {
            id: TriggerId::new(name, generation),
            world: "w".into(),
            region: Region::point(Vec3i::new(0, 0, 0)),
            kind: TriggerType::Move,
            permission: String::new(),
            cooldown_secs,
            effects: vec![],
        }
    }

    #[test]
    fn move_entry_is_edge_triggered() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        let t = trigger("pad", 1, 0);
        assert!(states.try_enter_move(player, &t));
        assert!(!states.try_enter_move(player, &t));
        states.clear(player);
        assert!(states.try_enter_move(player, &t));
    }

    #[test]
    fn switching_triggers_fires_again() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        let a = trigger("a", 1, 0);
        let b = trigger("b", 1, 0);
        assert!(states.try_enter_move(player, &a));
        assert!(states.try_enter_move(player, &b));
        assert!(states.try_enter_move(player, &a));
    }

    #[test]
    fn stale_generation_compares_unequal() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        assert!(states.try_enter_move(player, &trigger("pad", 1, 0)));
        assert!(states.try_enter_move(player, &trigger("pad", 2, 0)));
        assert_eq!(states.last_move_trigger(player), Some(TriggerId::new("pad", 2)));
    }

    #[test]
    fn cooldown_window() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        let t = trigger("pad", 1, 10);
        assert!(states.check_and_consume_cooldown(player, &t, 0));
        assert!(!states.check_and_consume_cooldown(player, &t, 5_000));
        // the rejected attempt did not extend the window
        assert!(states.check_and_consume_cooldown(player, &t, 10_000));
        assert!(!states.check_and_consume_cooldown(player, &t, 11_000));
        assert!(states.check_and_consume_cooldown(player, &t, 20_000));
    }

    #[test]
    fn cooldowns_are_per_player() {
        let states = PlayerStates::new();
        let t = trigger("pad", 1, 10);
        let (ann, bob) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(states.check_and_consume_cooldown(ann, &t, 0));
        assert!(states.check_and_consume_cooldown(bob, &t, 1_000));
        assert!(!states.check_and_consume_cooldown(ann, &t, 1_000));
    }

    #[test]
    fn zero_cooldown_creates_no_record() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        assert!(states.check_and_consume_cooldown(player, &trigger("free", 1, 0), 0));
        assert!(states.is_empty());
    }

    #[test]
    fn clear_does_not_create_records() {
        let states = PlayerStates::new();
        states.clear(Uuid::new_v4());
        assert!(states.is_empty());
    }

    #[test]
    fn forget_removes_cooldowns_too() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        let t = trigger("pad", 1, 60);
        assert!(states.check_and_consume_cooldown(player, &t, 0));
        states.forget(player);
        assert!(states.get(player).is_none());
        assert!(states.check_and_consume_cooldown(player, &t, 1));
    }

    #[test]
    fn prune_drops_old_cooldowns_but_keeps_last_move() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        let old = trigger("pad", 1, 60);
        assert!(states.try_enter_move(player, &old));
        assert!(states.check_and_consume_cooldown(player, &old, 0));
        states.prune_stale(2);
        let state = states.get(player).expect("state");
        assert!(state.cooldown_until.is_empty());
        assert_eq!(state.last_move_trigger, Some(TriggerId::new("pad", 1)));
    }

    #[test]
    fn late_old_generation_cooldown_is_inert_until_next_prune() {
        let states = PlayerStates::new();
        let player = Uuid::new_v4();
        states.prune_stale(2);
        // a dispatch still holding a generation 1 trigger finishes after the prune
        assert!(states.check_and_consume_cooldown(player, &trigger("pad", 1, 60), 0));
        assert!(states.check_and_consume_cooldown(player, &trigger("pad", 2, 60), 0));
        assert_eq!(states.get(player).expect("state").cooldown_until.len(), 2);

        states.prune_stale(3);
        assert!(states.get(player).expect("state").cooldown_until.is_empty());
    }
}
