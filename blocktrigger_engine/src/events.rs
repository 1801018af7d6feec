//! Inbound event port.
//!
//! The host calls in here with what happened to a player; this module finds
//! the trigger at the relevant block and decides whether the event should
//! fire it.
//!
//! Interact triggers are level-triggered: every qualifying click fires
//! (subject to the gates). Move triggers are edge-triggered, per player:
//!
//! ```text
//! Outside    --enter T-->  Inside(T)   fire
//! Inside(T)  --enter T'--> Inside(T')  fire
//! Inside(T)  --stay  T-->  Inside(T)   nothing
//! Inside(T)  --leave---->  Outside     nothing, state cleared
//! ```

use std::sync::Arc;

use crate::dispatch::EffectDispatcher;
use crate::host::{BlockPos, ClickAction, Hand, Host, PlayerRef};
use crate::player_state::PlayerStates;
use crate::registry::TriggerRegistry;
use crate::trigger::{Trigger, TriggerType};

/// What the host should do with the block's own interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Let the block behave normally.
    Allow,
    /// A trigger fired; suppress the block's default use.
    Deny,
}

pub struct EventAdapter {
    registry: Arc<TriggerRegistry>,
    states: Arc<PlayerStates>,
    dispatcher: EffectDispatcher,
    host: Arc<dyn Host>,
}

impl EventAdapter {
    pub fn new(
        registry: Arc<TriggerRegistry>,
        states: Arc<PlayerStates>,
        dispatcher: EffectDispatcher,
        host: Arc<dyn Host>,
    ) -> Self {
        Self {
            registry,
            states,
            dispatcher,
            host,
        }
    }

    fn trigger_at(&self, block: &BlockPos) -> Option<Arc<Trigger>> {
        self.registry
            .lookup(&block.world, block.pos.x, block.pos.y, block.pos.z)
    }

    /// A player clicked `block`.
    ///
    /// Only main-hand left or right clicks on a block count.
    pub fn on_interact(&self, player: &PlayerRef, action: ClickAction, hand: Hand, block: &BlockPos) -> Interaction {
        if !action.is_block_click() || hand != Hand::Main {
            return Interaction::Allow;
        }
        let Some(trigger) = self.trigger_at(block) else {
            return Interaction::Allow;
        };
        if trigger.kind != TriggerType::Interact {
            return Interaction::Allow;
        }
        if self.dispatcher.execute(&trigger, player) {
            Interaction::Deny
        } else {
            Interaction::Allow
        }
    }

    /// A player moved from one position to another.
    ///
    /// Movement within the same block (looking around, small steps) is
    /// ignored. Returns true if a trigger fired.
    pub fn on_move(&self, player: &PlayerRef, from: &BlockPos, to: &BlockPos) -> bool {
        if from == to {
            return false;
        }
        self.on_position(player, to)
    }

    /// Evaluate move triggers for a player standing at `at`.
    ///
    /// Also used directly for joins and teleports, where there is no
    /// meaningful previous block.
    pub fn on_position(&self, player: &PlayerRef, at: &BlockPos) -> bool {
        let Some(trigger) = self.trigger_at(at) else {
            self.states.clear(player.id);
            return false;
        };
        if trigger.kind != TriggerType::Move {
            return false;
        }
        if !self.states.try_enter_move(player.id, &trigger) {
            return false;
        }
        self.dispatcher.execute(&trigger, player)
    }

    /// A player left the server.
    ///
    /// Someone logging out while standing on a move trigger is sent to the
    /// world spawn first, so they do not log back in on top of it.
    pub fn on_disconnect(&self, player: &PlayerRef, last_position: Option<&BlockPos>) {
        if let Some(pos) = last_position
            && let Some(trigger) = self.trigger_at(pos)
            && trigger.kind == TriggerType::Move
        {
            self.host.teleport_to_spawn(player, &pos.world);
        }
        self.states.forget(player.id);
    }
}
