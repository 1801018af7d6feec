//! Effect dispatcher.
//!
//! Runs a matched trigger for a player: the permission gate, then the
//! cooldown gate, then every effect in order. A gate that fails is an
//! ordinary outcome, not an error; the event path only needs to know
//! whether the trigger fired.

use std::sync::Arc;

use log::{debug, error, info};

use crate::clock::Clock;
use crate::host::{Host, PlayerRef};
use crate::player_state::PlayerStates;
use crate::transfer::TRANSFER_CHANNEL;
use crate::trigger::{Trigger, dispatch_effect};

/// Result of attempting to fire a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired,
    /// The player lacks the trigger's permission. Cooldown untouched.
    PermissionDenied,
    /// The trigger is still cooling down for this player.
    CooldownActive,
}

impl FireOutcome {
    pub fn fired(self) -> bool {
        self == FireOutcome::Fired
    }
}

pub struct EffectDispatcher {
    host: Arc<dyn Host>,
    states: Arc<PlayerStates>,
    clock: Arc<dyn Clock>,
    transfer_channel: String,
}

impl EffectDispatcher {
    pub fn new(host: Arc<dyn Host>, states: Arc<PlayerStates>, clock: Arc<dyn Clock>) -> Self {
        Self {
            host,
            states,
            clock,
            transfer_channel: TRANSFER_CHANNEL.to_string(),
        }
    }

    #[must_use]
    pub fn with_transfer_channel(mut self, channel: impl Into<String>) -> Self {
        self.transfer_channel = channel.into();
        self
    }

    /// Fire `trigger` for `player` if the gates allow it. Returns true if it fired.
    pub fn execute(&self, trigger: &Trigger, player: &PlayerRef) -> bool {
        self.try_fire(trigger, player).fired()
    }

    /// Like [`EffectDispatcher::execute`], but reports why a trigger did not fire.
    pub fn try_fire(&self, trigger: &Trigger, player: &PlayerRef) -> FireOutcome {
        if trigger.requires_permission() && !self.host.has_permission(player, &trigger.permission) {
            debug!(
                "{} lacks permission '{}' for trigger {}",
                player.name,
                trigger.permission,
                trigger.name()
            );
            return FireOutcome::PermissionDenied;
        }
        if !self
            .states
            .check_and_consume_cooldown(player.id, trigger, self.clock.now_millis())
        {
            debug!("trigger {} cooling down for {}", trigger.name(), player.name);
            return FireOutcome::CooldownActive;
        }

        info!("Trigger fired: {} by {}", trigger.name(), player.name);
        for effect in &trigger.effects {
            if let Err(e) = dispatch_effect(self.host.as_ref(), player, effect, &self.transfer_channel) {
                error!("trigger {}: {e}", trigger.name());
            }
        }
        FireOutcome::Fired
    }
}
