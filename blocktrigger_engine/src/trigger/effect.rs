//! Trigger effects.
//!
//! Effects are the "output" half of a trigger: once every gate has passed,
//! each effect of the trigger is handed to the [`Host`] in declaration order.
//! Nothing here short-circuits; a failing transfer does not stop the commands
//! that were already issued.
//!
//! # Logging
//!
//! Every dispatched effect is logged at debug level in the form
//! ```text
//! └─ effect: EffectName(parameters)
//! ```

use log::debug;

use crate::host::{Host, PlayerRef};
use crate::transfer::{TransferError, encode_connect};

/// Substitution token replaced by the player's name in console commands.
pub const PLAYER_TOKEN: &str = "{player}";
/// Substitution token replaced by the player's UUID in console commands.
pub const UUID_TOKEN: &str = "{uuid}";

/// One executable action attached to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a command as the player.
    PlayerCommand(String),
    /// Run a command as the console, after token substitution.
    ConsoleCommand(String),
    /// Ask the proxy to move the player to another server.
    ServerTransfer(String),
}

/// Fill in `{player}` and `{uuid}` in a console command template.
///
/// ```
/// use blocktrigger_engine::host::PlayerRef;
/// use blocktrigger_engine::trigger::render_console_command;
/// use uuid::Uuid;
///
/// let ann = PlayerRef::new(Uuid::from_u128(1), "Ann");
/// assert_eq!(
///     render_console_command("tell {player} {uuid}", &ann),
///     "tell Ann 00000000-0000-0000-0000-000000000001"
/// );
/// ```
pub fn render_console_command(template: &str, player: &PlayerRef) -> String {
    template
        .replace(PLAYER_TOKEN, &player.name)
        .replace(UUID_TOKEN, &player.id.hyphenated().to_string())
}

/// Hands a single effect to the host.
///
/// # Errors
/// - if a transfer request cannot be encoded; nothing is sent in that case
pub fn dispatch_effect(
    host: &dyn Host,
    player: &PlayerRef,
    effect: &Effect,
    transfer_channel: &str,
) -> Result<(), TransferError> {
    match effect {
        Effect::PlayerCommand(command) => {
            debug!("└─ effect: PlayerCommand({command:?}) as {}", player.name);
            host.perform_command(player, command);
        },
        Effect::ConsoleCommand(template) => {
            let command = render_console_command(template, player);
            debug!("└─ effect: ConsoleCommand({command:?})");
            host.dispatch_console_command(&command);
        },
        Effect::ServerTransfer(server) => {
            let payload = encode_connect(server)?;
            debug!("└─ effect: ServerTransfer({server:?}) for {}", player.name);
            host.send_plugin_message(player, transfer_channel, payload);
        },
    }
    Ok(())
}
