//! Cross-server transfer requests.
//!
//! A transfer is a plugin message sent over the player's own connection and
//! picked up by the proxy in front of the game server. The payload is the
//! proxy's `Connect` subcommand followed by the target server name, each
//! written as a Java `DataOutput` UTF string: a big-endian `u16` byte length
//! and the text in modified UTF-8.

use thiserror::Error;

/// Default outbound channel understood by the proxy.
pub const TRANSFER_CHANNEL: &str = "BungeeCord";

const CONNECT: &str = "Connect";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("transfer field '{field}' encodes to {len} bytes (limit is 65535)")]
    FieldTooLong { field: &'static str, len: usize },
}

/// Build the `Connect <server>` payload.
///
/// # Errors
/// - if the server name does not fit in a length-prefixed string
pub fn encode_connect(server: &str) -> Result<Vec<u8>, TransferError> {
    let mut out = Vec::with_capacity(4 + CONNECT.len() + server.len());
    write_utf(&mut out, "subcommand", CONNECT)?;
    write_utf(&mut out, "server", server)?;
    Ok(out)
}

fn write_utf(out: &mut Vec<u8>, field: &'static str, text: &str) -> Result<(), TransferError> {
    let encoded = modified_utf8(text);
    let len = u16::try_from(encoded.len()).map_err(|_| TransferError::FieldTooLong {
        field,
        len: encoded.len(),
    })?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&encoded);
    Ok(())
}

/// Modified UTF-8: NUL takes two bytes and characters outside the BMP are
/// written as two three-byte surrogate halves.
#[allow(clippy::cast_possible_truncation)] // every cast value is masked to 8 bits first
fn modified_utf8(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | ((unit >> 6) & 0x1F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            },
            _ => {
                out.push(0xE0 | ((unit >> 12) & 0x0F) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            },
        }
    }
    out
}
