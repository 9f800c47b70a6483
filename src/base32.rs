//! Base32 codec matching authenticator-app behavior
//!
//! RFC 4648 §6 encoding over the `A-Z2-7` alphabet, with the relaxations
//! authenticator apps rely on: `=` padding is ignored on input, lookups
//! are case-insensitive, and a trailing group that never completes a full
//! byte is dropped instead of rejected. Dropbox-style 26-character
//! secrets (130 bits) decode to 16 bytes this way.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use crate::error::OtpError;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Bits carried by one Base32 character
const SHIFT: u32 = 5;

/// Byte length used by [`random_secret`] (160 bits)
pub const DEFAULT_SECRET_BYTES: usize = 20;

/// Decode a Base32 string to bytes
///
/// Input is uppercased and `=` is ignored wherever it appears, so padded
/// and unpadded spellings of the same secret decode identically. Trailing
/// bits that do not complete a byte (0-4 of them) are discarded.
///
/// # Errors
///
/// Returns [`OtpError::InvalidCharacter`] for any character outside
/// `A-Z2-7` after normalization.
pub fn decode(input: &str) -> Result<Vec<u8>, OtpError> {
    let mut out = Vec::with_capacity(input.len() * SHIFT as usize / 8);
    let mut buffer: u32 = 0;
    let mut bits_left: u32 = 0;

    for ch in input.chars() {
        if ch == '=' {
            continue;
        }
        let quint = decode_quint(ch.to_ascii_uppercase())?;
        buffer = (buffer << SHIFT) | u32::from(quint);
        bits_left += SHIFT;
        if bits_left >= 8 {
            bits_left -= 8;
            out.push((buffer >> bits_left) as u8);
            buffer &= (1 << bits_left) - 1;
        }
    }
    // 0-4 leftover bits never complete a byte and are dropped
    Ok(out)
}

/// Encode bytes as Base32 without output padding
///
/// A final group of 1-4 leftover bits is shifted up to a full 5-bit group
/// and emitted as one character; no `=` characters are appended, so the
/// output length is `ceil(len * 8 / 5)`.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(SHIFT as usize));
    let mut buffer: u32 = 0;
    let mut bits_left: u32 = 0;

    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits_left += 8;
        while bits_left >= SHIFT {
            bits_left -= SHIFT;
            out.push(char::from(ALPHABET[(buffer >> bits_left) as usize & 0x1f]));
            buffer &= (1 << bits_left) - 1;
        }
    }
    if bits_left > 0 {
        let quint = (buffer << (SHIFT - bits_left)) as usize & 0x1f;
        out.push(char::from(ALPHABET[quint]));
    }
    out
}

/// Draw `byte_length` cryptographically random bytes and encode them
///
/// # Errors
///
/// Returns [`OtpError::Rng`] if the OS random source fails. There is no
/// fallback source.
pub fn random(byte_length: usize) -> Result<String, OtpError> {
    let mut bytes = vec![0u8; byte_length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| OtpError::Rng(e.to_string()))?;
    debug!(byte_length, "generated random Base32 secret");
    Ok(encode(&bytes))
}

/// [`random`] with the 160-bit default, yielding a 32-character secret
pub fn random_secret() -> Result<String, OtpError> {
    random(DEFAULT_SECRET_BYTES)
}

fn decode_quint(ch: char) -> Result<u8, OtpError> {
    match ch {
        'A'..='Z' => Ok(ch as u8 - b'A'),
        '2'..='7' => Ok(ch as u8 - b'2' + 26),
        _ => Err(OtpError::InvalidCharacter(ch)),
    }
}
