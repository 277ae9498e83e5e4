//! The stateless code protocol: per-lecture secret derivation, code
//! generation and windowed verification.
//!
//! Every replica derives the same secret from (lecture id, server seed) and
//! the same code for the same 30-second epoch, so no instance needs a cache
//! or any shared state. The derivation and the inner MAC are compatibility
//! constants: `base32(sha256(seed || "_" || decimal(lecture_id)))` fed into
//! HMAC-SHA1 over the Unix-epoch-aligned step counter. Changing any of them
//! invalidates all in-flight codes.

use crate::errors::{AppError, AppResult};
use base32::Alphabet;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256};

type HmacSha1 = Hmac<Sha1>;

/// Width of one code epoch.
pub const STEP_SECONDS: i64 = 30;

/// Codes are exactly this many decimal digits, left zero-padded.
pub const CODE_DIGITS: usize = 4;

const CODE_SPACE: u32 = 10_000;
const SEPARATOR: &str = "_";
const B32: Alphabet = Alphabet::Rfc4648 { padding: true };

/// Derive the per-lecture secret. Pure and deterministic: same output for
/// the same inputs on every replica.
pub fn derive_secret(lecture_id: i64, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(SEPARATOR.as_bytes());
    hasher.update(lecture_id.to_string().as_bytes());
    base32::encode(B32, &hasher.finalize())
}

/// Unix-epoch-aligned step counter for an instant.
pub fn epoch_step(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(STEP_SECONDS)
}

/// The 4-digit code for a lecture at `now`.
pub fn current_code(lecture_id: i64, seed: &str, now: DateTime<Utc>) -> AppResult<String> {
    let secret = derive_secret(lecture_id, seed);
    code_at_step(&secret, epoch_step(now))
}

/// Check a submitted code against the epochs `now − tolerance .. now + tolerance`.
///
/// The caller has already validated the format (exactly 4 ASCII digits).
pub fn verify_code(
    lecture_id: i64,
    seed: &str,
    submitted: &str,
    now: DateTime<Utc>,
    tolerance: i64,
) -> AppResult<bool> {
    let secret = derive_secret(lecture_id, seed);
    let step = epoch_step(now);

    for delta in -tolerance..=tolerance {
        if code_at_step(&secret, step + delta)? == submitted {
            return Ok(true);
        }
    }
    Ok(false)
}

/// HOTP over one step counter, truncated to the 4-digit code space.
fn code_at_step(secret: &str, step: i64) -> AppResult<String> {
    let key = base32::decode(B32, secret)
        .ok_or_else(|| AppError::Secret(format!("not base32: {secret}")))?;

    let mut mac =
        HmacSha1::new_from_slice(&key).expect("hmac accepts keys of any length");
    mac.update(&step.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // RFC 4226 dynamic truncation.
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let bin = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    Ok(format!("{:01$}", bin % CODE_SPACE, CODE_DIGITS))
}

/// Format gate for submitted codes: exactly 4 ASCII decimal digits.
pub fn is_valid_code_format(code: &str) -> bool {
    code.len() == CODE_DIGITS && code.bytes().all(|b| b.is_ascii_digit())
}
