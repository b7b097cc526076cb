//! Key material types with secure memory handling.
//!
//! All secret-bearing types automatically zeroize their memory on drop
//! to prevent sensitive data from persisting in memory.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use solace_common::{Error, Result, UserId};

/// Length of derived encryption keys in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Length of per-user salts in bytes.
pub const SALT_LENGTH: usize = 32;

/// Minimum acceptable master key length in characters.
pub const MIN_MASTER_KEY_LEN: usize = 32;

/// The process-wide master secret from which all per-user keys are
/// derived.
///
/// Loaded once from external configuration. Never persisted, never
/// serialized, never logged.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    secret: String,
}

impl MasterKey {
    /// Create a master key from a configured secret.
    ///
    /// # Preconditions
    /// - `secret` must be at least [`MIN_MASTER_KEY_LEN`] characters
    ///
    /// # Errors
    /// - `Error::Configuration` when the secret is too short; the
    ///   caller must treat this as fatal for all encryption use
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.len() < MIN_MASTER_KEY_LEN {
            return Err(Error::Configuration(format!(
                "Master key must be at least {} characters",
                MIN_MASTER_KEY_LEN
            )));
        }
        Ok(Self { secret })
    }

    /// Get the secret bytes for key derivation.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterKey([REDACTED])")
    }
}

/// Per-user encryption key derived for the duration of a single
/// encrypt or decrypt call.
///
/// Recomputed on every call and never stored, trading CPU for reduced
/// key-at-rest exposure.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct UserKey {
    key: [u8; KEY_LENGTH],
}

impl UserKey {
    /// Create a user key from raw derived bytes.
    pub(crate) fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Get the key bytes.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserKey([REDACTED])")
    }
}

/// Salt for per-user key derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Derive the deterministic salt for a user identifier.
    ///
    /// Hex digits in the identifier are decoded pairwise into bytes,
    /// then truncated or zero-padded to [`SALT_LENGTH`]. Every record
    /// belonging to one user therefore shares a single derived key,
    /// and identifiers with few hex digits yield low-entropy salts.
    /// The stored blob format has no per-record salt field, so the
    /// salt must stay recomputable from the identifier alone.
    pub fn for_user(user: &UserId) -> Self {
        let digits: String = user
            .as_str()
            .chars()
            .filter(char::is_ascii_hexdigit)
            .collect();
        // A dangling odd digit is dropped, matching pairwise decoding.
        let decoded = hex::decode(&digits[..digits.len() & !1]).unwrap_or_default();

        let mut salt = [0u8; SALT_LENGTH];
        let n = decoded.len().min(SALT_LENGTH);
        salt[..n].copy_from_slice(&decoded[..n]);
        Self(salt)
    }

    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }
}

/// Generate a random identifier for external key bookkeeping.
///
/// The identifier is 256 bits of OS randomness rendered as 64 lowercase
/// hex characters. It is unrelated to any encryption key material.
pub fn generate_user_key_id() -> String {
    use rand::Rng;
    let mut bytes = [0u8; KEY_LENGTH];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Check that `id` is a well-formed key identifier: exactly 64
/// lowercase hex characters.
pub fn is_valid_key_id(id: &str) -> bool {
    id.len() == 64 && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Constant-time string equality.
///
/// A length mismatch returns false immediately without scanning. For
/// equal lengths the comparison time does not depend on the position of
/// the first differing byte.
pub fn secure_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}
