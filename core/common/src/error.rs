//! Common error types for the Solace safety core.

use thiserror::Error;

/// Top-level error type for safety-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or unusable.
    ///
    /// Fatal for encryption: callers must not fall back to an unkeyed
    /// or weakly keyed codec.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cryptographic operation failed during encryption.
    ///
    /// The message never contains plaintext, key, or IV material.
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// Authenticated decryption failed.
    ///
    /// Deliberately carries no detail: a wrong key, a corrupted
    /// ciphertext, and a forged tag are indistinguishable to callers.
    #[error("Unable to decrypt content")]
    Decryption,

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
