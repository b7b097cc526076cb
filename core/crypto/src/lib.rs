//! Cryptographic primitives for the Solace safety core.
//!
//! This module provides:
//! - Per-user key derivation using Argon2id
//! - Field-level authenticated encryption using AES-256-GCM
//! - Secure key management with automatic zeroization
//! - Constant-time comparison and key-id bookkeeping helpers
//!
//! # Security Guarantees
//! - All key material is automatically zeroized on drop
//! - No plaintext or key material is ever logged
//! - Decryption failures are indistinguishable by cause

pub mod codec;
pub mod kdf;
pub mod keys;

pub use codec::{EncryptedBlob, EncryptionCodec, IV_SIZE, TAG_SIZE};
pub use kdf::{derive_user_key, KdfParams};
pub use keys::{
    generate_user_key_id, is_valid_key_id, secure_compare, MasterKey, Salt, UserKey,
    MIN_MASTER_KEY_LEN,
};
