//! Authenticated field encryption using AES-256-GCM.
//!
//! Every sensitive free-text field is sealed under a key derived per
//! call from the master key and the owning user's salt. The stored
//! form is three sibling base64 values: ciphertext, a 16-byte IV, and
//! a detached 16-byte authentication tag. The persistence layer stores
//! these alongside the owning record and never sees key material.

use aes_gcm::{
    aead::{
        generic_array::{typenum::U16, GenericArray},
        Aead, AeadCore, KeyInit, OsRng,
    },
    aes::Aes256,
    AesGcm,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::kdf::{derive_user_key, KdfParams};
use crate::keys::{MasterKey, Salt};
use solace_common::{Error, Result, UserId};

/// IV size in bytes (128-bit).
pub const IV_SIZE: usize = 16;

/// Authentication tag size in bytes (128-bit).
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM with a 128-bit nonce, matching the stored blob layout.
type Cipher = AesGcm<Aes256, U16>;

/// Encrypted representation of a single sensitive text field.
///
/// Immutable once created; an edit replaces the blob wholesale. A blob
/// decrypts only with the exact `(master key, user id)` pair that
/// produced it, and any single-bit corruption of any field makes
/// decryption fail closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    /// Base64-encoded ciphertext.
    pub ciphertext: String,
    /// Base64-encoded initialization vector (16 bytes decoded).
    pub iv: String,
    /// Base64-encoded authentication tag (16 bytes decoded).
    pub auth_tag: String,
}

/// Field-level authenticated encryption, keyed per user.
///
/// Holds only the master key and KDF parameters; the per-user key is
/// recomputed for every call and never cached.
pub struct EncryptionCodec {
    master_key: MasterKey,
    params: KdfParams,
}

impl EncryptionCodec {
    /// Create a codec over an already validated master key.
    ///
    /// Master key validation happens in [`MasterKey::new`]; a missing
    /// or under-length key never reaches this constructor.
    pub fn new(master_key: MasterKey, params: KdfParams) -> Self {
        Self { master_key, params }
    }

    /// Encrypt one text field for one user.
    ///
    /// # Postconditions
    /// - A fresh random IV is generated for this call
    /// - Returns ciphertext, IV, and tag, each base64-encoded
    ///
    /// # Errors
    /// - Returns error if key derivation or the cipher fails
    ///
    /// # Security
    /// - Purely computational; never logs plaintext, key, or IV
    pub fn encrypt(&self, plaintext: &str, user: &UserId) -> Result<EncryptedBlob> {
        let salt = Salt::for_user(user);
        let key = derive_user_key(&self.master_key, &salt, &self.params)?;

        let cipher = Cipher::new(GenericArray::from_slice(key.as_bytes()));
        let iv = Cipher::generate_nonce(&mut OsRng);

        let mut sealed = cipher
            .encrypt(&iv, plaintext.as_bytes())
            .map_err(|e| Error::Crypto(format!("Encryption failed: {}", e)))?;
        let tag = sealed.split_off(sealed.len() - TAG_SIZE);

        Ok(EncryptedBlob {
            ciphertext: STANDARD.encode(&sealed),
            iv: STANDARD.encode(iv),
            auth_tag: STANDARD.encode(&tag),
        })
    }

    /// Decrypt a previously sealed field.
    ///
    /// # Errors
    /// Every failure on this path — malformed base64, wrong field
    /// lengths, tag mismatch, wrong user, damaged UTF-8 — collapses to
    /// the generic [`Error::Decryption`] so callers cannot distinguish
    /// a key mismatch from a corrupted blob.
    pub fn decrypt(&self, blob: &EncryptedBlob, user: &UserId) -> Result<String> {
        let salt = Salt::for_user(user);
        let key = derive_user_key(&self.master_key, &salt, &self.params)?;

        let ciphertext = STANDARD
            .decode(&blob.ciphertext)
            .map_err(|_| Error::Decryption)?;
        let iv = STANDARD.decode(&blob.iv).map_err(|_| Error::Decryption)?;
        let tag = STANDARD
            .decode(&blob.auth_tag)
            .map_err(|_| Error::Decryption)?;
        if iv.len() != IV_SIZE || tag.len() != TAG_SIZE {
            return Err(Error::Decryption);
        }

        let cipher = Cipher::new(GenericArray::from_slice(key.as_bytes()));
        let mut sealed = ciphertext;
        sealed.extend_from_slice(&tag);

        let plaintext = cipher
            .decrypt(GenericArray::from_slice(&iv), sealed.as_slice())
            .map_err(|_| Error::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| Error::Decryption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_codec() -> EncryptionCodec {
        let master = MasterKey::new("unit-test-master-key-0123456789abcdef").unwrap();
        EncryptionCodec::new(
            master,
            KdfParams {
                memory_cost: 8,
                time_cost: 1,
                parallelism: 1,
            },
        )
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    /// Flip one bit inside a base64 field.
    fn corrupt(field: &str, bit: usize) -> String {
        let mut bytes = STANDARD.decode(field).unwrap();
        bytes[bit / 8] ^= 1 << (bit % 8);
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_round_trip() {
        let codec = test_codec();
        let u = user("a1b2c3d4e5f6");
        let plaintext = "Today was hard, but I talked to my sister and felt better.";

        let blob = codec.encrypt(plaintext, &u).unwrap();
        assert_eq!(codec.decrypt(&blob, &u).unwrap(), plaintext);
    }

    #[test]
    fn test_round_trip_empty_and_unicode() {
        let codec = test_codec();
        let u = user("00ff");

        for plaintext in ["", "üñïçødé — 気持ち", "\u{1F499} nested \"quotes\""] {
            let blob = codec.encrypt(plaintext, &u).unwrap();
            assert_eq!(codec.decrypt(&blob, &u).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_iv_fresh_per_call() {
        let codec = test_codec();
        let u = user("cafe");

        let blob1 = codec.encrypt("same text", &u).unwrap();
        let blob2 = codec.encrypt("same text", &u).unwrap();

        assert_ne!(blob1.iv, blob2.iv);
        assert_ne!(blob1.ciphertext, blob2.ciphertext);
    }

    #[test]
    fn test_cross_user_isolation() {
        let codec = test_codec();
        let blob = codec.encrypt("private entry", &user("aaaa")).unwrap();

        assert!(matches!(
            codec.decrypt(&blob, &user("bbbb")),
            Err(Error::Decryption)
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let codec = test_codec();
        let u = user("1234");
        let mut blob = codec.encrypt("do not touch", &u).unwrap();

        blob.ciphertext = corrupt(&blob.ciphertext, 3);
        assert!(matches!(codec.decrypt(&blob, &u), Err(Error::Decryption)));
    }

    #[test]
    fn test_tampered_iv_fails() {
        let codec = test_codec();
        let u = user("1234");
        let mut blob = codec.encrypt("do not touch", &u).unwrap();

        blob.iv = corrupt(&blob.iv, 0);
        assert!(matches!(codec.decrypt(&blob, &u), Err(Error::Decryption)));
    }

    #[test]
    fn test_tampered_tag_fails() {
        let codec = test_codec();
        let u = user("1234");
        let mut blob = codec.encrypt("do not touch", &u).unwrap();

        blob.auth_tag = corrupt(&blob.auth_tag, 127);
        assert!(matches!(codec.decrypt(&blob, &u), Err(Error::Decryption)));
    }

    #[test]
    fn test_malformed_blob_fails_closed() {
        let codec = test_codec();
        let u = user("1234");

        let garbage = EncryptedBlob {
            ciphertext: "not base64!!!".to_string(),
            iv: String::new(),
            auth_tag: String::new(),
        };
        assert!(matches!(codec.decrypt(&garbage, &u), Err(Error::Decryption)));

        // Valid base64 but wrong IV length.
        let mut blob = codec.encrypt("text", &u).unwrap();
        blob.iv = STANDARD.encode([0u8; 12]);
        assert!(matches!(codec.decrypt(&blob, &u), Err(Error::Decryption)));
    }

    #[test]
    fn test_decryption_error_is_generic() {
        let codec = test_codec();
        let u = user("1234");
        let mut blob = codec.encrypt("text", &u).unwrap();

        let wrong_user = codec.decrypt(&blob, &user("4321")).unwrap_err();
        blob.auth_tag = corrupt(&blob.auth_tag, 0);
        let bad_tag = codec.decrypt(&blob, &u).unwrap_err();

        // Same message for both causes: no oracle.
        assert_eq!(wrong_user.to_string(), bad_tag.to_string());
    }

    #[test]
    fn test_blob_serde_shape() {
        let codec = test_codec();
        let blob = codec.encrypt("entry", &user("ab")).unwrap();

        let json = serde_json::to_string(&blob).unwrap();
        assert!(json.contains("\"ciphertext\""));
        assert!(json.contains("\"iv\""));
        assert!(json.contains("\"auth_tag\""));

        let back: EncryptedBlob = serde_json::from_str(&json).unwrap();
        assert_eq!(back, blob);
    }

    #[test]
    fn test_decoded_field_sizes() {
        let codec = test_codec();
        let blob = codec.encrypt("sized", &user("ab")).unwrap();

        assert_eq!(STANDARD.decode(&blob.iv).unwrap().len(), IV_SIZE);
        assert_eq!(STANDARD.decode(&blob.auth_tag).unwrap().len(), TAG_SIZE);
        assert_eq!(
            STANDARD.decode(&blob.ciphertext).unwrap().len(),
            "sized".len()
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_round_trip(plaintext in ".{0,200}", id in "[0-9a-f]{2,40}") {
            let codec = test_codec();
            let u = user(&id);

            let blob = codec.encrypt(&plaintext, &u).unwrap();
            prop_assert_eq!(codec.decrypt(&blob, &u).unwrap(), plaintext);
        }

        #[test]
        fn prop_cross_user_fails(id_a in "[0-9a-f]{8}", id_b in "[0-9a-f]{8}") {
            prop_assume!(id_a != id_b);
            let codec = test_codec();

            let blob = codec.encrypt("isolated", &user(&id_a)).unwrap();
            prop_assert!(codec.decrypt(&blob, &user(&id_b)).is_err());
        }
    }
}
