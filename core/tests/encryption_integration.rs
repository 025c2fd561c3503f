//! Integration tests for authenticated encryption and key loading

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::collections::HashSet;

use idps_core::errors::CryptoError;
use idps_core::services::encryption::{AesGcmCipher, CipherKey, KeyManager, NONCE_LENGTH};

#[test]
fn test_round_trip_with_and_without_associated_data() {
    let cipher = AesGcmCipher::generate();
    let payloads: [&[u8]; 4] = [b"", b"x", b"rule:forward tcp/443 allow", &[0u8; 4096]];

    for plaintext in payloads {
        let blob = cipher.encrypt(plaintext, None).expect("Failed to encrypt");
        assert_eq!(cipher.decrypt(&blob, None).expect("Failed to decrypt"), plaintext);

        let blob = cipher
            .encrypt(plaintext, Some(b"vehicle:car-123"))
            .expect("Failed to encrypt");
        assert_eq!(
            cipher
                .decrypt(&blob, Some(b"vehicle:car-123"))
                .expect("Failed to decrypt"),
            plaintext
        );
    }
}

#[test]
fn test_any_flipped_bit_is_detected() {
    let cipher = AesGcmCipher::generate();
    let blob = cipher
        .encrypt(b"ids-rule-set-v7", Some(b"car-123"))
        .expect("Failed to encrypt");
    let raw = BASE64.decode(blob.as_str()).expect("Blob is not base64");

    for index in 0..raw.len() {
        for bit in [0x01u8, 0x80] {
            let mut tampered = raw.clone();
            tampered[index] ^= bit;
            assert_eq!(
                cipher.decrypt(BASE64.encode(&tampered), Some(b"car-123")),
                Err(CryptoError::DecryptionFailed),
                "flip at byte {} went undetected",
                index
            );
        }
    }
}

#[test]
fn test_associated_data_must_match_exactly() {
    let cipher = AesGcmCipher::generate();
    let blob = cipher.encrypt(b"secret", Some(b"car-123")).expect("Failed to encrypt");

    for aad in [&b"car-124"[..], &b"car-12"[..], &b"car-1234"[..], &b""[..]] {
        assert_eq!(cipher.decrypt(&blob, Some(aad)), Err(CryptoError::DecryptionFailed));
    }
    assert_eq!(cipher.decrypt(&blob, None), Err(CryptoError::DecryptionFailed));
}

#[test]
fn test_nonces_never_repeat() {
    let cipher = AesGcmCipher::generate();
    let mut seen = HashSet::new();

    for _ in 0..10_000 {
        let blob = cipher.encrypt(b"same plaintext", None).expect("Failed to encrypt");
        let raw = BASE64.decode(blob.as_str()).expect("Blob is not base64");
        assert!(seen.insert(raw[..NONCE_LENGTH].to_vec()), "nonce reused");
    }
}

#[test]
fn test_distributed_key_opens_blobs_across_instances() {
    let key = CipherKey::generate();
    let exported = KeyManager::export_key(&key);

    let writer = AesGcmCipher::new(key);
    let reader = AesGcmCipher::from_base64_key(&exported).expect("Failed to load key");

    let blob = writer.encrypt_str("hunter2", Some("device-7")).expect("Failed to encrypt");
    assert_eq!(
        reader.decrypt_str(&blob, Some("device-7")).expect("Failed to decrypt"),
        "hunter2"
    );
}

#[test]
fn test_key_manager_rejects_bad_key_material() {
    assert_eq!(
        KeyManager::load_key(&BASE64.encode([0u8; 24])),
        Err(CryptoError::InvalidKeyLength { expected: 32, actual: 24 })
    );
    assert_eq!(KeyManager::load_key("@@@"), Err(CryptoError::InvalidKeyEncoding));
}
