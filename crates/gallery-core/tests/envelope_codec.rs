use std::collections::HashSet;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use gallery_core::crypto::{derive_key, EnvelopeCodec, DEFAULT_PASSPHRASE, DEFAULT_SALT};
use gallery_core::gallery::{build_data_url, data_url_payload};

fn codec() -> EnvelopeCodec {
    EnvelopeCodec::with_defaults().expect("default codec should build")
}

#[test]
fn test_round_trip_ascii() {
    let codec = codec();
    let sealed = codec.encrypt("a plain ascii title").expect("encrypt should succeed");
    assert_eq!(codec.decrypt(&sealed), "a plain ascii title");
}

#[test]
fn test_round_trip_empty() {
    let codec = codec();
    let sealed = codec.encrypt("").expect("encrypt should succeed");
    let outcome = codec.decrypt_outcome(&sealed);
    assert!(outcome.was_decrypted());
    assert_eq!(outcome.into_string(), "");
}

#[test]
fn test_round_trip_multibyte() {
    let codec = codec();
    let plaintext = "日本語のタイトル — ñandú 🦤";
    let sealed = codec.encrypt(plaintext).expect("encrypt should succeed");
    assert_eq!(codec.decrypt(&sealed), plaintext);
}

#[test]
fn test_round_trip_one_mebibyte() {
    let codec = codec();
    let plaintext = "x".repeat(1024 * 1024);
    let sealed = codec.encrypt(&plaintext).expect("encrypt should succeed");
    assert_eq!(codec.decrypt(&sealed), plaintext);
}

#[test]
fn test_hundred_encryptions_all_distinct() {
    let codec = codec();
    let plaintext = "the same input every time";

    let mut envelopes = HashSet::new();
    for _ in 0..100 {
        let sealed = codec.encrypt(plaintext).expect("encrypt should succeed");
        assert_eq!(codec.decrypt(&sealed), plaintext);
        envelopes.insert(sealed);
    }

    // Fresh nonce per call means no two envelopes collide
    assert_eq!(envelopes.len(), 100);
}

#[test]
fn test_whitespace_input_returned_unchanged() {
    let codec = codec();
    let outcome = codec.decrypt_outcome("hello world");
    assert!(!outcome.was_decrypted());
    assert_eq!(outcome.into_string(), "hello world");
}

#[test]
fn test_flipping_any_byte_falls_back_to_passthrough() {
    let codec = codec();
    let sealed = codec.encrypt("corruption target").expect("encrypt should succeed");
    let raw = STANDARD.decode(&sealed).expect("envelope should be base64");

    for index in 0..raw.len() {
        let mut corrupted = raw.clone();
        corrupted[index] ^= 0x01;
        let corrupted_envelope = STANDARD.encode(&corrupted);

        // Corrupting the nonce, ciphertext, or tag must never panic or
        // leak a partial plaintext; the corrupted input comes back as-is.
        let outcome = codec.decrypt_outcome(&corrupted_envelope);
        assert!(
            !outcome.was_decrypted(),
            "byte {index} corruption was not detected"
        );
        assert_eq!(outcome.into_string(), corrupted_envelope);
    }
}

#[test]
fn test_independent_derivations_interoperate() {
    let key_a = derive_key(DEFAULT_PASSPHRASE, DEFAULT_SALT.as_bytes())
        .expect("derivation should succeed");
    let key_b = derive_key(DEFAULT_PASSPHRASE, DEFAULT_SALT.as_bytes())
        .expect("derivation should succeed");

    // hex form gives a readable diff if derivation ever drifts
    assert_eq!(hex::encode(key_a.as_bytes()), hex::encode(key_b.as_bytes()));

    let writer = EnvelopeCodec::new(key_a);
    let reader = EnvelopeCodec::new(key_b);

    let sealed = writer.encrypt("shared secret").expect("encrypt should succeed");
    let outcome = reader.decrypt_outcome(&sealed);
    assert!(outcome.was_decrypted());
    assert_eq!(outcome.into_string(), "shared secret");
}

#[test]
fn test_png_data_url_round_trips_bit_identically() {
    // A real 1x1 PNG, signature through IEND.
    let png: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x62, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    let codec = codec();
    let data_url = build_data_url("image/png", png);
    let sealed = codec.encrypt(&data_url).expect("encrypt should succeed");

    let outcome = codec.decrypt_outcome(&sealed);
    assert!(outcome.was_decrypted());
    let restored = outcome.into_string();
    assert_eq!(restored, data_url);
    assert_eq!(
        data_url_payload(&restored).expect("payload should decode"),
        png
    );
}
