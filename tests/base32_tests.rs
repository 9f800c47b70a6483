//! Base32 codec vectors
//!
//! Byte-for-byte vectors shared with other authenticator-compatible
//! implementations, including the truncated trailing-bit inputs Google
//! Authenticator accepts.

use otpkit::base32;
use otpkit::error::OtpError;

#[test]
fn random_secret_is_32_characters() {
    assert_eq!(base32::random_secret().unwrap().len(), 32);
}

#[test]
fn random_length_is_ceil_of_bit_count() {
    assert_eq!(base32::random(20).unwrap().len(), 32);
    assert_eq!(base32::random(40).unwrap().len(), 64);
    assert_eq!(base32::random(1).unwrap().len(), 2);
    assert_eq!(base32::random(0).unwrap().len(), 0);
}

#[test]
fn random_output_decodes_to_requested_length() {
    let secret = base32::random(20).unwrap();
    assert_eq!(base32::decode(&secret).unwrap().len(), 20);
}

#[test]
fn decode_known_vectors() {
    assert_eq!(
        hex::encode(base32::decode("2EB7C66WC5TSO").unwrap()),
        "d103f17bd6176727"
    );
    assert_eq!(
        hex::encode(base32::decode("Y6Y5ZCAC7NABCHSJ").unwrap()),
        "c7b1dc8802fb40111e49"
    );
}

#[test]
fn decode_rejects_corrupt_data() {
    assert_eq!(
        base32::decode("4BCDEFG234BCDEF1"),
        Err(OtpError::InvalidCharacter('1'))
    );
}

#[test]
fn decode_drops_trailing_bits() {
    // Dropbox-style 26 characters: 130 bits, chopped to 128
    assert_eq!(
        hex::encode(base32::decode("YVT6Z2XF4BQJNBMTD7M6QBQCEM").unwrap()),
        "c567eceae5e0609685931fd9e8060223"
    );
    // 28 characters: 140 bits, the 4 incomplete bits dropped
    assert_eq!(
        hex::encode(base32::decode("5GGZQB3WN6LD7V3L5HPDYTQUANEQ").unwrap()),
        "e98d9807766f963fd76be9de3c4e140349"
    );
}

#[test]
fn decode_strips_padding() {
    assert_eq!(hex::encode(base32::decode("234A===").unwrap()), "d6f8");
    assert_eq!(
        base32::decode("234A===").unwrap(),
        base32::decode("234A").unwrap()
    );
}

#[test]
fn encode_known_vector() {
    let input = hex::decode("3c204da94294ff82103ee34e96f74b48").unwrap();
    assert_eq!(base32::encode(&input), "HQQE3KKCST7YEEB64NHJN52LJA");
}
