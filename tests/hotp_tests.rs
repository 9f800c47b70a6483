//! HOTP engine vectors
//!
//! RFC 4226 appendix D vectors and the string-candidate contract.

use otpkit::error::OtpError;
use otpkit::hotp::{HashAlgorithm, Hotp};
use otpkit::types::{Candidate, OtpSecret};

// Base32 of "12345678901234567890", the RFC 4226 appendix D secret
const SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

#[test]
fn rfc4226_six_digit_vectors() {
    let hotp = Hotp::with_defaults(OtpSecret::from(SECRET));
    let expected = [
        (0, "755224"),
        (1, "287082"),
        (2, "359152"),
        (3, "969429"),
        (4, "338314"),
        (5, "254676"),
        (6, "287922"),
        (7, "162583"),
        (8, "399871"),
        (9, "520489"),
    ];
    for (counter, code) in expected {
        assert_eq!(hotp.generate(counter).unwrap(), code);
    }
}

#[test]
fn generation_is_deterministic() {
    let hotp = Hotp::with_defaults(OtpSecret::from(SECRET));
    let first = hotp.generate(424_242).unwrap();
    // interleave other counters; output must not depend on call order
    hotp.generate(7).unwrap();
    hotp.generate(u64::MAX).unwrap();
    assert_eq!(hotp.generate(424_242).unwrap(), first);
}

#[test]
fn verify_accepts_the_generated_code() {
    let hotp = Hotp::with_defaults(OtpSecret::from(SECRET));
    assert!(hotp.verify("755224", 0).unwrap());
    assert!(!hotp.verify("755224", 1).unwrap());
}

#[test]
fn verify_rejects_numeric_candidates() {
    let hotp = Hotp::with_defaults(OtpSecret::from(SECRET));
    assert_eq!(hotp.verify(755_224_u32, 0), Err(OtpError::TypeMismatch));
    assert_eq!(
        hotp.verify(Candidate::Numeric(755_224), 0),
        Err(OtpError::TypeMismatch)
    );
}

#[test]
fn verify_does_not_strip_leading_zeros() {
    let hotp = Hotp::with_defaults(OtpSecret::from(SECRET));
    // roughly one counter in ten starts with a zero; find one
    let (counter, code) = (0..1000)
        .map(|counter| (counter, hotp.generate(counter).unwrap()))
        .find(|(_, code)| code.starts_with('0'))
        .expect("a leading-zero code within 1000 counters");
    assert!(hotp.verify(code.as_str(), counter).unwrap());
    assert!(!hotp.verify(code.trim_start_matches('0'), counter).unwrap());
}

#[test]
fn undecodable_secret_fails_generation() {
    let hotp = Hotp::with_defaults(OtpSecret::from("NOT A SECRET"));
    assert_eq!(
        hotp.generate(0),
        Err(OtpError::InvalidCharacter(' '))
    );
}

#[test]
fn wide_codes_stay_zero_padded() {
    let hotp = Hotp::new(OtpSecret::from(SECRET), 10, HashAlgorithm::Sha1).unwrap();
    for counter in 0..32 {
        let code = hotp.generate(counter).unwrap();
        assert_eq!(code.len(), 10);
    }
}
