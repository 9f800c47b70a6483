//! HOTP engine (RFC 4226)
//!
//! Derives fixed-width decimal codes from a shared secret and a 64-bit
//! counter, and compares submitted codes in constant time.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;

use crate::base32;
use crate::error::OtpError;
use crate::types::{Candidate, OtpSecret};

/// Default code length
pub const DEFAULT_DIGITS: u32 = 6;

/// Hash algorithm backing the HMAC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        Self::Sha1
    }
}

impl HashAlgorithm {
    /// Lowercase name, as configuration files spell it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Uppercase name, as the `algorithm` URI parameter spells it
    pub fn uri_name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

/// Counter-based code generator and verifier
///
/// Immutable after construction: a secret, a code length, and a hash
/// algorithm.
#[derive(Clone, Debug)]
pub struct Hotp {
    secret: OtpSecret,
    digits: u32,
    algorithm: HashAlgorithm,
}

impl Hotp {
    /// Create an engine with explicit parameters
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidDigits`] unless `1 <= digits <= 10`.
    /// The dynamically truncated HMAC value is 31 bits wide, so an 11th
    /// digit could only ever be a leading zero.
    pub fn new(secret: OtpSecret, digits: u32, algorithm: HashAlgorithm) -> Result<Self, OtpError> {
        if digits == 0 || digits > 10 {
            return Err(OtpError::InvalidDigits(digits));
        }
        Ok(Self {
            secret,
            digits,
            algorithm,
        })
    }

    /// Engine with the 6-digit SHA-1 defaults
    pub fn with_defaults(secret: OtpSecret) -> Self {
        Self {
            secret,
            digits: DEFAULT_DIGITS,
            algorithm: HashAlgorithm::Sha1,
        }
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn secret(&self) -> &OtpSecret {
        &self.secret
    }

    /// Generate the code for a counter value
    ///
    /// The counter is serialized as 8 bytes big-endian, HMAC'd with the
    /// Base32-decoded secret, dynamically truncated (RFC 4226 §5.3) and
    /// reduced modulo `10^digits`, then rendered left-zero-padded.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidCharacter`] if the secret is not valid
    /// Base32.
    pub fn generate(&self, counter: u64) -> Result<String, OtpError> {
        let key = base32::decode(self.secret.expose())?;
        let mac = hmac_bytes(self.algorithm, &key, &counter.to_be_bytes());
        let code = dynamic_truncation(&mac) % 10u64.pow(self.digits);
        Ok(format!("{:0width$}", code, width = self.digits as usize))
    }

    /// Verify a submitted code against the code for `counter`
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::TypeMismatch`] for numeric candidates and
    /// [`OtpError::InvalidCharacter`] for an undecodable secret.
    pub fn verify<C: Into<Candidate>>(&self, candidate: C, counter: u64) -> Result<bool, OtpError> {
        let candidate = candidate.into();
        let code = candidate.as_code()?;
        let generated = self.generate(counter)?;
        Ok(constant_time_eq(code, &generated))
    }
}

/// Compare two codes without short-circuiting on the first differing byte
///
/// Length is checked up front; code length is public. The XOR
/// accumulation is done by `subtle`, which keeps the comparison opaque to
/// the optimizer.
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn hmac_bytes(algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha1 => {
            let mut mac =
                Hmac::<Sha1>::new_from_slice(key).expect("HMAC can take key of any size");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HashAlgorithm::Sha512 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(key).expect("HMAC can take key of any size");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// RFC 4226 §5.3 dynamic truncation
///
/// The low nibble of the final MAC byte selects a 4-byte window, read
/// big-endian with the top bit cleared to stay in a 31-bit range.
fn dynamic_truncation(mac: &[u8]) -> u64 {
    let offset = usize::from(mac[mac.len() - 1] & 0x0f);
    (u64::from(mac[offset] & 0x7f) << 24)
        | (u64::from(mac[offset + 1]) << 16)
        | (u64::from(mac[offset + 2]) << 8)
        | u64::from(mac[offset + 3])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Base32 of the RFC 4226 appendix D secret "12345678901234567890"
    const RFC4226_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    fn hotp() -> Hotp {
        Hotp::with_defaults(OtpSecret::from(RFC4226_SECRET))
    }

    #[test]
    fn rfc4226_appendix_d_vectors() {
        let expected = [
            "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583",
            "399871", "520489",
        ];
        let hotp = hotp();
        for (counter, code) in expected.iter().enumerate() {
            assert_eq!(hotp.generate(counter as u64).unwrap(), *code);
        }
    }

    #[test]
    fn eight_digit_codes_keep_the_same_tail() {
        let hotp = Hotp::new(OtpSecret::from(RFC4226_SECRET), 8, HashAlgorithm::Sha1).unwrap();
        assert_eq!(hotp.generate(0).unwrap(), "84755224");
        assert_eq!(hotp.generate(1).unwrap(), "94287082");
    }

    #[test]
    fn codes_are_zero_padded_to_width() {
        let hotp = hotp();
        for counter in 0..64 {
            assert_eq!(hotp.generate(counter).unwrap().len(), 6);
        }
    }

    #[test]
    fn digits_out_of_range_are_rejected() {
        let err = Hotp::new(OtpSecret::from(RFC4226_SECRET), 0, HashAlgorithm::Sha1);
        assert_eq!(err.unwrap_err(), OtpError::InvalidDigits(0));
        let err = Hotp::new(OtpSecret::from(RFC4226_SECRET), 11, HashAlgorithm::Sha1);
        assert_eq!(err.unwrap_err(), OtpError::InvalidDigits(11));
    }

    #[test]
    fn numeric_candidates_are_rejected() {
        assert_eq!(
            hotp().verify(755_224_u32, 0),
            Err(OtpError::TypeMismatch)
        );
    }

    #[test]
    fn verification_requires_exact_padding() {
        let hotp = hotp();
        assert!(hotp.verify("287082", 1).unwrap());
        // same numeric value, missing leading digit
        assert!(!hotp.verify("87082", 1).unwrap());
    }

    #[test]
    fn sha_variants_generate_and_verify() {
        let secret = OtpSecret::from(RFC4226_SECRET);
        for algorithm in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
        ] {
            let hotp = Hotp::new(secret.clone(), 6, algorithm).unwrap();
            let code = hotp.generate(0).unwrap();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
            assert!(hotp.verify(code.as_str(), 0).unwrap());
        }
    }

    #[test]
    fn constant_time_eq_edge_cases() {
        assert!(!constant_time_eq("", ""));
        assert!(!constant_time_eq("123456", ""));
        assert!(!constant_time_eq("123456", "12345"));
        assert!(constant_time_eq("123456", "123456"));
        assert!(!constant_time_eq("123456", "123457"));
    }
}
