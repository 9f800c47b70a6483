//! Type wrappers for secrets and verification input
//!
//! The shared secret is held behind the secrecy crate so it never leaks
//! into logs or debug output. Generated codes are plain strings: they are
//! the output the caller consumes and they expire within one time-step.

use secrecy::{ExposeSecret, Secret};

use crate::error::OtpError;

/// A Base32-encoded shared secret
///
/// The secret is kept only in its Base32 text form; the raw HMAC key
/// bytes are decoded per operation and dropped with it. Debug output is
/// redacted.
#[derive(Clone, Debug)]
pub struct OtpSecret(Secret<String>);

impl OtpSecret {
    /// Wrap a Base32 string as a secret
    pub fn new(secret: String) -> Self {
        Self(Secret::new(secret))
    }

    /// Expose the Base32 text (use with caution!)
    ///
    /// Needed when deriving the HMAC key or embedding the secret in a
    /// provisioning URI.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Check that the secret decodes as Base32
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidCharacter`] for the first byte outside
    /// the alphabet.
    pub fn validate(&self) -> Result<(), OtpError> {
        crate::base32::decode(self.expose()).map(|_| ())
    }
}

impl From<String> for OtpSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

impl From<&str> for OtpSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.to_string())
    }
}

/// A code submitted for verification
///
/// Codes are fixed-width decimal strings where leading zeros are
/// significant. Integer inputs have already lost that information, so
/// verification rejects [`Candidate::Numeric`] with
/// [`OtpError::TypeMismatch`] instead of failing to match silently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Candidate {
    /// A string-shaped code, compared verbatim
    Code(String),
    /// A numeric value; rejected during verification
    Numeric(u64),
}

impl Candidate {
    /// The code text, or `TypeMismatch` for numeric candidates
    pub fn as_code(&self) -> Result<&str, OtpError> {
        match self {
            Candidate::Code(code) => Ok(code),
            Candidate::Numeric(_) => Err(OtpError::TypeMismatch),
        }
    }
}

impl From<&str> for Candidate {
    fn from(code: &str) -> Self {
        Candidate::Code(code.to_string())
    }
}

impl From<String> for Candidate {
    fn from(code: String) -> Self {
        Candidate::Code(code)
    }
}

impl From<u32> for Candidate {
    fn from(value: u32) -> Self {
        Candidate::Numeric(u64::from(value))
    }
}

impl From<u64> for Candidate {
    fn from(value: u64) -> Self {
        Candidate::Numeric(value)
    }
}
