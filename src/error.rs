//! Error types for the otpkit library
//!
//! All failure cases form a closed set of variants so callers can match
//! on exactly what went wrong.

use thiserror::Error;

/// Top-level error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// Errors from code generation or verification
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// Errors from credential file handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Code generation and verification errors
///
/// Counters are `u64` throughout, so the negative-counter failure of
/// loosely typed OTP implementations has no variant here.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OtpError {
    /// A secret contained a byte outside the `A-Z2-7` alphabet
    #[error("invalid Base32 character '{0}'")]
    InvalidCharacter(char),

    /// A verification candidate was numeric; `082630` as an integer is
    /// `82630`, so numbers are rejected rather than silently mismatched
    #[error("OTP candidates must be strings, not numbers")]
    TypeMismatch,

    /// Code length outside the supported `1..=10` range
    #[error("digits must be between 1 and 10, got {0}")]
    InvalidDigits(u32),

    /// Zero-length time-step
    #[error("interval must be at least 1 second, got {0}")]
    InvalidInterval(u64),

    /// The OS random source failed; there is no fallback
    #[error("secure random source unavailable: {0}")]
    Rng(String),

    /// The system clock reads before the Unix epoch
    #[error("system clock is before the Unix epoch")]
    Time,
}

/// Credential file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read credential file {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("failed to write credential file {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("failed to parse credential file: {message}")]
    ParseFailed { message: String },

    #[error("failed to serialize credential entry: {message}")]
    SerializeFailed { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
