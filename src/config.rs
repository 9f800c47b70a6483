//! Credential configuration
//!
//! Serializable OTP parameters plus TOML persistence for provisioned
//! credentials, so applications can keep authenticator entries in their
//! configuration directory.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Error, OtpError};
use crate::hotp::{HashAlgorithm, DEFAULT_DIGITS};
use crate::totp::{Totp, DEFAULT_INTERVAL};
use crate::types::OtpSecret;

/// OTP code parameters, immutable once a generator is built from them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Code length (default 6)
    #[serde(default = "default_digits")]
    pub digits: u32,

    /// HMAC hash algorithm (default sha1)
    #[serde(default)]
    pub algorithm: HashAlgorithm,

    /// Seconds per time-step (default 30)
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Display name of the issuing service
    #[serde(default)]
    pub issuer: Option<String>,
}

fn default_digits() -> u32 {
    DEFAULT_DIGITS
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            digits: DEFAULT_DIGITS,
            algorithm: HashAlgorithm::Sha1,
            interval: DEFAULT_INTERVAL,
            issuer: None,
        }
    }
}

impl OtpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Validate the parameter ranges
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidDigits`] unless `1 <= digits <= 10`,
    /// or [`OtpError::InvalidInterval`] for a zero interval.
    pub fn validate(&self) -> Result<(), OtpError> {
        if self.digits == 0 || self.digits > 10 {
            return Err(OtpError::InvalidDigits(self.digits));
        }
        if self.interval == 0 {
            return Err(OtpError::InvalidInterval(self.interval));
        }
        Ok(())
    }
}

/// One provisioned credential as persisted on disk
///
/// A Base32 secret plus its `[otp]` parameter table:
///
/// ```toml
/// secret = "JBSWY3DPEHPK3PXP"
///
/// [otp]
/// digits = 6
/// algorithm = "sha1"
/// interval = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    /// Base32-encoded shared secret
    pub secret: String,

    /// Code parameters
    #[serde(default, rename = "otp")]
    pub config: OtpConfig,
}

impl AccountEntry {
    pub fn new(secret: String, config: OtpConfig) -> Self {
        Self { secret, config }
    }

    /// Load and validate an entry from a TOML file
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unreadable or unparsable files and
    /// an [`OtpError`] for out-of-range parameters or an undecodable
    /// secret.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let entry: AccountEntry = toml::from_str(&contents).map_err(|e| {
            ConfigError::ParseFailed {
                message: e.to_string(),
            }
        })?;
        debug!(path = %path.display(), "loaded credential entry");

        entry.config.validate()?;
        OtpSecret::from(entry.secret.as_str()).validate()?;
        info!(
            digits = entry.config.digits,
            algorithm = entry.config.algorithm.as_str(),
            interval = entry.config.interval,
            "credential entry validated"
        );

        Ok(entry)
    }

    /// Save the entry to a TOML file, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if serialization or writing fails.
    pub fn to_file(&self, path: &Path) -> Result<(), Error> {
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeFailed {
            message: e.to_string(),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        std::fs::write(path, contents).map_err(|e| ConfigError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Build the ready-to-use generator
    ///
    /// # Errors
    ///
    /// Returns an [`OtpError`] for out-of-range parameters.
    pub fn totp(&self) -> Result<Totp, Error> {
        Ok(Totp::with_config(
            OtpSecret::from(self.secret.as_str()),
            self.config.clone(),
        )?)
    }
}
