//! TOTP layer (RFC 6238)
//!
//! Maps wall-clock time onto HOTP counters, tolerates clock drift during
//! verification, supports a caller-supplied replay watermark, and renders
//! `otpauth://` provisioning URIs for authenticator apps.

use std::ops::RangeInclusive;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::config::OtpConfig;
use crate::error::OtpError;
use crate::hotp::{constant_time_eq, HashAlgorithm, Hotp, DEFAULT_DIGITS};
use crate::types::{Candidate, OtpSecret};

/// Default seconds per time-step
pub const DEFAULT_INTERVAL: u64 = 30;

/// Time-based code generator and verifier
#[derive(Clone, Debug)]
pub struct Totp {
    otp: Hotp,
    interval: u64,
    issuer: Option<String>,
}

/// Options for [`Totp::verify`]
///
/// `at` defaults to the current time; drift tolerance and the replay
/// watermark default to off.
#[derive(Clone, Debug, Default)]
pub struct VerifyOptions {
    at: Option<u64>,
    drift_behind: u64,
    drift_ahead: u64,
    after: Option<u64>,
}

impl VerifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify against this Unix timestamp instead of the current time
    pub fn at(mut self, time: u64) -> Self {
        self.at = Some(time);
        self
    }

    /// Accept time-steps up to this many seconds behind `at`
    pub fn drift_behind(mut self, seconds: u64) -> Self {
        self.drift_behind = seconds;
        self
    }

    /// Accept time-steps up to this many seconds ahead of `at`
    pub fn drift_ahead(mut self, seconds: u64) -> Self {
        self.drift_ahead = seconds;
        self
    }

    /// Replay watermark: only accept time-steps strictly later than this
    /// previously returned timestamp
    pub fn after(mut self, timestamp: u64) -> Self {
        self.after = Some(timestamp);
        self
    }
}

impl Totp {
    /// 6-digit SHA-1 generator with the 30-second interval
    pub fn new(secret: OtpSecret) -> Self {
        Self {
            otp: Hotp::with_defaults(secret),
            interval: DEFAULT_INTERVAL,
            issuer: None,
        }
    }

    /// Generator with explicit parameters
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidDigits`] or
    /// [`OtpError::InvalidInterval`] for out-of-range configuration.
    pub fn with_config(secret: OtpSecret, config: OtpConfig) -> Result<Self, OtpError> {
        config.validate()?;
        Ok(Self {
            otp: Hotp::new(secret, config.digits, config.algorithm)?,
            interval: config.interval,
            issuer: config.issuer,
        })
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// Code for the time-step containing `time`
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidCharacter`] if the secret is not valid
    /// Base32.
    pub fn at(&self, time: u64) -> Result<String, OtpError> {
        self.otp.generate(self.timecode(time))
    }

    /// Code for the current time-step
    ///
    /// # Errors
    ///
    /// As [`Totp::at`], plus [`OtpError::Time`] if the system clock reads
    /// before the Unix epoch.
    pub fn now(&self) -> Result<String, OtpError> {
        self.at(unix_now()?)
    }

    /// Verify a candidate within a drift window around `at`
    ///
    /// Enumerates the inclusive counter window
    /// `timecode(at - drift_behind) ..= timecode(at + drift_ahead)` in
    /// ascending order, skipping counters at or before the `after`
    /// watermark, and compares every remaining counter's code in constant
    /// time without breaking early; the last ascending match wins.
    ///
    /// Returns the Unix timestamp of the matching time-step
    /// (`counter * interval`), or `None`. Callers prevent replay by
    /// feeding the returned timestamp back via [`VerifyOptions::after`]
    /// on the next verification.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::TypeMismatch`] for numeric candidates,
    /// [`OtpError::InvalidCharacter`] for an undecodable secret, and
    /// [`OtpError::Time`] if `at` is omitted and the clock reads before
    /// the epoch.
    pub fn verify<C: Into<Candidate>>(
        &self,
        candidate: C,
        options: VerifyOptions,
    ) -> Result<Option<u64>, OtpError> {
        let candidate = candidate.into();
        let code = candidate.as_code()?;

        let at = match options.at {
            Some(time) => time,
            None => unix_now()?,
        };
        let window = self.timecodes(at, options.drift_behind, options.drift_ahead);
        let watermark = options.after.map(|after| self.timecode(after));

        let mut matched = None;
        for counter in window {
            if watermark.is_some_and(|mark| counter <= mark) {
                continue;
            }
            let generated = self.otp.generate(counter)?;
            if constant_time_eq(code, &generated) {
                matched = Some(counter * self.interval);
            }
        }
        debug!(
            algorithm = self.otp.algorithm().as_str(),
            matched = matched.is_some(),
            "TOTP verification finished"
        );
        Ok(matched)
    }

    /// Provisioning URI for authenticator apps
    ///
    /// Key-URI format as consumed by Google Authenticator and friends.
    /// The issuer appears both as label prefix and query parameter;
    /// `digits`, `period` and `algorithm` are appended only when they
    /// differ from the defaults. A literal `@` survives percent-encoding
    /// in the account label, matching authenticator conventions.
    pub fn provisioning_uri(&self, account_name: &str) -> String {
        let mut uri = String::from("otpauth://totp/");
        if let Some(issuer) = self.issuer_if_present() {
            uri.push_str(&urlencoding::encode(issuer));
            uri.push(':');
        }
        uri.push_str(&encode_label(account_name));
        uri.push_str("?secret=");
        uri.push_str(self.otp.secret().expose());
        if let Some(issuer) = self.issuer_if_present() {
            uri.push_str("&issuer=");
            uri.push_str(&urlencoding::encode(issuer));
        }
        if self.otp.digits() != DEFAULT_DIGITS {
            uri.push_str(&format!("&digits={}", self.otp.digits()));
        }
        if self.interval != DEFAULT_INTERVAL {
            uri.push_str(&format!("&period={}", self.interval));
        }
        if self.otp.algorithm() != HashAlgorithm::Sha1 {
            uri.push_str("&algorithm=");
            uri.push_str(self.otp.algorithm().uri_name());
        }
        uri
    }

    fn issuer_if_present(&self) -> Option<&str> {
        self.issuer.as_deref().filter(|issuer| !issuer.is_empty())
    }

    fn timecode(&self, time: u64) -> u64 {
        time / self.interval
    }

    /// Inclusive ascending counters for `at` widened by the drift bounds
    ///
    /// Saturates at the epoch; counters are never negative.
    fn timecodes(&self, at: u64, drift_behind: u64, drift_ahead: u64) -> RangeInclusive<u64> {
        let start = self.timecode(at.saturating_sub(drift_behind));
        let end = self.timecode(at.saturating_add(drift_ahead));
        start..=end
    }
}

fn unix_now() -> Result<u64, OtpError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|_| OtpError::Time)
}

/// Percent-encode an account label, keeping a literal `@`
fn encode_label(name: &str) -> String {
    urlencoding::encode(name).replace("%40", "@")
}
