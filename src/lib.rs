//! One-time password generation and verification (HOTP/TOTP)
//!
//! Implements RFC 4226 counter-based and RFC 6238 time-based one-time
//! passwords over Base32-encoded secrets, with the relaxed Base32
//! handling authenticator apps expect, constant-time code comparison,
//! clock-drift-tolerant verification with replay prevention, and
//! `otpauth://` provisioning URIs.
//!
//! ```rust
//! use otpkit::totp::{Totp, VerifyOptions};
//! use otpkit::types::OtpSecret;
//!
//! let totp = Totp::new(OtpSecret::from("JBSWY3DPEHPK3PXP"));
//!
//! let code = totp.at(1_474_621_200)?;
//! assert_eq!(code, "082630");
//!
//! let matched = totp.verify(code.as_str(), VerifyOptions::new().at(1_474_621_200))?;
//! assert_eq!(matched, Some(1_474_621_200));
//!
//! // the matched timestamp becomes the replay watermark
//! let replayed = totp.verify(
//!     code.as_str(),
//!     VerifyOptions::new().at(1_474_621_200).after(1_474_621_200),
//! )?;
//! assert_eq!(replayed, None);
//! # Ok::<(), otpkit::error::OtpError>(())
//! ```

pub mod base32;
pub mod config;
pub mod error;
pub mod hotp;
pub mod totp;
pub mod types;

/// Initialize logging infrastructure
///
/// Sets up tracing with journald output when running under systemd, and
/// a compact stderr format otherwise. Intended for binaries and
/// integration harnesses embedding this crate; libraries should leave
/// subscriber installation to the host application.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    #[cfg(target_os = "linux")]
    {
        if std::env::var("JOURNAL_STREAM").is_ok() {
            let journal_layer = tracing_journald::layer()?;
            tracing_subscriber::registry()
                .with(journal_layer)
                .with(tracing_subscriber::filter::LevelFilter::INFO)
                .init();
            return Ok(());
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    Ok(())
}
