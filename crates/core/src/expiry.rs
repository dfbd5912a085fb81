//! Token lifetime settings expressed as compact duration strings.
//!
//! Lifetimes are configured as `{N}{unit}` where unit is one of `s`, `m`, `h`,
//! `d` (e.g. `"10m"`, `"7d"`). A malformed string never fails startup; it
//! falls back to the setting's default instead.

use chrono::Duration;

/// Default access token lifetime label.
pub const DEFAULT_ACCESS_EXPIRY: &str = "10m";

/// Default refresh token lifetime label.
pub const DEFAULT_REFRESH_EXPIRY: &str = "7d";

/// Longest accepted lifetime (10 years). Anything above is treated as malformed
/// so `now + lifetime` can never overflow.
pub const MAX_EXPIRY_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// A parsed lifetime together with the label it was parsed from.
///
/// The label is what gets reported to clients (`accessTokenExpiry`), so it
/// always describes the duration actually in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    label: String,
    duration: Duration,
}

impl Expiry {
    /// Parse a `{N}{s|m|h|d}` string. Returns `None` for anything else,
    /// including surrounding whitespace, signs, zero, and values above
    /// [`MAX_EXPIRY_SECS`].
    pub fn parse_strict(raw: &str) -> Option<Self> {
        let unit = raw.chars().last()?;
        let digits = &raw[..raw.len() - unit.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let unit_secs: i64 = match unit {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 24 * 60 * 60,
            _ => return None,
        };

        let value: i64 = digits.parse().ok()?;
        let secs = value.checked_mul(unit_secs)?;
        if secs == 0 || secs > MAX_EXPIRY_SECS {
            return None;
        }
        let duration = Duration::try_seconds(secs)?;

        Some(Self {
            label: raw.to_string(),
            duration,
        })
    }

    /// Parse `raw`, falling back to `default` when it is malformed.
    pub fn parse_or(raw: &str, default: Expiry) -> Self {
        Self::parse_strict(raw).unwrap_or(default)
    }

    /// The 10-minute access token default.
    pub fn access_default() -> Self {
        Self {
            label: DEFAULT_ACCESS_EXPIRY.to_string(),
            duration: Duration::minutes(10),
        }
    }

    /// The 7-day refresh token default.
    pub fn refresh_default() -> Self {
        Self {
            label: DEFAULT_REFRESH_EXPIRY.to_string(),
            duration: Duration::days(7),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
