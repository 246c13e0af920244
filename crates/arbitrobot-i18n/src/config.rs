//! Formatter configuration.
//!
//! A [`FormatterConfig`] pins the locale and time zone every formatting call
//! uses, so a server pass and a client pass given the same configuration
//! produce identical text regardless of the host's own locale or zone.
//!
//! The configuration is read from the environment once at startup:
//!
//! | Variable     | Default |
//! |--------------|---------|
//! | `APP_LOCALE` | `ru-RU` |
//! | `APP_TZ`     | `UTC`   |
//!
//! ```ignore
//! use arbitrobot_i18n::FormatterConfig;
//!
//! let config = FormatterConfig::from_env()?.install()?;
//! ```

use std::sync::OnceLock;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::locale::Locale;

/// Environment variable holding the locale tag.
pub const LOCALE_ENV: &str = "APP_LOCALE";

/// Environment variable holding the IANA time zone name.
pub const TIMEZONE_ENV: &str = "APP_TZ";

static INSTALLED: OnceLock<FormatterConfig> = OnceLock::new();

/// Locale and time zone shared by every formatting call.
///
/// Immutable once built. Serializes as `{"locale": "ru-RU", "timezone": "UTC"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", into = "RawConfig")]
pub struct FormatterConfig {
	locale: Locale,
	timezone: Tz,
}

#[derive(Serialize, Deserialize)]
struct RawConfig {
	locale: String,
	timezone: String,
}

impl FormatterConfig {
	/// Build a configuration from a locale tag and a time zone name.
	pub fn new(locale: &str, timezone: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			locale: locale.parse()?,
			timezone: parse_timezone(timezone)?,
		})
	}

	/// Build a configuration from already-parsed parts.
	pub fn from_parts(locale: Locale, timezone: Tz) -> Self {
		Self { locale, timezone }
	}

	/// Read `APP_LOCALE` and `APP_TZ` from the process environment.
	///
	/// Unset or blank variables fall back to `ru-RU` and `UTC`.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Like [`from_env`](Self::from_env), reading variables through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		let locale = match read(LOCALE_ENV) {
			Some(tag) => tag.parse()?,
			None => Locale::default(),
		};
		let timezone = match read(TIMEZONE_ENV) {
			Some(name) => parse_timezone(&name)?,
			None => Tz::UTC,
		};

		tracing::debug!(
			locale = locale.tag(),
			timezone = timezone.name(),
			"formatter configuration loaded"
		);
		Ok(Self { locale, timezone })
	}

	/// Store this configuration for the rest of the process.
	///
	/// Fails if a configuration was installed before.
	pub fn install(self) -> Result<&'static Self, ConfigError> {
		INSTALLED
			.set(self)
			.map_err(|_| ConfigError::AlreadyInstalled)?;
		INSTALLED.get().ok_or(ConfigError::AlreadyInstalled)
	}

	/// The configuration stored by [`install`](Self::install), if any.
	pub fn installed() -> Option<&'static Self> {
		INSTALLED.get()
	}

	/// Configured locale.
	pub fn locale(&self) -> Locale {
		self.locale
	}

	/// Configured time zone.
	pub fn timezone(&self) -> Tz {
		self.timezone
	}
}

impl Default for FormatterConfig {
	fn default() -> Self {
		Self {
			locale: Locale::default(),
			timezone: Tz::UTC,
		}
	}
}

impl TryFrom<RawConfig> for FormatterConfig {
	type Error = ConfigError;

	fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
		Self::new(&raw.locale, &raw.timezone)
	}
}

impl From<FormatterConfig> for RawConfig {
	fn from(config: FormatterConfig) -> Self {
		Self {
			locale: config.locale.tag().to_string(),
			timezone: config.timezone.name().to_string(),
		}
	}
}

pub(crate) fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
	name.trim()
		.parse::<Tz>()
		.map_err(|_| ConfigError::UnknownTimeZone(name.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |key| vars.get(key).cloned()
	}

	#[rstest]
	fn test_defaults_when_unset() {
		let config = FormatterConfig::from_lookup(lookup(&[])).unwrap();

		assert_eq!(config, FormatterConfig::default());
		assert_eq!(config.locale(), Locale::RuRu);
		assert_eq!(config.timezone(), Tz::UTC);
	}

	#[rstest]
	fn test_blank_values_fall_back() {
		let config =
			FormatterConfig::from_lookup(lookup(&[("APP_LOCALE", ""), ("APP_TZ", "  ")])).unwrap();

		assert_eq!(config, FormatterConfig::default());
	}

	#[rstest]
	fn test_reads_both_variables() {
		let config = FormatterConfig::from_lookup(lookup(&[
			("APP_LOCALE", "en-US"),
			("APP_TZ", "Europe/Moscow"),
		]))
		.unwrap();

		assert_eq!(config.locale(), Locale::EnUs);
		assert_eq!(config.timezone(), Tz::Europe__Moscow);
	}

	#[rstest]
	#[case(&[("APP_LOCALE", "fr-FR")], ConfigError::UnsupportedLocale("fr-FR".into()))]
	#[case(&[("APP_TZ", "Mars/Olympus")], ConfigError::UnknownTimeZone("Mars/Olympus".into()))]
	fn test_invalid_values_error(#[case] vars: &[(&str, &str)], #[case] expected: ConfigError) {
		assert_eq!(FormatterConfig::from_lookup(lookup(vars)), Err(expected));
	}

	#[rstest]
	fn test_serde_shape() {
		let config = FormatterConfig::new("en-US", "Asia/Tokyo").unwrap();

		let json = serde_json::to_value(config).unwrap();
		assert_eq!(
			json,
			serde_json::json!({"locale": "en-US", "timezone": "Asia/Tokyo"})
		);

		let back: FormatterConfig = serde_json::from_value(json).unwrap();
		assert_eq!(back, config);
	}

	#[rstest]
	fn test_deserialize_rejects_unknown_zone() {
		let result: Result<FormatterConfig, _> =
			serde_json::from_str(r#"{"locale":"ru-RU","timezone":"Nowhere/City"}"#);

		assert!(result.is_err());
	}
}
