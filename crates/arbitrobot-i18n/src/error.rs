//! Error types for configuration and formatting.

use thiserror::Error;

/// Problems building a [`FormatterConfig`](crate::FormatterConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// The locale tag is not one of the supported locales.
	#[error("unsupported locale: {0:?}")]
	UnsupportedLocale(String),

	/// The name is not an IANA time zone known to the tz database.
	#[error("unknown time zone: {0:?}")]
	UnknownTimeZone(String),

	/// A process-wide configuration was installed earlier.
	#[error("formatter configuration is already installed")]
	AlreadyInstalled,
}

/// Invalid input to a formatting call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
	/// NaN or an infinity was passed as a number.
	#[error("cannot format non-finite number {0}")]
	NonFiniteNumber(f64),

	/// A millisecond timestamp outside the representable date range.
	#[error("invalid time value: {0}")]
	InvalidTimestamp(f64),

	/// A currency code that is not three ASCII letters.
	#[error("invalid currency code: {0:?}")]
	InvalidCurrencyCode(String),

	/// Fraction digit bounds that are inverted or above the maximum.
	#[error("fraction digits out of range: minimum {min}, maximum {max}")]
	FractionDigits {
		/// Resolved minimum.
		min: u8,
		/// Resolved maximum.
		max: u8,
	},
}
