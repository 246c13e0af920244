//! Named formatting presets.
//!
//! | Preset       | ru-RU example         | Options                                   |
//! |--------------|-----------------------|-------------------------------------------|
//! | `short_date` | `01.01.2025`          | day, month 2-digit; year numeric          |
//! | `long_date`  | `1 января 2025`       | day numeric; month long; year numeric     |
//! | `time`       | `14:30:45`            | hour, minute, second 2-digit              |
//! | `date_time`  | `01.01.2025 14:30:45` | `short_date` and `time` combined          |
//! | `currency`   | `1 234,50 $`          | currency style, 2 fraction digits         |
//! | `percent`    | `0,00%`               | percent style, 2 fraction digits          |
//! | `compact`    | `1 млн`               | compact notation, short display           |

use chrono::{DateTime, TimeZone};

use crate::config::FormatterConfig;
use crate::date::{DateTimeFormatOptions, format_date, format_timestamp};
use crate::error::FormatError;
use crate::number::{NumberFormatOptions, format_number};

/// Option sets behind each [`Formatters`] method.
pub mod presets {
	use crate::date::{DateTimeFormatOptions, MonthFormat, NumericWidth};
	use crate::number::{CompactDisplay, NumberFormatOptions};

	/// `01.01.2025`
	pub fn short_date() -> DateTimeFormatOptions {
		DateTimeFormatOptions::new()
			.day(NumericWidth::TwoDigit)
			.month(MonthFormat::TwoDigit)
			.year(NumericWidth::Numeric)
	}

	/// `1 января 2025`
	pub fn long_date() -> DateTimeFormatOptions {
		DateTimeFormatOptions::new()
			.day(NumericWidth::Numeric)
			.month(MonthFormat::Long)
			.year(NumericWidth::Numeric)
	}

	/// `14:30:45`
	pub fn time() -> DateTimeFormatOptions {
		DateTimeFormatOptions::new()
			.hour(NumericWidth::TwoDigit)
			.minute(NumericWidth::TwoDigit)
			.second(NumericWidth::TwoDigit)
	}

	/// `01.01.2025 14:30:45`
	pub fn date_time() -> DateTimeFormatOptions {
		DateTimeFormatOptions {
			hour: Some(NumericWidth::TwoDigit),
			minute: Some(NumericWidth::TwoDigit),
			second: Some(NumericWidth::TwoDigit),
			..short_date()
		}
	}

	/// Currency with exactly two fraction digits.
	pub fn currency(code: &str) -> NumberFormatOptions {
		NumberFormatOptions::currency(code).fraction_digits(2, 2)
	}

	/// Percent with exactly two fraction digits.
	pub fn percent() -> NumberFormatOptions {
		NumberFormatOptions::percent().fraction_digits(2, 2)
	}

	/// Compact notation, short units.
	pub fn compact() -> NumberFormatOptions {
		NumberFormatOptions::new().compact(CompactDisplay::Short)
	}
}

/// Formatting entry point bound to one [`FormatterConfig`].
///
/// ```ignore
/// let fmt = Formatters::new(FormatterConfig::default());
/// assert_eq!(fmt.short_date(&date), "01.01.2025");
/// assert_eq!(fmt.percent(0.0)?, "0,00%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatters {
	config: FormatterConfig,
}

impl Formatters {
	/// Bind to `config`.
	pub fn new(config: FormatterConfig) -> Self {
		Self { config }
	}

	/// The bound configuration.
	pub fn config(&self) -> &FormatterConfig {
		&self.config
	}

	/// [`format_number`] with the bound configuration.
	pub fn number(&self, value: f64, options: &NumberFormatOptions) -> Result<String, FormatError> {
		format_number(&self.config, value, options)
	}

	/// [`format_date`] with the bound configuration.
	pub fn date<Z: TimeZone>(&self, value: &DateTime<Z>, options: &DateTimeFormatOptions) -> String {
		format_date(&self.config, value, options)
	}

	/// [`format_timestamp`] with the bound configuration.
	pub fn timestamp(
		&self,
		millis: f64,
		options: &DateTimeFormatOptions,
	) -> Result<String, FormatError> {
		format_timestamp(&self.config, millis, options)
	}

	/// See [`presets::short_date`].
	pub fn short_date<Z: TimeZone>(&self, value: &DateTime<Z>) -> String {
		self.date(value, &presets::short_date())
	}

	/// See [`presets::long_date`].
	pub fn long_date<Z: TimeZone>(&self, value: &DateTime<Z>) -> String {
		self.date(value, &presets::long_date())
	}

	/// See [`presets::time`].
	pub fn time<Z: TimeZone>(&self, value: &DateTime<Z>) -> String {
		self.date(value, &presets::time())
	}

	/// See [`presets::date_time`].
	pub fn date_time<Z: TimeZone>(&self, value: &DateTime<Z>) -> String {
		self.date(value, &presets::date_time())
	}

	/// See [`presets::currency`].
	pub fn currency(&self, value: f64, code: &str) -> Result<String, FormatError> {
		self.number(value, &presets::currency(code))
	}

	/// See [`presets::percent`].
	pub fn percent(&self, value: f64) -> Result<String, FormatError> {
		self.number(value, &presets::percent())
	}

	/// See [`presets::compact`].
	pub fn compact(&self, value: f64) -> Result<String, FormatError> {
		self.number(value, &presets::compact())
	}
}

impl From<FormatterConfig> for Formatters {
	fn from(config: FormatterConfig) -> Self {
		Self::new(config)
	}
}
