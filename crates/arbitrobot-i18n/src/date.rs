//! Date and time formatting.
//!
//! Instants are converted into the configured time zone (or a per-call
//! override) before any field is read, so the host's local zone never
//! influences the output.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::config::FormatterConfig;
use crate::error::FormatError;
use crate::locale::{DateOrder, LocaleData};

/// Largest absolute millisecond timestamp a date may carry (±100 000 000 days).
pub const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// Width of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericWidth {
	/// As many digits as needed.
	Numeric,
	/// Exactly two digits.
	TwoDigit,
}

/// Month representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFormat {
	/// `1`
	Numeric,
	/// `01`
	TwoDigit,
	/// `января`, `January`
	Long,
	/// `янв.`, `Jan`
	Short,
}

/// Fields to render and how. Unset fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeFormatOptions {
	/// Day of month.
	pub day: Option<NumericWidth>,
	/// Month.
	pub month: Option<MonthFormat>,
	/// Year.
	pub year: Option<NumericWidth>,
	/// Hour.
	pub hour: Option<NumericWidth>,
	/// Minute.
	pub minute: Option<NumericWidth>,
	/// Second.
	pub second: Option<NumericWidth>,
	/// Forces a 12-hour (`true`) or 24-hour (`false`) clock.
	pub hour12: Option<bool>,
	/// Replaces the configured time zone for this call.
	pub time_zone: Option<Tz>,
}

impl DateTimeFormatOptions {
	/// No fields set; formats as a numeric date.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the day field.
	pub fn day(mut self, width: NumericWidth) -> Self {
		self.day = Some(width);
		self
	}

	/// Sets the month field.
	pub fn month(mut self, format: MonthFormat) -> Self {
		self.month = Some(format);
		self
	}

	/// Sets the year field.
	pub fn year(mut self, width: NumericWidth) -> Self {
		self.year = Some(width);
		self
	}

	/// Sets the hour field.
	pub fn hour(mut self, width: NumericWidth) -> Self {
		self.hour = Some(width);
		self
	}

	/// Sets the minute field.
	pub fn minute(mut self, width: NumericWidth) -> Self {
		self.minute = Some(width);
		self
	}

	/// Sets the second field.
	pub fn second(mut self, width: NumericWidth) -> Self {
		self.second = Some(width);
		self
	}

	/// Forces the clock style.
	pub fn hour12(mut self, hour12: bool) -> Self {
		self.hour12 = Some(hour12);
		self
	}

	/// Overrides the configured time zone.
	pub fn time_zone(mut self, tz: Tz) -> Self {
		self.time_zone = Some(tz);
		self
	}

	fn has_date(&self) -> bool {
		self.day.is_some() || self.month.is_some() || self.year.is_some()
	}

	fn has_time(&self) -> bool {
		self.hour.is_some() || self.minute.is_some() || self.second.is_some()
	}
}

/// Format an instant in the configured locale and time zone.
///
/// Options without any field render year, month and day numerically.
pub fn format_date<Z: TimeZone>(
	config: &FormatterConfig,
	value: &DateTime<Z>,
	options: &DateTimeFormatOptions,
) -> String {
	let options = if options.has_date() || options.has_time() {
		options.clone()
	} else {
		DateTimeFormatOptions {
			day: Some(NumericWidth::Numeric),
			month: Some(MonthFormat::Numeric),
			year: Some(NumericWidth::Numeric),
			..options.clone()
		}
	};
	let tz = options.time_zone.unwrap_or(config.timezone());
	let local = value.with_timezone(&tz);
	let data = config.locale().data();

	let date = options.has_date().then(|| date_part(data, &local, &options));
	let time = options.has_time().then(|| time_part(data, &local, &options));

	match (date, time) {
		(Some(date), Some(time)) => format!("{date}{}{time}", data.date_time_separator),
		(Some(date), None) => date,
		(None, Some(time)) => time,
		(None, None) => String::new(),
	}
}

/// Format a Unix timestamp in milliseconds.
///
/// # Errors
///
/// [`FormatError::InvalidTimestamp`] for NaN, infinities and values beyond
/// [`MAX_TIMESTAMP_MS`] or the calendar range.
pub fn format_timestamp(
	config: &FormatterConfig,
	millis: f64,
	options: &DateTimeFormatOptions,
) -> Result<String, FormatError> {
	if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MS {
		return Err(FormatError::InvalidTimestamp(millis));
	}
	let instant = DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)
		.ok_or(FormatError::InvalidTimestamp(millis))?;
	Ok(format_date(config, &instant, options))
}

fn pad(value: u32, two_digits: bool) -> String {
	if two_digits {
		format!("{:02}", value % 100)
	} else {
		value.to_string()
	}
}

fn year_text(year: i32, width: NumericWidth) -> String {
	match width {
		NumericWidth::Numeric => year.to_string(),
		NumericWidth::TwoDigit => format!("{:02}", year.rem_euclid(100)),
	}
}

fn date_part<D: Datelike>(data: &LocaleData, local: &D, options: &DateTimeFormatOptions) -> String {
	let month_index = local.month0() as usize;
	let year = options.year.map(|width| year_text(local.year(), width));

	let named_month = match options.month {
		Some(MonthFormat::Long) if options.day.is_some() => Some(data.months_long[month_index]),
		Some(MonthFormat::Long) => Some(data.months_standalone[month_index]),
		Some(MonthFormat::Short) if options.day.is_some() => Some(data.months_short[month_index]),
		Some(MonthFormat::Short) => Some(data.months_short_standalone[month_index]),
		_ => None,
	};

	if let Some(month) = named_month {
		let day = options.day.map(|width| pad(local.day(), width == NumericWidth::TwoDigit));
		return textual_date(data, day, month, year);
	}

	let day = options.day.map(|width| {
		pad(
			local.day(),
			width == NumericWidth::TwoDigit || data.pad_numeric_date,
		)
	});
	let month = options.month.map(|format| {
		pad(
			local.month(),
			format == MonthFormat::TwoDigit || data.pad_numeric_date,
		)
	});
	let ordered = match data.date_order {
		DateOrder::DayMonthYear => [day, month, year],
		DateOrder::MonthDayYear => [month, day, year],
	};
	let separator = data.date_separator.to_string();
	ordered
		.into_iter()
		.flatten()
		.collect::<Vec<_>>()
		.join(separator.as_str())
}

fn textual_date(
	data: &LocaleData,
	day: Option<String>,
	month: &str,
	year: Option<String>,
) -> String {
	match data.date_order {
		// 1 января 2025
		DateOrder::DayMonthYear => [day, Some(month.to_string()), year]
			.into_iter()
			.flatten()
			.collect::<Vec<_>>()
			.join(" "),
		// January 1, 2025
		DateOrder::MonthDayYear => {
			let mut out = month.to_string();
			if let Some(day) = day {
				out.push(' ');
				out.push_str(&day);
				if year.is_some() {
					out.push(',');
				}
			}
			if let Some(year) = year {
				out.push(' ');
				out.push_str(&year);
			}
			out
		}
	}
}

fn time_part<T: Timelike>(data: &LocaleData, local: &T, options: &DateTimeFormatOptions) -> String {
	let hour12 = options.hour12.unwrap_or(data.hour12_default);
	let mut fields = Vec::with_capacity(3);

	if let Some(width) = options.hour {
		if hour12 {
			let (_, hour) = local.hour12();
			fields.push(pad(hour, width == NumericWidth::TwoDigit));
		} else {
			fields.push(pad(local.hour(), true));
		}
	}
	if options.minute.is_some() {
		fields.push(pad(local.minute(), true));
	}
	if options.second.is_some() {
		fields.push(pad(local.second(), true));
	}

	let mut out = fields.join(":");
	if hour12 && options.hour.is_some() {
		out.push_str(if local.hour12().0 { " PM" } else { " AM" });
	}
	out
}
