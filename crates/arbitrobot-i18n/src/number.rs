//! Number formatting.
//!
//! Values are rounded on their shortest round-tripping decimal form, half away
//! from zero, then laid out with the configured locale's separators and
//! currency/percent conventions. Nothing here consults the host locale.
//!
//! ```ignore
//! use arbitrobot_i18n::{FormatterConfig, NumberFormatOptions, format_number};
//!
//! let config = FormatterConfig::default(); // ru-RU, UTC
//! let text = format_number(&config, 1234.5, &NumberFormatOptions::currency("USD").fraction_digits(2, 2))?;
//! assert_eq!(text, "1\u{a0}234,50\u{a0}$");
//! ```

use crate::config::FormatterConfig;
use crate::error::FormatError;
use crate::locale::{CurrencyPlacement, Locale, LocaleData, WORD_GAP, unit_gap};

/// Largest accepted fraction digit count.
pub const MAX_FRACTION_DIGITS: u8 = 20;

/// Currencies written without minor units.
const ZERO_DECIMAL_CURRENCIES: &[&str] = &["CLP", "ISK", "JPY", "KRW", "VND"];

/// What the number represents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NumberStyle {
	/// Plain number.
	#[default]
	Decimal,
	/// Amount in the given ISO 4217 currency.
	Currency(String),
	/// Ratio rendered as a percentage (`0.25` is `25%`).
	Percent,
}

/// Standard or compact (`1,2 тыс.`, `1.2K`) notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Notation {
	/// Full digits.
	#[default]
	Standard,
	/// Scaled to thousands, millions, billions or trillions.
	Compact,
}

/// Unit spelling in compact notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompactDisplay {
	/// `1M`, `1 млн`
	#[default]
	Short,
	/// `1 million`, `1 миллион`
	Long,
}

/// Options for [`format_number`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatOptions {
	/// Style.
	pub style: NumberStyle,
	/// Minimum digits after the decimal separator.
	pub minimum_fraction_digits: Option<u8>,
	/// Maximum digits after the decimal separator.
	pub maximum_fraction_digits: Option<u8>,
	/// Whether to insert group separators.
	pub use_grouping: bool,
	/// Notation.
	pub notation: Notation,
	/// Unit spelling when `notation` is compact.
	pub compact_display: CompactDisplay,
}

impl Default for NumberFormatOptions {
	fn default() -> Self {
		Self {
			style: NumberStyle::Decimal,
			minimum_fraction_digits: None,
			maximum_fraction_digits: None,
			use_grouping: true,
			notation: Notation::Standard,
			compact_display: CompactDisplay::Short,
		}
	}
}

impl NumberFormatOptions {
	/// Decimal style with default digits.
	pub fn new() -> Self {
		Self::default()
	}

	/// Currency style.
	pub fn currency(code: impl Into<String>) -> Self {
		Self {
			style: NumberStyle::Currency(code.into()),
			..Self::default()
		}
	}

	/// Percent style.
	pub fn percent() -> Self {
		Self {
			style: NumberStyle::Percent,
			..Self::default()
		}
	}

	/// Compact notation with the given unit spelling.
	pub fn compact(mut self, display: CompactDisplay) -> Self {
		self.notation = Notation::Compact;
		self.compact_display = display;
		self
	}

	/// Sets both fraction digit bounds.
	pub fn fraction_digits(mut self, min: u8, max: u8) -> Self {
		self.minimum_fraction_digits = Some(min);
		self.maximum_fraction_digits = Some(max);
		self
	}

	/// Sets the minimum fraction digits.
	pub fn minimum_fraction_digits(mut self, digits: u8) -> Self {
		self.minimum_fraction_digits = Some(digits);
		self
	}

	/// Sets the maximum fraction digits.
	pub fn maximum_fraction_digits(mut self, digits: u8) -> Self {
		self.maximum_fraction_digits = Some(digits);
		self
	}

	/// Enables or disables group separators.
	pub fn grouping(mut self, enabled: bool) -> Self {
		self.use_grouping = enabled;
		self
	}

	fn has_explicit_digits(&self) -> bool {
		self.minimum_fraction_digits.is_some() || self.maximum_fraction_digits.is_some()
	}

	/// Resolves the fraction digit range, filling the unset side from the style default.
	fn fraction_range(&self, currency: Option<&str>) -> Result<(u8, u8), FormatError> {
		let (default_min, default_max) = match (&self.style, currency) {
			(NumberStyle::Currency(_), Some(code)) if ZERO_DECIMAL_CURRENCIES.contains(&code) => (0, 0),
			(NumberStyle::Currency(_), _) => (2, 2),
			(NumberStyle::Percent, _) => (0, 0),
			(NumberStyle::Decimal, _) => (0, 3),
		};
		let (min, max) = match (self.minimum_fraction_digits, self.maximum_fraction_digits) {
			(None, None) => (default_min, default_max),
			(Some(min), None) => (min, default_max.max(min)),
			(None, Some(max)) => (default_min.min(max), max),
			(Some(min), Some(max)) => (min, max),
		};
		if min > max || max > MAX_FRACTION_DIGITS {
			return Err(FormatError::FractionDigits { min, max });
		}
		Ok((min, max))
	}
}

/// Decimal digits of a non-negative value: `0.d₁d₂… × 10^point`.
///
/// No leading or trailing zeros are stored; zero has no digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
	digits: Vec<u8>,
	point: i32,
}

impl Decimal {
	fn from_f64(value: f64) -> Self {
		// `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e3".
		let repr = format!("{:e}", value.abs());
		let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));
		let exponent: i32 = exponent.parse().unwrap_or(0);
		let digits: Vec<u8> = mantissa
			.bytes()
			.filter(u8::is_ascii_digit)
			.map(|b| b - b'0')
			.collect();
		let mut decimal = Self {
			digits,
			point: exponent + 1,
		};
		decimal.trim();
		decimal
	}

	fn is_zero(&self) -> bool {
		self.digits.is_empty()
	}

	fn trim(&mut self) {
		while self.digits.last() == Some(&0) {
			self.digits.pop();
		}
		let leading = self.digits.iter().take_while(|d| **d == 0).count();
		if leading > 0 {
			self.digits.drain(..leading);
			self.point -= leading as i32;
		}
		if self.digits.is_empty() {
			self.point = 0;
		}
	}

	/// Keeps the first `keep` digits, rounding half away from zero.
	fn round_to_digits(&mut self, keep: i32) {
		if keep < 0 {
			self.digits.clear();
			self.point = 0;
			return;
		}
		let keep = keep as usize;
		if keep >= self.digits.len() {
			return;
		}
		let round_up = self.digits[keep] >= 5;
		self.digits.truncate(keep);
		if round_up {
			loop {
				match self.digits.last_mut() {
					Some(9) => {
						self.digits.pop();
					}
					Some(digit) => {
						*digit += 1;
						break;
					}
					None => {
						self.digits.push(1);
						self.point += 1;
						break;
					}
				}
			}
		}
		self.trim();
	}

	fn round_to_fraction(&mut self, fraction_digits: u8) {
		if !self.is_zero() {
			self.round_to_digits(self.point + i32::from(fraction_digits));
		}
	}

	fn round_to_significant(&mut self, significant: i32) {
		self.round_to_digits(significant);
	}

	fn shift(&mut self, places: i32) {
		if !self.is_zero() {
			self.point += places;
		}
	}

	/// Integer digits (at least "0") and fraction digits (possibly empty).
	fn split(&self) -> (String, String) {
		let digit = |d: &u8| char::from(b'0' + d);
		if self.point <= 0 {
			let fraction = std::iter::repeat_n('0', self.point.unsigned_abs() as usize)
				.chain(self.digits.iter().map(digit))
				.collect();
			return ("0".to_string(), fraction);
		}
		let point = self.point as usize;
		let integer = if point >= self.digits.len() {
			self.digits
				.iter()
				.map(digit)
				.chain(std::iter::repeat_n('0', point - self.digits.len()))
				.collect()
		} else {
			self.digits[..point].iter().map(digit).collect()
		};
		let fraction = self.digits.get(point..).unwrap_or(&[]).iter().map(digit).collect();
		(integer, fraction)
	}

	fn integer_value(&self) -> u64 {
		self.split().0.parse().unwrap_or(u64::MAX)
	}

	fn has_fraction(&self) -> bool {
		self.digits.len() as i32 > self.point
	}
}

struct Layout<'a> {
	data: &'a LocaleData,
	min_fraction: u8,
	grouping: bool,
	/// Integer digits needed before grouping kicks in.
	min_grouping_digits: usize,
}

impl Layout<'_> {
	fn render(&self, decimal: &Decimal) -> String {
		let (integer, mut fraction) = decimal.split();
		while fraction.len() < usize::from(self.min_fraction) {
			fraction.push('0');
		}

		let mut out = String::with_capacity(integer.len() + fraction.len() + 8);
		if self.grouping && integer.len() >= self.min_grouping_digits.max(4) {
			for (i, c) in integer.chars().enumerate() {
				if i > 0 && (integer.len() - i) % 3 == 0 {
					out.push(self.data.group);
				}
				out.push(c);
			}
		} else {
			out.push_str(&integer);
		}
		if !fraction.is_empty() {
			out.push(self.data.decimal);
			out.push_str(&fraction);
		}
		out
	}
}

/// Format `value` in the configured locale.
///
/// # Errors
///
/// Fails for non-finite values, malformed currency codes and invalid
/// fraction digit bounds.
pub fn format_number(
	config: &FormatterConfig,
	value: f64,
	options: &NumberFormatOptions,
) -> Result<String, FormatError> {
	if !value.is_finite() {
		return Err(FormatError::NonFiniteNumber(value));
	}
	let currency = match &options.style {
		NumberStyle::Currency(code) => Some(normalize_currency(code)?),
		_ => None,
	};
	let (min_fraction, max_fraction) = options.fraction_range(currency.as_deref())?;
	let locale = config.locale();
	let data = locale.data();

	let mut decimal = Decimal::from_f64(value);
	if options.style == NumberStyle::Percent {
		decimal.shift(2);
	}

	let body = match options.notation {
		Notation::Standard => {
			decimal.round_to_fraction(max_fraction);
			Layout {
				data,
				min_fraction,
				grouping: options.use_grouping,
				min_grouping_digits: 1,
			}
			.render(&decimal)
		}
		Notation::Compact => {
			let explicit = options.has_explicit_digits().then_some((min_fraction, max_fraction));
			compact_body(locale, data, decimal, explicit, options)
		}
	};

	let negative = value.is_sign_negative();
	Ok(decorate(locale, data, &options.style, currency.as_deref(), negative, body))
}

/// Plain fixed-point text with `digits` fraction digits, e.g. `fixed(1234.5, 2)` is `"1234.50"`.
///
/// Uses `.` and no grouping regardless of locale. A negative value keeps its
/// sign even when it rounds to zero (`fixed(-0.001, 2)` is `"-0.00"`); negative
/// zero itself prints unsigned.
pub fn fixed(value: f64, digits: u8) -> Result<String, FormatError> {
	if !value.is_finite() {
		return Err(FormatError::NonFiniteNumber(value));
	}
	if digits > MAX_FRACTION_DIGITS {
		return Err(FormatError::FractionDigits {
			min: digits,
			max: digits,
		});
	}
	let mut decimal = Decimal::from_f64(value);
	decimal.round_to_fraction(digits);
	let (integer, mut fraction) = decimal.split();
	while fraction.len() < usize::from(digits) {
		fraction.push('0');
	}
	let sign = if value < 0.0 { "-" } else { "" };
	Ok(if fraction.is_empty() {
		format!("{sign}{integer}")
	} else {
		format!("{sign}{integer}.{fraction}")
	})
}

fn normalize_currency(code: &str) -> Result<String, FormatError> {
	let trimmed = code.trim();
	if trimmed.len() == 3 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
		Ok(trimmed.to_ascii_uppercase())
	} else {
		Err(FormatError::InvalidCurrencyCode(code.to_string()))
	}
}

fn compact_body(
	locale: Locale,
	data: &LocaleData,
	mut decimal: Decimal,
	explicit: Option<(u8, u8)>,
	options: &NumberFormatOptions,
) -> String {
	let mut unit = if decimal.is_zero() {
		0
	} else {
		((decimal.point - 1).max(0) / 3).min(4)
	};
	decimal.shift(-3 * unit);

	let round = |decimal: &mut Decimal| match explicit {
		Some((_, max)) => decimal.round_to_fraction(max),
		None if decimal.point <= 1 => decimal.round_to_significant(2),
		None => decimal.round_to_fraction(0),
	};
	round(&mut decimal);
	// 999 950 rounds to 1000 thousands, which reads as 1 million.
	if unit < 4 && decimal.point > 3 {
		unit += 1;
		decimal.shift(-3);
		round(&mut decimal);
	}

	let number = Layout {
		data,
		min_fraction: explicit.map_or(0, |(min, _)| min),
		grouping: options.use_grouping,
		min_grouping_digits: 5,
	}
	.render(&decimal);

	if unit == 0 {
		return number;
	}
	let names = &data.compact_units[(unit - 1) as usize];
	match options.compact_display {
		CompactDisplay::Short => format!("{number}{}{}", unit_gap(locale), names.short),
		CompactDisplay::Long => {
			let form = data.plural_index(decimal.integer_value(), decimal.has_fraction());
			format!("{number}{WORD_GAP}{}", names.long[form])
		}
	}
}

fn decorate(
	locale: Locale,
	data: &LocaleData,
	style: &NumberStyle,
	currency: Option<&str>,
	negative: bool,
	body: String,
) -> String {
	let sign = if negative { "-" } else { "" };
	match (style, currency) {
		(NumberStyle::Currency(_), Some(code)) => {
			let symbol = data.currency_symbol(code);
			match data.currency_placement {
				CurrencyPlacement::After => {
					format!("{sign}{body}{}{}", unit_gap(locale), symbol.unwrap_or(code))
				}
				CurrencyPlacement::Before => match symbol {
					Some(symbol) => format!("{sign}{symbol}{body}"),
					None => format!("{sign}{code}{WORD_GAP}{body}"),
				},
			}
		}
		(NumberStyle::Percent, _) => format!("{sign}{body}%"),
		_ => format!("{sign}{body}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::locale::Locale;
	use chrono_tz::Tz;
	use proptest::prelude::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn ru() -> FormatterConfig {
		FormatterConfig::from_parts(Locale::RuRu, Tz::UTC)
	}

	#[fixture]
	fn en() -> FormatterConfig {
		FormatterConfig::from_parts(Locale::EnUs, Tz::UTC)
	}

	fn nbsp(s: &str) -> String {
		s.replace(' ', "\u{a0}")
	}

	#[rstest]
	#[case(1234.5, "1 234,5")]
	#[case(0.0, "0")]
	#[case(1234567.891, "1 234 567,891")]
	#[case(1.0005, "1,001")]
	#[case(-42.0, "-42")]
	#[case(999.9999, "1 000")]
	fn test_decimal_ru(ru: FormatterConfig, #[case] value: f64, #[case] expected: &str) {
		let text = format_number(&ru, value, &NumberFormatOptions::new()).unwrap();
		assert_eq!(text, nbsp(expected));
	}

	#[rstest]
	#[case(1234.5, "1,234.5")]
	#[case(0.125, "0.125")]
	#[case(1e21, "1,000,000,000,000,000,000,000")]
	#[case(5e-7, "0")]
	fn test_decimal_en(en: FormatterConfig, #[case] value: f64, #[case] expected: &str) {
		assert_eq!(
			format_number(&en, value, &NumberFormatOptions::new()).unwrap(),
			expected
		);
	}

	#[rstest]
	fn test_rounding_is_half_away_from_zero(en: FormatterConfig) {
		let opts = NumberFormatOptions::new().maximum_fraction_digits(0);

		assert_eq!(format_number(&en, 2.5, &opts).unwrap(), "3");
		assert_eq!(format_number(&en, -2.5, &opts).unwrap(), "-3");
		assert_eq!(format_number(&en, 0.5, &opts).unwrap(), "1");
		assert_eq!(format_number(&en, 0.05, &opts).unwrap(), "0");
	}

	#[rstest]
	fn test_negative_zero_keeps_sign(en: FormatterConfig) {
		let opts = NumberFormatOptions::new().maximum_fraction_digits(0);

		assert_eq!(format_number(&en, -0.2, &opts).unwrap(), "-0");
	}

	#[rstest]
	fn test_grouping_can_be_disabled(ru: FormatterConfig) {
		let opts = NumberFormatOptions::new().grouping(false);

		assert_eq!(format_number(&ru, 1234567.0, &opts).unwrap(), "1234567");
	}

	#[rstest]
	#[case(Locale::RuRu, "USD", 1234.5, "1 234,50 $")]
	#[case(Locale::RuRu, "rub", 10.0, "10,00 ₽")]
	#[case(Locale::RuRu, "CHF", 1.0, "1,00 CHF")]
	#[case(Locale::RuRu, "JPY", 1234.6, "1 235 ¥")]
	#[case(Locale::EnUs, "USD", 1234.5, "$1,234.50")]
	#[case(Locale::EnUs, "USD", -3.0, "-$3.00")]
	#[case(Locale::EnUs, "CHF", 1.0, "CHF 1.00")]
	fn test_currency(
		#[case] locale: Locale,
		#[case] code: &str,
		#[case] value: f64,
		#[case] expected: &str,
	) {
		let config = FormatterConfig::from_parts(locale, Tz::UTC);
		let text = format_number(&config, value, &NumberFormatOptions::currency(code)).unwrap();
		assert_eq!(text, nbsp(expected));
	}

	#[rstest]
	#[case("US")]
	#[case("US$")]
	#[case("")]
	fn test_malformed_currency_code(ru: FormatterConfig, #[case] code: &str) {
		assert_eq!(
			format_number(&ru, 1.0, &NumberFormatOptions::currency(code)),
			Err(FormatError::InvalidCurrencyCode(code.to_string()))
		);
	}

	#[rstest]
	fn test_percent_scales_exactly(en: FormatterConfig) {
		let opts = NumberFormatOptions::percent().fraction_digits(2, 2);

		assert_eq!(format_number(&en, 0.07, &opts).unwrap(), "7.00%");
		assert_eq!(format_number(&en, 0.123456, &opts).unwrap(), "12.35%");
		assert_eq!(
			format_number(&en, 0.5, &NumberFormatOptions::percent()).unwrap(),
			"50%"
		);
	}

	#[rstest]
	#[case(0.0, "0")]
	#[case(999.0, "999")]
	#[case(1000.0, "1 тыс.")]
	#[case(1234.0, "1,2 тыс.")]
	#[case(15_300.0, "15 тыс.")]
	#[case(999_999.0, "1 млн")]
	#[case(1_000_000.0, "1 млн")]
	#[case(2_500_000_000.0, "2,5 млрд")]
	#[case(-4_200_000_000_000.0, "-4,2 трлн")]
	#[case(0.1234, "0,12")]
	fn test_compact_short_ru(ru: FormatterConfig, #[case] value: f64, #[case] expected: &str) {
		let opts = NumberFormatOptions::new().compact(CompactDisplay::Short);
		assert_eq!(format_number(&ru, value, &opts).unwrap(), nbsp(expected));
	}

	#[rstest]
	#[case(1000.0, "1K")]
	#[case(1_000_000.0, "1M")]
	#[case(1_550.0, "1.6K")]
	#[case(123_456.0, "123K")]
	#[case(1e16, "10,000T")]
	fn test_compact_short_en(en: FormatterConfig, #[case] value: f64, #[case] expected: &str) {
		let opts = NumberFormatOptions::new().compact(CompactDisplay::Short);
		assert_eq!(format_number(&en, value, &opts).unwrap(), expected);
	}

	#[rstest]
	#[case(Locale::RuRu, 1000.0, "1 тысяча")]
	#[case(Locale::RuRu, 3000.0, "3 тысячи")]
	#[case(Locale::RuRu, 5_000_000.0, "5 миллионов")]
	#[case(Locale::RuRu, 1_500_000.0, "1,5 миллиона")]
	#[case(Locale::EnUs, 2_000_000_000.0, "2 billion")]
	fn test_compact_long(#[case] locale: Locale, #[case] value: f64, #[case] expected: &str) {
		let config = FormatterConfig::from_parts(locale, Tz::UTC);
		let opts = NumberFormatOptions::new().compact(CompactDisplay::Long);
		assert_eq!(format_number(&config, value, &opts).unwrap(), nbsp(expected));
	}

	#[rstest]
	fn test_compact_with_explicit_digits(en: FormatterConfig) {
		let opts = NumberFormatOptions::new()
			.compact(CompactDisplay::Short)
			.fraction_digits(2, 2);

		assert_eq!(format_number(&en, 1234.0, &opts).unwrap(), "1.23K");
	}

	#[rstest]
	#[case(f64::NAN)]
	#[case(f64::INFINITY)]
	#[case(f64::NEG_INFINITY)]
	fn test_non_finite_rejected(ru: FormatterConfig, #[case] value: f64) {
		assert!(matches!(
			format_number(&ru, value, &NumberFormatOptions::new()),
			Err(FormatError::NonFiniteNumber(_))
		));
	}

	#[rstest]
	#[case(NumberFormatOptions::new().fraction_digits(3, 1), 3, 1)]
	#[case(NumberFormatOptions::new().maximum_fraction_digits(21), 0, 21)]
	fn test_invalid_fraction_range(
		ru: FormatterConfig,
		#[case] opts: NumberFormatOptions,
		#[case] min: u8,
		#[case] max: u8,
	) {
		assert_eq!(
			format_number(&ru, 1.0, &opts),
			Err(FormatError::FractionDigits { min, max })
		);
	}

	#[rstest]
	fn test_one_sided_fraction_bounds(en: FormatterConfig) {
		let min_only = NumberFormatOptions::new().minimum_fraction_digits(5);
		let max_only = NumberFormatOptions::currency("USD").maximum_fraction_digits(0);

		assert_eq!(format_number(&en, 1.5, &min_only).unwrap(), "1.50000");
		assert_eq!(format_number(&en, 1.5, &max_only).unwrap(), "$2");
	}

	#[rstest]
	#[case(1234.5, 2, "1234.50")]
	#[case(0.005, 2, "0.01")]
	#[case(-1.25, 1, "-1.3")]
	#[case(-0.001, 2, "-0.00")]
	#[case(-0.4, 0, "-0")]
	#[case(-0.0, 2, "0.00")]
	#[case(42.0, 0, "42")]
	fn test_fixed(#[case] value: f64, #[case] digits: u8, #[case] expected: &str) {
		assert_eq!(fixed(value, digits).unwrap(), expected);
	}

	proptest! {
		#[test]
		fn prop_fixed_digits_match_request(value in -1e9f64..1e9, digits in 0u8..6) {
			let text = fixed(value, digits).unwrap();
			let fraction_len = text.split_once('.').map_or(0, |(_, f)| f.len());
			prop_assert_eq!(fraction_len, usize::from(digits));
		}

		#[test]
		fn prop_grouped_digits_match_ungrouped(value in -1e12f64..1e12) {
			let config = FormatterConfig::from_parts(Locale::EnUs, Tz::UTC);
			let grouped = format_number(&config, value, &NumberFormatOptions::new()).unwrap();
			let plain = format_number(&config, value, &NumberFormatOptions::new().grouping(false)).unwrap();
			prop_assert_eq!(grouped.replace(',', ""), plain);
		}
	}
}
