//! Supported locales and their formatting tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const NBSP: &str = "\u{a0}";

/// A locale the formatters have tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
	/// Russian (Russia), the site default.
	#[default]
	RuRu,
	/// English (United States).
	EnUs,
}

impl Locale {
	/// Every supported locale.
	pub const ALL: [Locale; 2] = [Locale::RuRu, Locale::EnUs];

	/// BCP 47 tag, e.g. `ru-RU`.
	pub fn tag(self) -> &'static str {
		match self {
			Locale::RuRu => "ru-RU",
			Locale::EnUs => "en-US",
		}
	}

	pub(crate) fn data(self) -> &'static LocaleData {
		match self {
			Locale::RuRu => &RU_RU,
			Locale::EnUs => &EN_US,
		}
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

impl FromStr for Locale {
	type Err = ConfigError;

	/// Accepts `ru-RU`, `ru_ru`, `RU`, `en-us`, `en` and similar spellings.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().replace('_', "-").to_ascii_lowercase();
		match normalized.as_str() {
			"ru" | "ru-ru" => Ok(Locale::RuRu),
			"en" | "en-us" => Ok(Locale::EnUs),
			_ => Err(ConfigError::UnsupportedLocale(s.to_string())),
		}
	}
}

impl TryFrom<String> for Locale {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Locale> for String {
	fn from(locale: Locale) -> Self {
		locale.tag().to_string()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateOrder {
	DayMonthYear,
	MonthDayYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CurrencyPlacement {
	/// `1 234,50 $`
	After,
	/// `$1,234.50`, or `CHF 1,234.50` for codes without a symbol
	Before,
}

/// Plural-aware compact unit names.
#[derive(Debug)]
pub(crate) struct CompactUnit {
	pub(crate) short: &'static str,
	/// Forms for one / few / many. Locales without plural agreement repeat one form.
	pub(crate) long: [&'static str; 3],
}

#[derive(Debug)]
pub(crate) struct LocaleData {
	pub(crate) decimal: char,
	pub(crate) group: char,
	pub(crate) currency_placement: CurrencyPlacement,
	pub(crate) currency_symbols: &'static [(&'static str, &'static str)],
	/// Thousand, million, billion, trillion.
	pub(crate) compact_units: [CompactUnit; 4],
	/// Month names used next to a day ("1 января").
	pub(crate) months_long: [&'static str; 12],
	/// Month names used on their own ("январь 2025").
	pub(crate) months_standalone: [&'static str; 12],
	pub(crate) months_short: [&'static str; 12],
	pub(crate) months_short_standalone: [&'static str; 12],
	pub(crate) date_order: DateOrder,
	pub(crate) date_separator: char,
	/// Whether `numeric` day and month are zero padded like `2-digit`.
	pub(crate) pad_numeric_date: bool,
	pub(crate) hour12_default: bool,
	pub(crate) date_time_separator: &'static str,
}

impl LocaleData {
	pub(crate) fn currency_symbol(&self, code: &str) -> Option<&'static str> {
		self.currency_symbols
			.iter()
			.find(|(known, _)| *known == code)
			.map(|(_, symbol)| *symbol)
	}

	/// Plural category index (one, few, many) for a compact mantissa.
	pub(crate) fn plural_index(&self, integer: u64, has_fraction: bool) -> usize {
		if has_fraction {
			return 1;
		}
		let (rem10, rem100) = (integer % 10, integer % 100);
		if rem10 == 1 && rem100 != 11 {
			0
		} else if (2..=4).contains(&rem10) && !(12..=14).contains(&rem100) {
			1
		} else {
			2
		}
	}
}

static RU_RU: LocaleData = LocaleData {
	decimal: ',',
	group: '\u{a0}',
	currency_placement: CurrencyPlacement::After,
	currency_symbols: &[
		("RUB", "₽"),
		("USD", "$"),
		("EUR", "€"),
		("GBP", "£"),
		("JPY", "¥"),
	],
	compact_units: [
		CompactUnit {
			short: "тыс.",
			long: ["тысяча", "тысячи", "тысяч"],
		},
		CompactUnit {
			short: "млн",
			long: ["миллион", "миллиона", "миллионов"],
		},
		CompactUnit {
			short: "млрд",
			long: ["миллиард", "миллиарда", "миллиардов"],
		},
		CompactUnit {
			short: "трлн",
			long: ["триллион", "триллиона", "триллионов"],
		},
	],
	months_long: [
		"января", "февраля", "марта", "апреля", "мая", "июня",
		"июля", "августа", "сентября", "октября", "ноября", "декабря",
	],
	months_standalone: [
		"январь", "февраль", "март", "апрель", "май", "июнь",
		"июль", "август", "сентябрь", "октябрь", "ноябрь", "декабрь",
	],
	months_short: [
		"янв.", "февр.", "мар.", "апр.", "мая", "июн.",
		"июл.", "авг.", "сент.", "окт.", "нояб.", "дек.",
	],
	months_short_standalone: [
		"янв.", "февр.", "март", "апр.", "май", "июнь",
		"июль", "авг.", "сент.", "окт.", "нояб.", "дек.",
	],
	date_order: DateOrder::DayMonthYear,
	date_separator: '.',
	pad_numeric_date: true,
	hour12_default: false,
	date_time_separator: " ",
};

static EN_US: LocaleData = LocaleData {
	decimal: '.',
	group: ',',
	currency_placement: CurrencyPlacement::Before,
	currency_symbols: &[("USD", "$"), ("EUR", "€"), ("GBP", "£"), ("JPY", "¥")],
	compact_units: [
		CompactUnit {
			short: "K",
			long: ["thousand"; 3],
		},
		CompactUnit {
			short: "M",
			long: ["million"; 3],
		},
		CompactUnit {
			short: "B",
			long: ["billion"; 3],
		},
		CompactUnit {
			short: "T",
			long: ["trillion"; 3],
		},
	],
	months_long: [
		"January", "February", "March", "April", "May", "June",
		"July", "August", "September", "October", "November", "December",
	],
	months_standalone: [
		"January", "February", "March", "April", "May", "June",
		"July", "August", "September", "October", "November", "December",
	],
	months_short: [
		"Jan", "Feb", "Mar", "Apr", "May", "Jun",
		"Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
	],
	months_short_standalone: [
		"Jan", "Feb", "Mar", "Apr", "May", "Jun",
		"Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
	],
	date_order: DateOrder::MonthDayYear,
	date_separator: '/',
	pad_numeric_date: false,
	hour12_default: true,
	date_time_separator: ", ",
};

/// Separator between a number and a unit or symbol that follows it.
pub(crate) fn unit_gap(locale: Locale) -> &'static str {
	match locale {
		Locale::RuRu => NBSP,
		Locale::EnUs => "",
	}
}

/// Separator for long compact names and prefixed currency codes.
pub(crate) const WORD_GAP: &str = NBSP;
