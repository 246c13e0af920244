//! Arbitrobot i18n
//!
//! Deterministic number and date formatting. Every call takes an explicit
//! [`FormatterConfig`] (locale plus IANA time zone), so identical inputs give
//! byte-identical text on the server and in the browser.
//!
//! ## Example
//!
//! ```ignore
//! use arbitrobot_i18n::{FormatterConfig, Formatters};
//!
//! let fmt = Formatters::new(FormatterConfig::from_env()?);
//! let price = fmt.currency(1234.5, "USD")?;   // "1 234,50 $"
//! let share = fmt.percent(0.125)?;            // "12,50%"
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod date;
pub mod error;
pub mod formatters;
pub mod locale;
pub mod number;

pub use config::{FormatterConfig, LOCALE_ENV, TIMEZONE_ENV};
pub use date::{DateTimeFormatOptions, MonthFormat, NumericWidth, format_date, format_timestamp};
pub use error::{ConfigError, FormatError};
pub use formatters::{Formatters, presets};
pub use locale::Locale;
pub use number::{CompactDisplay, Notation, NumberFormatOptions, NumberStyle, fixed, format_number};

// Re-exported so callers can name zones without a direct chrono-tz dependency.
pub use chrono_tz::Tz;
