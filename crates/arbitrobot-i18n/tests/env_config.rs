//! Configuration read from the process environment.

use arbitrobot_i18n::{ConfigError, FormatterConfig, Formatters, LOCALE_ENV, Locale, TIMEZONE_ENV, Tz};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serial_test::serial;

fn set_env(locale: Option<&str>, tz: Option<&str>) {
	// SAFETY: every test touching the environment runs under #[serial].
	unsafe {
		match locale {
			Some(value) => std::env::set_var(LOCALE_ENV, value),
			None => std::env::remove_var(LOCALE_ENV),
		}
		match tz {
			Some(value) => std::env::set_var(TIMEZONE_ENV, value),
			None => std::env::remove_var(TIMEZONE_ENV),
		}
	}
}

#[rstest]
#[serial(env)]
fn test_from_env_defaults() {
	set_env(None, None);

	let config = FormatterConfig::from_env().unwrap();

	assert_eq!(config.locale(), Locale::RuRu);
	assert_eq!(config.timezone(), Tz::UTC);
}

#[rstest]
#[serial(env)]
fn test_from_env_reads_variables() {
	set_env(Some("en_US"), Some("America/New_York"));

	let config = FormatterConfig::from_env().unwrap();
	set_env(None, None);

	assert_eq!(config.locale(), Locale::EnUs);
	assert_eq!(config.timezone(), Tz::America__New_York);
}

#[rstest]
#[serial(env)]
fn test_from_env_rejects_unknown_zone() {
	set_env(None, Some("Europe/Atlantis"));

	let result = FormatterConfig::from_env();
	set_env(None, None);

	assert_eq!(
		result,
		Err(ConfigError::UnknownTimeZone("Europe/Atlantis".to_string()))
	);
}

#[rstest]
#[serial(env)]
fn test_short_date_scenario() {
	set_env(Some("ru-RU"), Some("UTC"));
	let fmt = Formatters::new(FormatterConfig::from_env().unwrap());
	set_env(None, None);

	let new_year = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

	assert_eq!(fmt.short_date(&new_year), "01.01.2025");
}

#[rstest]
#[serial(env)]
fn test_install_once() {
	let config = FormatterConfig::new("en-US", "Asia/Tokyo").unwrap();

	let installed = config.install().unwrap();
	assert_eq!(FormatterConfig::installed(), Some(installed));

	let again = FormatterConfig::default().install();
	assert_eq!(again, Err(ConfigError::AlreadyInstalled));
	assert_eq!(FormatterConfig::installed().map(|c| c.locale()), Some(Locale::EnUs));
}
