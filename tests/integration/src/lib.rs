//! Shared fixtures for the cross-crate tests.
//!
//! Everything goes through the `arbitrobot` facade, the way a site would use it.

use std::cell::Cell;
use std::rc::Rc;

use arbitrobot::ConfigError;
use arbitrobot::prelude::*;
use chrono::{DateTime, Utc};

/// Configuration as it would be read from `APP_LOCALE` and `APP_TZ`.
pub fn env_config(
	locale: Option<&str>,
	timezone: Option<&str>,
) -> Result<FormatterConfig, ConfigError> {
	FormatterConfig::from_lookup(|key| match key {
		"APP_LOCALE" => locale.map(str::to_string),
		"APP_TZ" => timezone.map(str::to_string),
		_ => None,
	})
}

/// A dashboard mixing formatted text, an animated counter and a live clock.
///
/// `clock_builds` counts how often the clock's children builder ran.
pub fn dashboard(
	config: FormatterConfig,
	updated: DateTime<Utc>,
	clock_builds: Rc<Cell<usize>>,
) -> Page {
	let fmt = Formatters::new(config);
	let profit = use_currency_counter(1500.0, "$", 2);

	PageElement::new("section")
		.attr("class", "dashboard")
		.child(
			PageElement::new("p")
				.attr("class", "volume")
				.child(fmt.compact(2_500_000.0).unwrap_or_default()),
		)
		.child(
			PageElement::new("p")
				.attr("class", "updated")
				.child(fmt.date_time(&updated)),
		)
		.child(PageElement::new("p").attr("class", "profit").child(profit.view()))
		.child(
			ClientOnly::new(move || {
				clock_builds.set(clock_builds.get() + 1);
				PageElement::new("time").child("live")
			})
			.fallback(PageElement::new("span").attr("class", "spinner")),
		)
		.into_page()
}
