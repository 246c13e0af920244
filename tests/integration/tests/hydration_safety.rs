//! End-to-end checks through the facade: configure from the environment,
//! render on the server, take over on the client.

use std::cell::Cell;
use std::rc::Rc;

use arbitrobot::prelude::*;
use arbitrobot_integration_tests::{dashboard, env_config};
use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;
use serial_test::serial;

fn updated() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2025, 3, 9, 21, 5, 0).unwrap()
}

fn config_from(locale: Option<&str>, timezone: Option<&str>) -> FormatterConfig {
	env_config(locale, timezone).unwrap()
}

#[rstest]
#[serial]
fn test_default_configuration_round_trip() {
	let config = config_from(None, None);
	let builds = Rc::new(Cell::new(0));

	let mut renderer = SsrRenderer::with_options(SsrOptions::new().formatter(config));
	let document = renderer.render_page_with({
		let builds = Rc::clone(&builds);
		move || dashboard(config, updated(), builds)
	});

	assert!(document.contains("2,5\u{a0}млн"));
	assert!(document.contains("09.03.2025 21:05:00"));
	assert!(document.contains(r#"<p class="profit">$0.00</p>"#));
	assert!(document.contains("spinner"));
	assert_eq!(builds.get(), 0);

	let context = HydrationContext::from_document(&document).unwrap();
	let client_config = context.formatter_config().unwrap();
	let root = context
		.hydrate({
			let builds = Rc::clone(&builds);
			move || dashboard(client_config, updated(), builds)
		})
		.unwrap();
	assert_eq!(root.render_count(), 1);

	root.flush();

	assert!(root.html().contains("<time>live</time>"));
	assert_eq!(builds.get(), 1);
}

#[rstest]
#[serial]
fn test_dashboard_rebuilt_by_reactive_parent_opens_clock() {
	let config = config_from(None, None);
	let builds = Rc::new(Cell::new(0));
	let root = mount({
		let builds = Rc::clone(&builds);
		move || Page::reactive(move || dashboard(config, updated(), Rc::clone(&builds)))
	});
	assert!(root.html().contains("spinner"));

	root.flush();

	assert!(root.html().contains("<time>live</time>"));
	assert_eq!(root.render_count(), 2);
	assert_eq!(builds.get(), 1);
}

#[rstest]
#[serial]
fn test_time_zone_changes_rendered_text() {
	let config = config_from(Some("ru-RU"), Some("Asia/Tokyo"));
	let mut renderer = SsrRenderer::with_options(SsrOptions::new().formatter(config));

	let document =
		renderer.render_page_with(|| dashboard(config, updated(), Rc::new(Cell::new(0))));

	assert!(document.contains("10.03.2025 06:05:00"));
}

#[rstest]
#[serial]
fn test_client_with_host_defaults_would_mismatch() {
	let server = config_from(Some("ru-RU"), Some("Asia/Tokyo"));
	let mut renderer = SsrRenderer::with_options(SsrOptions::new().formatter(server));
	let document =
		renderer.render_page_with(|| dashboard(server, updated(), Rc::new(Cell::new(0))));
	let context = HydrationContext::from_document(&document).unwrap();

	let client = FormatterConfig::default();
	let result = context.hydrate(|| dashboard(client, updated(), Rc::new(Cell::new(0))));

	assert!(matches!(result, Err(HydrationError::Mismatch { .. })));
}

#[rstest]
fn test_english_configuration() {
	let config = config_from(Some("en-US"), None);
	let fmt = Formatters::new(config);
	let moment = Utc.with_ymd_and_hms(2025, 1, 1, 14, 30, 45).unwrap();

	assert_eq!(fmt.long_date(&moment), "January 1, 2025");
	assert_eq!(fmt.currency(1234.5, "USD").unwrap(), "$1,234.50");
	assert_eq!(fmt.percent(0.5).unwrap(), "50.00%");
}
