//! Animated counters: use_counter and its presets
//!
//! A [`Counter`] eases from a start value to a target over a fixed duration.
//! The host drives it with frame timestamps through [`Counter::tick`]; ticks
//! are ignored until the client has mounted, so a server render and the first
//! client render both show the start value.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use arbitrobot_core::types::page::Page;
use arbitrobot_i18n::fixed;

use super::client::{ReadySignal, use_is_client};
use crate::reactive::Signal;

/// Maps linear progress in `[0, 1]` to eased progress.
pub type Easing = fn(f64) -> f64;

/// `1 - (1 - t)^3`
pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Counter animation and display settings.
#[derive(Debug, Clone)]
pub struct CounterOptions {
	/// Value shown before the animation starts.
	pub start: f64,
	/// Animation length in milliseconds.
	pub duration_ms: f64,
	/// Fraction digits shown.
	pub decimals: u8,
	/// Text placed before the number.
	pub prefix: String,
	/// Text placed after the number.
	pub suffix: String,
	/// Thousands separator.
	pub separator: String,
	/// Progress curve.
	pub easing: Easing,
}

impl Default for CounterOptions {
	fn default() -> Self {
		Self {
			start: 0.0,
			duration_ms: 2000.0,
			decimals: 0,
			prefix: String::new(),
			suffix: String::new(),
			separator: ",".to_string(),
			easing: ease_out_cubic,
		}
	}
}

impl CounterOptions {
	/// Default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the start value.
	pub fn start(mut self, start: f64) -> Self {
		self.start = start;
		self
	}

	/// Sets the duration.
	pub fn duration_ms(mut self, duration_ms: f64) -> Self {
		self.duration_ms = duration_ms;
		self
	}

	/// Sets the fraction digits.
	pub fn decimals(mut self, decimals: u8) -> Self {
		self.decimals = decimals;
		self
	}

	/// Sets the prefix.
	pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Sets the suffix.
	pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
		self.suffix = suffix.into();
		self
	}

	/// Sets the thousands separator.
	pub fn separator(mut self, separator: impl Into<String>) -> Self {
		self.separator = separator.into();
		self
	}

	/// Sets the easing curve.
	pub fn easing(mut self, easing: Easing) -> Self {
		self.easing = easing;
		self
	}
}

/// Formats `value` with the counter's decimals, separator and affixes.
///
/// Non-finite values are shown as Rust prints them.
pub fn format_counter(value: f64, options: &CounterOptions) -> String {
	let body = match fixed(value, options.decimals) {
		Ok(text) => group_integer(&text, &options.separator),
		Err(_) => value.to_string(),
	};
	format!("{}{}{}", options.prefix, body, options.suffix)
}

fn group_integer(text: &str, separator: &str) -> String {
	let (integer, fraction) = match text.split_once('.') {
		Some((integer, fraction)) => (integer, Some(fraction)),
		None => (text, None),
	};
	let (sign, digits) = match integer.strip_prefix('-') {
		Some(digits) => ("-", digits),
		None => ("", integer),
	};

	let mut out = String::with_capacity(text.len() + separator.len() * (digits.len() / 3));
	out.push_str(sign);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push_str(separator);
		}
		out.push(ch);
	}
	if let Some(fraction) = fraction {
		out.push('.');
		out.push_str(fraction);
	}
	out
}

/// An eased number animation.
///
/// Clones share state.
#[derive(Clone)]
pub struct Counter {
	end: Rc<Cell<f64>>,
	options: Rc<CounterOptions>,
	value: Signal<f64>,
	started_at: Rc<Cell<Option<f64>>>,
	finished: Rc<Cell<bool>>,
	ready: ReadySignal,
}

impl Counter {
	fn new(end: f64, options: CounterOptions) -> Self {
		Self {
			end: Rc::new(Cell::new(end)),
			value: Signal::new(options.start),
			options: Rc::new(options),
			started_at: Rc::new(Cell::new(None)),
			finished: Rc::new(Cell::new(false)),
			ready: use_is_client(),
		}
	}

	/// Current value. Subscribes the running Effect.
	pub fn value(&self) -> f64 {
		self.value.get()
	}

	/// Target value.
	pub fn end(&self) -> f64 {
		self.end.get()
	}

	/// Whether a tick would still move the value.
	pub fn is_animating(&self) -> bool {
		self.ready.is_ready_untracked() && !self.finished.get()
	}

	/// Advance the animation to frame time `now_ms`.
	///
	/// The first tick after mount fixes the start time. Returns whether another
	/// frame is needed.
	pub fn tick(&self, now_ms: f64) -> bool {
		if !self.is_animating() {
			return false;
		}
		let started_at = match self.started_at.get() {
			Some(at) => at,
			None => {
				self.started_at.set(Some(now_ms));
				now_ms
			}
		};

		let progress = if self.options.duration_ms > 0.0 {
			((now_ms - started_at) / self.options.duration_ms).clamp(0.0, 1.0)
		} else {
			1.0
		};
		let start = self.options.start;
		let current = start + (self.end.get() - start) * (self.options.easing)(progress);
		self.value.set_if_changed(current);

		if progress >= 1.0 {
			self.finished.set(true);
			return false;
		}
		true
	}

	/// Restart the animation towards a new target.
	pub fn retarget(&self, end: f64) {
		self.end.set(end);
		self.started_at.set(None);
		self.finished.set(false);
		self.value.set_if_changed(self.options.start);
	}

	/// Formatted current value. Subscribes the running Effect.
	pub fn display(&self) -> String {
		format_counter(self.value(), &self.options)
	}

	/// Text node that follows the value.
	pub fn view(&self) -> Page {
		let counter = self.clone();
		Page::reactive(move || Page::text(counter.display()))
	}
}

impl fmt::Debug for Counter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Counter")
			.field("value", &self.value.get_untracked())
			.field("end", &self.end.get())
			.field("animating", &self.is_animating())
			.finish()
	}
}

/// Counter easing from `options.start` to `end`.
pub fn use_counter(end: f64, options: CounterOptions) -> Counter {
	Counter::new(end, options)
}

/// Currency counter: `symbol` prefix, `decimals` fraction digits.
pub fn use_currency_counter(end: f64, symbol: &str, decimals: u8) -> Counter {
	use_counter(end, CounterOptions::new().prefix(symbol).decimals(decimals))
}

/// Percentage counter: `%` suffix, `decimals` fraction digits.
pub fn use_percentage_counter(end: f64, decimals: u8) -> Counter {
	use_counter(end, CounterOptions::new().suffix("%").decimals(decimals))
}

/// Whole-number counter.
pub fn use_number_counter(end: f64) -> Counter {
	use_counter(end, CounterOptions::new())
}
