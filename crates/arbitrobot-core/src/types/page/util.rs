//! HTML text helpers shared by the renderer and the SSR shell.

use std::borrow::Cow;

/// Escape `& < > " '` for use in text content or a quoted attribute.
///
/// Borrows the input when nothing needs escaping.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// Attributes whose mere presence switches them on.
///
/// `<button disabled="false">` is still disabled, so the renderer drops these
/// attributes entirely when their value is falsy.
pub const BOOLEAN_ATTRS: &[&str] = &[
	"allowfullscreen", "async", "autofocus", "autoplay", "checked", "controls",
	"default", "defer", "disabled", "formnovalidate", "hidden", "inert",
	"ismap", "itemscope", "loop", "multiple", "muted", "nomodule",
	"novalidate", "open", "playsinline", "readonly", "required", "reversed",
	"selected",
];

/// `false` for `""`, `"false"` and `"0"`; `true` otherwise.
pub fn is_boolean_attr_truthy(value: &str) -> bool {
	!matches!(value, "" | "false" | "0")
}
