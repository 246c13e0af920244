//! SSR state embedded in the rendered document.

use std::collections::BTreeMap;

use arbitrobot_i18n::FormatterConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `id` of the script element carrying the state.
pub const STATE_SCRIPT_ID: &str = "ssr-state";

pub(crate) const STATE_SCRIPT_OPEN: &str = r#"<script id="ssr-state" type="application/json">"#;

/// Data the server hands to the client pass.
///
/// ```ignore
/// let mut state = SsrState::with_formatter(config);
/// state.add_metadata("build", "2025.01")?;
/// let tag = state.to_script_tag();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsrState {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	formatter: Option<FormatterConfig>,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	metadata: BTreeMap<String, serde_json::Value>,
}

impl SsrState {
	/// Empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// State carrying `config`.
	pub fn with_formatter(config: FormatterConfig) -> Self {
		Self {
			formatter: Some(config),
			metadata: BTreeMap::new(),
		}
	}

	/// Formatter configuration the server rendered with.
	pub fn formatter(&self) -> Option<FormatterConfig> {
		self.formatter
	}

	/// Replace the formatter configuration.
	pub fn set_formatter(&mut self, config: FormatterConfig) {
		self.formatter = Some(config);
	}

	/// Store `value` under `key`.
	pub fn add_metadata(
		&mut self,
		key: impl Into<String>,
		value: impl Serialize,
	) -> Result<(), serde_json::Error> {
		let value = serde_json::to_value(value)?;
		self.metadata.insert(key.into(), value);
		Ok(())
	}

	/// Raw metadata value under `key`.
	pub fn get_metadata(&self, key: &str) -> Option<&serde_json::Value> {
		self.metadata.get(key)
	}

	/// Metadata under `key` decoded as `T`. `None` if absent or of another shape.
	pub fn metadata_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
		let value = self.metadata.get(key)?;
		serde_json::from_value(value.clone()).ok()
	}

	/// Whether there is nothing to embed.
	pub fn is_empty(&self) -> bool {
		self.formatter.is_none() && self.metadata.is_empty()
	}

	/// Serializes to JSON.
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}

	/// Parses state produced by [`to_json`](Self::to_json).
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// `<script id="ssr-state" type="application/json">…</script>`, with `</`
	/// escaped so the payload cannot close the element.
	pub fn to_script_tag(&self) -> String {
		let json = match self.to_json() {
			Ok(json) => json,
			Err(error) => {
				tracing::warn!(%error, "failed to serialize SSR state");
				"{}".to_string()
			}
		};
		format!("{STATE_SCRIPT_OPEN}{}</script>", escape_json_for_script(&json))
	}

	/// Merges `other` into `self`. Its entries win on conflict.
	pub fn merge(&mut self, other: SsrState) {
		if other.formatter.is_some() {
			self.formatter = other.formatter;
		}
		self.metadata.extend(other.metadata);
	}
}

fn escape_json_for_script(json: &str) -> String {
	json.replace("</", "<\\/")
}
