//! SSR renderer.

use arbitrobot_core::types::page::{IntoPage, Page, html_escape};
use arbitrobot_i18n::FormatterConfig;

use super::state::SsrState;
use crate::component::Component;
use crate::reactive::{RenderMode, with_runtime};

/// Options for [`SsrRenderer`].
#[derive(Debug, Clone)]
pub struct SsrOptions {
	/// `lang` attribute of the `<html>` element.
	pub lang: String,
	/// Collapse whitespace in the document shell. App markup is never altered.
	pub minify: bool,
	/// Embed [`SsrState`] in the document.
	pub include_state_script: bool,
	/// Formatter configuration recorded in the state.
	pub formatter: Option<FormatterConfig>,
}

impl Default for SsrOptions {
	fn default() -> Self {
		Self {
			lang: "ru".to_string(),
			minify: false,
			include_state_script: true,
			formatter: None,
		}
	}
}

impl SsrOptions {
	/// Default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the document language.
	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = lang.into();
		self
	}

	/// Enables shell minification.
	pub fn minify(mut self) -> Self {
		self.minify = true;
		self
	}

	/// Leaves the state script out.
	pub fn no_state_script(mut self) -> Self {
		self.include_state_script = false;
		self
	}

	/// Records `config` so the client formats the same way.
	pub fn formatter(mut self, config: FormatterConfig) -> Self {
		self.formatter = Some(config);
		self
	}
}

/// Renders pages inside a server pass.
///
/// ```ignore
/// let mut renderer = SsrRenderer::with_options(SsrOptions::new().formatter(config));
/// let html = renderer.render_page_with(|| HomePage::new().render());
/// ```
pub struct SsrRenderer {
	options: SsrOptions,
	state: SsrState,
}

impl Default for SsrRenderer {
	fn default() -> Self {
		Self::new()
	}
}

impl SsrRenderer {
	/// Renderer with default options.
	pub fn new() -> Self {
		Self::with_options(SsrOptions::default())
	}

	/// Renderer with `options`.
	pub fn with_options(options: SsrOptions) -> Self {
		let state = match options.formatter {
			Some(config) => SsrState::with_formatter(config),
			None => SsrState::new(),
		};
		Self { options, state }
	}

	/// Options in use.
	pub fn options(&self) -> &SsrOptions {
		&self.options
	}

	/// State to be embedded.
	pub fn state(&self) -> &SsrState {
		&self.state
	}

	/// Mutable state, for adding metadata.
	pub fn state_mut(&mut self) -> &mut SsrState {
		&mut self.state
	}

	/// Renders an already built component to markup.
	///
	/// Hooks run while the component was constructed belong to whatever pass
	/// was active then; prefer [`render_with`](Self::render_with) when the
	/// component is built for this render.
	pub fn render<C: Component>(&mut self, component: &C) -> String {
		let _server = with_runtime(|rt| rt.enter_mode(RenderMode::Server));
		tracing::debug!(component = C::name(), "server render");
		component.render().render_to_string()
	}

	/// Builds and renders a page, both inside a server pass.
	pub fn render_with<F, P>(&mut self, build: F) -> String
	where
		F: FnOnce() -> P,
		P: IntoPage,
	{
		let _server = with_runtime(|rt| rt.enter_mode(RenderMode::Server));
		tracing::debug!("server render");
		let page: Page = build().into_page();
		page.render_to_string()
	}

	/// [`render`](Self::render) wrapped in a full document.
	pub fn render_page<C: Component>(&mut self, component: &C) -> String {
		let content = self.render(component);
		self.wrap_in_html(&content)
	}

	/// [`render_with`](Self::render_with) wrapped in a full document.
	pub fn render_page_with<F, P>(&mut self, build: F) -> String
	where
		F: FnOnce() -> P,
		P: IntoPage,
	{
		let content = self.render_with(build);
		self.wrap_in_html(&content)
	}

	/// Wraps app markup in a document.
	///
	/// `content` lands unchanged inside `<div id="app">`, followed by the state
	/// script when enabled and non-empty.
	pub fn wrap_in_html(&self, content: &str) -> String {
		let head = format!(
			"<!DOCTYPE html>\n\
			 <html lang=\"{}\">\n\
			 <head>\n\
			 <meta charset=\"UTF-8\">\n\
			 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
			 </head>\n\
			 <body>\n\
			 <div id=\"app\">",
			html_escape(&self.options.lang)
		);
		let close_app = "</div>\n";
		let tail = "</body>\n</html>";

		let script = if self.options.include_state_script && !self.state.is_empty() {
			format!("{}\n", self.state.to_script_tag())
		} else {
			String::new()
		};

		let mut html = String::with_capacity(head.len() + content.len() + script.len() + 32);
		if self.options.minify {
			html.push_str(&minify_shell(&head));
			html.push_str(content);
			html.push_str(&minify_shell(close_app));
			html.push_str(script.trim_end());
			html.push_str(&minify_shell(tail));
		} else {
			html.push_str(&head);
			html.push_str(content);
			html.push_str(close_app);
			html.push_str(&script);
			html.push_str(tail);
		}
		html
	}
}

/// Collapses ASCII whitespace runs to one space and drops whitespace between
/// tags or at either end.
///
/// Only ASCII whitespace counts: formatted text uses U+00A0, which must
/// survive untouched.
fn minify_shell(html: &str) -> String {
	let mut result = String::with_capacity(html.len());
	let mut pending_space = false;

	for c in html.chars() {
		if c.is_ascii_whitespace() {
			pending_space = true;
			continue;
		}
		if pending_space && !result.is_empty() && !(result.ends_with('>') && c == '<') {
			result.push(' ');
		}
		pending_space = false;
		result.push(c);
	}

	result
}
