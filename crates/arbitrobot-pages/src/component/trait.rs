//! Component trait definition.

use arbitrobot_core::types::page::Page;

/// Trait for reusable UI components.
///
/// # Example
///
/// ```ignore
/// use arbitrobot_pages::{Component, Page};
///
/// struct PriceTag {
///     text: String,
/// }
///
/// impl Component for PriceTag {
///     fn render(&self) -> Page {
///         Page::element("span")
///             .attr("class", "price")
///             .child(self.text.clone())
///             .into_page()
///     }
///
///     fn name() -> &'static str {
///         "PriceTag"
///     }
/// }
/// ```
pub trait Component: 'static {
	/// Renders the component to a Page.
	fn render(&self) -> Page;

	/// Returns the component's name for logging.
	fn name() -> &'static str
	where
		Self: Sized;
}
