//! Page tree used by both render passes.
//!
//! A [`Page`] describes markup: elements, text, fragments and reactive nodes.
//! Rendering a page to a string evaluates its reactive nodes once, so a
//! string render performed inside an Effect subscribes that Effect to every
//! Signal the reactive nodes read.
//!
//! ## Example
//!
//! ```ignore
//! use arbitrobot_core::types::page::{IntoPage, Page, PageElement};
//!
//! let view = PageElement::new("span")
//!     .attr("class", "price")
//!     .child("1 234,50 $")
//!     .into_page();
//!
//! assert_eq!(view.render_to_string(), "<span class=\"price\">1 234,50 $</span>");
//! ```

mod util;

pub use util::{BOOLEAN_ATTRS, html_escape, is_boolean_attr_truthy};

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

type ViewFn = Box<dyn Fn() -> Page + 'static>;

/// Conditional node choosing between two branches on every render.
pub struct ReactiveIf {
	condition: Box<dyn Fn() -> bool + 'static>,
	then_view: ViewFn,
	else_view: ViewFn,
}

impl ReactiveIf {
	/// Evaluates the condition.
	pub fn condition(&self) -> bool {
		(self.condition)()
	}

	/// Evaluates the condition and builds the matching branch.
	pub fn current_view(&self) -> Page {
		if self.condition() {
			(self.then_view)()
		} else {
			(self.else_view)()
		}
	}
}

impl fmt::Debug for ReactiveIf {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReactiveIf").finish_non_exhaustive()
	}
}

/// Node whose content is rebuilt on every render.
pub struct Reactive {
	render: ViewFn,
}

impl Reactive {
	/// Returns the rendered view.
	pub fn render(&self) -> Page {
		(self.render)()
	}
}

impl fmt::Debug for Reactive {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reactive").finish_non_exhaustive()
	}
}

/// Renderable content.
#[derive(Debug)]
pub enum Page {
	/// An element with attributes and children.
	Element(PageElement),
	/// Escaped text.
	Text(Cow<'static, str>),
	/// Children without a wrapper element.
	Fragment(Vec<Page>),
	/// Renders nothing.
	Empty,
	/// A subtree owned elsewhere and rendered by reference.
	///
	/// Lets a component build a subtree once and hand it out on every render.
	Shared(Rc<Page>),
	/// See [`Page::reactive_if`].
	ReactiveIf(ReactiveIf),
	/// See [`Page::reactive`].
	Reactive(Reactive),
}

/// An element node.
#[derive(Debug)]
pub struct PageElement {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<Page>,
	is_void: bool,
}

impl PageElement {
	/// Creates a new element; void elements (`br`, `img`, ...) are detected by tag.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds `name="name"` when `value` is true; otherwise leaves the element alone.
	pub fn bool_attr(self, name: impl Into<Cow<'static, str>>, value: bool) -> Self {
		if !value {
			return self;
		}
		let name = name.into();
		self.attr(name.clone(), name)
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoPage) -> Self {
		self.children.push(child.into_page());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoPage::into_page));
		self
	}

	/// Tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Attributes in insertion order.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Child views.
	pub fn child_views(&self) -> &[Page] {
		&self.children
	}

	/// Whether the element has no closing tag.
	pub fn is_void(&self) -> bool {
		self.is_void
	}
}

impl Page {
	/// Creates an element builder.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> PageElement {
		PageElement::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoPage>) -> Self {
		Self::Fragment(children.into_iter().map(IntoPage::into_page).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Wraps a subtree that is built once and rendered many times.
	pub fn shared(page: Rc<Page>) -> Self {
		Self::Shared(page)
	}

	/// Creates a conditional view.
	///
	/// `condition` is evaluated on every render; reading Signals inside it
	/// subscribes the surrounding Effect, so the branch switches when they change.
	///
	/// ```ignore
	/// let ready = Signal::new(false);
	/// let view = Page::reactive_if(
	///     move || ready.get(),
	///     || Page::text("client"),
	///     || Page::empty(),
	/// );
	/// ```
	pub fn reactive_if<C, T, E>(condition: C, then_view: T, else_view: E) -> Self
	where
		C: Fn() -> bool + 'static,
		T: Fn() -> Page + 'static,
		E: Fn() -> Page + 'static,
	{
		Page::ReactiveIf(ReactiveIf {
			condition: Box::new(condition),
			then_view: Box::new(then_view),
			else_view: Box::new(else_view),
		})
	}

	/// Creates a view rebuilt on every render.
	pub fn reactive<F>(render: F) -> Self
	where
		F: Fn() -> Page + 'static,
	{
		Page::Reactive(Reactive {
			render: Box::new(render),
		})
	}

	/// Renders the view to an HTML string.
	///
	/// Falsy boolean attributes are omitted. Reactive nodes are evaluated once.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_into(&mut output);
		output
	}

	fn render_into(&self, output: &mut String) {
		match self {
			Page::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					if BOOLEAN_ATTRS.contains(&name.as_ref()) && !is_boolean_attr_truthy(value) {
						continue;
					}
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
					return;
				}
				output.push('>');
				for child in el.child_views() {
					child.render_into(output);
				}
				output.push_str("</");
				output.push_str(el.tag_name());
				output.push('>');
			}
			Page::Text(text) => output.push_str(&html_escape(text)),
			Page::Fragment(children) => {
				for child in children {
					child.render_into(output);
				}
			}
			Page::Empty => {}
			Page::Shared(page) => page.render_into(output),
			Page::ReactiveIf(reactive_if) => reactive_if.current_view().render_into(output),
			Page::Reactive(reactive) => reactive.render().render_into(output),
		}
	}
}

/// Conversion into a [`Page`].
pub trait IntoPage {
	/// Converts self into a Page.
	fn into_page(self) -> Page;
}

impl IntoPage for Page {
	fn into_page(self) -> Page {
		self
	}
}

impl IntoPage for PageElement {
	fn into_page(self) -> Page {
		Page::Element(self)
	}
}

impl IntoPage for Rc<Page> {
	fn into_page(self) -> Page {
		Page::Shared(self)
	}
}

impl IntoPage for String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self))
	}
}

impl IntoPage for &String {
	fn into_page(self) -> Page {
		Page::Text(Cow::Owned(self.clone()))
	}
}

impl IntoPage for &'static str {
	fn into_page(self) -> Page {
		Page::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoPage> IntoPage for Option<T> {
	fn into_page(self) -> Page {
		self.map_or(Page::Empty, IntoPage::into_page)
	}
}

impl<T: IntoPage> IntoPage for Vec<T> {
	fn into_page(self) -> Page {
		Page::fragment(self)
	}
}

impl IntoPage for () {
	fn into_page(self) -> Page {
		Page::Empty
	}
}

impl<A: IntoPage, B: IntoPage> IntoPage for (A, B) {
	fn into_page(self) -> Page {
		Page::Fragment(vec![self.0.into_page(), self.1.into_page()])
	}
}

impl<A: IntoPage, B: IntoPage, C: IntoPage> IntoPage for (A, B, C) {
	fn into_page(self) -> Page {
		Page::Fragment(vec![
			self.0.into_page(),
			self.1.into_page(),
			self.2.into_page(),
		])
	}
}
