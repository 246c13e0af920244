//! Render gate for browser-only content.
//!
//! [`ClientOnly`] renders its fallback during server rendering and during the
//! first client render, then switches to its children once the client has
//! mounted. The children builder is never invoked before that point, so it may
//! touch anything that only exists in a browser.
//!
//! ```ignore
//! ClientOnly::new(|| LiveClock::new().render())
//!     .fallback(Page::element("span").attr("class", "spinner"))
//! ```

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

use arbitrobot_core::types::page::{IntoPage, Page};

use super::Component;
use crate::reactive::hooks::{ReadySignal, use_is_client};
use crate::reactive::{RenderMode, with_runtime};

type Builder = Box<dyn FnOnce() -> Page>;

/// Children page built on first use and shared by every later render.
struct LazyPage {
	builder: RefCell<Option<Builder>>,
	page: OnceCell<Rc<Page>>,
}

impl LazyPage {
	fn new(builder: Builder) -> Self {
		Self {
			builder: RefCell::new(Some(builder)),
			page: OnceCell::new(),
		}
	}

	fn is_built(&self) -> bool {
		self.page.get().is_some()
	}

	fn get(&self) -> Rc<Page> {
		if let Some(page) = self.page.get() {
			return Rc::clone(page);
		}
		// The builder runs with no borrow held.
		let builder = self.builder.borrow_mut().take();
		let page = Rc::new(builder.map_or(Page::Empty, |build| build()));
		Rc::clone(self.page.get_or_init(|| page))
	}
}

/// Shows children only after the client has mounted.
///
/// Build one gate per render of the enclosing component, like a hook: the gate
/// registers its readiness with the current pass when it is constructed.
pub struct ClientOnly {
	ready: ReadySignal,
	children: Rc<LazyPage>,
	fallback: Rc<Page>,
}

/// Alias kept for pages written against the `NoSsr` name. Behaves identically.
pub type NoSsr = ClientOnly;

impl ClientOnly {
	/// Gate `children` behind client readiness. The fallback defaults to nothing.
	pub fn new<F, P>(children: F) -> Self
	where
		F: FnOnce() -> P + 'static,
		P: IntoPage,
	{
		Self {
			ready: use_is_client(),
			children: Rc::new(LazyPage::new(Box::new(move || children().into_page()))),
			fallback: Rc::new(Page::Empty),
		}
	}

	/// Content shown during server rendering and the first client render.
	pub fn fallback(mut self, fallback: impl IntoPage) -> Self {
		self.fallback = Rc::new(fallback.into_page());
		self
	}

	/// Readiness flag this gate switches on.
	pub fn ready_signal(&self) -> &ReadySignal {
		&self.ready
	}

	/// Whether the children builder has run.
	pub fn children_built(&self) -> bool {
		self.children.is_built()
	}
}

impl Component for ClientOnly {
	fn render(&self) -> Page {
		let ready = self.ready.clone();
		let children = Rc::clone(&self.children);
		let fallback = Rc::clone(&self.fallback);
		// A server pass always gets the fallback, even from a ready gate.
		Page::reactive_if(
			move || ready.is_ready() && with_runtime(|rt| rt.render_mode()) == RenderMode::Client,
			move || Page::shared(children.get()),
			move || Page::shared(Rc::clone(&fallback)),
		)
	}

	fn name() -> &'static str {
		"ClientOnly"
	}
}

impl IntoPage for ClientOnly {
	fn into_page(self) -> Page {
		self.render()
	}
}

impl fmt::Debug for ClientOnly {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientOnly")
			.field("ready", &self.ready.is_ready_untracked())
			.field("children_built", &self.children_built())
			.finish()
	}
}
