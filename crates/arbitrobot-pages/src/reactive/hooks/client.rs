//! Client readiness: use_is_client
//!
//! A [`ReadySignal`] starts `false` and flips to `true` once, on the first
//! flush after the client pass that created it has mounted. It never flips
//! in a server pass, so anything keyed on it renders identically on the
//! server and in the first client render.
//!
//! A flag created while an already mounted root re-renders starts `true`.
//! Re-renders rebuild their hooks, and the root is on screen by then.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::effect::on_mount;
use crate::reactive::{RenderMode, Signal, with_runtime};

type Listener = Box<dyn FnMut(bool)>;

/// One-way readiness flag with change listeners.
#[derive(Clone)]
pub struct ReadySignal {
	flag: Signal<bool>,
	listeners: Rc<RefCell<Vec<Listener>>>,
}

impl ReadySignal {
	/// A flag that is not ready.
	pub fn new() -> Self {
		Self::with_state(false)
	}

	fn with_state(ready: bool) -> Self {
		Self {
			flag: Signal::new(ready),
			listeners: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Whether the client has mounted. Subscribes the running Effect.
	pub fn is_ready(&self) -> bool {
		self.flag.get()
	}

	/// Like [`is_ready`](Self::is_ready), without subscribing.
	pub fn is_ready_untracked(&self) -> bool {
		self.flag.get_untracked()
	}

	/// Call `callback(true)` when the flag flips.
	///
	/// If the flag is already set the callback runs immediately.
	pub fn on_ready_change<F>(&self, mut callback: F)
	where
		F: FnMut(bool) + 'static,
	{
		if self.is_ready_untracked() {
			callback(true);
		} else {
			self.listeners.borrow_mut().push(Box::new(callback));
		}
	}

	/// Set the flag. Later calls do nothing.
	pub fn mark_ready(&self) {
		if !self.flag.set_if_changed(true) {
			return;
		}
		tracing::debug!("client ready");
		let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
		for mut listener in listeners {
			listener(true);
		}
	}
}

impl Default for ReadySignal {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for ReadySignal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReadySignal")
			.field("ready", &self.is_ready_untracked())
			.field("listeners", &self.listeners.borrow().len())
			.finish()
	}
}

/// Returns a flag that turns `true` once the current client pass has mounted.
///
/// ```ignore
/// let is_client = use_is_client();
/// Page::reactive(move || {
///     if is_client.is_ready() { live_clock() } else { Page::empty() }
/// })
/// ```
pub fn use_is_client() -> ReadySignal {
	let mounted = with_runtime(|rt| {
		rt.render_mode() == RenderMode::Client
			&& rt.current_root().is_some_and(|root| root.is_mounted())
	});
	if mounted {
		return ReadySignal::with_state(true);
	}

	let ready = ReadySignal::new();
	let handle = ready.clone();
	on_mount(move || handle.mark_ready());
	ready
}
