//! Signal - Fine-grained Reactive Primitive
//!
//! `Signal<T>` holds a value and records which Effects read it.
//!
//! - `get()` inside an Effect subscribes that Effect
//! - `set()` / `update()` re-run layout subscribers at once and queue passive
//!   ones for the next flush
//! - `set_if_changed()` skips the notification when the value is unchanged
//!
//! ## Example
//!
//! ```ignore
//! use arbitrobot_core::reactive::Signal;
//!
//! let ready = Signal::new(false);
//! assert!(!ready.get());
//!
//! ready.set_if_changed(true);
//! assert!(ready.get());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::runtime::{NodeId, try_with_runtime, with_runtime};

/// A reactive value shared between clones.
///
/// Clones share the same `NodeId` and storage; the node leaves the runtime
/// graph when the last clone is dropped.
pub struct Signal<T: 'static> {
	id: NodeId,
	value: Rc<RefCell<T>>,
}

impl<T: 'static> Signal<T> {
	/// Create a new Signal with the given initial value
	pub fn new(value: T) -> Self {
		Self {
			id: NodeId::new(),
			value: Rc::new(RefCell::new(value)),
		}
	}

	/// Read the value, subscribing the running Effect (if any).
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		with_runtime(|rt| rt.track_dependency(self.id));
		self.get_untracked()
	}

	/// Read the value without subscribing anything.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Borrow the value for the duration of `f`, subscribing the running Effect.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		with_runtime(|rt| rt.track_dependency(self.id));
		f(&self.value.borrow())
	}

	/// Replace the value and notify subscribers.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Replace the value only if it differs from the current one.
	///
	/// Returns `true` when the value changed and subscribers were notified.
	pub fn set_if_changed(&self, value: T) -> bool
	where
		T: PartialEq,
	{
		{
			let mut current = self.value.borrow_mut();
			if *current == value {
				return false;
			}
			*current = value;
		}
		with_runtime(|rt| rt.notify_signal_change(self.id));
		true
	}

	/// Mutate the value in place and notify subscribers once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut *self.value.borrow_mut());
		with_runtime(|rt| rt.notify_signal_change(self.id));
	}

	/// Get the NodeId of this signal
	pub fn id(&self) -> NodeId {
		self.id
	}
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			value: Rc::clone(&self.value),
		}
	}
}

impl<T: 'static> Drop for Signal<T> {
	fn drop(&mut self) {
		if Rc::strong_count(&self.value) == 1 {
			let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &*self.value.borrow())
			.finish()
	}
}
