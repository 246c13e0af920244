//! Effect - Reactive Side Effects
//!
//! An `Effect` runs once when created and again whenever a Signal it read
//! during its previous run changes. Dependencies are re-collected on every run.
//!
//! ```ignore
//! use arbitrobot_core::reactive::{Effect, Signal, with_runtime};
//!
//! let count = Signal::new(0);
//! let _log = Effect::new({
//!     let count = count.clone();
//!     move || tracing::info!(count = count.get(), "changed")
//! });
//!
//! count.set(42);
//! with_runtime(|rt| rt.flush()); // the effect re-runs here
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::runtime::{EffectTiming, NodeId, Observer, try_with_runtime, with_runtime};

type EffectFn = Box<dyn FnMut() + 'static>;

// Closures of live effects, keyed by node. A closure is taken out while it runs.
thread_local! {
	static EFFECT_FUNCTIONS: RefCell<BTreeMap<NodeId, EffectFn>> = const { RefCell::new(BTreeMap::new()) };
}

// Timing of live effects. An entry exists exactly while the effect is alive.
thread_local! {
	static EFFECT_TIMING: RefCell<BTreeMap<NodeId, EffectTiming>> = const { RefCell::new(BTreeMap::new()) };
}

/// Get the timing for an effect by its ID.
///
/// Returns `None` if the node is not a live Effect.
pub(crate) fn get_effect_timing(effect_id: NodeId) -> Option<EffectTiming> {
	EFFECT_TIMING.with(|storage| storage.borrow().get(&effect_id).copied())
}

/// A side effect that re-runs when the Signals it reads change.
///
/// Dropping the `Effect` (or calling [`dispose`](Self::dispose)) stops it.
pub struct Effect {
	id: NodeId,
	disposed: Rc<Cell<bool>>,
}

impl Effect {
	/// Create a passive Effect and run it once.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		Self::new_with_timing(f, EffectTiming::Passive)
	}

	/// Create an Effect with the given timing and run it once.
	///
	/// Layout effects re-run synchronously inside the `set()` that invalidated
	/// them; passive effects re-run on the next flush.
	pub fn new_with_timing<F>(mut f: F, timing: EffectTiming) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let disposed = Rc::new(Cell::new(false));

		let guard = disposed.clone();
		EFFECT_FUNCTIONS.with(|storage| {
			storage.borrow_mut().insert(
				id,
				Box::new(move || {
					if !guard.get() {
						f();
					}
				}),
			);
		});
		EFFECT_TIMING.with(|storage| {
			storage.borrow_mut().insert(id, timing);
		});

		Self::execute_effect(id);

		Self { id, disposed }
	}

	/// Run the effect identified by `effect_id`.
	///
	/// The closure is removed from storage while it runs, so an effect that
	/// sets its own dependencies does not re-enter itself. Returns `false` when
	/// the effect no longer exists or is already running.
	pub(crate) fn execute_effect(effect_id: NodeId) -> bool {
		if get_effect_timing(effect_id).is_none() {
			return false;
		}
		let Some(mut effect_fn) =
			EFFECT_FUNCTIONS.with(|storage| storage.borrow_mut().remove(&effect_id))
		else {
			return false;
		};

		with_runtime(|rt| {
			rt.clear_dependencies(effect_id);
			rt.push_observer(Observer { id: effect_id });
		});

		effect_fn();

		with_runtime(|rt| {
			rt.pop_observer();
		});

		// Disposed while running: leave it out.
		if get_effect_timing(effect_id).is_some() {
			EFFECT_FUNCTIONS.with(|storage| {
				storage.borrow_mut().insert(effect_id, effect_fn);
			});
		}
		true
	}

	/// Get the NodeId of this effect
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Whether [`dispose`](Self::dispose) has been called.
	pub fn is_disposed(&self) -> bool {
		self.disposed.get()
	}

	/// Stop the effect and release its graph node.
	pub fn dispose(&self) {
		if self.disposed.replace(true) {
			return;
		}
		let _ = try_with_runtime(|rt| rt.remove_node(self.id));
		let _ = EFFECT_TIMING.try_with(|storage| {
			storage.borrow_mut().remove(&self.id);
		});
		// Dropping the closure may drop other Effects, so release the borrow first.
		let removed = EFFECT_FUNCTIONS.try_with(|storage| storage.borrow_mut().remove(&self.id));
		drop(removed);
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.dispose();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Signal;
	use serial_test::serial;

	fn counter() -> (Rc<Cell<usize>>, impl Fn() + Clone) {
		let count = Rc::new(Cell::new(0));
		let bump = {
			let count = count.clone();
			move || count.set(count.get() + 1)
		};
		(count, bump)
	}

	#[test]
	#[serial]
	fn test_effect_runs_immediately() {
		let (runs, bump) = counter();

		let _effect = Effect::new(bump);

		assert_eq!(runs.get(), 1);
	}

	#[test]
	#[serial]
	fn test_passive_effect_waits_for_flush() {
		let signal = Signal::new(0);
		let seen = Rc::new(Cell::new(-1));

		let _effect = Effect::new({
			let signal = signal.clone();
			let seen = seen.clone();
			move || seen.set(signal.get())
		});
		assert_eq!(seen.get(), 0);

		signal.set(7);
		assert_eq!(seen.get(), 0);

		let executed = with_runtime(|rt| rt.flush());
		assert_eq!(executed, 1);
		assert_eq!(seen.get(), 7);
	}

	#[test]
	#[serial]
	fn test_layout_effect_runs_synchronously() {
		let signal = Signal::new(1);
		let doubled = Rc::new(Cell::new(0));

		let _effect = Effect::new_with_timing(
			{
				let signal = signal.clone();
				let doubled = doubled.clone();
				move || doubled.set(signal.get() * 2)
			},
			EffectTiming::Layout,
		);

		signal.set(21);

		assert_eq!(doubled.get(), 42);
	}

	#[test]
	#[serial]
	fn test_effect_setting_own_dependency_does_not_reenter() {
		let signal = Signal::new(0);

		let _effect = Effect::new_with_timing(
			{
				let signal = signal.clone();
				move || {
					if signal.get() < 3 {
						signal.update(|n| *n += 1);
					}
				}
			},
			EffectTiming::Layout,
		);

		assert_eq!(signal.get_untracked(), 1);
	}

	#[test]
	#[serial]
	fn test_dispose_stops_reruns() {
		let signal = Signal::new(0);
		let (runs, bump) = counter();

		let effect = Effect::new({
			let signal = signal.clone();
			move || {
				let _ = signal.get();
				bump();
			}
		});
		effect.dispose();
		signal.set(1);
		with_runtime(|rt| rt.flush());

		assert!(effect.is_disposed());
		assert_eq!(runs.get(), 1);
		assert!(get_effect_timing(effect.id()).is_none());
	}

	#[test]
	#[serial]
	fn test_drop_removes_subscription() {
		let signal = Signal::new(0);

		let effect = Effect::new({
			let signal = signal.clone();
			move || {
				let _ = signal.get();
			}
		});
		with_runtime(|rt| assert_eq!(rt.subscriber_count(signal.id()), 1));

		drop(effect);
		with_runtime(|rt| assert_eq!(rt.subscriber_count(signal.id()), 0));
	}
}
