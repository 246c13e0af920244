//! Effect hooks: on_mount, use_effect and use_layout_effect
//!
//! Unlike a bare [`Effect`], these hooks never run anything while a page is
//! being built. Their work is queued on the runtime's mount queue and starts on
//! the next flush of a client pass. In a server pass the work is discarded.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::reactive::{Effect, EffectTiming, with_runtime};

/// Runs `f` once after the current client pass has mounted.
///
/// Returns `false` when called during a server pass, in which case `f` is
/// dropped without running.
///
/// ```ignore
/// on_mount(|| tracing::info!("dashboard mounted"));
/// ```
pub fn on_mount<F>(f: F) -> bool
where
	F: FnOnce() + 'static,
{
	with_runtime(|rt| rt.queue_mount(f))
}

/// Handle to an effect started after mount.
///
/// Dropping the handle disposes the effect, or cancels it if it has not
/// started yet.
#[must_use = "the effect is disposed when the handle is dropped"]
pub struct DeferredEffect {
	slot: Rc<RefCell<Option<Effect>>>,
	cancelled: Rc<Cell<bool>>,
}

impl DeferredEffect {
	fn schedule<F>(f: F, timing: EffectTiming) -> Self
	where
		F: FnMut() + 'static,
	{
		let slot = Rc::new(RefCell::new(None));
		let cancelled = Rc::new(Cell::new(false));

		let weak_slot = Rc::downgrade(&slot);
		let cancel_flag = Rc::clone(&cancelled);
		on_mount(move || {
			if cancel_flag.get() {
				return;
			}
			let Some(slot) = weak_slot.upgrade() else {
				return;
			};
			// The first run happens here, outside any borrow of the slot.
			let effect = Effect::new_with_timing(f, timing);
			*slot.borrow_mut() = Some(effect);
		});

		Self { slot, cancelled }
	}

	/// Whether the effect has started and is still live.
	pub fn is_active(&self) -> bool {
		self.slot
			.borrow()
			.as_ref()
			.is_some_and(|effect| !effect.is_disposed())
	}

	/// Stop the effect, or prevent it from starting.
	pub fn dispose(&self) {
		self.cancelled.set(true);
		let effect = self.slot.borrow_mut().take();
		if let Some(effect) = effect {
			effect.dispose();
		}
	}
}

impl Drop for DeferredEffect {
	fn drop(&mut self) {
		self.dispose();
	}
}

impl fmt::Debug for DeferredEffect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeferredEffect")
			.field("active", &self.is_active())
			.field("cancelled", &self.cancelled.get())
			.finish()
	}
}

/// Runs a side effect after mount, re-running it whenever a Signal it reads
/// changes.
///
/// Dependencies are tracked automatically. Re-runs are batched into the next
/// flush.
///
/// ```ignore
/// let (count, set_count) = use_state(0);
/// let _log = use_effect(move || tracing::info!(count = count.get(), "count changed"));
/// ```
pub fn use_effect<F>(f: F) -> DeferredEffect
where
	F: FnMut() + 'static,
{
	DeferredEffect::schedule(f, EffectTiming::Passive)
}

/// Like [`use_effect`], but re-runs synchronously inside the `set` that
/// changed a dependency.
pub fn use_layout_effect<F>(f: F) -> DeferredEffect
where
	F: FnMut() + 'static,
{
	DeferredEffect::schedule(f, EffectTiming::Layout)
}
