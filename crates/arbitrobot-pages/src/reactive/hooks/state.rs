//! State hook: use_state

use crate::reactive::Signal;

/// Setter half of [`use_state`].
pub struct SetState<T: 'static> {
	signal: Signal<T>,
}

impl<T: 'static> SetState<T> {
	/// Replace the value and notify readers.
	pub fn set(&self, value: T) {
		self.signal.set(value);
	}

	/// Modify the value in place and notify readers.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		self.signal.update(f);
	}
}

impl<T: 'static> Clone for SetState<T> {
	fn clone(&self) -> Self {
		Self {
			signal: self.signal.clone(),
		}
	}
}

/// Creates a piece of component state.
///
/// Returns the readable [`Signal`] and a [`SetState`] that writes to it.
///
/// ```ignore
/// let (count, set_count) = use_state(0);
/// set_count.update(|n| *n += 1);
/// assert_eq!(count.get(), 1);
/// ```
pub fn use_state<T: 'static>(initial: T) -> (Signal<T>, SetState<T>) {
	let signal = Signal::new(initial);
	let setter = SetState {
		signal: signal.clone(),
	};
	(signal, setter)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Effect;
	use serial_test::serial;
	use std::cell::Cell;
	use std::rc::Rc;

	#[test]
	#[serial]
	fn test_setter_writes_signal() {
		let (count, set_count) = use_state(1);

		set_count.set(5);
		assert_eq!(count.get_untracked(), 5);

		set_count.clone().update(|n| *n *= 2);
		assert_eq!(count.get_untracked(), 10);
	}

	#[test]
	#[serial]
	fn test_setter_notifies_effects() {
		let (name, set_name) = use_state(String::from("a"));
		let seen = Rc::new(Cell::new(0));

		let _effect = Effect::new({
			let seen = Rc::clone(&seen);
			move || {
				let _ = name.get();
				seen.set(seen.get() + 1);
			}
		});
		assert_eq!(seen.get(), 1);

		set_name.set("b".into());
		crate::reactive::with_runtime(|rt| rt.flush());
		assert_eq!(seen.get(), 2);
	}
}
