//! Fine-grained reactivity.
//!
//! - [`Signal`]: a value that records its readers
//! - [`Effect`]: a closure re-run when what it read changes
//! - [`Runtime`]: per-thread dependency graph, render mode and flush queue

pub mod effect;
pub mod runtime;
pub mod signal;

pub use effect::Effect;
pub use runtime::{
	EffectTiming, NodeId, Observer, RenderMode, RenderModeGuard, RootHandle, RootScopeGuard,
	Runtime, set_scheduler, try_with_runtime, with_runtime,
};
pub use signal::Signal;
