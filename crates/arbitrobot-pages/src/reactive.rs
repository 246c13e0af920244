//! Reactivity for components.
//!
//! Re-exports the core runtime and adds component-level hooks.

pub mod hooks;

pub use arbitrobot_core::reactive::{
	Effect, EffectTiming, RenderMode, RootHandle, Runtime, Signal, set_scheduler,
	try_with_runtime, with_runtime,
};
