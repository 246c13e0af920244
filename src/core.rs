//! Reactive runtime and page tree.

pub use arbitrobot_core::reactive::{
	Effect, EffectTiming, RenderMode, Runtime, Signal, set_scheduler, with_runtime,
};
pub use arbitrobot_core::types::page::{IntoPage, Page, PageElement, html_escape};
