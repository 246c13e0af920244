//! Arbitrobot Core
//!
//! Foundation shared by the rendering crates:
//!
//! - [`reactive`]: thread-local reactive runtime with Signals, Effects, a
//!   render-mode stack and the post-mount task queue
//! - [`types::page`]: the markup tree and its string renderer

#![warn(missing_docs)]

pub mod reactive;
pub mod types;

pub use reactive::{Effect, EffectTiming, RenderMode, Signal, with_runtime};
pub use types::page::{IntoPage, Page, PageElement};
