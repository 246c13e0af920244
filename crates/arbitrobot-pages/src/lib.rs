//! Arbitrobot Pages
//!
//! Hydration-safe rendering for the Arbitrobot site.
//!
//! - [`component`]: the [`Component`] trait and the [`ClientOnly`] render gate
//! - [`reactive`]: hooks (`use_state`, `use_effect`, `use_is_client`, counters)
//! - [`ssr`]: server rendering into a full document with embedded state
//! - [`hydration`]: client takeover of server markup, with mismatch detection
//!
//! ## Example
//!
//! ```ignore
//! use arbitrobot_pages::prelude::*;
//!
//! // Server
//! let mut renderer = SsrRenderer::with_options(SsrOptions::new().formatter(config));
//! let document = renderer.render_page_with(|| {
//!     ClientOnly::new(|| Page::text("live"))
//!         .fallback(Page::element("span").attr("class", "spinner"))
//! });
//!
//! // Browser
//! let context = HydrationContext::from_document(&document)?;
//! let root = context.hydrate(|| {
//!     ClientOnly::new(|| Page::text("live"))
//!         .fallback(Page::element("span").attr("class", "spinner"))
//! })?;
//! root.flush(); // after paint: the gate opens
//! ```

#![warn(missing_docs)]

pub mod component;
pub mod hydration;
pub mod prelude;
pub mod reactive;
pub mod ssr;

pub use arbitrobot_core::types::page::{IntoPage, Page, PageElement};
pub use component::{ClientOnly, Component, NoSsr};
pub use hydration::{HydrationContext, HydrationError, MountedRoot, hydrate, mount};
pub use reactive::hooks::{
	Counter, CounterOptions, DeferredEffect, ReadySignal, SetState, ease_out_cubic, on_mount,
	use_counter, use_currency_counter, use_effect, use_is_client, use_layout_effect,
	use_number_counter, use_percentage_counter, use_state,
};
pub use reactive::{Effect, Signal};
pub use ssr::{SsrOptions, SsrRenderer, SsrState};
