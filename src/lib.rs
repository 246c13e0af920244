//! # Arbitrobot
//!
//! Rendering support for the Arbitrobot website: the pieces that keep a
//! server-rendered page and its client takeover producing identical markup.
//!
//! - [`core`]: reactive runtime and page tree
//! - [`i18n`]: number and date formatters pinned to one locale and time zone
//! - [`pages`]: `ClientOnly` gate, hooks, SSR and hydration (feature `pages`)
//!
//! ## Feature Flags
//!
//! - `pages` - components, hooks, SSR and hydration
//! - `full` (default) - everything
//!
//! With `default-features = false` only the reactive core and the formatters
//! are built.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use arbitrobot::prelude::*;
//!
//! let config = FormatterConfig::from_env()?;
//! let fmt = Formatters::new(config);
//!
//! let mut renderer = SsrRenderer::with_options(SsrOptions::new().formatter(config));
//! let document = renderer.render_page_with(|| {
//!     PageElement::new("main")
//!         .child(fmt.currency(1234.5, "USD").unwrap_or_default())
//!         .child(ClientOnly::new(|| live_ticker()).fallback("…"))
//! });
//! ```

pub mod core;
pub mod i18n;
#[cfg(feature = "pages")]
pub mod pages;

// Re-export formatter configuration
pub use arbitrobot_i18n::{ConfigError, FormatError, FormatterConfig, Formatters, Locale};

// Re-export the page tree
pub use arbitrobot_core::{IntoPage, Page, PageElement};

// Re-export the render gate and passes
#[cfg(feature = "pages")]
pub use arbitrobot_pages::{
	ClientOnly, Component, HydrationContext, HydrationError, MountedRoot, NoSsr, SsrOptions,
	SsrRenderer, hydrate, mount,
};

/// Common imports.
pub mod prelude {
	pub use crate::core::{Effect, IntoPage, Page, PageElement, RenderMode, Signal};
	pub use crate::i18n::{
		DateTimeFormatOptions, FormatterConfig, Formatters, Locale, NumberFormatOptions, Tz,
	};

	#[cfg(feature = "pages")]
	pub use arbitrobot_pages::prelude::*;
}
