//! Components, hooks, SSR and hydration.
//!
//! ## Example
//!
//! ```rust,ignore
//! use arbitrobot::pages::prelude::*;
//!
//! let clock = ClientOnly::new(|| live_clock())
//!     .fallback(PageElement::new("span").attr("class", "spinner"));
//! ```

pub use arbitrobot_pages::*;
