//! Deterministic formatters.
//!
//! Every function takes an explicit [`FormatterConfig`], so the server and the
//! browser format identically.

pub use arbitrobot_i18n::*;
