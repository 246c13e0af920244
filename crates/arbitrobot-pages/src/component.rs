//! Components and render gates.

mod client_only;
mod r#trait;

pub use client_only::{ClientOnly, NoSsr};
pub use r#trait::Component;
