//! Common imports for page code.

pub use crate::component::{ClientOnly, Component, NoSsr};
pub use crate::hydration::{HydrationContext, HydrationError, MountedRoot, hydrate, mount};
pub use crate::reactive::hooks::{
	Counter, CounterOptions, ReadySignal, on_mount, use_counter, use_currency_counter, use_effect,
	use_is_client, use_number_counter, use_percentage_counter, use_state,
};
pub use crate::reactive::{Effect, Signal};
pub use crate::ssr::{SsrOptions, SsrRenderer, SsrState};
pub use arbitrobot_core::types::page::{IntoPage, Page, PageElement};
pub use arbitrobot_i18n::{FormatterConfig, Formatters};
