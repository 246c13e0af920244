//! Hooks used while building a component's page.
//!
//! Hooks that defer work (`on_mount`, `use_effect`, `use_is_client`) only
//! schedule it in a client pass. In a server pass the deferred work is dropped,
//! which is what keeps browser-only code out of server renders.

mod client;
mod counter;
mod effect;
mod state;

pub use client::{ReadySignal, use_is_client};
pub use counter::{
	Counter, CounterOptions, Easing, ease_out_cubic, format_counter, use_counter,
	use_currency_counter, use_number_counter, use_percentage_counter,
};
pub use effect::{DeferredEffect, on_mount, use_effect, use_layout_effect};
pub use state::{SetState, use_state};
