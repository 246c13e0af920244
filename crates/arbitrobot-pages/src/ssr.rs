//! Server-side rendering.
//!
//! Pages are rendered inside a server pass: mount tasks are discarded and
//! [`ClientOnly`](crate::ClientOnly) gates render their fallback. The rendered
//! document embeds the [`FormatterConfig`](arbitrobot_i18n::FormatterConfig)
//! used on the server so the client formats with the same locale and zone.

mod renderer;
mod state;

pub use renderer::{SsrOptions, SsrRenderer};
pub use state::{STATE_SCRIPT_ID, SsrState};

pub(crate) use state::STATE_SCRIPT_OPEN;
