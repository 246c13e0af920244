//! Client takeover of server-rendered markup.
//!
//! [`hydrate`] attaches a client root, renders the page once and compares the
//! result with the server markup. Equal output means the client may take over
//! the existing markup; any difference is reported as
//! [`HydrationError::Mismatch`] and the attempt is rolled back.
//!
//! After a successful takeover the host calls [`MountedRoot::flush`] once the
//! browser has painted. That flush runs the mount tasks queued during the first
//! render, which is where [`ClientOnly`](crate::ClientOnly) gates open.

mod runtime;

pub use runtime::{HydrationContext, HydrationError, MountedRoot, hydrate, mount};
