//! Hydration runtime.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use arbitrobot_core::types::page::IntoPage;
use arbitrobot_i18n::FormatterConfig;

use crate::reactive::{Effect, RootHandle, try_with_runtime, with_runtime};
use crate::ssr::{STATE_SCRIPT_OPEN, SsrState};

const APP_OPEN: &str = r#"<div id="app">"#;

/// Errors that can occur during hydration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HydrationError {
	/// The document has no `<div id="app">` root.
	#[error("hydration root element not found: {0}")]
	RootNotFound(String),
	/// The embedded SSR state is not valid.
	#[error("failed to parse SSR state: {0}")]
	StateParseError(String),
	/// The first client render differs from the server markup.
	#[error("hydration mismatch at byte {position}: server rendered {expected:?}, client rendered {actual:?}")]
	Mismatch {
		/// Byte offset of the first difference.
		position: usize,
		/// Server markup.
		expected: String,
		/// Client markup.
		actual: String,
	},
}

/// App markup and state recovered from a server-rendered document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydrationContext {
	app_html: String,
	state: SsrState,
}

impl HydrationContext {
	/// Context from already separated parts.
	pub fn new(app_html: impl Into<String>, state: SsrState) -> Self {
		Self {
			app_html: app_html.into(),
			state,
		}
	}

	/// Parses a document produced by [`SsrRenderer`](crate::SsrRenderer).
	pub fn from_document(document: &str) -> Result<Self, HydrationError> {
		let start = document
			.find(APP_OPEN)
			.map(|at| at + APP_OPEN.len())
			.ok_or_else(|| HydrationError::RootNotFound("#app".to_string()))?;
		let rest = &document[start..];

		let script_at = rest.find(STATE_SCRIPT_OPEN);
		let boundary = script_at
			.or_else(|| rest.find("</body>"))
			.unwrap_or(rest.len());
		let end = rest[..boundary]
			.rfind("</div>")
			.ok_or_else(|| HydrationError::RootNotFound("#app".to_string()))?;

		let state = match script_at {
			Some(at) => {
				let payload = &rest[at + STATE_SCRIPT_OPEN.len()..];
				let json_end = payload.find("</script>").ok_or_else(|| {
					HydrationError::StateParseError("unterminated state script".to_string())
				})?;
				SsrState::from_json(&payload[..json_end])
					.map_err(|error| HydrationError::StateParseError(error.to_string()))?
			}
			None => SsrState::new(),
		};

		Ok(Self {
			app_html: rest[..end].to_string(),
			state,
		})
	}

	/// Server markup inside the app root.
	pub fn app_html(&self) -> &str {
		&self.app_html
	}

	/// State embedded by the server.
	pub fn state(&self) -> &SsrState {
		&self.state
	}

	/// Formatter configuration the server rendered with, if recorded.
	pub fn formatter_config(&self) -> Option<FormatterConfig> {
		self.state.formatter()
	}

	/// [`hydrate`] against this document's app markup.
	pub fn hydrate<F, P>(&self, build: F) -> Result<MountedRoot, HydrationError>
	where
		F: FnOnce() -> P,
		P: IntoPage,
	{
		hydrate(build, &self.app_html)
	}
}

/// A client root rendered by a live Effect.
///
/// Dropping the root disposes the Effect and detaches the root.
pub struct MountedRoot {
	effect: Effect,
	html: Rc<RefCell<String>>,
	renders: Rc<Cell<usize>>,
}

impl MountedRoot {
	fn attach<F, P>(build: F) -> Self
	where
		F: FnOnce() -> P,
		P: IntoPage,
	{
		let handle = RootHandle::new();
		with_runtime(|rt| {
			rt.attach_root();
			// Queued ahead of anything the build queues, so the root counts as
			// mounted before the first flush re-renders it.
			let mounted = handle.clone();
			rt.queue_mount(move || mounted.mark_mounted());
		});
		let page = {
			let _root = with_runtime(|rt| rt.enter_root(&handle));
			Rc::new(build().into_page())
		};

		let html = Rc::new(RefCell::new(String::new()));
		let renders = Rc::new(Cell::new(0));
		let effect = Effect::new({
			let html = Rc::clone(&html);
			let renders = Rc::clone(&renders);
			move || {
				let output = {
					let _root = with_runtime(|rt| rt.enter_root(&handle));
					page.render_to_string()
				};
				*html.borrow_mut() = output;
				renders.set(renders.get() + 1);
			}
		});

		Self {
			effect,
			html,
			renders,
		}
	}

	/// Current markup.
	pub fn html(&self) -> String {
		self.html.borrow().clone()
	}

	/// How many times the root has rendered, the initial render included.
	pub fn render_count(&self) -> usize {
		self.renders.get()
	}

	/// Runs pending mount tasks and re-renders. Returns the number of effect runs.
	pub fn flush(&self) -> usize {
		with_runtime(|rt| rt.flush())
	}

	/// Tears the root down.
	pub fn unmount(self) {}
}

impl Drop for MountedRoot {
	fn drop(&mut self) {
		self.effect.dispose();
		let _ = try_with_runtime(|rt| rt.detach_root());
	}
}

impl fmt::Debug for MountedRoot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MountedRoot")
			.field("renders", &self.renders.get())
			.field("html", &*self.html.borrow())
			.finish()
	}
}

/// Takes over `server_html` with the page produced by `build`.
///
/// On mismatch nothing stays attached and no mount task queued by `build`
/// will run.
pub fn hydrate<F, P>(build: F, server_html: &str) -> Result<MountedRoot, HydrationError>
where
	F: FnOnce() -> P,
	P: IntoPage,
{
	tracing::debug!("hydration started");
	let queued_before = with_runtime(|rt| rt.pending_mount_tasks());
	let root = MountedRoot::attach(build);
	let actual = root.html();

	if actual != server_html {
		let position = first_difference(server_html, &actual);
		tracing::warn!(position, "hydration mismatch");
		with_runtime(|rt| rt.truncate_mount_queue(queued_before));
		drop(root);
		return Err(HydrationError::Mismatch {
			position,
			expected: server_html.to_string(),
			actual,
		});
	}

	tracing::debug!("hydration finished");
	Ok(root)
}

/// Mounts `build` as a fresh client root with no server markup to match.
pub fn mount<F, P>(build: F) -> MountedRoot
where
	F: FnOnce() -> P,
	P: IntoPage,
{
	MountedRoot::attach(build)
}

fn first_difference(a: &str, b: &str) -> usize {
	a.bytes()
		.zip(b.bytes())
		.position(|(x, y)| x != y)
		.unwrap_or_else(|| a.len().min(b.len()))
}
