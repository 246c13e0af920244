//! Log events emitted by the render passes.

use std::sync::{Arc, Mutex};

use arbitrobot_core::types::page::Page;
use arbitrobot_pages::reactive::{RenderMode, with_runtime};
use arbitrobot_pages::{hydrate, on_mount};
use rstest::rstest;
use serial_test::serial;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Collects `"[LEVEL] message"` lines.
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		self.logs
			.lock()
			.unwrap()
			.push(format!("[{}] {}", event.metadata().level(), visitor.message));
	}
}

fn capture() -> (Arc<Mutex<Vec<String>>>, tracing::subscriber::DefaultGuard) {
	let logs = Arc::new(Mutex::new(Vec::new()));
	let layer = LogCapture {
		logs: Arc::clone(&logs),
	};
	let guard = tracing_subscriber::registry().with(layer).set_default();
	(logs, guard)
}

#[rstest]
#[serial]
fn test_mismatch_is_logged_as_warning() {
	let (logs, _guard) = capture();

	let result = hydrate(|| Page::text("client"), "server");

	assert!(result.is_err());
	let logs = logs.lock().unwrap();
	assert!(logs.iter().any(|line| line == "[WARN] hydration mismatch"));
	assert!(!logs.iter().any(|line| line == "[DEBUG] hydration finished"));
}

#[rstest]
#[serial]
fn test_successful_hydration_logs_start_and_finish() {
	let (logs, _guard) = capture();

	let root = hydrate(|| Page::text("same"), "same").unwrap();
	drop(root);

	let logs = logs.lock().unwrap();
	assert!(logs.iter().any(|line| line == "[DEBUG] hydration started"));
	assert!(logs.iter().any(|line| line == "[DEBUG] hydration finished"));
}

#[rstest]
#[serial]
fn test_server_pass_mount_task_is_logged() {
	let (logs, _guard) = capture();
	let _server = with_runtime(|rt| rt.enter_mode(RenderMode::Server));

	assert!(!on_mount(|| {}));

	let logs = logs.lock().unwrap();
	assert!(
		logs.iter()
			.any(|line| line == "[DEBUG] dropping mount task queued during a server pass")
	);
}
