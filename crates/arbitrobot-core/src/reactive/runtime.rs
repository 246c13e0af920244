//! Reactive Runtime
//!
//! The runtime owns everything that coordinates reactive nodes on one thread:
//!
//! 1. **Observer Stack**: the Effect currently executing, so `Signal::get()` can
//!    record who depends on it
//! 2. **Dependency Graph**: signal -> subscriber edges and their reverse
//! 3. **Pending Queue**: passive effects waiting for the next flush
//! 4. **Mount Queue**: one-shot tasks that run after a client root has been
//!    attached and painted
//! 5. **Render Mode**: whether the code currently running belongs to a server
//!    (non-interactive) pass or a client (interactive) pass
//! 6. **Root Scope**: the client root whose build or render is running, and
//!    whether that root has mounted yet
//!
//! Nothing queued here ever runs inside the call that queued it. The host either
//! installs a scheduler with [`set_scheduler`] or calls [`Runtime::flush`] itself
//! once the initial render is on screen.
//!
//! ## Example
//!
//! ```ignore
//! use arbitrobot_core::reactive::{RenderMode, with_runtime};
//!
//! // Server passes discard mount tasks.
//! let _pass = with_runtime(|rt| rt.enter_mode(RenderMode::Server));
//! with_runtime(|rt| rt.queue_mount(|| unreachable!()));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::effect::{Effect, get_effect_timing};

/// Upper bound on mount/effect rounds in a single flush.
const MAX_FLUSH_ROUNDS: usize = 64;

/// Unique identifier for reactive nodes (Signals and Effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Create a new unique NodeId
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

/// Effect execution timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectTiming {
	/// Re-runs synchronously inside the `set()` that invalidated it
	Layout,
	/// Re-runs on the next flush
	#[default]
	Passive,
}

/// Kind of render pass the current code belongs to.
///
/// `Server` is a non-interactive pass: it produces markup once and never
/// reaches a live rendering surface, so mount tasks queued during it are
/// dropped. `Client` is an interactive pass attached to a mounted root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
	/// Non-interactive pass (SSR, static export)
	#[default]
	Server,
	/// Interactive pass under a mounted client root
	Client,
}

/// Observer represents a currently executing Effect
#[derive(Debug, Clone)]
pub struct Observer {
	/// Unique identifier for this observer
	pub id: NodeId,
}

/// Dependency graph node
#[derive(Debug, Default)]
pub(crate) struct DependencyNode {
	/// IDs of nodes that depend on this node
	pub(crate) subscribers: Vec<NodeId>,
	/// IDs of nodes this node depends on
	pub(crate) dependencies: Vec<NodeId>,
}

/// One-shot task queued for after mount.
type MountTask = Box<dyn FnOnce() + 'static>;

/// Type for the host scheduler function
type SchedulerFn = Box<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>;

/// Global scheduler function
static SCHEDULER: OnceLock<SchedulerFn> = OnceLock::new();

/// Set the global scheduler used to defer flushes.
///
/// The scheduler receives a job that flushes the runtime of whichever thread
/// runs it. Hosts with an event loop hand the job to their microtask queue;
/// without a scheduler the host must call [`Runtime::flush`] after paint.
/// Only the first call has any effect.
///
/// # Example
///
/// ```ignore
/// arbitrobot_core::reactive::set_scheduler(|job| {
///     event_loop.queue_microtask(job);
/// });
/// ```
pub fn set_scheduler<F>(scheduler: F)
where
	F: Fn(Box<dyn FnOnce() + Send>) + Send + Sync + 'static,
{
	let _ = SCHEDULER.set(Box::new(scheduler));
}

/// Restores the previous render mode when dropped.
///
/// Returned by [`Runtime::enter_mode`]. Tied to the thread that created it.
/// Guards may be dropped in any order; dropping one also ends every mode
/// entered after it.
#[must_use = "the render mode is restored as soon as the guard is dropped"]
pub struct RenderModeGuard {
	depth: usize,
	_not_send: PhantomData<*const ()>,
}

impl Drop for RenderModeGuard {
	fn drop(&mut self) {
		let _ = try_with_runtime(|rt| rt.mode_stack.borrow_mut().truncate(self.depth));
	}
}

/// Identity and mount state of one client root.
///
/// Clones share the same state. A root is marked mounted by the first flush
/// after it was attached, and stays mounted until it is dropped.
#[derive(Debug, Clone, Default)]
pub struct RootHandle {
	mounted: Rc<Cell<bool>>,
}

impl RootHandle {
	/// A root that has not mounted yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether the root's first mount flush has run.
	pub fn is_mounted(&self) -> bool {
		self.mounted.get()
	}

	/// Record that the root is on screen.
	pub fn mark_mounted(&self) {
		self.mounted.set(true);
	}

	/// Whether `other` refers to the same root.
	pub fn same_root(&self, other: &RootHandle) -> bool {
		Rc::ptr_eq(&self.mounted, &other.mounted)
	}
}

/// Leaves the root scope entered with [`Runtime::enter_root`] when dropped.
#[must_use = "the root scope ends as soon as the guard is dropped"]
pub struct RootScopeGuard {
	depth: usize,
	_not_send: PhantomData<*const ()>,
}

impl Drop for RootScopeGuard {
	fn drop(&mut self) {
		let _ = try_with_runtime(|rt| rt.root_stack.borrow_mut().truncate(self.depth));
	}
}

/// Per-thread reactive runtime
pub struct Runtime {
	/// Observer stack for tracking currently executing effects
	observer_stack: RefCell<Vec<Observer>>,
	/// Dependency graph: NodeId -> DependencyNode
	pub(crate) dependency_graph: RefCell<BTreeMap<NodeId, DependencyNode>>,
	/// Passive effects waiting for the next flush
	pub(crate) pending_updates: RefCell<Vec<NodeId>>,
	/// Whether a flush has been handed to the scheduler
	pub(crate) update_scheduled: Cell<bool>,
	/// Explicit render pass guards, innermost last
	mode_stack: RefCell<Vec<RenderMode>>,
	/// Client roots whose build or render is running, innermost last
	root_stack: RefCell<Vec<RootHandle>>,
	/// Number of client roots currently attached
	attached_roots: Cell<usize>,
	/// Tasks waiting for the next flush after mount
	mount_queue: RefCell<VecDeque<MountTask>>,
}

impl Runtime {
	/// Create a new Runtime instance
	pub fn new() -> Self {
		Self {
			observer_stack: RefCell::new(Vec::new()),
			dependency_graph: RefCell::new(BTreeMap::new()),
			pending_updates: RefCell::new(Vec::new()),
			update_scheduled: Cell::new(false),
			mode_stack: RefCell::new(Vec::new()),
			root_stack: RefCell::new(Vec::new()),
			attached_roots: Cell::new(0),
			mount_queue: RefCell::new(VecDeque::new()),
		}
	}

	/// Get the current observer (the currently executing Effect)
	pub fn current_observer(&self) -> Option<NodeId> {
		self.observer_stack
			.borrow()
			.last()
			.map(|observer| observer.id)
	}

	/// Push an observer onto the stack
	pub fn push_observer(&self, observer: Observer) {
		self.observer_stack.borrow_mut().push(observer);
	}

	/// Pop an observer from the stack
	pub fn pop_observer(&self) -> Option<Observer> {
		self.observer_stack.borrow_mut().pop()
	}

	/// Record that the current observer reads `signal_id`.
	///
	/// Called by `Signal::get()`. Does nothing outside an Effect.
	pub fn track_dependency(&self, signal_id: NodeId) {
		if let Some(observer_id) = self.current_observer() {
			let mut graph = self.dependency_graph.borrow_mut();

			let signal_node = graph.entry(signal_id).or_default();
			if !signal_node.subscribers.contains(&observer_id) {
				signal_node.subscribers.push(observer_id);
			}

			let observer_node = graph.entry(observer_id).or_default();
			if !observer_node.dependencies.contains(&signal_id) {
				observer_node.dependencies.push(signal_id);
			}
		}
	}

	/// Notify that a Signal has changed
	///
	/// Layout subscribers re-run before this returns; passive subscribers are
	/// queued for the next flush (each at most once).
	pub fn notify_signal_change(&self, signal_id: NodeId) {
		let (layout_effects, passive_effects): (Vec<NodeId>, Vec<NodeId>) = {
			let graph = self.dependency_graph.borrow();
			let Some(node) = graph.get(&signal_id) else {
				return;
			};
			node.subscribers
				.iter()
				.copied()
				.partition(|id| get_effect_timing(*id) == Some(EffectTiming::Layout))
		};

		for effect_id in layout_effects {
			Effect::execute_effect(effect_id);
		}

		for effect_id in passive_effects {
			self.schedule_update(effect_id);
		}
	}

	/// Queue a node for the next flush
	pub fn schedule_update(&self, node_id: NodeId) {
		{
			let mut pending = self.pending_updates.borrow_mut();
			if !pending.contains(&node_id) {
				pending.push(node_id);
			}
		}
		self.schedule_flush();
	}

	/// Hand a flush job to the scheduler unless one is already outstanding.
	fn schedule_flush(&self) {
		if self.update_scheduled.replace(true) {
			return;
		}
		if let Some(scheduler) = SCHEDULER.get() {
			scheduler(Box::new(|| {
				RUNTIME.with(|rt| {
					rt.flush();
				});
			}));
		}
	}

	/// Returns the render mode of the code currently running.
	///
	/// The innermost [`enter_mode`](Self::enter_mode) guard wins; otherwise the
	/// thread is in `Client` mode while any root is attached, `Server` if not.
	pub fn render_mode(&self) -> RenderMode {
		if let Some(mode) = self.mode_stack.borrow().last() {
			return *mode;
		}
		if self.attached_roots.get() > 0 {
			RenderMode::Client
		} else {
			RenderMode::Server
		}
	}

	/// Enter a render pass of the given kind until the guard is dropped.
	pub fn enter_mode(&self, mode: RenderMode) -> RenderModeGuard {
		let mut stack = self.mode_stack.borrow_mut();
		let depth = stack.len();
		stack.push(mode);
		RenderModeGuard {
			depth,
			_not_send: PhantomData,
		}
	}

	/// Run code on behalf of `root` until the guard is dropped.
	pub fn enter_root(&self, root: &RootHandle) -> RootScopeGuard {
		let mut stack = self.root_stack.borrow_mut();
		let depth = stack.len();
		stack.push(root.clone());
		RootScopeGuard {
			depth,
			_not_send: PhantomData,
		}
	}

	/// The innermost root whose build or render is running, if any.
	pub fn current_root(&self) -> Option<RootHandle> {
		self.root_stack.borrow().last().cloned()
	}

	/// Register a mounted client root on this thread.
	pub fn attach_root(&self) {
		self.attached_roots.set(self.attached_roots.get() + 1);
	}

	/// Unregister a mounted client root.
	pub fn detach_root(&self) {
		self.attached_roots
			.set(self.attached_roots.get().saturating_sub(1));
	}

	/// Number of client roots currently attached.
	pub fn attached_roots(&self) -> usize {
		self.attached_roots.get()
	}

	/// Queue a one-shot task for after mount.
	///
	/// In a `Client` pass the task runs on the next flush, never inside this
	/// call. In a `Server` pass the task is dropped, since a server pass never
	/// reaches an interactive surface. Returns whether the task was queued.
	pub fn queue_mount<F>(&self, task: F) -> bool
	where
		F: FnOnce() + 'static,
	{
		match self.render_mode() {
			RenderMode::Server => {
				tracing::debug!("dropping mount task queued during a server pass");
				false
			}
			RenderMode::Client => {
				self.mount_queue.borrow_mut().push_back(Box::new(task));
				self.schedule_flush();
				true
			}
		}
	}

	/// Number of mount tasks waiting for a flush.
	pub fn pending_mount_tasks(&self) -> usize {
		self.mount_queue.borrow().len()
	}

	/// Drop queued mount tasks beyond the first `len`.
	///
	/// Used to roll back a mount attempt that failed part-way.
	pub fn truncate_mount_queue(&self, len: usize) {
		self.mount_queue.borrow_mut().truncate(len);
	}

	fn next_mount_task(&self) -> Option<MountTask> {
		self.mount_queue.borrow_mut().pop_front()
	}

	/// Run queued mount tasks and pending passive effects until both are empty.
	///
	/// Mount tasks go first in each round, so a signal they set is observed by
	/// the effects of the same round. Returns the number of effect executions.
	pub fn flush(&self) -> usize {
		self.update_scheduled.set(false);
		let mut executed = 0;

		for _ in 0..MAX_FLUSH_ROUNDS {
			let mut progressed = false;

			while let Some(task) = self.next_mount_task() {
				task();
				progressed = true;
			}

			let pending = std::mem::take(&mut *self.pending_updates.borrow_mut());
			for node_id in pending {
				progressed = true;
				if Effect::execute_effect(node_id) {
					executed += 1;
				}
			}

			if !progressed {
				self.update_scheduled.set(false);
				return executed;
			}
		}

		tracing::warn!(
			rounds = MAX_FLUSH_ROUNDS,
			"reactive flush did not settle; remaining updates deferred"
		);
		self.update_scheduled.set(false);
		executed
	}

	/// Remove every dependency edge of `node_id` before it re-runs.
	pub fn clear_dependencies(&self, node_id: NodeId) {
		let mut graph = self.dependency_graph.borrow_mut();

		let dependencies = match graph.get_mut(&node_id) {
			Some(node) => std::mem::take(&mut node.dependencies),
			None => return,
		};

		for dep_id in dependencies {
			if let Some(dep_node) = graph.get_mut(&dep_id) {
				dep_node.subscribers.retain(|&id| id != node_id);
			}
		}
	}

	/// Remove a node from the dependency graph
	///
	/// Called when a Signal or Effect is dropped.
	pub fn remove_node(&self, node_id: NodeId) {
		self.clear_dependencies(node_id);
		self.dependency_graph.borrow_mut().remove(&node_id);
		self.pending_updates.borrow_mut().retain(|&id| id != node_id);
	}

	/// Check if a node exists in the dependency graph
	pub fn has_node(&self, node_id: NodeId) -> bool {
		self.dependency_graph.borrow().contains_key(&node_id)
	}

	/// Get the number of subscribers for a node
	pub fn subscriber_count(&self, node_id: NodeId) -> usize {
		self.dependency_graph
			.borrow()
			.get(&node_id)
			.map(|node| node.subscribers.len())
			.unwrap_or(0)
	}
}

impl Default for Runtime {
	fn default() -> Self {
		Self::new()
	}
}

// One runtime per thread; in a browser that is the only thread.
thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Run `f` against this thread's runtime.
pub fn with_runtime<F, R>(f: F) -> R
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.with(f)
}

/// Like [`with_runtime`], but returns `None` once thread-local storage is gone.
///
/// Meant for `Drop` implementations.
pub fn try_with_runtime<F, R>(f: F) -> Option<R>
where
	F: FnOnce(&Runtime) -> R,
{
	RUNTIME.try_with(f).ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn effect_observer(id: NodeId) -> Observer {
		Observer { id }
	}

	#[rstest]
	fn test_node_id_uniqueness() {
		let id1 = NodeId::new();
		let id2 = NodeId::new();

		assert_ne!(id1, id2);
	}

	#[rstest]
	fn test_observer_stack_nesting() {
		let runtime = Runtime::new();
		let outer = NodeId::new();
		let inner = NodeId::new();

		runtime.push_observer(effect_observer(outer));
		runtime.push_observer(effect_observer(inner));
		assert_eq!(runtime.current_observer(), Some(inner));

		runtime.pop_observer();
		assert_eq!(runtime.current_observer(), Some(outer));

		runtime.pop_observer();
		assert!(runtime.current_observer().is_none());
	}

	#[rstest]
	fn test_track_dependency_records_both_edges() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();
		let effect_id = NodeId::new();

		runtime.push_observer(effect_observer(effect_id));
		runtime.track_dependency(signal_id);
		runtime.track_dependency(signal_id);
		runtime.pop_observer();

		let graph = runtime.dependency_graph.borrow();
		assert_eq!(graph[&signal_id].subscribers, vec![effect_id]);
		assert_eq!(graph[&effect_id].dependencies, vec![signal_id]);
	}

	#[rstest]
	fn test_track_dependency_without_observer_is_noop() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();

		runtime.track_dependency(signal_id);

		assert!(!runtime.has_node(signal_id));
	}

	#[rstest]
	fn test_notify_queues_passive_subscriber_once() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();
		let effect_id = NodeId::new();
		runtime
			.dependency_graph
			.borrow_mut()
			.entry(signal_id)
			.or_default()
			.subscribers
			.push(effect_id);

		runtime.notify_signal_change(signal_id);
		runtime.notify_signal_change(signal_id);

		assert_eq!(*runtime.pending_updates.borrow(), vec![effect_id]);
	}

	#[rstest]
	fn test_clear_dependencies() {
		let runtime = Runtime::new();
		let signal_id = NodeId::new();
		let effect_id = NodeId::new();

		runtime.push_observer(effect_observer(effect_id));
		runtime.track_dependency(signal_id);
		runtime.pop_observer();

		runtime.clear_dependencies(effect_id);

		assert_eq!(runtime.subscriber_count(signal_id), 0);
		assert!(
			runtime.dependency_graph.borrow()[&effect_id]
				.dependencies
				.is_empty()
		);
	}

	#[rstest]
	fn test_render_mode_defaults_to_server() {
		let runtime = Runtime::new();

		assert_eq!(runtime.render_mode(), RenderMode::Server);
	}

	#[rstest]
	fn test_attached_root_switches_to_client() {
		let runtime = Runtime::new();

		runtime.attach_root();
		assert_eq!(runtime.render_mode(), RenderMode::Client);

		runtime.detach_root();
		assert_eq!(runtime.render_mode(), RenderMode::Server);
	}

	#[rstest]
	fn test_mode_guard_overrides_and_restores() {
		with_runtime(|rt| {
			rt.attach_root();
			{
				let _pass = rt.enter_mode(RenderMode::Server);
				assert_eq!(rt.render_mode(), RenderMode::Server);
				{
					let _inner = rt.enter_mode(RenderMode::Client);
					assert_eq!(rt.render_mode(), RenderMode::Client);
				}
				assert_eq!(rt.render_mode(), RenderMode::Server);
			}
			assert_eq!(rt.render_mode(), RenderMode::Client);
			rt.detach_root();
		});
	}

	#[rstest]
	fn test_mode_guards_dropped_out_of_order() {
		with_runtime(|rt| {
			rt.attach_root();
			let outer = rt.enter_mode(RenderMode::Server);
			let inner = rt.enter_mode(RenderMode::Server);

			drop(outer);
			assert_eq!(rt.render_mode(), RenderMode::Client);

			drop(inner);
			assert_eq!(rt.render_mode(), RenderMode::Client);
			{
				let _pass = rt.enter_mode(RenderMode::Server);
				assert_eq!(rt.render_mode(), RenderMode::Server);
			}
			assert_eq!(rt.render_mode(), RenderMode::Client);
			rt.detach_root();
		});
	}

	#[rstest]
	fn test_root_scope_nests_and_restores() {
		let outer = RootHandle::new();
		let inner = RootHandle::new();

		with_runtime(|rt| {
			assert!(rt.current_root().is_none());
			{
				let _outer = rt.enter_root(&outer);
				{
					let _inner = rt.enter_root(&inner);
					assert!(rt.current_root().is_some_and(|root| root.same_root(&inner)));
				}
				assert!(rt.current_root().is_some_and(|root| root.same_root(&outer)));
			}
			assert!(rt.current_root().is_none());
		});
	}

	#[rstest]
	fn test_root_handle_clones_share_mount_state() {
		let root = RootHandle::new();
		let other = root.clone();
		assert!(!other.is_mounted());

		root.mark_mounted();

		assert!(other.is_mounted());
		assert!(other.same_root(&root));
		assert!(!RootHandle::new().same_root(&root));
	}

	#[rstest]
	fn test_queue_mount_dropped_in_server_mode() {
		let runtime = Runtime::new();

		let queued = runtime.queue_mount(|| panic!("server passes never mount"));

		assert!(!queued);
		assert_eq!(runtime.pending_mount_tasks(), 0);
	}

	#[rstest]
	fn test_queue_mount_deferred_until_flush() {
		let runtime = Runtime::new();
		runtime.attach_root();
		let ran = Rc::new(Cell::new(false));

		let queued = runtime.queue_mount({
			let ran = ran.clone();
			move || ran.set(true)
		});

		assert!(queued);
		assert!(!ran.get());

		runtime.flush();
		assert!(ran.get());
		assert_eq!(runtime.pending_mount_tasks(), 0);
	}

	#[rstest]
	fn test_truncate_mount_queue() {
		let runtime = Runtime::new();
		runtime.attach_root();
		runtime.queue_mount(|| {});
		runtime.queue_mount(|| {});
		runtime.queue_mount(|| {});

		runtime.truncate_mount_queue(1);

		assert_eq!(runtime.pending_mount_tasks(), 1);
	}
}
