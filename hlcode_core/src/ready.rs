use tracing::debug;

use crate::HlResult;

/// Loading state of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadyState {
	#[default]
	Loading,
	Interactive,
}

/// A callback waiting for the page to become interactive.
pub type ReadyTask<C> = Box<dyn FnOnce(&mut C) -> HlResult<()>>;

/// One-shot readiness signal.
///
/// Tasks registered while loading are queued and run exactly once, in
/// registration order, when [`DocumentReady::mark_interactive`] is called.
/// Tasks registered afterwards run straight away.
pub struct DocumentReady<C> {
	state: ReadyState,
	pending: Vec<ReadyTask<C>>,
}

impl<C> Default for DocumentReady<C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<C> std::fmt::Debug for DocumentReady<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DocumentReady")
			.field("state", &self.state)
			.field("pending", &self.pending.len())
			.finish()
	}
}

impl<C> DocumentReady<C> {
	pub fn new() -> Self {
		Self {
			state: ReadyState::Loading,
			pending: vec![],
		}
	}

	/// A signal for a page which is already interactive.
	pub fn interactive() -> Self {
		Self {
			state: ReadyState::Interactive,
			pending: vec![],
		}
	}

	pub fn state(&self) -> ReadyState {
		self.state
	}

	pub fn pending(&self) -> usize {
		self.pending.len()
	}

	pub fn on_ready<F>(&mut self, cx: &mut C, task: F) -> HlResult<()>
	where
		F: FnOnce(&mut C) -> HlResult<()> + 'static,
	{
		match self.state {
			ReadyState::Interactive => task(cx),
			ReadyState::Loading => {
				self.pending.push(Box::new(task));
				Ok(())
			}
		}
	}

	/// Switch to interactive and drain the queue. Every queued task runs even
	/// when an earlier one fails; the first error is returned.
	pub fn mark_interactive(&mut self, cx: &mut C) -> HlResult<()> {
		if self.state == ReadyState::Interactive {
			return Ok(());
		}

		self.state = ReadyState::Interactive;
		let pending = std::mem::take(&mut self.pending);
		debug!(tasks = pending.len(), "document interactive");

		let mut first_error = None;

		for task in pending {
			if let Err(error) = task(cx) {
				first_error.get_or_insert(error);
			}
		}

		first_error.map_or(Ok(()), Err)
	}
}
