//! Animation frames and timers.
//!
//! Time is virtual: it only moves when the host calls
//! [`Document::advance_time`], and frames only run on
//! [`Document::run_animation_frames`].

use crate::document::Document;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Deferred callback run with the document.
pub type Task = Box<dyn FnOnce(&mut Document)>;

/// Handle for a queued animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// Handle for a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Default)]
pub(crate) struct Scheduler {
	next_frame: u64,
	frames: Vec<(FrameId, Task)>,
	next_timer: u64,
	now_ms: u64,
	timers: BTreeMap<(u64, TimerId), Task>,
	deadlines: HashMap<TimerId, u64>,
}

impl fmt::Debug for Scheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scheduler")
			.field("frames", &self.frames.len())
			.field("timers", &self.timers.len())
			.field("now_ms", &self.now_ms)
			.finish()
	}
}

impl Scheduler {
	fn pop_due(&mut self, until: u64) -> Option<(u64, Task)> {
		let key = *self.timers.keys().next()?;
		if key.0 > until {
			return None;
		}
		let task = self.timers.remove(&key)?;
		self.deadlines.remove(&key.1);
		Some((key.0, task))
	}
}

impl Document {
	/// Queues `task` for the next animation frame.
	pub fn request_animation_frame<F>(&mut self, task: F) -> FrameId
	where
		F: FnOnce(&mut Document) + 'static,
	{
		let id = FrameId(self.scheduler.next_frame);
		self.scheduler.next_frame += 1;
		self.scheduler.frames.push((id, Box::new(task)));
		id
	}

	pub fn cancel_animation_frame(&mut self, id: FrameId) -> bool {
		let before = self.scheduler.frames.len();
		self.scheduler.frames.retain(|(frame, _)| *frame != id);
		before != self.scheduler.frames.len()
	}

	pub fn pending_animation_frames(&self) -> usize {
		self.scheduler.frames.len()
	}

	/// Runs every frame callback queued before this call and returns how many ran.
	///
	/// Callbacks requested while the flush is running wait for the next flush.
	pub fn run_animation_frames(&mut self) -> usize {
		let frames = std::mem::take(&mut self.scheduler.frames);
		let count = frames.len();
		for (_, task) in frames {
			task(self);
		}
		count
	}

	/// Schedules `task` to run `delay_ms` after the current virtual time.
	pub fn set_timeout<F>(&mut self, delay_ms: u64, task: F) -> TimerId
	where
		F: FnOnce(&mut Document) + 'static,
	{
		let id = TimerId(self.scheduler.next_timer);
		self.scheduler.next_timer += 1;
		let deadline = self.scheduler.now_ms.saturating_add(delay_ms);
		self.scheduler.timers.insert((deadline, id), Box::new(task));
		self.scheduler.deadlines.insert(id, deadline);
		id
	}

	/// Cancels a pending timer. Returns `false` if it already fired or was cleared.
	pub fn clear_timeout(&mut self, id: TimerId) -> bool {
		match self.scheduler.deadlines.remove(&id) {
			Some(deadline) => self.scheduler.timers.remove(&(deadline, id)).is_some(),
			None => false,
		}
	}

	pub fn pending_timers(&self) -> usize {
		self.scheduler.timers.len()
	}

	/// Current virtual time in milliseconds.
	pub fn now_ms(&self) -> u64 {
		self.scheduler.now_ms
	}

	/// Advances virtual time, firing due timers in deadline order.
	///
	/// Timers scheduled by a firing timer run in the same call if they fall
	/// due before the new time.
	pub fn advance_time(&mut self, ms: u64) -> usize {
		let until = self.scheduler.now_ms.saturating_add(ms);
		let mut fired = 0;
		while let Some((deadline, task)) = self.scheduler.pop_due(until) {
			self.scheduler.now_ms = deadline;
			task(self);
			fired += 1;
		}
		self.scheduler.now_ms = until;
		fired
	}
}
