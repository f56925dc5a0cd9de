//! Display-synchronized frame scheduling.
//!
//! [`FrameTask`] is a repeating per-frame callback with a cancellation
//! handle. The task re-requests the next frame before running its tick, so
//! a cancellation issued from inside the tick still finds the follow-up
//! request and drops it.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Identifies one outstanding frame request.
pub type FrameHandle = i32;

/// One-shot frame source: `requestAnimationFrame` in the browser, a
/// manually fired queue in tests.
pub trait FrameClock {
	/// Schedule `callback` to run on the next frame.
	fn request(&self, callback: Box<dyn FnOnce()>) -> FrameHandle;
	/// Drop a previously scheduled callback. Unknown handles are ignored.
	fn cancel(&self, handle: FrameHandle);
}

/// A repeating per-frame task with synchronous cancellation.
pub struct FrameTask {
	clock: Rc<dyn FrameClock>,
	pending: Rc<Cell<Option<FrameHandle>>>,
}

impl FrameTask {
	/// Start ticking: `tick` runs once per clock frame until [`FrameTask::cancel`].
	pub fn start(clock: Rc<dyn FrameClock>, tick: Rc<dyn Fn()>) -> Self {
		let pending = Rc::new(Cell::new(None));
		Self::arm(&clock, &pending, &tick);
		Self { clock, pending }
	}

	fn arm(clock: &Rc<dyn FrameClock>, pending: &Rc<Cell<Option<FrameHandle>>>, tick: &Rc<dyn Fn()>) {
		let (next_clock, next_pending, next_tick) = (clock.clone(), pending.clone(), tick.clone());
		let handle = clock.request(Box::new(move || {
			// Re-register before the tick runs: a cancel issued inside the
			// tick must still catch the follow-up request.
			Self::arm(&next_clock, &next_pending, &next_tick);
			next_tick();
		}));
		pending.set(Some(handle));
	}

	/// Stop ticking. Safe to call repeatedly; also runs on drop.
	pub fn cancel(&self) {
		if let Some(handle) = self.pending.take() {
			self.clock.cancel(handle);
		}
	}
}

impl Drop for FrameTask {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// `requestAnimationFrame`-backed clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct RafClock;

impl FrameClock for RafClock {
	fn request(&self, callback: Box<dyn FnOnce()>) -> FrameHandle {
		let closure = Closure::once_into_js(callback);
		web_sys::window()
			.and_then(|window| {
				window
					.request_animation_frame(closure.unchecked_ref::<js_sys::Function>())
					.ok()
			})
			.unwrap_or(0)
	}

	fn cancel(&self, handle: FrameHandle) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::{FrameClock, FrameHandle};

	/// Manually fired clock: queued callbacks run only when the test says.
	#[derive(Clone, Default)]
	pub struct ManualClock {
		inner: Rc<RefCell<Inner>>,
	}

	#[derive(Default)]
	struct Inner {
		queue: Vec<(FrameHandle, Box<dyn FnOnce()>)>,
		next_handle: FrameHandle,
	}

	impl ManualClock {
		/// Number of callbacks currently scheduled.
		pub fn scheduled(&self) -> usize {
			self.inner.borrow().queue.len()
		}

		/// Run the oldest scheduled callback. Returns false when idle.
		pub fn fire(&self) -> bool {
			let entry = {
				let mut inner = self.inner.borrow_mut();
				if inner.queue.is_empty() {
					return false;
				}
				inner.queue.remove(0)
			};
			(entry.1)();
			true
		}
	}

	impl FrameClock for ManualClock {
		fn request(&self, callback: Box<dyn FnOnce()>) -> FrameHandle {
			let mut inner = self.inner.borrow_mut();
			inner.next_handle += 1;
			let handle = inner.next_handle;
			inner.queue.push((handle, callback));
			handle
		}

		fn cancel(&self, handle: FrameHandle) {
			self.inner
				.borrow_mut()
				.queue
				.retain(|(queued, _)| *queued != handle);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use super::testing::ManualClock;
	use super::*;

	fn counting_task(clock: &ManualClock) -> (FrameTask, Rc<Cell<usize>>) {
		let ticks = Rc::new(Cell::new(0));
		let counter = ticks.clone();
		let task = FrameTask::start(
			Rc::new(clock.clone()),
			Rc::new(move || counter.set(counter.get() + 1)),
		);
		(task, ticks)
	}

	#[test]
	fn task_rearms_itself_every_frame() {
		let clock = ManualClock::default();
		let (_task, ticks) = counting_task(&clock);

		assert_eq!(clock.scheduled(), 1);
		for _ in 0..3 {
			assert!(clock.fire());
		}
		assert_eq!(ticks.get(), 3);
		assert_eq!(clock.scheduled(), 1);
	}

	#[test]
	fn cancel_stops_future_ticks() {
		let clock = ManualClock::default();
		let (task, ticks) = counting_task(&clock);

		task.cancel();
		assert_eq!(clock.scheduled(), 0);
		assert!(!clock.fire());
		assert_eq!(ticks.get(), 0);

		// Repeated cancellation is a no-op.
		task.cancel();
	}

	#[test]
	fn cancel_from_inside_a_tick_stops_the_loop() {
		let clock = ManualClock::default();
		let slot: Rc<RefCell<Option<FrameTask>>> = Rc::new(RefCell::new(None));
		let ticks = Rc::new(Cell::new(0));

		let (tick_slot, counter) = (slot.clone(), ticks.clone());
		let task = FrameTask::start(
			Rc::new(clock.clone()),
			Rc::new(move || {
				counter.set(counter.get() + 1);
				if let Some(task) = tick_slot.borrow().as_ref() {
					task.cancel();
				}
			}),
		);
		*slot.borrow_mut() = Some(task);

		assert!(clock.fire());
		assert_eq!(ticks.get(), 1);
		assert_eq!(clock.scheduled(), 0);
		assert!(!clock.fire());
	}

	#[test]
	fn dropping_the_task_cancels_it() {
		let clock = ManualClock::default();
		let (task, _ticks) = counting_task(&clock);
		drop(task);
		assert_eq!(clock.scheduled(), 0);
	}
}
