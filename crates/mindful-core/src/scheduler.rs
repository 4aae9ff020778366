//! Virtual-time task scheduler.
//!
//! Stands in for the browser's `setTimeout`/`setInterval`. Like the timer
//! engine it has no internal thread: the caller advances time with
//! [`Scheduler::advance`] and receives the payloads of every task that came
//! due, in due order.
//!
//! Each widget owns its own scheduler, so cancelling or advancing one widget
//! can never touch another widget's tasks.

use serde::{Deserialize, Serialize};

/// Opaque handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<T> {
    handle: TaskHandle,
    due_ms: u64,
    /// `Some(interval)` for repeating tasks.
    interval_ms: Option<u64>,
    payload: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<ScheduledTask<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds since the scheduler was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of outstanding tasks (one-shot and repeating).
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    /// Run `payload` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: u64, payload: T) -> TaskHandle {
        self.push(delay_ms, None, payload)
    }

    /// Run `payload` every `interval_ms`, first firing one interval from now.
    ///
    /// A zero interval is clamped to 1ms so `advance` always terminates.
    pub fn schedule_repeating(&mut self, interval_ms: u64, payload: T) -> TaskHandle {
        let interval_ms = interval_ms.max(1);
        self.push(interval_ms, Some(interval_ms), payload)
    }

    /// Cancel a task. Returns `false` if the handle was unknown or already
    /// cancelled; either way the call is safe.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    /// Milliseconds until the next task is due, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.tasks
            .iter()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Move time forward by `elapsed_ms`, returning the payloads that fired.
    ///
    /// Tasks fire in due order; ties fire in scheduling order. Repeating tasks
    /// re-arm and may fire several times within one call.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<(TaskHandle, T)> {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = Vec::new();
        while let Some(entry) = self.pop_due(target) {
            fired.push(entry);
        }
        self.settle(target);
        fired
    }

    /// Fire the single earliest task due at or before `target_ms`.
    ///
    /// The clock moves to that task's due time. Callers that must react to a
    /// firing before later tasks run (for example by cancelling a repeating
    /// task) loop on this and finish with [`Scheduler::settle`].
    pub fn pop_due(&mut self, target_ms: u64) -> Option<(TaskHandle, T)> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= target_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.handle))
            .map(|(i, _)| i)?;

        let task = &self.tasks[idx];
        let (handle, due_ms, interval_ms) = (task.handle, task.due_ms, task.interval_ms);
        let payload = task.payload.clone();
        // Repeating tasks are dropped once their next due time would overflow.
        match interval_ms.and_then(|interval| due_ms.checked_add(interval)) {
            Some(next_due) => self.tasks[idx].due_ms = next_due,
            None => {
                self.tasks.remove(idx);
            }
        }
        self.now_ms = self.now_ms.max(due_ms);
        Some((handle, payload))
    }

    /// Move the clock to `target_ms` without firing anything.
    pub fn settle(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }

    fn push(&mut self, delay_ms: u64, interval_ms: Option<u64>, payload: T) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.tasks.push(ScheduledTask {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            interval_ms,
            payload,
        });
        handle
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
