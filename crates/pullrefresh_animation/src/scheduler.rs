//! Frame-driven delayed tasks
//!
//! A virtual clock advanced by frame ticks. Tasks posted with a delay come
//! back out of [`FrameScheduler::advance`] once enough time has elapsed, in
//! due-time order, with ties broken by posting order.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a posted task, usable for cancellation
    pub struct TaskId;
}

#[derive(Clone, Debug)]
struct Task<T> {
    due_ms: f64,
    seq: u64,
    payload: T,
}

/// One-shot delayed task queue on virtual time
#[derive(Clone, Debug)]
pub struct FrameScheduler<T> {
    tasks: SlotMap<TaskId, Task<T>>,
    now_ms: f64,
    next_seq: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            now_ms: 0.0,
            next_seq: 0,
        }
    }

    /// Post `payload` to be released after `delay_ms`
    pub fn post_delayed(&mut self, delay_ms: f32, payload: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due_ms = self.now_ms + delay_ms.max(0.0) as f64;
        self.tasks.insert(Task {
            due_ms,
            seq,
            payload,
        })
    }

    /// Cancel a pending task, returning its payload if it had not fired
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.tasks.remove(id).map(|task| task.payload)
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Advance the clock and take every task that came due
    pub fn advance(&mut self, dt_ms: f32) -> Vec<T> {
        self.now_ms += dt_ms.max(0.0) as f64;

        let now = self.now_ms;
        let mut due: Vec<(f64, u64, TaskId)> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.due_ms <= now)
            .map(|(id, task)| (task.due_ms, task.seq, id))
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        due.into_iter()
            .filter_map(|(_, _, id)| self.tasks.remove(id))
            .map(|task| task.payload)
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Milliseconds until the next task is due
    pub fn time_until_next(&self) -> Option<f32> {
        self.tasks
            .values()
            .map(|task| (task.due_ms - self.now_ms).max(0.0))
            .min_by(|a, b| a.total_cmp(b))
            .map(|ms| ms as f32)
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}
