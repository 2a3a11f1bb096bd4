use std::time::Duration;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct ScheduledTask<A> {
    handle: TaskHandle,
    due: Duration,
    action: A,
}

/// Cancellable one-shot timers carrying an action value.
///
/// Nothing runs by itself: the owner polls [`Scheduler::take_due`] from its
/// frame loop and executes the returned actions, so a dropped or cleared
/// scheduler can never call back into freed state.
#[derive(Debug)]
pub struct Scheduler<A> {
    tasks: Vec<ScheduledTask<A>>,
    next_handle: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_handle: 0,
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to become due `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: A) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.tasks.push(ScheduledTask {
            handle,
            due: now + delay,
            action,
        });
        tracing::debug!("scheduled task {} due at {:?}", handle.0, now + delay);
        handle
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        let cancelled = self.tasks.len() != before;
        if cancelled {
            tracing::debug!("cancelled task {}", handle.0);
        }
        cancelled
    }

    /// Cancel everything. Returns how many tasks were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.tasks.len();
        self.tasks.clear();
        n
    }

    /// Remove and return the actions due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<A> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due <= now {
                due.push(self.tasks.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| (t.due, t.handle));
        due.into_iter().map(|t| t.action).collect()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }
}
