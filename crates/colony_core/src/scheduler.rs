//! Cooperative scheduling over virtual time.
//!
//! The original ran on web timers; here every periodic callback is an
//! explicit task with a cancellable handle, dispatched by whoever drives
//! [`crate::game::Game::advance`]. Tasks never run concurrently: due
//! tasks are popped one at a time, earliest deadline first, ties broken
//! by creation order, so a whole game is a deterministic function of its
//! seed and the advance calls.

use serde::{Deserialize, Serialize};

/// The periodic callback categories of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Movement tick for one colony.
    Movement(usize),
    /// Food/gold spawner.
    Spawner,
    /// 1-second round countdown.
    RoundClock,
    /// Artillery strike for one colony.
    Artillery(usize),
}

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Task {
    id: u64,
    kind: TaskKind,
    period_ms: u64,
    next_fire_ms: u64,
}

/// A set of periodic tasks with a shared virtual clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    /// An empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Schedule a periodic task; first fire one period from now.
    /// Periods are clamped to at least 1 ms.
    pub fn schedule(&mut self, kind: TaskKind, period_ms: u64) -> TaskHandle {
        let period_ms = period_ms.max(1);
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            kind,
            period_ms,
            next_fire_ms: self.now_ms + period_ms,
        });
        TaskHandle(id)
    }

    /// Cancel one task. Returns whether it was still scheduled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != handle.0);
        self.tasks.len() != before
    }

    /// Cancel every task of one kind.
    pub fn cancel_kind(&mut self, kind: TaskKind) {
        self.tasks.retain(|task| task.kind != kind);
    }

    /// Cancel everything. Time keeps running.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Whether any task of this kind is scheduled.
    #[must_use]
    pub fn is_scheduled(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|task| task.kind == kind)
    }

    /// Pop the next task due at or before `until_ms`, advancing the clock
    /// to its fire time and rescheduling it one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TaskKind> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.next_fire_ms <= until_ms)
            .min_by_key(|(_, task)| (task.next_fire_ms, task.id))
            .map(|(index, _)| index)?;
        let task = &mut self.tasks[index];
        self.now_ms = task.next_fire_ms;
        task.next_fire_ms += task.period_ms;
        Some(task.kind)
    }

    /// Advance the clock to `until_ms` once no more tasks are due.
    pub fn settle(&mut self, until_ms: u64) {
        if until_ms > self.now_ms {
            self.now_ms = until_ms;
        }
    }
}
