// core/scheduler.rs
//
// Deterministic repeating-task scheduler in logical milliseconds.
// Stands in for per-creature interval timers: each creature gets at most one
// motion task, plus one tracker task for the selection highlight.
//
// Usage:
//   let mut sched = Scheduler::new();
//   sched.start(TaskKind::Motion(id), 30);
//   for task in sched.advance(10) { /* run it if still running */ }

use crate::api::types::CreatureId;

/// What a scheduled task drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// The species motion strategy of one creature.
    Motion(CreatureId),
    /// The selection highlight tracker.
    Highlight,
}

#[derive(Debug, Clone)]
struct Task {
    kind: TaskKind,
    period_ms: u32,
    next_due: u64,
    /// Start order, used to break ties between tasks due at the same instant.
    seq: u64,
}

/// Repeating tasks keyed by [`TaskKind`]. At most one task per kind.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    tasks: Vec<Task>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical time in milliseconds since the scheduler was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Start a repeating task, first due one period from now.
    /// A task already running for `kind` is stopped first.
    /// Returns true if an existing task was replaced.
    pub fn start(&mut self, kind: TaskKind, period_ms: u32) -> bool {
        let replaced = self.stop(kind);
        let period_ms = period_ms.max(1);
        self.tasks.push(Task {
            kind,
            period_ms,
            next_due: self.now_ms + period_ms as u64,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        replaced
    }

    /// Stop the task for `kind`. Stopping an idle kind is a no-op.
    /// Returns true if a task was running.
    pub fn stop(&mut self, kind: TaskKind) -> bool {
        if let Some(idx) = self.tasks.iter().position(|t| t.kind == kind) {
            self.tasks.swap_remove(idx);
            true
        } else {
            false
        }
    }

    /// Stop every motion task, leaving the highlight tracker alone.
    /// Returns the number of tasks stopped.
    pub fn stop_all_motion(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !matches!(t.kind, TaskKind::Motion(_)));
        before - self.tasks.len()
    }

    pub fn is_running(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    /// Number of motion tasks currently running.
    pub fn motion_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t.kind, TaskKind::Motion(_)))
            .count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance logical time and return every firing that fell due, ordered by
    /// due time, then start order. A task due several times in the window
    /// appears once per period.
    ///
    /// The caller must re-check [`Scheduler::is_running`] before running each
    /// firing: an earlier firing in the same batch may have stopped it.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<TaskKind> {
        let target = self.now_ms + elapsed_ms as u64;
        let mut firings: Vec<(u64, u64, TaskKind)> = Vec::new();

        for task in &mut self.tasks {
            while task.next_due <= target {
                firings.push((task.next_due, task.seq, task.kind));
                task.next_due += task.period_ms as u64;
            }
        }

        firings.sort_unstable_by_key(|&(due, seq, _)| (due, seq));
        self.now_ms = target;
        firings.into_iter().map(|(_, _, kind)| kind).collect()
    }
}
