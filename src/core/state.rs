use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Ordering;

use crate::error::SimError;

// Index into Task Vec; equals the process's position in the input
pub type TaskId = usize;
pub type Ticks = u64;
pub type Priority = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not yet arrived
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub burst: Ticks,
    pub priority: Priority,
    pub remaining: Ticks,
    pub start_time: Option<Ticks>,
    pub finish_time: Option<Ticks>,
}

/// Ready-queue ordering key. Smaller `key` wins, then the smaller input index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rank<K> {
    pub key: K,
    pub index: TaskId,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl<K: Ord> PartialOrd for Rank<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Rank<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Ready tasks ordered by `Rank`. The head is the task a global
/// "first minimum in input order" scan would have found.
#[derive(Debug)]
pub struct ReadyQueue<K: Ord> {
    tasks: KeyedPriorityQueue<TaskId, Rank<K>>,
}

impl<K: Ord + Copy> ReadyQueue<K> {
    pub fn push(&mut self, task: TaskId, key: K) {
        let previous = self.tasks.push(task, Rank { key, index: task });
        debug_assert!(previous.is_none(), "Task {task} already present in ready queue");
    }

    pub fn peek(&self) -> Option<TaskId> {
        self.tasks.peek().map(|(task, _)| *task)
    }

    pub fn rekey(&mut self, task: TaskId, key: K) {
        let updated = self.tasks.set_priority(&task, Rank { key, index: task });
        debug_assert!(updated.is_ok(), "Rekeyed task {task} missing from ready queue");
    }

    pub fn remove(&mut self, task: TaskId) -> Option<K> {
        self.tasks.remove(&task).map(|rank| rank.key)
    }
}

impl<K: Ord + Copy> Default for ReadyQueue<K> {
    fn default() -> Self {
        Self {
            tasks: KeyedPriorityQueue::new(),
        }
    }
}

/// Per-run mutable state. Every simulation owns exactly one of these.
#[derive(Debug, Default)]
pub struct RunCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    pub completed: usize,
}

impl RunCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_task(&mut self, arrival_time: Ticks, burst: Ticks, priority: Priority) -> TaskId {
        let id = self.tasks.len();
        self.tasks.push(Task {
            id,
            state: TaskState::Pending,
            arrival_time,
            burst,
            priority,
            remaining: burst,
            start_time: None,
            finish_time: None,
        });
        id
    }

    pub fn advance_time(&mut self, delta: Ticks) -> Result<(), SimError> {
        self.now = self
            .now
            .checked_add(delta)
            .ok_or(SimError::ClockOverflow { now: self.now })?;
        Ok(())
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn incomplete(&self) -> usize {
        self.tasks.len() - self.completed
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.tasks.len()
    }

    pub fn mark_ready(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {task_id} cannot become ready"
        );
        debug_assert!(
            task.arrival_time <= now,
            "Task {task_id} made ready before its arrival"
        );
        task.state = TaskState::Ready;
    }

    // Return previous state; records the first dispatch
    pub fn set_running(&mut self, task_id: TaskId) -> TaskState {
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert!(task.remaining > 0, "Task {task_id} dispatched with no work left");
        let prev_state = task.state;
        task.state = TaskState::Running;
        task.start_time.get_or_insert(now);
        prev_state
    }

    // Runs the task for `slice` ticks and returns its remaining work. The
    // task is untouched if the clock cannot absorb the slice.
    pub fn run_for(&mut self, task_id: TaskId, slice: Ticks) -> Result<Ticks, SimError> {
        let task = self.task(task_id);
        debug_assert_eq!(task.state, TaskState::Running, "Task {task_id} must be running");
        let slice = slice.min(task.remaining);
        self.advance_time(slice)?;

        let task = self.task_mut(task_id);
        task.remaining -= slice;
        Ok(task.remaining)
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state == TaskState::Running && task.remaining == 0,
            "Task {task_id} must have been running to completion before marked complete"
        );
        task.state = TaskState::Completed;
        task.finish_time = Some(now);
        self.completed += 1;
    }
}
