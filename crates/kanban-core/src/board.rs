//! In-memory task store: the single source of truth for board content.
//!
//! Tasks live in a vector ordered by their creation-sequence counter; ids
//! track that order and are kept dense by the cleanup pass.

use crate::{BoardError, Task, TaskStatus};
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub struct Board {
    tasks: Vec<Task>,
    next_id: u64,
    next_seq: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            next_seq: 0,
        }
    }

    /// Rebuild a board from persisted tasks. The creation-sequence counter
    /// is re-derived from `(created_at, id)`, the same order the numbering
    /// followed before the save, and the id allocator resumes past the max id.
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(|task| (task.created_at, task.id));
        let mut board = Self::new();
        for mut task in tasks {
            task.seq = board.next_seq;
            board.next_seq += 1;
            board.next_id = board.next_id.max(task.id + 1);
            board.tasks.push(task);
        }
        board
    }

    pub fn add(&mut self, title: &str, now: DateTime<Utc>) -> Result<&Task, BoardError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        let task = Task {
            id: self.next_id,
            title: title.to_string(),
            status: TaskStatus::Todo,
            completion_date: None,
            created_at: now,
            seq: self.next_seq,
        };
        self.next_id += 1;
        self.next_seq += 1;
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Move a task to a new status. Moving to the current status is a no-op.
    /// Entering Done stamps `completion_date`; leaving Done clears it.
    pub fn move_task(
        &mut self,
        id: u64,
        new_status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<&Task, BoardError> {
        let idx = self
            .index_of(id)
            .ok_or(BoardError::TaskNotFound(id))?;
        let task = &mut self.tasks[idx];
        if task.status != new_status {
            if new_status == TaskStatus::Done {
                task.completion_date = Some(now);
            } else if task.status == TaskStatus::Done {
                task.completion_date = None;
            }
            task.status = new_status;
        }
        Ok(&self.tasks[idx])
    }

    /// Remove a task. Renumbering is deliberately left to the cleanup pass
    /// so gaps only ever exist inside one command cycle.
    pub fn remove(&mut self, id: u64) -> Result<Task, BoardError> {
        let idx = self
            .index_of(id)
            .ok_or(BoardError::TaskNotFound(id))?;
        Ok(self.tasks.remove(idx))
    }

    /// Tasks in one column, creation order (id ascending after a renumber).
    pub fn tasks_with_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.status == status).collect()
    }

    pub fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Task) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|task| keep(task));
        before - self.tasks.len()
    }

    /// Reassign ids 1..=N in creation order and reset the allocator.
    pub(crate) fn renumber(&mut self) {
        self.tasks.sort_by_key(|task| task.seq);
        for (offset, task) in self.tasks.iter_mut().enumerate() {
            task.id = offset as u64 + 1;
        }
        self.next_id = self.tasks.len() as u64 + 1;
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}
