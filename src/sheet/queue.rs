use std::collections::VecDeque;

use crate::model::Category;
use crate::model::row::RowId;

/// Work deferred until the current event handler has returned, so that
/// layout changes from a selection or insertion are settled before anything
/// reads geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiTask {
    ScrollSelectionIntoView(Category),
    RequestFocus(Category),
    /// Newly inserted rows (with all descendants), grouped by destination
    PostProcess(Vec<(Category, Vec<RowId>)>),
}

/// FIFO queue of deferred UI tasks, drained on the UI thread.
#[derive(Debug, Default)]
pub struct EventQueue {
    tasks: VecDeque<UiTask>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task after everything already queued.
    pub fn invoke_later(&mut self, task: UiTask) {
        self.tasks.push_back(task);
    }

    pub fn pop(&mut self) -> Option<UiTask> {
        self.tasks.pop_front()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &UiTask> {
        self.tasks.iter()
    }
}
