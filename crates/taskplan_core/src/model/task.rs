//! Task node and successor-edge set.
//!
//! # Responsibility
//! - Hold one named, duration-bearing node of a project dependency graph.
//! - Own the outgoing successor edges of that node.
//!
//! # Invariants
//! - A task never lists itself as a successor.
//! - A successor appears at most once, in insertion order.
//! - Successor links are non-owning; a dropped node disappears from every
//!   successor snapshot.
//! - Every successor-set change happens under the task's own lock.

use crate::model::project::Project;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use uuid::Uuid;

use super::ModelError;

/// Stable in-process identity of one task node.
pub type TaskId = Uuid;

struct TaskNode {
    id: TaskId,
    name: String,
    duration: u32,
    successors: Mutex<Vec<Weak<TaskNode>>>,
}

/// Shared handle to one task node.
///
/// Cloning the handle does not copy the node: both clones observe the same
/// successor set and compare equal.
#[derive(Clone)]
pub struct Task {
    node: Arc<TaskNode>,
}

/// Result of [`Task::fetch_candidate_successors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorCandidates {
    /// Every other task of the owning project, in project order.
    pub tasks: Vec<Task>,
    /// Positions within `tasks` that are current successors.
    pub selected: Vec<usize>,
}

impl Task {
    /// Creates a detached task node with no successors.
    ///
    /// # Errors
    /// - Returns `ModelError::BlankName` when `name` is empty or whitespace.
    pub fn new(name: impl Into<String>, duration: u32) -> Result<Self, ModelError> {
        let name = super::validate_name(name.into())?;
        Ok(Self {
            node: Arc::new(TaskNode {
                id: Uuid::new_v4(),
                name,
                duration,
                successors: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn id(&self) -> TaskId {
        self.node.id
    }

    pub fn name(&self) -> &str {
        self.node.name.as_str()
    }

    pub fn duration(&self) -> u32 {
        self.node.duration
    }

    /// Adds `candidate` as a successor.
    ///
    /// Self links and already-present successors are ignored, so repeated
    /// calls are idempotent.
    pub fn add_successor(&self, candidate: &Task) {
        let mut successors = self.lock_successors();
        self.push_filtered(&mut successors, candidate);
    }

    /// Removes `task` from the successor set. Returns whether an edge existed.
    pub fn remove_successor(&self, task: &Task) -> bool {
        let mut successors = self.lock_successors();
        let before = successors.len();
        successors.retain(|link| !points_to(link, task));
        successors.len() != before
    }

    pub fn has_successor(&self, task: &Task) -> bool {
        self.lock_successors()
            .iter()
            .any(|link| points_to(link, task) && link.strong_count() > 0)
    }

    pub fn clear_successors(&self) {
        self.lock_successors().clear();
    }

    /// Returns a snapshot of live successors in insertion order.
    ///
    /// The returned vector is detached from internal state.
    pub fn successors(&self) -> Vec<Task> {
        self.lock_successors()
            .iter()
            .filter_map(Weak::upgrade)
            .map(|node| Task { node })
            .collect()
    }

    /// Replaces the whole successor set in one critical section.
    ///
    /// Applies the same self/duplicate filtering as [`Task::add_successor`].
    pub fn update_successors(&self, chosen: &[Task]) {
        let mut successors = self.lock_successors();
        successors.clear();
        for candidate in chosen {
            self.push_filtered(&mut successors, candidate);
        }
    }

    /// Lists the other tasks of `project` and marks which are successors.
    ///
    /// Read-only. The project task list is snapshotted before this task's
    /// lock is taken, so no two locks are ever held together.
    pub fn fetch_candidate_successors(&self, project: &Project) -> SuccessorCandidates {
        let tasks: Vec<Task> = project
            .tasks()
            .into_iter()
            .filter(|task| task != self)
            .collect();

        let successors = self.lock_successors();
        let selected = tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| {
                successors
                    .iter()
                    .any(|link| points_to(link, task) && link.strong_count() > 0)
            })
            .map(|(index, _)| index)
            .collect();

        SuccessorCandidates { tasks, selected }
    }

    fn push_filtered(&self, successors: &mut Vec<Weak<TaskNode>>, candidate: &Task) {
        if candidate == self {
            return;
        }
        successors.retain(|link| link.strong_count() > 0);
        if successors.iter().any(|link| points_to(link, candidate)) {
            return;
        }
        successors.push(Arc::downgrade(&candidate.node));
    }

    fn lock_successors(&self) -> MutexGuard<'_, Vec<Weak<TaskNode>>> {
        // Every mutation is a single Vec operation, so a poisoned guard
        // still holds a consistent set.
        self.node
            .successors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn points_to(link: &Weak<TaskNode>, task: &Task) -> bool {
    std::ptr::eq(link.as_ptr(), Arc::as_ptr(&task.node))
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Task {}

impl std::hash::Hash for Task {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.node.id.hash(state);
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Successors are omitted: cycles would recurse forever.
        f.debug_struct("Task")
            .field("id", &self.node.id)
            .field("name", &self.node.name)
            .field("duration", &self.node.duration)
            .finish()
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} hours)", self.node.name, self.node.duration)
    }
}
