//! Project: ordered task list forming one dependency graph.
//!
//! # Responsibility
//! - Own task membership and task order (order drives matrix indexing).
//! - Keep successor edges consistent when a task leaves the project.
//!
//! # Invariants
//! - Insertion order is preserved.
//! - Task names are unique within the project.
//! - A removed task is purged from every remaining sibling's successor set.
//! - The project lock and a task lock are never held at the same time.

use crate::model::task::{Task, TaskId};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::ModelError;

/// Stable in-process identity of one project.
pub type ProjectId = Uuid;

/// Errors from project task-list mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// Another task in the project already uses this name.
    DuplicateTaskName { project: String, name: String },
    /// Task is not a member of the project.
    TaskNotFound { project: String, task: TaskId },
    Model(ModelError),
}

impl Display for ProjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTaskName { project, name } => {
                write!(f, "project `{project}` already has a task named `{name}`")
            }
            Self::TaskNotFound { project, task } => {
                write!(f, "task {task} is not part of project `{project}`")
            }
            Self::Model(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::DuplicateTaskName { .. } => None,
            Self::TaskNotFound { .. } => None,
        }
    }
}

impl From<ModelError> for ProjectError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

struct ProjectNode {
    id: ProjectId,
    name: String,
    tasks: Mutex<Vec<Task>>,
}

/// Shared handle to one project.
#[derive(Clone)]
pub struct Project {
    node: Arc<ProjectNode>,
}

impl Project {
    /// Creates an empty project.
    ///
    /// # Errors
    /// - Returns `ModelError::BlankName` when `name` is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = super::validate_name(name.into())?;
        Ok(Self {
            node: Arc::new(ProjectNode {
                id: Uuid::new_v4(),
                name,
                tasks: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn id(&self) -> ProjectId {
        self.node.id
    }

    pub fn name(&self) -> &str {
        self.node.name.as_str()
    }

    /// Appends `task` at the end of the task list.
    ///
    /// # Errors
    /// - `DuplicateTaskName` when a member already uses the same name
    ///   (including `task` itself being a member already).
    pub fn add_task(&self, task: Task) -> Result<(), ProjectError> {
        let mut tasks = self.lock_tasks();
        if tasks.iter().any(|existing| existing.name() == task.name()) {
            return Err(ProjectError::DuplicateTaskName {
                project: self.node.name.clone(),
                name: task.name().to_string(),
            });
        }
        tasks.push(task);
        Ok(())
    }

    /// Builds a new task and appends it.
    pub fn create_task(
        &self,
        name: impl Into<String>,
        duration: u32,
    ) -> Result<Task, ProjectError> {
        let task = Task::new(name, duration)?;
        self.add_task(task.clone())?;
        Ok(task)
    }

    /// Removes `task` and drops every sibling edge pointing at it.
    ///
    /// The task list is updated and snapshotted under the project lock; the
    /// sibling sweep runs after that lock is released, one task lock at a
    /// time.
    ///
    /// A caller holding a task list copied before the removal (for example
    /// from [`Task::fetch_candidate_successors`]) can still link the removed
    /// task after the sweep. That edge points outside the project: the
    /// adjacency matrix skips it and serialization fails with
    /// `ForeignSuccessor` until the caller clears it.
    pub fn remove_task(&self, task: &Task) -> Result<(), ProjectError> {
        let siblings = {
            let mut tasks = self.lock_tasks();
            let Some(position) = tasks.iter().position(|existing| existing == task) else {
                return Err(ProjectError::TaskNotFound {
                    project: self.node.name.clone(),
                    task: task.id(),
                });
            };
            tasks.remove(position);
            tasks.clone()
        };

        let purged = siblings
            .iter()
            .filter(|sibling| sibling.remove_successor(task))
            .count();
        debug!(
            "event=task_remove module=model status=ok project_id={} task_id={} purged_edges={}",
            self.node.id,
            task.id(),
            purged
        );
        Ok(())
    }

    /// Returns a snapshot of the task list in project order.
    pub fn tasks(&self) -> Vec<Task> {
        self.lock_tasks().clone()
    }

    /// Finds a member task by exact name.
    pub fn find_task(&self, name: &str) -> Option<Task> {
        self.lock_tasks()
            .iter()
            .find(|task| task.name() == name)
            .cloned()
    }

    pub fn contains(&self, task: &Task) -> bool {
        self.lock_tasks().iter().any(|existing| existing == task)
    }

    pub fn len(&self) -> usize {
        self.lock_tasks().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_tasks().is_empty()
    }

    fn lock_tasks(&self) -> MutexGuard<'_, Vec<Task>> {
        self.node.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Project {}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.node.id)
            .field("name", &self.node.name)
            .field("tasks", &self.len())
            .finish()
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.node.name)
    }
}
