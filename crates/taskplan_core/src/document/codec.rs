//! Store <-> document conversion.
//!
//! Decoding runs two passes per project: the first creates every task and a
//! name lookup scoped to that project, the second resolves successor names
//! against the lookup. A successor may therefore be listed before the task
//! it names.

use super::records::{ProjectRecord, TaskRecord};
use crate::model::project::Project;
use crate::model::store::ProjectStore;
use crate::model::task::{Task, TaskId};
use crate::model::ModelError;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors from encoding or decoding a store document.
#[derive(Debug)]
pub enum DocumentError {
    /// Text is not valid JSON or does not match the document shape.
    Malformed(serde_json::Error),
    /// Records could not be rendered as JSON text.
    Encode(serde_json::Error),
    /// A project or task name in the document is blank.
    InvalidName {
        location: String,
        source: ModelError,
    },
    /// Two tasks of one project share a name.
    DuplicateTaskName { project: String, name: String },
    /// A successor name does not match any task of the same project.
    UnknownSuccessor {
        project: String,
        task: String,
        successor: String,
    },
    /// A task links to a node outside its own project.
    ForeignSuccessor {
        project: String,
        task: String,
        successor: String,
    },
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed store document: {err}"),
            Self::Encode(err) => write!(f, "failed to encode store document: {err}"),
            Self::InvalidName { location, source } => write!(f, "{location}: {source}"),
            Self::DuplicateTaskName { project, name } => {
                write!(f, "project `{project}` declares task `{name}` more than once")
            }
            Self::UnknownSuccessor {
                project,
                task,
                successor,
            } => write!(
                f,
                "task `{task}` in project `{project}` lists unknown successor `{successor}`"
            ),
            Self::ForeignSuccessor {
                project,
                task,
                successor,
            } => write!(
                f,
                "task `{task}` in project `{project}` links to `{successor}` outside the project"
            ),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidName { source, .. } => Some(source),
            Self::DuplicateTaskName { .. } => None,
            Self::UnknownSuccessor { .. } => None,
            Self::ForeignSuccessor { .. } => None,
        }
    }
}

/// Converts the whole store to records, projects and tasks in order.
///
/// # Errors
/// - `ForeignSuccessor` when a task links to a node that is not a member of
///   the same project.
pub fn serialize(store: &ProjectStore) -> DocumentResult<Vec<ProjectRecord>> {
    store.projects().iter().map(project_record).collect()
}

/// Rebuilds a fresh store from records.
///
/// Nothing is returned unless every project decodes, so a caller's existing
/// store is never partially replaced.
pub fn deserialize(records: &[ProjectRecord]) -> DocumentResult<ProjectStore> {
    let mut store = ProjectStore::new();
    for (index, record) in records.iter().enumerate() {
        store.add_project(build_project(index, record)?);
    }
    Ok(store)
}

/// Serializes the store to pretty-printed JSON text.
pub fn to_json(store: &ProjectStore) -> DocumentResult<String> {
    let records = serialize(store)?;
    serde_json::to_string_pretty(&records).map_err(DocumentError::Encode)
}

/// Parses JSON text and rebuilds the store.
pub fn from_json(text: &str) -> DocumentResult<ProjectStore> {
    let records: Vec<ProjectRecord> =
        serde_json::from_str(text).map_err(DocumentError::Malformed)?;
    deserialize(&records)
}

fn project_record(project: &Project) -> DocumentResult<ProjectRecord> {
    let tasks = project.tasks();
    let members: HashSet<TaskId> = tasks.iter().map(Task::id).collect();

    let mut records = Vec::with_capacity(tasks.len());
    for task in &tasks {
        let mut successors = Vec::new();
        for successor in task.successors() {
            if !members.contains(&successor.id()) {
                return Err(DocumentError::ForeignSuccessor {
                    project: project.name().to_string(),
                    task: task.name().to_string(),
                    successor: successor.name().to_string(),
                });
            }
            successors.push(successor.name().to_string());
        }
        records.push(TaskRecord {
            name: task.name().to_string(),
            duration: task.duration(),
            successors,
        });
    }

    Ok(ProjectRecord {
        name: project.name().to_string(),
        tasks: records,
    })
}

fn build_project(index: usize, record: &ProjectRecord) -> DocumentResult<Project> {
    let project =
        Project::new(record.name.as_str()).map_err(|source| DocumentError::InvalidName {
            location: format!("project #{index}"),
            source,
        })?;

    // Pass 1: nodes and the project-scoped name lookup.
    let mut lookup: HashMap<&str, Task> = HashMap::with_capacity(record.tasks.len());
    let mut created = Vec::with_capacity(record.tasks.len());
    for (task_index, task_record) in record.tasks.iter().enumerate() {
        let task = Task::new(task_record.name.as_str(), task_record.duration).map_err(
            |source| DocumentError::InvalidName {
                location: format!("task #{task_index} of project `{}`", record.name),
                source,
            },
        )?;
        // A fresh task can only be refused for reusing a name.
        project
            .add_task(task.clone())
            .map_err(|_| DocumentError::DuplicateTaskName {
                project: record.name.clone(),
                name: task_record.name.clone(),
            })?;
        lookup.insert(task_record.name.as_str(), task.clone());
        created.push(task);
    }

    // Pass 2: edges.
    for (task_record, task) in record.tasks.iter().zip(&created) {
        for successor_name in &task_record.successors {
            let successor = lookup.get(successor_name.as_str()).ok_or_else(|| {
                DocumentError::UnknownSuccessor {
                    project: record.name.clone(),
                    task: task_record.name.clone(),
                    successor: successor_name.clone(),
                }
            })?;
            task.add_successor(successor);
        }
    }

    Ok(project)
}
