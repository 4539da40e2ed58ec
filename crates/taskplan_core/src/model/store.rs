//! Root collection of projects.
//!
//! # Invariants
//! - Project order is insertion order and is preserved across save/load.
//! - The store holds no lock of its own; callers treat the whole store as a
//!   critical section while saving or loading.

use crate::model::project::Project;
use crate::model::ModelError;

/// Ordered collection of projects.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    /// Creates an empty project named `name` and appends it.
    pub fn create_project(&mut self, name: impl Into<String>) -> Result<Project, ModelError> {
        let project = Project::new(name)?;
        self.projects.push(project.clone());
        Ok(project)
    }

    /// Removes `project` from the store. Returns `false` when absent.
    pub fn remove_project(&mut self, project: &Project) -> bool {
        let before = self.projects.len();
        self.projects.retain(|existing| existing != project);
        self.projects.len() != before
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns the first project named `name`.
    pub fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.name() == name)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Total number of tasks across all projects.
    pub fn task_count(&self) -> usize {
        self.projects.iter().map(Project::len).sum()
    }
}
