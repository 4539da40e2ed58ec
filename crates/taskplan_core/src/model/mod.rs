//! Project/task dependency graph model.
//!
//! # Responsibility
//! - Define the in-memory graph: stores own projects, projects own tasks,
//!   tasks link to sibling tasks as successors.
//! - Keep node identity independent from display names.
//!
//! # Invariants
//! - No self successor, no duplicate successor.
//! - Task names are unique within one project.
//! - Names are never blank.
//!
//! # See also
//! - `crate::document` for the persisted shape of this model.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod project;
pub mod store;
pub mod task;

/// Validation error for model constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Name is empty or whitespace-only.
    BlankName,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
        }
    }
}

impl Error for ModelError {}

/// Names are kept verbatim; only blank values are rejected.
pub(crate) fn validate_name(name: String) -> Result<String, ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::BlankName);
    }
    Ok(name)
}
