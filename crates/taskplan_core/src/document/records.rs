use serde::{Deserialize, Serialize};

/// One project entry of the top-level document array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub tasks: Vec<TaskRecord>,
}

/// One task entry. `successors` holds task names from the same project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub name: String,
    pub duration: u32,
    pub successors: Vec<String>,
}
