//! Core domain logic for taskplan.
//! This crate is the single source of truth for task-graph invariants.

pub mod config;
pub mod document;
pub mod logging;
pub mod matrix;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, StoreConfig};
pub use document::{
    deserialize, from_json, serialize, to_json, DocumentError, DocumentResult, ProjectRecord,
    TaskRecord,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use matrix::{build_adjacency_matrix, AdjacencyMatrix};
pub use model::project::{Project, ProjectError, ProjectId};
pub use model::store::ProjectStore;
pub use model::task::{SuccessorCandidates, Task, TaskId};
pub use model::ModelError;
pub use repo::file_repo::JsonFileStoreRepository;
pub use repo::memory_repo::MemoryStoreRepository;
pub use repo::{RepoError, RepoResult, StoreRepository};
pub use service::store_service::StoreService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
