//! Store use-case service.
//!
//! # Responsibility
//! - Own the process-wide `ProjectStore` and its persistence repository.
//! - Provide the save/load pair collaborators invoke on demand.
//!
//! # Invariants
//! - A failed load leaves the current store untouched.
//! - Save and load always cover the entire store.

use crate::matrix::{build_adjacency_matrix, AdjacencyMatrix};
use crate::model::store::ProjectStore;
use crate::repo::{RepoError, RepoResult, StoreRepository};
use log::warn;

/// Use-case service wrapping one store and its repository.
pub struct StoreService<R: StoreRepository> {
    repo: R,
    store: ProjectStore,
}

impl<R: StoreRepository> StoreService<R> {
    /// Creates a service with an empty store.
    pub fn new(repo: R) -> Self {
        Self::with_store(repo, ProjectStore::new())
    }

    pub fn with_store(repo: R, store: ProjectStore) -> Self {
        Self { repo, store }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProjectStore {
        &mut self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_store(self) -> ProjectStore {
        self.store
    }

    /// Replaces the in-memory store with the persisted one.
    ///
    /// # Contract
    /// - On success the previous store is discarded entirely (no merge).
    /// - On failure the previous store stays in place and the error is
    ///   returned unchanged.
    pub fn load(&mut self) -> RepoResult<()> {
        match self.repo.load() {
            Ok(loaded) => {
                self.store = loaded;
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=store_load module=service status=error retained_projects={} error={}",
                    self.store.len(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Loads the store, treating a missing document as nothing to load.
    ///
    /// A missing document leaves the current store in place, so a first run
    /// keeps the empty store it started with. Returns `true` when a document
    /// was found and loaded.
    pub fn load_or_default(&mut self) -> RepoResult<bool> {
        match self.load() {
            Ok(()) => Ok(true),
            Err(RepoError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Persists the whole store.
    pub fn save(&self) -> RepoResult<()> {
        self.repo.save(&self.store)
    }

    /// Builds the adjacency matrix of the first project named `project_name`.
    pub fn adjacency_matrix(&self, project_name: &str) -> Option<AdjacencyMatrix> {
        self.store
            .find_project(project_name)
            .map(|project| build_adjacency_matrix(&project.tasks()))
    }
}
