//! In-memory store repository.
//!
//! Keeps the last saved document text, encoded exactly like the file
//! repository, so save/load behave the same without touching disk.

use super::{RepoError, RepoResult, StoreRepository};
use crate::document::{from_json, to_json};
use crate::model::store::ProjectStore;
use log::debug;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

const MEMORY_LOCATION: &str = ":memory:";

/// Store repository holding the document as a string.
#[derive(Debug, Default)]
pub struct MemoryStoreRepository {
    document: Mutex<Option<String>>,
}

impl MemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with raw document text.
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(text.into())),
        }
    }

    /// Returns the currently stored document text.
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the stored document text.
    pub fn set_document(&self, text: impl Into<String>) {
        *self.document.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.into());
    }
}

impl StoreRepository for MemoryStoreRepository {
    fn save(&self, store: &ProjectStore) -> RepoResult<()> {
        let text = to_json(store)?;
        self.set_document(text);
        debug!(
            "event=store_save module=repo status=ok mode=memory projects={}",
            store.len()
        );
        Ok(())
    }

    fn load(&self) -> RepoResult<ProjectStore> {
        let text = self
            .document()
            .ok_or_else(|| RepoError::NotFound(PathBuf::from(MEMORY_LOCATION)))?;
        let store = from_json(&text)?;
        debug!(
            "event=store_load module=repo status=ok mode=memory projects={}",
            store.len()
        );
        Ok(store)
    }
}
