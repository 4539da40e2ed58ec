//! JSON file store repository.
//!
//! # Responsibility
//! - Read and write the single store document file.
//!
//! # Invariants
//! - Load decodes the whole file before returning anything.
//! - With atomic writes on, readers see either the old or the new document,
//!   never a torn one.

use super::{RepoError, RepoResult, StoreRepository};
use crate::config::StoreConfig;
use crate::document::{from_json, to_json};
use crate::model::store::ProjectStore;
use log::{error, info};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Store repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStoreRepository {
    path: PathBuf,
    atomic_writes: bool,
}

impl JsonFileStoreRepository {
    /// Creates a repository for `path` with atomic writes enabled.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic_writes: true,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            path: config.document_path.clone(),
            atomic_writes: config.atomic_writes,
        }
    }

    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn write_document(&self, text: &str) -> RepoResult<()> {
        if !self.atomic_writes {
            return std::fs::write(&self.path, text).map_err(|source| self.io_error(source));
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(|source| self.io_error(source))?;
        staged
            .write_all(text.as_bytes())
            .map_err(|source| self.io_error(source))?;
        // The staged file is created 0600; keep the replaced document's mode.
        match std::fs::metadata(&self.path) {
            Ok(existing) => staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|source| self.io_error(source))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(self.io_error(source)),
        }
        staged
            .as_file()
            .sync_all()
            .map_err(|source| self.io_error(source))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }

    fn read_document(&self) -> RepoResult<String> {
        std::fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => RepoError::NotFound(self.path.clone()),
            _ => self.io_error(source),
        })
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreRepository for JsonFileStoreRepository {
    fn save(&self, store: &ProjectStore) -> RepoResult<()> {
        let started_at = Instant::now();
        info!(
            "event=store_save module=repo status=start mode=file atomic={}",
            self.atomic_writes
        );

        let result = to_json(store)
            .map_err(RepoError::from)
            .and_then(|text| self.write_document(&text));

        match &result {
            Ok(()) => info!(
                "event=store_save module=repo status=ok mode=file duration_ms={} projects={} tasks={}",
                started_at.elapsed().as_millis(),
                store.len(),
                store.task_count()
            ),
            Err(err) => error!(
                "event=store_save module=repo status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn load(&self) -> RepoResult<ProjectStore> {
        let started_at = Instant::now();
        info!("event=store_load module=repo status=start mode=file");

        let result = self
            .read_document()
            .and_then(|text| from_json(&text).map_err(RepoError::from));

        match &result {
            Ok(store) => info!(
                "event=store_load module=repo status=ok mode=file duration_ms={} projects={} tasks={}",
                started_at.elapsed().as_millis(),
                store.len(),
                store.task_count()
            ),
            Err(RepoError::NotFound(_)) => info!(
                "event=store_load module=repo status=missing mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_load module=repo status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
