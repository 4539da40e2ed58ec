//! Core use-case services.
//!
//! # Responsibility
//! - Pair the in-memory store with a repository for save/load flows.
//! - Keep CLI/UI collaborators decoupled from storage details.

pub mod store_service;
