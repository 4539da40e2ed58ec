//! Persisted document shape and graph codec.
//!
//! # Responsibility
//! - Define the JSON wire records for projects and tasks.
//! - Convert a `ProjectStore` to records and back, edges keyed by task name.
//!
//! # Invariants
//! - Decoding is all-or-nothing: any error yields no store at all.
//! - Successor names resolve only within their own project.
//! - Encoding refuses edges that decoding could not rebuild.

mod codec;
mod records;

pub use codec::{deserialize, from_json, serialize, to_json, DocumentError, DocumentResult};
pub use records::{ProjectRecord, TaskRecord};
