//! # Store Module
//!
//! Storage for the roster. Handlers never touch a global list: they hold an
//! `Arc<dyn RosterStore>` handed to them at registration, so every service
//! (and every test) owns an isolated roster.
//!
//! - [`InMemoryRoster`] - the live backend, a lock-guarded `Vec` in insertion order
//! - [`ClassDocument`] - document-database shape of a record, not wired to any route

mod document;
mod memory;

pub use document::{ClassDocument, CLASS_COLLECTION};
pub use memory::InMemoryRoster;

use crate::error::RosterError;
use crate::model::StudentRecord;

/// Backend holding the ordered roster.
///
/// Implementations must keep insertion order and must make `insert`
/// atomic with respect to its duplicate check.
pub trait RosterStore: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> Vec<StudentRecord>;

    /// Number of records; always equals `list().len()`.
    fn count(&self) -> usize;

    /// Append a record.
    ///
    /// # Errors
    ///
    /// [`RosterError::DuplicateId`] when the class id is already present.
    fn insert(&self, record: StudentRecord) -> Result<StudentRecord, RosterError>;

    /// First record with the given class id.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] when nothing matches.
    fn find(&self, class_id: i64) -> Result<StudentRecord, RosterError>;
}
