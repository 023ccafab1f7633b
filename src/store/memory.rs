use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use super::RosterStore;
use crate::error::RosterError;
use crate::model::{seed_records, StudentRecord};

/// Process-lifetime roster kept in memory.
///
/// Readers share the lock; `insert` takes it exclusively and performs the
/// duplicate check under the same guard. Nothing is persisted.
#[derive(Debug)]
pub struct InMemoryRoster {
    records: RwLock<Vec<StudentRecord>>,
}

impl Default for InMemoryRoster {
    fn default() -> Self {
        Self::seeded()
    }
}

impl InMemoryRoster {
    /// Roster preloaded with the four seed records.
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_records(seed_records())
    }

    /// Roster starting from the given records.
    ///
    /// The records are taken as-is; callers are responsible for unique ids.
    #[must_use]
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    // A writer can only panic before touching the Vec, so a poisoned lock
    // still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Vec<StudentRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<StudentRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RosterStore for InMemoryRoster {
    fn list(&self) -> Vec<StudentRecord> {
        self.read().clone()
    }

    fn count(&self) -> usize {
        self.read().len()
    }

    fn insert(&self, record: StudentRecord) -> Result<StudentRecord, RosterError> {
        let mut records = self.write();
        if records.iter().any(|r| r.class_id == record.class_id) {
            warn!(
                class_id = record.class_id,
                "Rejected student with duplicate classId"
            );
            return Err(RosterError::DuplicateId {
                class_id: record.class_id,
            });
        }
        records.push(record.clone());
        info!(
            class_id = record.class_id,
            roster_size = records.len(),
            "Student added"
        );
        Ok(record)
    }

    fn find(&self, class_id: i64) -> Result<StudentRecord, RosterError> {
        let found = self.read().iter().find(|r| r.class_id == class_id).cloned();
        debug!(class_id, found = found.is_some(), "Student lookup");
        found.ok_or(RosterError::NotFound { class_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fresh_roster_lists_seed_in_order() {
        let roster = InMemoryRoster::seeded();
        assert_eq!(roster.list(), seed_records());
        assert_eq!(roster.count(), 4);
    }

    #[test]
    fn test_insert_appends_at_end() {
        let roster = InMemoryRoster::seeded();
        let added = roster
            .insert(StudentRecord::new(5, "New Student", "female"))
            .unwrap();
        assert_eq!(added.class_id, 5);
        let list = roster.list();
        assert_eq!(list.len(), 5);
        assert_eq!(list.last(), Some(&added));
    }

    #[test]
    fn test_duplicate_id_rejected_and_roster_unchanged() {
        let roster = InMemoryRoster::seeded();
        let err = roster
            .insert(StudentRecord::new(2, "Impostor", "male"))
            .unwrap_err();
        assert_eq!(err, RosterError::DuplicateId { class_id: 2 });
        assert_eq!(roster.list(), seed_records());
        assert_eq!(roster.find(2).unwrap().name, "Abel");
    }

    #[test]
    fn test_find_missing() {
        let roster = InMemoryRoster::seeded();
        assert_eq!(
            roster.find(999).unwrap_err(),
            RosterError::NotFound { class_id: 999 }
        );
    }

    #[test]
    fn test_count_tracks_list_length() {
        let roster = InMemoryRoster::with_records(Vec::new());
        assert_eq!(roster.count(), 0);
        for id in [10, 11, 10, 12] {
            let _ = roster.insert(StudentRecord::new(id, "S", "x"));
            assert_eq!(roster.count(), roster.list().len());
        }
        assert_eq!(roster.count(), 3);
    }

    #[test]
    fn test_concurrent_inserts_keep_ids_unique() {
        let roster = Arc::new(InMemoryRoster::with_records(Vec::new()));
        let threads: Vec<_> = (0..8)
            .map(|t| {
                let roster = Arc::clone(&roster);
                std::thread::spawn(move || {
                    for id in 0..50 {
                        let _ = roster.insert(StudentRecord::new(id, format!("t{t}"), "x"));
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(roster.count(), 50);
    }
}
