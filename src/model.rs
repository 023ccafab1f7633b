//! Student record schema shared by the store, the handlers and the wire format.

use crate::error::RosterError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the roster.
///
/// Serialized in camelCase so the wire shape is
/// `{"classId": 1, "name": "Celestine Ugwu", "gender": "male"}`.
/// Unknown fields in incoming JSON are ignored; missing fields are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Class identifier, unique within a roster
    pub class_id: i64,
    /// Display name (never blank)
    pub name: String,
    /// Free-form gender label
    pub gender: String,
}

impl StudentRecord {
    pub fn new(class_id: i64, name: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            class_id,
            name: name.into(),
            gender: gender.into(),
        }
    }

    /// Deserialize and validate a request body.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidInput`] when the value does not match the
    /// schema or the name is blank.
    pub fn from_json(value: Value) -> Result<Self, RosterError> {
        let record: StudentRecord =
            serde_json::from_value(value).map_err(|e| RosterError::invalid(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Check the constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidInput`] for a blank name.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.name.trim().is_empty() {
            return Err(RosterError::invalid("name must not be empty"));
        }
        Ok(())
    }
}

/// The four records every fresh roster starts with, in order.
#[must_use]
pub fn seed_records() -> Vec<StudentRecord> {
    vec![
        StudentRecord::new(1, "Celestine Ugwu", "male"),
        StudentRecord::new(2, "Abel", "male"),
        StudentRecord::new(3, "Fred Kanwai", "male"),
        StudentRecord::new(4, "Abdulqoyum Adeola Ilori", "male"),
    ]
}
