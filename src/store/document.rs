use serde::{Deserialize, Serialize};

use crate::model::StudentRecord;

/// Collection the documents would live in.
pub const CLASS_COLLECTION: &str = "classes";

/// Document-database form of a roster entry.
///
/// Mirrors [`StudentRecord`] field for field but keeps every field optional,
/// the way a schemaless store hands documents back. No route reads or
/// writes these; a database-backed [`RosterStore`](super::RosterStore) would
/// convert through them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl From<StudentRecord> for ClassDocument {
    fn from(record: StudentRecord) -> Self {
        Self {
            class_id: Some(record.class_id),
            name: Some(record.name),
            gender: Some(record.gender),
        }
    }
}

impl TryFrom<ClassDocument> for StudentRecord {
    type Error = anyhow::Error;

    fn try_from(doc: ClassDocument) -> Result<Self, Self::Error> {
        let class_id = doc
            .class_id
            .ok_or_else(|| anyhow::anyhow!("document has no classId"))?;
        let name = doc
            .name
            .ok_or_else(|| anyhow::anyhow!("document {class_id} has no name"))?;
        Ok(StudentRecord {
            class_id,
            name,
            gender: doc.gender.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_record() {
        let doc = ClassDocument::from(StudentRecord::new(3, "Fred Kanwai", "male"));
        assert_eq!(doc.class_id, Some(3));
        assert_eq!(doc.name.as_deref(), Some("Fred Kanwai"));
    }

    #[test]
    fn test_sparse_document_needs_id_and_name() {
        let doc: ClassDocument = serde_json::from_str(r#"{"name": "Abel"}"#).unwrap();
        assert!(StudentRecord::try_from(doc).is_err());

        let doc: ClassDocument = serde_json::from_str(r#"{"classId": 2, "name": "Abel"}"#).unwrap();
        let record = StudentRecord::try_from(doc).unwrap();
        assert_eq!(record, StudentRecord::new(2, "Abel", ""));
    }
}
