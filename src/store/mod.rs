// Shared types for the document gateways

pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub use memory::{InMemoryApplicationRepository, InMemoryJobRepository};

/// Errors returned by gateway operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Identifier did not parse as a document id
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Parse a client-supplied document identifier
pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

/// Result of inserting a single document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsertResult {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: Uuid,
}

impl InsertResult {
    pub fn new(inserted_id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Result of updating a single document
///
/// `matched_count` is zero when no document had the requested id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateResult {
    pub acknowledged: bool,
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        for raw in ["", "123", "not-an-id", "64b7f0c2e13a4b0012345678"] {
            match parse_id(raw) {
                Err(StoreError::InvalidId(value)) => assert_eq!(value, raw),
                other => panic!("expected InvalidId for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_result_shapes_use_document_field_names() {
        let id = Uuid::new_v4();
        let insert = serde_json::to_value(InsertResult::new(id)).unwrap();
        assert_eq!(insert["acknowledged"], true);
        assert_eq!(insert["insertedId"], id.to_string());

        let update = serde_json::to_value(UpdateResult::new(0, 0)).unwrap();
        assert_eq!(update["matchedCount"], 0);
        assert_eq!(update["modifiedCount"], 0);
    }
}
