//! Wire types for the AuthZ API, consumed read-only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pagination::Cursor;

/// An authorizable entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    pub id: Uuid,
    pub type_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Category of an [`Object`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectType {
    pub id: Uuid,
    pub type_name: String,
}

/// A typed relationship between two objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: Uuid,
    pub edge_type_id: Uuid,
    pub source_object_id: Uuid,
    pub target_object_id: Uuid,
}

/// Category of an [`Edge`], constrained to source/target object types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeType {
    pub id: Uuid,
    pub type_name: String,
    pub source_object_type_id: Uuid,
    pub target_object_type_id: Uuid,
}

/// One page of a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub has_next: bool,
    #[serde(default)]
    pub next: Cursor,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub prev: Cursor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_without_prev_fields() {
        let json = r#"{
            "data": [{"id": "7a28e6a0-bd29-4b4a-a22b-dd2c66b86cbd", "type_name": "user"}],
            "has_next": false,
            "next": ""
        }"#;
        let page: Page<ObjectType> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].type_name, "user");
        assert!(!page.has_next);
        assert!(page.next.is_begin());
        assert!(!page.has_prev);
    }

    #[test]
    fn test_page_carries_next_cursor() {
        let json = r#"{
            "data": [],
            "has_next": true,
            "next": "id:0189...",
            "has_prev": true,
            "prev": "id:0188..."
        }"#;
        let page: Page<Object> = serde_json::from_str(json).unwrap();
        assert!(page.has_next);
        assert_eq!(page.next.as_str(), "id:0189...");
        assert!(page.has_prev);
    }

    #[test]
    fn test_object_alias_is_optional() {
        let json = r#"{"id": "7a28e6a0-bd29-4b4a-a22b-dd2c66b86cbd",
                       "type_id": "1bf2b775-e521-41d3-8b7e-78e89427e6fe"}"#;
        let object: Object = serde_json::from_str(json).unwrap();
        assert!(object.alias.is_none());
    }
}
