use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::core::library::{LibraryError, LibraryResult};

// AuthorEntity is the read-only author record books refer to through `authorId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AuthorEntity {
    #[serde(rename = "_id")]
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthorEntity {
    pub fn new(author_id: &str, name: &str) -> Self {
        Self {
            author_id: author_id.to_string(),
            name: Some(name.to_string()),
            extra: Map::new(),
        }
    }

    pub fn from_document(document: Value) -> LibraryResult<Self> {
        serde_json::from_value(document).map_err(|err| LibraryError::serialization(
            format!("malformed author document {}", err).as_str()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::authors::domain::model::AuthorEntity;

    #[tokio::test]
    async fn test_should_parse_author_document() {
        let author = AuthorEntity::from_document(json!({"_id": "a1", "name": "Ursula", "born": 1929}))
            .expect("should parse author");
        assert_eq!("a1", author.author_id);
        assert_eq!(Some("Ursula".to_string()), author.name);
        assert_eq!(Some(&json!(1929)), author.extra.get("born"));
        assert!(AuthorEntity::from_document(json!({"name": "nobody"})).is_err());
    }
}
