use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) const ID_FIELD: &str = "_id";
pub(crate) const ISBN_FIELD: &str = "ISBN";
pub(crate) const TITLE_FIELD: &str = "title";
pub(crate) const AUTHOR_ID_FIELD: &str = "authorId";
pub(crate) const PAGE_COUNT_FIELD: &str = "pageCount";
pub(crate) const GENRE_FIELD: &str = "genre";
pub(crate) const BLURB_FIELD: &str = "blurb";
pub(crate) const PUBLICATION_YEAR_FIELD: &str = "publicationYear";

const REQUIRED_STRINGS: [&str; 3] = [ISBN_FIELD, TITLE_FIELD, AUTHOR_ID_FIELD];
const OPTIONAL_STRINGS: [&str; 2] = [GENRE_FIELD, BLURB_FIELD];

// BookEntity is a book document as kept by the store. Fields outside the schema are
// carried along in `extra` so documents round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    #[serde(rename = "_id")]
    pub book_id: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    pub title: String,
    #[serde(rename = "authorId")]
    pub author_id: String,
    #[serde(rename = "pageCount", default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
    #[serde(rename = "publicationYear", default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author_id: &str, page_count: Option<i64>) -> Self {
        Self {
            book_id: Uuid::new_v4().to_string(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            author_id: author_id.to_string(),
            page_count,
            genre: None,
            blurb: None,
            publication_year: None,
            extra: Map::new(),
        }
    }

    // Validates a client document and assigns it a fresh identifier. Any `_id` sent by the
    // client is ignored, identifiers are only ever assigned here.
    pub fn create_from(mut document: Map<String, Value>) -> LibraryResult<Self> {
        document.remove(ID_FIELD);
        validate_fields(&document, false)?;
        document.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
        BookEntity::from_document(Value::Object(document))
    }

    // Rebuilds an entity from a stored document.
    pub fn from_document(document: Value) -> LibraryResult<Self> {
        serde_json::from_value(document).map_err(|err| LibraryError::validation(
            format!("book validation failed: {}", err).as_str(), None))
    }

    pub fn to_document(&self) -> LibraryResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(LibraryError::serialization(format!("book is not a document {:?}", other).as_str())),
        }
    }

    // Merges a partial update, the same way the store applies it.
    pub fn merge(&self, fields: &Map<String, Value>) -> LibraryResult<Self> {
        validate_fields(fields, true)?;
        let mut document = self.to_document()?;
        for (k, v) in fields {
            document.insert(k.clone(), v.clone());
        }
        BookEntity::from_document(Value::Object(document))
    }

    // Text of the fields covered by the full-text index, with their weights.
    pub fn indexed_text(&self) -> Vec<(&str, f64)> {
        let mut text = vec![(self.title.as_str(), 1.0)];
        if let Some(genre) = &self.genre {
            text.push((genre.as_str(), 1.0));
        }
        if let Some(blurb) = &self.blurb {
            text.push((blurb.as_str(), 1.0));
        }
        text
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author_id(&self) -> &str {
        self.author_id.as_str()
    }

    fn page_count(&self) -> Option<i64> {
        self.page_count
    }
}

// Checks the book schema. A partial document only has to be valid for the fields it carries.
pub(crate) fn validate_fields(fields: &Map<String, Value>, partial: bool) -> LibraryResult<()> {
    if partial && fields.contains_key(ID_FIELD) {
        return Err(invalid(ID_FIELD, "is immutable"));
    }
    for name in REQUIRED_STRINGS {
        match fields.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(Value::String(_)) | Some(Value::Null) => return Err(invalid(name, "is required")),
            Some(_) => return Err(invalid(name, "must be a string")),
            None if partial => {}
            None => return Err(invalid(name, "is required")),
        }
    }
    for name in OPTIONAL_STRINGS {
        match fields.get(name) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => return Err(invalid(name, "must be a string")),
        }
    }
    match fields.get(PAGE_COUNT_FIELD) {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) if n.as_u64().is_some() => {}
        Some(_) => return Err(invalid(PAGE_COUNT_FIELD, "must be a non-negative integer")),
    }
    match fields.get(PUBLICATION_YEAR_FIELD) {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) if n.as_i64().is_some() => {}
        Some(_) => return Err(invalid(PUBLICATION_YEAR_FIELD, "must be an integer")),
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> LibraryError {
    LibraryError::validation(format!("book validation failed: {}: {}", field, reason).as_str(),
                             Some(field.to_string()))
}

// Identifiers are UUIDs, anything else can never match a stored book.
pub(crate) fn is_valid_book_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}
