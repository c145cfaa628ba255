use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
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

pub(crate) const SCORE_FIELD: &str = "score";

// A search hit, the book fields plus its text relevance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ScoredBookDto {
    #[serde(flatten)]
    pub book: BookDto,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct AuthorDto {
    #[serde(rename = "_id")]
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorStatsDto {
    pub author_id: String,
    pub average_page_count: Option<f64>,
    pub num_books: usize,
    pub titles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorDto>,
}
