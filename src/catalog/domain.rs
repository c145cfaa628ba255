pub mod service;

use async_trait::async_trait;
use serde_json::{Map, Value};
use crate::books::dto::{AuthorStatsDto, BookDto, ScoredBookDto};
use crate::core::library::{LibraryResult, PageRequest};

// CatalogService is the data-access contract behind the books endpoints
#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &Map<String, Value>) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: &str) -> LibraryResult<bool>;
    async fn update_book(&self, id: &str, fields: &Map<String, Value>) -> LibraryResult<bool>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn find_books(&self, page: PageRequest, author_id: Option<&str>) -> LibraryResult<Vec<BookDto>>;
    async fn search_books(&self, text: &str) -> LibraryResult<Vec<ScoredBookDto>>;
    async fn author_stats(&self, include_author: bool) -> LibraryResult<Vec<AuthorStatsDto>>;
}
