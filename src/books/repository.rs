pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::domain::stats::AuthorStats;
use crate::core::library::{LibraryResult, PageRequest};
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn exists_by_isbn(&self, isbn: &str) -> LibraryResult<bool>;

    async fn find_by_author_id(&self, author_id: &str, page: PageRequest) -> LibraryResult<Vec<BookEntity>>;

    // full-text search over the indexed fields, best score first
    async fn search(&self, text: &str) -> LibraryResult<Vec<(BookEntity, f64)>>;

    async fn stats_by_author(&self) -> LibraryResult<Vec<AuthorStats>>;
}
