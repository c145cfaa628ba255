use std::sync::Arc;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info};
use crate::authors::domain::model::AuthorEntity;
use crate::authors::repository::AuthorRepository;
use crate::books::domain::model::{BookEntity, is_valid_book_id, ISBN_FIELD, validate_fields};
use crate::books::domain::stats::AuthorStats;
use crate::books::dto::{AuthorDto, AuthorStatsDto, BookDto, SCORE_FIELD, ScoredBookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, PageRequest};

pub(crate) struct CatalogServiceImpl {
    book_repository: Arc<dyn BookRepository>,
    author_repository: Arc<dyn AuthorRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Arc<dyn BookRepository>,
                      author_repository: Arc<dyn AuthorRepository>) -> Self {
        Self {
            book_repository,
            author_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    // The ISBN check and the insert are two separate store calls: concurrent creates of the
    // same ISBN can both pass the check.
    async fn add_book(&self, book: &Map<String, Value>) -> LibraryResult<BookDto> {
        if let Some(Value::String(isbn)) = book.get(ISBN_FIELD) {
            if self.book_repository.exists_by_isbn(isbn).await? {
                return Err(LibraryError::duplicate_key(
                    format!("Book with ISBN number {} already exists.", isbn).as_str()));
            }
        }
        let entity = BookEntity::create_from(book.clone())?;
        self.book_repository.create(&entity).await?;
        info!(book_id = entity.book_id.as_str(), isbn = entity.isbn.as_str(), "added book");
        Ok(BookDto::from(&entity))
    }

    // Reports success for any well-formed id, whether or not a book was removed.
    async fn remove_book(&self, id: &str) -> LibraryResult<bool> {
        if !is_valid_book_id(id) {
            return Ok(false);
        }
        let removed = self.book_repository.delete(id).await?;
        debug!(book_id = id, removed, "removed book");
        Ok(true)
    }

    // Same looseness as remove_book: a well-formed id that matches nothing still succeeds.
    async fn update_book(&self, id: &str, fields: &Map<String, Value>) -> LibraryResult<bool> {
        if !is_valid_book_id(id) {
            return Ok(false);
        }
        // rejected the same way whether or not the id matches a book
        validate_fields(fields, true)?;
        let matched = self.book_repository.update(id, fields).await?;
        debug!(book_id = id, matched, "updated book");
        Ok(true)
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        if !is_valid_book_id(id) {
            return Err(LibraryError::malformed_identifier(id));
        }
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn find_books(&self, page: PageRequest, author_id: Option<&str>) -> LibraryResult<Vec<BookDto>> {
        let books = match author_id {
            Some(author_id) => self.book_repository.find_by_author_id(author_id, page).await?,
            None => self.book_repository.query(&Default::default(), page).await?,
        };
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn search_books(&self, text: &str) -> LibraryResult<Vec<ScoredBookDto>> {
        let hits = self.book_repository.search(text).await?;
        Ok(hits.iter().map(|(book, score)| {
            let mut book = BookDto::from(book);
            // the relevance score replaces a stored field of the same name
            book.extra.remove(SCORE_FIELD);
            ScoredBookDto { book, score: *score }
        }).collect())
    }

    // With include_author, groups whose author cannot be found are dropped.
    async fn author_stats(&self, include_author: bool) -> LibraryResult<Vec<AuthorStatsDto>> {
        let stats = self.book_repository.stats_by_author().await?;
        if !include_author {
            return Ok(stats.into_iter().map(AuthorStatsDto::from).collect());
        }
        let mut res = vec![];
        for group in stats {
            match self.author_repository.get(group.author_id.as_str()).await {
                Ok(author) => {
                    let mut dto = AuthorStatsDto::from(group);
                    dto.author = Some(AuthorDto::from(&author));
                    res.push(dto);
                }
                Err(LibraryError::NotFound { .. }) => {
                    debug!(author_id = group.author_id.as_str(), "dropping stats without author");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(res)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author_id: other.author_id.to_string(),
            page_count: other.page_count,
            genre: other.genre.clone(),
            blurb: other.blurb.clone(),
            publication_year: other.publication_year,
            extra: other.extra.clone(),
        }
    }
}

impl From<&AuthorEntity> for AuthorDto {
    fn from(other: &AuthorEntity) -> Self {
        Self {
            author_id: other.author_id.to_string(),
            name: other.name.clone(),
            extra: other.extra.clone(),
        }
    }
}

impl From<AuthorStats> for AuthorStatsDto {
    fn from(other: AuthorStats) -> Self {
        Self {
            author_id: other.author_id,
            average_page_count: other.average_page_count,
            num_books: other.num_books,
            titles: other.titles,
            author: None,
        }
    }
}
