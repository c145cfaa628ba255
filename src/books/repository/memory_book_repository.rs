use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::books::domain::model::{AUTHOR_ID_FIELD, BookEntity};
use crate::books::domain::search::{rank, TextQuery};
use crate::books::domain::stats::{AuthorStats, group_by_author};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PageRequest};
use crate::core::repository::Repository;

// In-process store keeping books in insertion order, used for local runs and as a test double.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<Vec<BookEntity>>,
    calls: AtomicUsize,
}

impl MemoryBookRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // number of store operations served so far
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn matches(book: &BookEntity, predicate: &HashMap<String, String>) -> bool {
    let document = match book.to_document() {
        Ok(document) => document,
        Err(_) => return false,
    };
    predicate.iter().all(|(k, v)| matches!(document.get(k), Some(Value::String(s)) if s == v))
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        self.record_call();
        let mut books = self.books.write().await;
        if books.iter().any(|b| b.book_id == entity.book_id) {
            return Err(LibraryError::duplicate_key(format!("book {} already exists", entity.book_id).as_str()));
        }
        books.push(entity.clone());
        Ok(1)
    }

    async fn update(&self, id: &str, fields: &Map<String, Value>) -> LibraryResult<usize> {
        self.record_call();
        let mut books = self.books.write().await;
        match books.iter_mut().find(|b| b.book_id == id) {
            Some(book) => {
                *book = book.merge(fields)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.record_call();
        self.books.read().await.iter()
            .find(|b| b.book_id == id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        self.record_call();
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.book_id != id);
        Ok(before - books.len())
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: PageRequest) -> LibraryResult<Vec<BookEntity>> {
        self.record_call();
        let books = self.books.read().await;
        Ok(page.apply(books.iter().filter(|b| matches(b, predicate)).cloned()))
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> LibraryResult<bool> {
        self.record_call();
        Ok(self.books.read().await.iter().any(|b| b.isbn == isbn))
    }

    async fn find_by_author_id(&self, author_id: &str, page: PageRequest) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            (AUTHOR_ID_FIELD.to_string(), author_id.to_string()),
        ]);
        self.query(&predicate, page).await
    }

    async fn search(&self, text: &str) -> LibraryResult<Vec<(BookEntity, f64)>> {
        self.record_call();
        let query = TextQuery::parse(text);
        let mut hits: Vec<(BookEntity, f64)> = self.books.read().await.iter()
            .filter_map(|book| query.score(&book.indexed_text()).map(|score| (book.clone(), score)))
            .collect();
        rank(&mut hits);
        Ok(hits)
    }

    async fn stats_by_author(&self) -> LibraryResult<Vec<AuthorStats>> {
        self.record_call();
        Ok(group_by_author(self.books.read().await.iter()))
    }
}
