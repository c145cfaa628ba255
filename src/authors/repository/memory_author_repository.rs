use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::authors::domain::model::AuthorEntity;
use crate::authors::repository::AuthorRepository;
use crate::core::library::{LibraryError, LibraryResult};

#[derive(Debug, Default)]
pub struct MemoryAuthorRepository {
    authors: RwLock<Vec<AuthorEntity>>,
}

impl MemoryAuthorRepository {
    pub(crate) fn new(authors: Vec<AuthorEntity>) -> Self {
        Self {
            authors: RwLock::new(authors),
        }
    }

    // seeds an author, the catalog itself has no write path for them
    pub(crate) async fn insert(&self, author: AuthorEntity) {
        self.authors.write().await.push(author);
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn get(&self, id: &str) -> LibraryResult<AuthorEntity> {
        self.authors.read().await.iter()
            .find(|a| a.author_id == id)
            .cloned()
            .ok_or_else(|| LibraryError::not_found(format!("author not found for {}", id).as_str()))
    }
}
