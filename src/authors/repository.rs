pub mod ddb_author_repository;
pub mod memory_author_repository;

use async_trait::async_trait;
use crate::authors::domain::model::AuthorEntity;
use crate::core::library::LibraryResult;

// Authors are owned elsewhere, the catalog only ever reads them.
#[async_trait]
pub(crate) trait AuthorRepository: Sync + Send {
    async fn get(&self, id: &str) -> LibraryResult<AuthorEntity>;
}
