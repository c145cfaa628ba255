use std::sync::Arc;
use crate::authors::repository::AuthorRepository;
use crate::authors::repository::ddb_author_repository::DDBAuthorRepository;
use crate::authors::repository::memory_author_repository::MemoryAuthorRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_author_repository(config: &Configuration) -> Arc<dyn AuthorRepository> {
    match config.store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config).await;
            Arc::new(DDBAuthorRepository::new(client, config.authors_table.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            let _ = create_table(&client, config.authors_table.as_str(), "_id", None).await;
            Arc::new(DDBAuthorRepository::new(client, config.authors_table.as_str()))
        }
        RepositoryStore::Memory => {
            Arc::new(MemoryAuthorRepository::default())
        }
    }
}
