use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::authors::domain::model::AuthorEntity;
use crate::authors::repository::AuthorRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::ddb::item_to_document;

#[derive(Debug)]
pub struct DDBAuthorRepository {
    client: Client,
    table_name: String,
}

impl DDBAuthorRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl AuthorRepository for DDBAuthorRepository {
    async fn get(&self, id: &str) -> LibraryResult<AuthorEntity> {
        let table_name: &str = self.table_name.as_ref();
        let out = self.client
            .get_item()
            .table_name(table_name)
            .key("_id", AttributeValue::S(id.to_string()))
            .send()
            .await?;
        match out.item() {
            Some(item) => AuthorEntity::from_document(item_to_document(item)),
            None => Err(LibraryError::not_found(format!("author not found for {}", id).as_str())),
        }
    }
}
