use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) book_id: String,
}

impl RemoveBookCommandRequest {
    pub fn new(book_id: String) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveBookCommandResponse {
    pub removed: bool,
}

impl RemoveBookCommandResponse {
    pub fn new(removed: bool) -> Self {
        Self {
            removed,
        }
    }
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        self.catalog_service.remove_book(req.book_id.as_str()).await
            .map_err(CommandError::from).map(RemoveBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use serde_json::json;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;

    lazy_static! {
        static ref SVC : AsyncOnce<Arc<dyn CatalogService>> = AsyncOnce::new(async {
                factory::create_catalog_service(&Configuration::new("test")).await
            });
    }

    #[tokio::test]
    async fn test_should_run_remove_book() {
        let add_cmd = AddBookCommand::new(SVC.get().await.clone());
        let remove_cmd = RemoveBookCommand::new(SVC.get().await.clone());
        let get_cmd = GetBookCommand::new(SVC.get().await.clone());

        let book = json!({"ISBN": "remove-cmd-isbn", "title": "test book", "authorId": "a1"})
            .as_object().cloned().expect("object");
        let res = add_cmd.execute(AddBookCommandRequest::new(book)).await.expect("should add book");
        let removed = remove_cmd.execute(RemoveBookCommandRequest::new(res.book.book_id.to_string()))
            .await.expect("should remove book");
        assert!(removed.removed);
        assert!(get_cmd.execute(GetBookCommandRequest::new(res.book.book_id.to_string())).await.is_err());
    }

    #[tokio::test]
    async fn test_should_not_remove_malformed_id() {
        let remove_cmd = RemoveBookCommand::new(SVC.get().await.clone());
        let res = remove_cmd.execute(RemoveBookCommandRequest::new("nope".to_string())).await.expect("should not fail");
        assert!(!res.removed);
    }
}
