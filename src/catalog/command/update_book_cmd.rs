use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// Only the fields present in `fields` are overwritten.
#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: String,
    pub fields: Map<String, Value>,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: &str, fields: Map<String, Value>) -> Self {
        Self {
            book_id: book_id.to_string(),
            fields,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub updated: bool,
}

impl UpdateBookCommandResponse {
    pub fn new(updated: bool) -> Self {
        Self {
            updated,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(req.book_id.as_str(), &req.fields).await
            .map_err(CommandError::from).map(UpdateBookCommandResponse::new)
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
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
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
    async fn test_should_run_update_book() {
        let add_cmd = AddBookCommand::new(SVC.get().await.clone());
        let update_cmd = UpdateBookCommand::new(SVC.get().await.clone());
        let get_cmd = GetBookCommand::new(SVC.get().await.clone());

        let book = json!({"ISBN": "update-cmd-isbn", "title": "test book", "authorId": "a1", "pageCount": 10})
            .as_object().cloned().expect("object");
        let res = add_cmd.execute(AddBookCommandRequest::new(book)).await.expect("should add book");
        let fields = json!({"pageCount": 20}).as_object().cloned().expect("object");
        let updated = update_cmd.execute(UpdateBookCommandRequest::new(res.book.book_id.as_str(), fields))
            .await.expect("should update book");
        assert!(updated.updated);
        let loaded = get_cmd.execute(GetBookCommandRequest::new(res.book.book_id.to_string())).await.expect("should get book");
        assert_eq!(r#"{"_id":"ID","ISBN":"update-cmd-isbn","title":"test book","authorId":"a1","pageCount":20}"#
                       .replace("ID", res.book.book_id.as_str()),
                   serde_json::to_string(&loaded).expect("should serialize"));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_update() {
        let add_cmd = AddBookCommand::new(SVC.get().await.clone());
        let update_cmd = UpdateBookCommand::new(SVC.get().await.clone());

        let book = json!({"ISBN": "update-cmd-invalid", "title": "test book", "authorId": "a1"})
            .as_object().cloned().expect("object");
        let res = add_cmd.execute(AddBookCommandRequest::new(book)).await.expect("should add book");
        let fields = json!({"title": 42}).as_object().cloned().expect("object");
        let err = update_cmd.execute(UpdateBookCommandRequest::new(res.book.book_id.as_str(), fields))
            .await.unwrap_err();
        assert!(err.is_bad_data());
    }
}
