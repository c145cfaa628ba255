use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::AuthorStatsDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct BookStatsCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl BookStatsCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookStatsCommandRequest {
    pub include_author: bool,
}

impl BookStatsCommandRequest {
    pub fn new(include_author: bool) -> Self {
        Self {
            include_author,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct BookStatsCommandResponse {
    pub stats: Vec<AuthorStatsDto>,
}

impl BookStatsCommandResponse {
    pub fn new(stats: Vec<AuthorStatsDto>) -> Self {
        Self {
            stats,
        }
    }
}

#[async_trait]
impl Command<BookStatsCommandRequest, BookStatsCommandResponse> for BookStatsCommand {
    async fn execute(&self, req: BookStatsCommandRequest) -> Result<BookStatsCommandResponse, CommandError> {
        self.catalog_service.author_stats(req.include_author)
            .await.map_err(CommandError::from).map(BookStatsCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use serde_json::json;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::book_stats_cmd::{BookStatsCommand, BookStatsCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;

    lazy_static! {
        static ref SUT_CMDS : AsyncOnce<(AddBookCommand, BookStatsCommand)> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test")).await;
                (AddBookCommand::new(svc.clone()), BookStatsCommand::new(svc))
            });
    }

    #[tokio::test]
    async fn test_should_run_book_stats() {
        let (add_cmd, stats_cmd) = SUT_CMDS.get().await;

        for (isbn, title, pages) in [("st1", "X", 100), ("st2", "Y", 200)] {
            let book = json!({"ISBN": isbn, "title": title, "authorId": "stats-author", "pageCount": pages})
                .as_object().cloned().expect("object");
            add_cmd.execute(AddBookCommandRequest::new(book)).await.expect("should add book");
        }
        let res = stats_cmd.execute(BookStatsCommandRequest::new(false)).await.expect("should compute stats");
        assert_eq!(json!([{"authorId": "stats-author", "averagePageCount": 150.0, "numBooks": 2, "titles": ["Y", "X"]}]),
                   serde_json::to_value(&res).expect("should serialize"));

        // no author records are seeded, so every group is dropped by the join
        let res = stats_cmd.execute(BookStatsCommandRequest::new(true)).await.expect("should compute stats");
        assert!(res.stats.is_empty());
    }
}
