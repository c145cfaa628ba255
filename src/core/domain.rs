use std::env;
use serde::{Deserialize, Serialize};
use crate::core::repository::RepositoryStore;

// Configuration abstracts config options for the books catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub stage: String,
    pub store: RepositoryStore,
    pub books_table: String,
    pub authors_table: String,
    pub default_page_size: usize,
    pub dynamodb_endpoint: String,
    pub log_level: String,
}

impl Configuration {
    pub fn new(stage: &str) -> Self {
        Configuration {
            stage: stage.to_string(),
            store: RepositoryStore::for_stage(stage),
            books_table: "books".to_string(),
            authors_table: "authors".to_string(),
            default_page_size: 10,
            dynamodb_endpoint: "http://localhost:8000".to_string(),
            log_level: "info".to_string(),
        }
    }

    // Reads BOOKS_* overrides from the environment, falling back to the defaults of the stage.
    pub fn from_env() -> Self {
        let stage = env::var("BOOKS_STAGE").unwrap_or_else(|_| "dev".to_string());
        let mut config = Configuration::new(stage.as_str());
        if let Ok(store) = env::var("BOOKS_STORE") {
            config.store = RepositoryStore::from(store);
        }
        if let Ok(table) = env::var("BOOKS_TABLE") {
            config.books_table = table;
        }
        if let Ok(table) = env::var("AUTHORS_TABLE") {
            config.authors_table = table;
        }
        if let Some(size) = env::var("BOOKS_PAGE_SIZE").ok().and_then(|s| s.parse::<usize>().ok()) {
            config.default_page_size = size;
        }
        if let Ok(endpoint) = env::var("DYNAMODB_ENDPOINT") {
            config.dynamodb_endpoint = endpoint;
        }
        if let Ok(level) = env::var("BOOKS_LOG_LEVEL") {
            config.log_level = level;
        }
        config
    }

    pub fn is_dev(&self) -> bool {
        self.stage == "dev"
    }
}
