use std::sync::Arc;
use axum::http::StatusCode;
use tracing::{debug, warn};
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(config: Configuration, catalog: Arc<dyn CatalogService>) -> AppState {
        AppState {
            config,
            catalog,
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

pub fn bad_request(message: &str) -> ServerError {
    (StatusCode::BAD_REQUEST, message.to_string())
}

// Write paths: client-input errors are 400, everything else is a server failure.
impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        if err.is_bad_data() {
            (StatusCode::BAD_REQUEST, err.message().to_string())
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, err.message().to_string())
        }
    }
}

// Read paths answer 404 for any failure; store failures are only told apart in the logs.
pub(crate) fn read_to_server_error(err: CommandError) -> ServerError {
    if err.is_store_failure() {
        warn!(error = err.message(), retryable = err.retryable(), "store failure reported as not found");
    } else {
        debug!(error = err.message(), "book lookup returned nothing");
    }
    (StatusCode::NOT_FOUND, StatusCode::NOT_FOUND.canonical_reason().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::{read_to_server_error, ServerError};

    #[tokio::test]
    async fn test_should_map_write_errors() {
        let (status, body) = ServerError::from(CommandError::DuplicateKey { message: "dup".to_string() });
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert_eq!("dup", body);
        let (status, _) = ServerError::from(CommandError::Validation { message: "bad".to_string(), reason_code: None });
        assert_eq!(StatusCode::BAD_REQUEST, status);
        let (status, body) = ServerError::from(CommandError::Database { message: "down".to_string(), reason_code: None, retryable: false });
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
        assert_eq!("down", body);
    }

    #[tokio::test]
    async fn test_should_map_read_errors_to_not_found() {
        let (status, _) = read_to_server_error(CommandError::NotFound { message: "none".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, status);
        let (status, _) = read_to_server_error(CommandError::Database { message: "down".to_string(), reason_code: None, retryable: true });
        assert_eq!(StatusCode::NOT_FOUND, status);
        let (status, body) = read_to_server_error(CommandError::MalformedIdentifier { message: "xyz".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("Not Found", body);
    }
}
