use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    MalformedIdentifier {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::Database { message, .. } => message,
            CommandError::DuplicateKey { message } => message,
            CommandError::MalformedIdentifier { message } => message,
            CommandError::NotFound { message } => message,
            CommandError::Runtime { message, .. } => message,
            CommandError::Serialization { message } => message,
            CommandError::Validation { message, .. } => message,
        }
    }

    // client-input class: the caller sent a book the catalog refuses
    pub fn is_bad_data(&self) -> bool {
        matches!(self, CommandError::DuplicateKey { .. } | CommandError::Validation { .. })
    }

    // the store failed, so nothing is known about whether the book exists
    pub fn is_store_failure(&self) -> bool {
        matches!(self, CommandError::Database { .. } | CommandError::Runtime { .. }
            | CommandError::Serialization { .. })
    }

    pub fn retryable(&self) -> bool {
        match self {
            CommandError::Database { retryable, .. } => *retryable,
            CommandError::Runtime { retryable, .. } => *retryable,
            _ => false,
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        let retryable = other.retryable();
        match other {
            LibraryError::MalformedIdentifier { message } => {
                CommandError::MalformedIdentifier { message }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Database { message, reason_code, .. } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, .. } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_convert_library_error() {
        let err = CommandError::from(LibraryError::duplicate_key("dup"));
        assert_eq!(CommandError::DuplicateKey { message: "dup".to_string() }, err);
        assert!(err.is_bad_data());
        assert_eq!("dup", err.message());

        let err = CommandError::from(LibraryError::validation("invalid", None));
        assert!(err.is_bad_data());

        let err = CommandError::from(LibraryError::unavailable("down", None, true));
        assert!(matches!(err, CommandError::Runtime { retryable: true, .. }));
        assert!(!err.is_bad_data());

        let err = CommandError::from(LibraryError::malformed_identifier("xyz"));
        assert!(matches!(err, CommandError::MalformedIdentifier { .. }));
        assert!(!err.is_store_failure());
    }

    #[tokio::test]
    async fn test_should_classify_store_failures() {
        let err = CommandError::from(LibraryError::database_or_unavailable("throttled", None, true));
        assert!(err.is_store_failure());
        assert!(err.retryable());

        let err = CommandError::from(LibraryError::database("bad request", Some("400".to_string()), false));
        assert!(err.is_store_failure());
        assert!(!err.retryable());

        let err = CommandError::from(LibraryError::not_found("none"));
        assert!(!err.is_store_failure());
        assert!(!err.retryable());
    }
}
