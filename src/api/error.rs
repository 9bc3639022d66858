//! HTTP error mapping
//!
//! | Error | Status |
//! |---|---|
//! | `InvalidRequest`, unparsable body | 400 |
//! | `NotFound` | 404 |
//! | `AlreadyExists` | 409 |
//! | `InsufficientFunds` | 412 |
//! | `LockTimeout`, internal failures | 500 |

use crate::types::LedgerError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::task::JoinError;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    Ledger(LedgerError),
    BadBody(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ledger(err) => match err {
                LedgerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                LedgerError::NotFound { .. } => StatusCode::NOT_FOUND,
                LedgerError::AlreadyExists { .. } => StatusCode::CONFLICT,
                LedgerError::InsufficientFunds { .. } => StatusCode::PRECONDITION_FAILED,
                LedgerError::LockTimeout { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn transient(&self) -> bool {
        matches!(self, ApiError::Ledger(err) if err.is_transient())
    }

    fn message(&self) -> String {
        match self {
            ApiError::Ledger(err) => err.to_string(),
            ApiError::BadBody(msg) => format!("Invalid body: {}", msg),
            ApiError::Internal(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        }

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "transient": self.transient(),
            })),
        )
            .into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadBody(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvalidRequest;
    use rstest::rstest;

    #[rstest]
    #[case::invalid(
        ApiError::Ledger(LedgerError::InvalidRequest(InvalidRequest::InvalidTransferAmount(0))),
        StatusCode::BAD_REQUEST
    )]
    #[case::not_found(ApiError::Ledger(LedgerError::not_found("a")), StatusCode::NOT_FOUND)]
    #[case::already_exists(ApiError::Ledger(LedgerError::already_exists("a")), StatusCode::CONFLICT)]
    #[case::insufficient(
        ApiError::Ledger(LedgerError::insufficient_funds("a", 1, 2)),
        StatusCode::PRECONDITION_FAILED
    )]
    #[case::lock_timeout(
        ApiError::Ledger(LedgerError::lock_timeout("a")),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    #[case::bad_body(ApiError::BadBody("eof".to_string()), StatusCode::BAD_REQUEST)]
    #[case::internal(ApiError::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_mapping(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.status(), expected);
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn test_only_lock_timeout_is_transient() {
        assert!(ApiError::Ledger(LedgerError::lock_timeout("a")).transient());
        assert!(!ApiError::Ledger(LedgerError::not_found("a")).transient());
        assert!(!ApiError::Internal("boom".to_string()).transient());
    }
}
