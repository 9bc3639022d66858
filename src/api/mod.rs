//! HTTP surface
//!
//! | Method | Path | Body | Success |
//! |---|---|---|---|
//! | GET | `/v1/accounts` | none | 200, accounts |
//! | GET | `/v1/accounts/{id}` | none | 200, account |
//! | POST | `/v1/accounts/{id}` | optional integer balance | 201, account |
//! | PATCH | `/v1/accounts/from/{from}/to/{to}` | integer amount | 200 |

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::core::Ledger;
use axum::{
    routing::{get, patch},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Build the router over a shared ledger
pub fn router(ledger: Arc<Ledger>) -> Router {
    Router::new()
        .route("/v1/accounts", get(handlers::list_accounts))
        .route(
            "/v1/accounts/:id",
            get(handlers::get_account).post(handlers::create_account),
        )
        .route("/v1/accounts/from/:from/to/:to", patch(handlers::transfer))
        .with_state(ledger)
}

/// Serve until Ctrl-C
pub async fn serve(addr: SocketAddr, ledger: Arc<Ledger>) -> Result<(), String> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to read listener address: {}", e))?;
    info!(%local_addr, "ledger listening");

    axum::serve(listener, router(ledger))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    info!("ledger stopped");
    Ok(())
}

/// Build a runtime and serve on it until Ctrl-C
pub fn serve_blocking(addr: SocketAddr, ledger: Arc<Ledger>) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

    runtime.block_on(serve(addr, ledger))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::types::Account;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use rstest::rstest;
    use serde_json::Value;
    use tower::ServiceExt;

    fn ledger() -> Arc<Ledger> {
        let ledger = Arc::new(Ledger::new(LedgerConfig::default()));
        ledger.create_account("foo", Some(500)).unwrap();
        ledger.create_account("bar", None).unwrap();
        ledger
    }

    async fn send(
        ledger: &Arc<Ledger>,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router(Arc::clone(ledger)).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_list_accounts() {
        let ledger = ledger();

        let (status, body) = send(&ledger, Method::GET, "/v1/accounts", "").await;

        assert_eq!(status, StatusCode::OK);
        let mut accounts: Vec<Account> = serde_json::from_slice(&body).unwrap();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(
            accounts,
            vec![Account::with_balance("bar", 0), Account::with_balance("foo", 500)]
        );
    }

    #[tokio::test]
    async fn test_get_account() {
        let ledger = ledger();

        let (status, body) = send(&ledger, Method::GET, "/v1/accounts/foo", "").await;

        assert_eq!(status, StatusCode::OK);
        let account: Account = serde_json::from_slice(&body).unwrap();
        assert_eq!(account, Account::with_balance("foo", 500));
    }

    #[tokio::test]
    async fn test_get_missing_account_is_404() {
        let ledger = ledger();

        let (status, body) = send(&ledger, Method::GET, "/v1/accounts/ghost", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["error"], "Account ghost not found");
        assert_eq!(error["transient"], false);
    }

    #[rstest]
    #[case::with_balance("250", 250)]
    #[case::empty_body("", 0)]
    #[case::null_body("null", 0)]
    #[tokio::test]
    async fn test_create_account(#[case] body: &str, #[case] expected: i64) {
        let ledger = ledger();

        let (status, response) = send(&ledger, Method::POST, "/v1/accounts/baz", body).await;

        assert_eq!(status, StatusCode::CREATED);
        let account: Account = serde_json::from_slice(&response).unwrap();
        assert_eq!(account, Account::with_balance("baz", expected));
        assert_eq!(ledger.get_account("baz").unwrap().balance(), expected);
    }

    #[rstest]
    #[case::existing("/v1/accounts/foo", "1", StatusCode::CONFLICT)]
    #[case::negative_balance("/v1/accounts/baz", "-1", StatusCode::BAD_REQUEST)]
    #[case::non_integer_body("/v1/accounts/baz", "\"ten\"", StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn test_create_account_errors(
        #[case] uri: &str,
        #[case] body: &str,
        #[case] expected: StatusCode,
    ) {
        let ledger = ledger();

        let (status, _) = send(&ledger, Method::POST, uri, body).await;

        assert_eq!(status, expected);
        assert_eq!(ledger.get_account("foo").unwrap().balance(), 500);
        assert!(ledger.get_account("baz").is_err());
    }

    #[tokio::test]
    async fn test_transfer() {
        let ledger = ledger();

        let (status, body) =
            send(&ledger, Method::PATCH, "/v1/accounts/from/foo/to/bar", "200").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(ledger.get_account("foo").unwrap().balance(), 300);
        assert_eq!(ledger.get_account("bar").unwrap().balance(), 200);
    }

    #[rstest]
    #[case::insufficient_funds("/v1/accounts/from/foo/to/bar", "501", StatusCode::PRECONDITION_FAILED)]
    #[case::missing_destination("/v1/accounts/from/foo/to/ghost", "1", StatusCode::NOT_FOUND)]
    #[case::same_account("/v1/accounts/from/foo/to/foo", "1", StatusCode::BAD_REQUEST)]
    #[case::zero_amount("/v1/accounts/from/foo/to/bar", "0", StatusCode::BAD_REQUEST)]
    #[case::missing_body("/v1/accounts/from/foo/to/bar", "", StatusCode::BAD_REQUEST)]
    #[tokio::test]
    async fn test_transfer_errors(
        #[case] uri: &str,
        #[case] body: &str,
        #[case] expected: StatusCode,
    ) {
        let ledger = ledger();

        let (status, _) = send(&ledger, Method::PATCH, uri, body).await;

        assert_eq!(status, expected);
        assert_eq!(ledger.get_account("foo").unwrap().balance(), 500);
        assert_eq!(ledger.get_account("bar").unwrap().balance(), 0);
    }

    #[tokio::test]
    async fn test_lock_timeout_is_transient_500() {
        let ledger = Arc::new(Ledger::new(LedgerConfig::with_lock_timeout(
            std::time::Duration::from_millis(10),
        )));
        ledger.create_account("foo", Some(5)).unwrap();
        ledger.create_account("bar", None).unwrap();
        let token = ledger
            .locks()
            .acquire("foo", std::time::Duration::from_millis(10))
            .unwrap();

        let (status, body) =
            send(&ledger, Method::PATCH, "/v1/accounts/from/foo/to/bar", "1").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(error["transient"], true);
        assert!(ledger.locks().release("foo", token));
    }
}
