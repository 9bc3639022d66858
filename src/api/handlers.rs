//! Request handlers
//!
//! Ledger calls block on account locks, so every handler hands its work to
//! the blocking pool instead of running it on an async worker thread.

use crate::api::error::ApiError;
use crate::core::Ledger;
use crate::types::Account;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

pub type SharedLedger = Arc<Ledger>;

async fn run_blocking<T, F>(ledger: SharedLedger, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Ledger) -> T + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || f(ledger.as_ref())).await?)
}

pub async fn list_accounts(
    State(ledger): State<SharedLedger>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = run_blocking(ledger, |ledger| ledger.list_accounts()).await?;
    Ok(Json(accounts))
}

pub async fn get_account(
    State(ledger): State<SharedLedger>,
    Path(id): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let account = run_blocking(ledger, move |ledger| ledger.get_account(&id)).await??;
    Ok(Json(account))
}

/// Body is an optional JSON integer; empty or `null` means a zero balance
pub async fn create_account(
    State(ledger): State<SharedLedger>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let initial_balance = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<Option<i64>>(&body)?
    };

    let account = run_blocking(ledger, move |ledger| {
        ledger.create_account(&id, initial_balance)
    })
    .await??;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Body is the JSON integer amount
pub async fn transfer(
    State(ledger): State<SharedLedger>,
    Path((from, to)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let amount = serde_json::from_slice::<i64>(&body)?;

    run_blocking(ledger, move |ledger| ledger.transfer(&from, &to, amount)).await??;
    Ok(StatusCode::OK)
}
