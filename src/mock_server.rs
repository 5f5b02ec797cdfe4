//! Mock transfer backend
//!
//! Serves static user/currency fixtures and echoes a synthetic transfer
//! confirmation. Fixtures are re-read on every request so they can be edited
//! while the server runs. No validation happens here.
//!
//! ```text
//! GET  /api/users                    -> 200 User[]     | 500
//! GET  /api/currencies               -> 200 Currency[] | 500
//! POST /api/transfers/make-transfer  -> 200 { transferId, amount, message }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::MockServerConfig;
use crate::models::{Currency, User};
use crate::transfer::draft::TransferResponse;

const USERS_FILE: &str = "users.json";
const CURRENCIES_FILE: &str = "currencies.json";

#[derive(Debug, Clone)]
pub struct MockState {
    pub fixtures_dir: PathBuf,
}

/// Build the mock router over a fixtures directory
pub fn router(fixtures_dir: impl Into<PathBuf>) -> Router {
    let state = Arc::new(MockState {
        fixtures_dir: fixtures_dir.into(),
    });

    Router::new()
        .route("/api/users", get(get_users))
        .route("/api/currencies", get(get_currencies))
        .route("/api/transfers/make-transfer", post(make_transfer))
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn serve(config: &MockServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!(addr = %addr, fixtures_dir = %config.fixtures_dir, "Mock API listening");
    axum::serve(listener, router(&config.fixtures_dir)).await?;
    Ok(())
}

async fn read_fixture<T: DeserializeOwned>(dir: &Path, file: &str) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(dir.join(file)).await?;
    Ok(serde_json::from_str(&content)?)
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn get_users(State(state): State<Arc<MockState>>) -> Response {
    match read_fixture::<Vec<User>>(&state.fixtures_dir, USERS_FILE).await {
        Ok(users) => Json(users).into_response(),
        Err(e) => {
            error!(error = %e, "Error reading or sending users data");
            internal_error()
        }
    }
}

async fn get_currencies(State(state): State<Arc<MockState>>) -> Response {
    match read_fixture::<Vec<Currency>>(&state.fixtures_dir, CURRENCIES_FILE).await {
        Ok(currencies) => Json(currencies).into_response(),
        Err(e) => {
            error!(error = %e, "Error reading or sending currencies data");
            internal_error()
        }
    }
}

/// Echo the amount back as a confirmed transfer
async fn make_transfer(Json(body): Json<serde_json::Value>) -> Json<TransferResponse> {
    let amount = match body.get("amount") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    info!(amount = %amount, "Mock transfer accepted");

    Json(TransferResponse {
        transfer_id: 1,
        message: format!("The transfer of {} has been successfully completed", amount),
        amount,
    })
}
