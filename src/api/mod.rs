//! Transfer backend API
//!
//! The submission flow talks to the backend only through [`TransferApi`],
//! so tests can swap the HTTP client for an in-memory double.

pub mod error;
pub mod http;

pub use error::ApiError;
pub use http::HttpTransferApi;

use async_trait::async_trait;

use crate::models::{Currency, User};
use crate::transfer::draft::{TransferRequest, TransferResponse};

/// Reference data and transfer endpoints
#[async_trait]
pub trait TransferApi: Send + Sync {
    /// `GET /api/users`
    async fn fetch_users(&self) -> Result<Vec<User>, ApiError>;

    /// `GET /api/currencies`
    async fn fetch_currencies(&self) -> Result<Vec<Currency>, ApiError>;

    /// `POST /api/transfers/make-transfer`
    async fn make_transfer(&self, req: &TransferRequest) -> Result<TransferResponse, ApiError>;
}
