//! A dashboard for browsing and summarising product sale transactions.
//!
//! This library provides a JSON API over a SQLite record store that is seeded
//! from a remote JSON document, and a server-rendered dashboard page that
//! shows the transactions of a month as a table, summary tiles and a bar chart.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod api;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod logging;
mod month;
mod pagination;
mod query;
mod routing;
mod seed;
pub mod stores;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::DEFAULT_SEED_URL;
pub use stores::{TransactionStore, sqlite::SQLiteTransactionStore};
pub use timezone::get_timezone;
pub use transaction::{NewTransaction, Transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The seed document could not be fetched or decoded.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// A request for month-scoped data did not specify a month.
    #[error("a month is required")]
    MissingMonth,

    /// The month could not be parsed as a month number or an English month name.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// The year could not be parsed or is outside the supported calendar range.
    #[error("\"{0}\" is not a valid year")]
    InvalidYear(String),

    /// The page number is not an integer greater than zero.
    #[error("\"{0}\" is not a valid page number, pages start at 1")]
    InvalidPageNumber(String),

    /// The page size is not an integer greater than zero.
    #[error("\"{0}\" is not a valid page size")]
    InvalidPageSize(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A request or response body could not be read.
    #[error("could not read the message body: {0}")]
    BodyRead(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::SeedFetch(value.to_string())
    }
}

/// The JSON body sent with every error response and with seed acknowledgements.
#[derive(Debug, Serialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::SeedFetch(_)
            | Error::BodyRead(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
            }
            _ => tracing::debug!("Request failed: {}", self),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageBody {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
