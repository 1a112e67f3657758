//! # External collaborators
//!
//! The server owns no engine of its own: text generation, authentication and the
//! `projects` table all live in hosted services. Each one sits behind a trait so the
//! handlers receive it as an injected dependency (see `state.rs`) and tests can swap
//! in fakes.
//!
//! ## Sub-modules:
//! - `completion`: the chat-completion API that produces the file manifest.
//! - `auth`: session lookup, sign-up, sign-in and sign-out against the hosted auth service.
//! - `projects`: append-only project records, hosted (`Supabase`) or local (`SQLite`).

pub mod auth;
pub mod completion;
pub mod projects;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    /// The provider refused the operation and explained why (bad credentials, ...).
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("worker failed: {0}")]
    Worker(String),
}

impl ClientError {
    /// Builds a `Status` error from a non-success response, keeping its body for the logs.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ClientError::Status { status, body }
    }
}
