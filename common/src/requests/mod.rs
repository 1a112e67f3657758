use crate::model::schema::Table;
use serde::{Deserialize, Serialize};

/// Header carrying the caller's user id on `POST /api/generate`.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Body of `POST /api/generate`.
///
/// Both fields default to empty so a body missing either one reaches the server's own
/// validation and gets its specific 400 message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Body of `POST /api/auth/signup` and `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
