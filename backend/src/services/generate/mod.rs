//! # Generation Service Module
//!
//! Routes under `/api/generate`.
//!
//! *   **`POST /api/generate`**:
//!     - **Handler**: `create::process`
//!     - **Description**: Expects a `GenerateRequest` JSON body (`description` plus
//!       `tables`) and an optional `x-user-id` header. Builds the instruction, calls the
//!       completion API once, validates the returned manifest, zips it and answers with
//!       the archive as an attachment. A project row is written on the side; its failure
//!       never blocks the download.

mod create;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/generate";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(create::process))
}
