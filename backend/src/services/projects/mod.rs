//! # Projects Service Module
//!
//! Read side of the project records written by `POST /api/generate`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/projects`**:
//!     - **Handler**: `list::process`
//!     - **Description**: Lists the signed-in user's projects, newest first. Answers
//!       `401` without a session.
//!
//! *   **`GET /api/download/{project_id}`**:
//!     - **Handler**: `download::process`
//!     - **Description**: Linked from every project in the dashboard list. Generated
//!       archives are streamed once and never stored, so there is nothing to serve and
//!       the route always answers `404`.

mod download;
mod list;

use actix_web::web::{get, resource};
use actix_web::Resource;

pub fn configure_routes() -> Resource {
    resource("/api/projects").route(get().to(list::process))
}

pub fn configure_download_route() -> Resource {
    resource("/api/download/{project_id}").route(get().to(download::process))
}
