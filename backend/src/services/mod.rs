pub mod auth;
pub mod generate;
pub mod pages;
pub mod projects;

use crate::errors;
use actix_web::web;

/// Registers every API scope and page route on an `App`.
///
/// The embedded-asset fallback is not part of this; `main.rs` installs it as the
/// default service.
pub fn configure(json_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(errors::json_config(json_limit))
            .service(generate::configure_routes())
            .service(auth::configure_routes())
            .service(auth::configure_session_route())
            .service(projects::configure_routes())
            .service(projects::configure_download_route());
        pages::configure(cfg);
    }
}
