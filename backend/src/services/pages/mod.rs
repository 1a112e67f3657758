//! # Page Routes
//!
//! Every page is the same embedded app shell; what differs is who may see it. The
//! session is checked on the server before anything is rendered:
//!
//! | Route        | With session          | Without session     |
//! |--------------|-----------------------|---------------------|
//! | `/`          | redirect `/dashboard` | redirect `/login`   |
//! | `/dashboard` | app shell             | redirect `/login`   |
//! | `/create`    | app shell             | redirect `/login`   |
//! | `/login`     | app shell             | app shell           |
//! | `/signup`    | app shell             | app shell           |

pub mod assets;

use crate::services::auth::current_user;
use crate::state::AppState;
use actix_web::http::header::LOCATION;
use actix_web::web::{get, resource};
use actix_web::{web, HttpRequest, HttpResponse};

pub const LOGIN_PATH: &str = "/login";
const DASHBOARD_PATH: &str = "/dashboard";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/").route(get().to(home)))
        .service(resource(DASHBOARD_PATH).route(get().to(gated)))
        .service(resource("/create").route(get().to(gated)))
        .service(resource(LOGIN_PATH).route(get().to(public)))
        .service(resource("/signup").route(get().to(public)));
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}

async fn home(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match current_user(&req, state.auth.as_ref()).await {
        Some(_) => redirect(DASHBOARD_PATH),
        None => redirect(LOGIN_PATH),
    }
}

async fn gated(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match current_user(&req, state.auth.as_ref()).await {
        Some(_) => assets::index_page(),
        None => redirect(LOGIN_PATH),
    }
}

async fn public() -> HttpResponse {
    assets::index_page()
}
