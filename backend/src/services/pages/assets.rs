//! The compiled frontend, embedded into the binary by `include_dir!`.
//!
//! `build.rs` copies `frontend/dist` into `static/dist` (or writes a placeholder page when
//! the frontend has not been built yet).

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// The single-page app shell rendered by every page route.
pub fn index_page() -> HttpResponse {
    match STATIC_DIR.get_file("index.html") {
        Some(index) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(index.contents().to_vec()),
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

/// Default service: bundled scripts, wasm and styles. Unknown paths are `404`, so the
/// app shell is only ever reached through the gated page routes.
pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');

    match STATIC_DIR.get_file(path) {
        Some(file) if !path.is_empty() => {
            let mime = from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        _ => HttpResponse::NotFound().body("Not Found"),
    }
}
