//! # Auth Service Module
//!
//! Thin proxy to the hosted auth provider. The provider's access token is kept in the
//! `nexcode_session` HttpOnly cookie; every gated route resolves it again through
//! [`current_user`].
//!
//! ## Registered Routes:
//! - `POST /api/auth/signup` and `POST /api/auth/login` (`login::sign_up`, `login::sign_in`)
//! - `POST /api/auth/logout` (`logout::process`)
//! - `GET /api/session` (`session::process`), registered by [`configure_session_route`]

mod login;
mod logout;
mod session;

use crate::clients::auth::AuthProvider;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::web::{get, post, resource, scope};
use actix_web::{HttpRequest, Resource, Scope};
use common::model::session::SessionUser;
use log::warn;

const API_PATH: &str = "/api/auth";

pub const SESSION_COOKIE: &str = "nexcode_session";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/signup", post().to(login::sign_up))
        .route("/login", post().to(login::sign_in))
        .route("/logout", post().to(logout::process))
}

pub fn configure_session_route() -> Resource {
    resource("/api/session").route(get().to(session::process))
}

/// The access token carried by the request, if any.
pub(crate) fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Resolves the request's session with the provider.
///
/// A provider failure is logged and treated as "no session": gated pages then send the
/// visitor to the login page instead of failing.
pub(crate) async fn current_user(req: &HttpRequest, auth: &dyn AuthProvider) -> Option<SessionUser> {
    let token = session_token(req)?;
    match auth.get_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            warn!("session lookup failed: {}", e);
            None
        }
    }
}

pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{state_with_auth, FakeAuth, FakeProjects, USER_ID, VALID_TOKEN};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::responses::ErrorBody;
    use serde_json::json;
    use std::sync::Arc;

    fn state(auth: Arc<FakeAuth>) -> web::Data<crate::state::AppState> {
        web::Data::new(state_with_auth(
            auth,
            Arc::new(FakeProjects::with_rows(Vec::new())),
        ))
    }

    #[actix_web::test]
    async fn login_sets_the_session_cookie() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FakeAuth::default())))
                .configure(crate::services::configure(1024)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ana@example.com", "password": "secret"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie");
        assert_eq!(cookie.value(), VALID_TOKEN);
        assert_eq!(cookie.http_only(), Some(true));

        let user: SessionUser = test::read_body_json(resp).await;
        assert_eq!(user.id, USER_ID);
    }

    #[actix_web::test]
    async fn rejected_credentials_surface_the_provider_message() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FakeAuth::default())))
                .configure(crate::services::configure(1024)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ana@example.com", "password": "wrong"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.response().cookies().next().is_none());
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid login credentials");
    }

    #[actix_web::test]
    async fn blank_credentials_are_refused_before_the_provider() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FakeAuth::default())))
                .configure(crate::services::configure(1024)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({"email": " ", "password": "secret"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Email e senha são obrigatórios.");
    }

    #[actix_web::test]
    async fn logout_signs_out_and_clears_the_cookie() {
        let auth = Arc::new(FakeAuth::default());
        let app = test::init_service(
            App::new()
                .app_data(state(auth.clone()))
                .configure(crate::services::configure(1024)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(Cookie::new(SESSION_COOKIE, VALID_TOKEN))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("removal cookie");
        assert_eq!(cookie.value(), "");
        assert_eq!(*auth.signed_out.lock().unwrap(), vec![VALID_TOKEN.to_string()]);
    }

    #[actix_web::test]
    async fn failed_logout_keeps_the_session() {
        let auth = Arc::new(FakeAuth {
            fail_sign_out: true,
            ..FakeAuth::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(state(auth))
                .configure(crate::services::configure(1024)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(Cookie::new(SESSION_COOKIE, VALID_TOKEN))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.response().cookies().next().is_none());
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Erro ao fazer logout.");
    }

    #[actix_web::test]
    async fn session_route_reports_the_current_user() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FakeAuth::default())))
                .configure(crate::services::configure(1024)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/session")
            .cookie(Cookie::new(SESSION_COOKIE, VALID_TOKEN))
            .to_request();
        let user: SessionUser = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user.id, USER_ID);

        let req = test::TestRequest::get().uri("/api/session").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
