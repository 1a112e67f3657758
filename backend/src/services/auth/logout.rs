use super::{removal_cookie, session_token};
use crate::errors::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use log::error;

/// Signs the session out at the provider, then clears the cookie.
///
/// When the provider call fails the cookie is kept and the client stays signed in.
pub(crate) async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    if let Some(token) = session_token(&req) {
        state.auth.sign_out(&token).await.map_err(|e| {
            error!("sign-out failed: {}", e);
            ApiError::Internal("Erro ao fazer logout.".to_string())
        })?;
    }
    Ok(HttpResponse::NoContent().cookie(removal_cookie()).finish())
}
