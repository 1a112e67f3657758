use super::current_user;
use crate::errors::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};

/// `GET /api/session`: the signed-in user, used by the browser to fill `x-user-id`.
pub(crate) async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, state.auth.as_ref())
        .await
        .ok_or_else(ApiError::unauthenticated)?;
    Ok(HttpResponse::Ok().json(user))
}
