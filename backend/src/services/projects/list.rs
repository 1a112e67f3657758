use crate::errors::ApiError;
use crate::services::auth::{current_user, session_token};
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use log::error;

/// Lists the caller's projects. The store is queried with the session's own token so
/// hosted row-level policies apply to the signed-in user.
pub(crate) async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let token = session_token(&req).ok_or_else(ApiError::unauthenticated)?;
    let user = current_user(&req, state.auth.as_ref())
        .await
        .ok_or_else(ApiError::unauthenticated)?;

    let projects = state
        .projects
        .list_by_owner(&user.id, &token)
        .await
        .map_err(|e| {
            error!("failed to list projects for {}: {}", user.id, e);
            ApiError::Internal("Erro ao carregar os projetos.".to_string())
        })?;
    Ok(HttpResponse::Ok().json(projects))
}
