use super::session_cookie;
use crate::clients::auth::AuthSession;
use crate::clients::ClientError;
use crate::errors::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::Credentials;
use log::{error, info};

pub(crate) async fn sign_up(
    state: web::Data<AppState>,
    payload: web::Json<Credentials>,
) -> Result<HttpResponse, ApiError> {
    let credentials = validated(payload.into_inner())?;
    let session = state
        .auth
        .sign_up(&credentials)
        .await
        .map_err(auth_error)?;
    info!("account created for user {}", session.user.id);
    Ok(session_response(session))
}

pub(crate) async fn sign_in(
    state: web::Data<AppState>,
    payload: web::Json<Credentials>,
) -> Result<HttpResponse, ApiError> {
    let credentials = validated(payload.into_inner())?;
    let session = state
        .auth
        .sign_in(&credentials)
        .await
        .map_err(auth_error)?;
    Ok(session_response(session))
}

fn validated(credentials: Credentials) -> Result<Credentials, ApiError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email e senha são obrigatórios.".to_string(),
        ));
    }
    Ok(credentials)
}

/// Provider refusals are shown to the user as-is; anything else is an internal error.
fn auth_error(err: ClientError) -> ApiError {
    match err {
        ClientError::Rejected(message) => ApiError::BadRequest(message),
        other => {
            error!("auth provider call failed: {}", other);
            ApiError::Internal("Erro ao contatar o serviço de autenticação.".to_string())
        }
    }
}

/// Sets the session cookie when the provider issued a token. Sign-ups awaiting email
/// confirmation get the user back without a cookie.
fn session_response(session: AuthSession) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if let Some(token) = session.access_token {
        response.cookie(session_cookie(token));
    }
    response.json(session.user)
}
