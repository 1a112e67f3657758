use crate::errors::ApiError;
use actix_web::{web, HttpResponse};
use log::info;

pub(crate) async fn process(project_id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    info!("download requested for project {}, archives are not stored", project_id);
    Err(ApiError::NotFound(
        "O código deste projeto não está disponível para download.".to_string(),
    ))
}
