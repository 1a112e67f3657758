//! # Project Generation
//!
//! Backend logic for `POST /api/generate`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: the description must not be blank and the schema must contain at
//!     least one table, each with at least one field. Failures answer `400` with the
//!     specific message and nothing else runs.
//! 2.  **Completion**: the instruction built by `generation::prompt` goes to the
//!     completion client in a single awaited call. A transport error or an empty
//!     content field aborts the request.
//! 3.  **Manifest**: the text is validated by `generation::manifest`.
//! 4.  **Archive**: the zip is built on the blocking pool.
//! 5.  **Record**: the project row is inserted on its own task; the handler waits for its
//!     id only to name the download, falling back to the current timestamp.
//! 6.  **Response**: `200` with `application/zip` and a `Content-Disposition` attachment.
//!
//! Every failure after validation answers `500` with a generic message. The detail is
//! only logged.

use crate::clients::completion::CompletionRequest;
use crate::clients::ClientError;
use crate::generation::archive::{build_archive, ArchiveError};
use crate::generation::manifest::{Manifest, ManifestError};
use crate::generation::prompt::{build_instruction, FOLLOW_UP};
use crate::generation::record::{record_id, spawn_record_writer};
use crate::state::AppState;
use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use common::model::project::NewProject;
use common::requests::{GenerateRequest, USER_ID_HEADER};
use common::responses::ErrorBody;
use log::{error, info};
use thiserror::Error;

/// Message returned to the client for every internal failure.
const INTERNAL_ERROR_MESSAGE: &str = "Erro interno na geração de código.";

const MISSING_INPUT_MESSAGE: &str = "Descrição e estrutura do banco de dados são obrigatórias.";

const ARCHIVE_PREFIX: &str = "nexcode_app";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Validation(String),
    #[error("completion request failed: {0}")]
    Completion(#[from] ClientError),
    #[error("model produced no output")]
    EmptyCompletion,
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("archive worker failed: {0}")]
    Worker(String),
}

impl ResponseError for GenerateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            GenerateError::Validation(message) => message.as_str(),
            _ => INTERNAL_ERROR_MESSAGE,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody::new(message))
    }
}

/// A finished generation: the zip bytes and the attachment name.
#[derive(Debug)]
pub struct GeneratedProject {
    pub archive: Vec<u8>,
    pub filename: String,
}

/// Actix web handler for `POST /api/generate`.
///
/// # Returns
/// - `200 OK` with the zip archive as an attachment.
/// - `400 Bad Request` with an `ErrorBody` when the description or the schema is missing.
/// - `500 Internal Server Error` with a generic `ErrorBody` for any other failure.
pub async fn process(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Json<GenerateRequest>,
) -> Result<HttpResponse, GenerateError> {
    let user_id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    let project = generate_project(&state, user_id, payload.into_inner())
        .await
        .inspect_err(|e| error!("code generation failed: {}", e))?;

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "application/zip"))
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", project.filename),
        ))
        .body(project.archive))
}

/// Runs the whole pipeline for one request.
pub async fn generate_project(
    state: &AppState,
    user_id: Option<String>,
    request: GenerateRequest,
) -> Result<GeneratedProject, GenerateError> {
    validate(&request)?;
    let GenerateRequest {
        description,
        tables,
    } = request;

    let completion = CompletionRequest {
        instruction: build_instruction(&description, &tables),
        follow_up: FOLLOW_UP.to_string(),
    };
    let content = state
        .completion
        .complete(&completion)
        .await?
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerateError::EmptyCompletion)?;

    let manifest = Manifest::parse(&content)?;
    info!("completion produced {} file(s)", manifest.len());

    let archive = web::block(move || build_archive(&manifest))
        .await
        .map_err(|e| GenerateError::Worker(e.to_string()))??;

    let writer = spawn_record_writer(
        state.projects.clone(),
        NewProject::from_description(user_id, &description),
    );
    let filename = archive_filename(record_id(writer).await.as_deref());

    Ok(GeneratedProject { archive, filename })
}

fn validate(request: &GenerateRequest) -> Result<(), GenerateError> {
    if request.description.trim().is_empty() || request.tables.is_empty() {
        return Err(GenerateError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    }
    if let Some(table) = request.tables.iter().find(|t| t.fields.is_empty()) {
        return Err(GenerateError::Validation(format!(
            "A tabela \"{}\" precisa de pelo menos um campo.",
            table.name
        )));
    }
    Ok(())
}

/// `nexcode_app_<id>.zip`, or `nexcode_app_<unix millis>.zip` without a record id.
fn archive_filename(project_id: Option<&str>) -> String {
    match project_id {
        Some(id) => format!("{}_{}.zip", ARCHIVE_PREFIX, id),
        None => format!(
            "{}_{}.zip",
            ARCHIVE_PREFIX,
            chrono::Utc::now().timestamp_millis()
        ),
    }
}
