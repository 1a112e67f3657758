//! Update function for the Schema Form.
//!
//! Schema edits are delegated to `SchemaDescription`; they only re-render when the
//! operation actually changed something (removing the last table or field is a no-op).
//! `Msg::Submit` runs the generation round trip:
//!
//! 1. local check that the description is not blank;
//! 2. `GET /api/session` for the user id, redirecting to `/login` without a session;
//! 3. `POST /api/generate` with the `x-user-id` header;
//! 4. download of the returned archive, then navigation to `/dashboard`.

use common::model::session::SessionUser;
use common::requests::{GenerateRequest, USER_ID_HEADER};
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::{
    error_message, filename_from_disposition, navigate, show_toast, trigger_download,
};

use super::messages::Msg;
use super::state::GeneratorForm;

const DESCRIPTION_REQUIRED: &str = "A descrição do aplicativo é obrigatória.";
const SESSION_EXPIRED: &str = "Sessão expirada. Por favor, faça login novamente.";
const UNKNOWN_ERROR: &str = "Erro desconhecido na geração de código.";

pub fn update(component: &mut GeneratorForm, ctx: &Context<GeneratorForm>, msg: Msg) -> bool {
    match msg {
        Msg::SetDescription(description) => {
            component.description = description;
            false
        }
        Msg::AddTable => component.schema.add_table(),
        Msg::RemoveTable(index) => component.schema.remove_table(index),
        Msg::RenameTable(index, name) => component.schema.rename_table(index, name),
        Msg::AddField(table) => component.schema.add_field(table),
        Msg::RemoveField(table, field) => component.schema.remove_field(table, field),
        Msg::RenameField(table, field, name) => component.schema.rename_field(table, field, name),
        Msg::SetFieldType(table, field, field_type) => {
            component.schema.set_field_type(table, field, field_type)
        }
        Msg::Submit => {
            if component.loading {
                return false;
            }
            component.error = None;
            if component.description.trim().is_empty() {
                component.error = Some(DESCRIPTION_REQUIRED.to_string());
                return true;
            }
            component.loading = true;

            let request = component.request();
            let link = ctx.link().clone();
            spawn_local(async move {
                match generate(request).await {
                    Ok(()) => link.send_message(Msg::Generated),
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            true
        }
        Msg::Failed(message) => {
            component.loading = false;
            component.error = Some(message);
            true
        }
        Msg::Generated => {
            component.loading = false;
            show_toast("Download iniciado.");
            navigate("/dashboard");
            true
        }
    }
}

async fn generate(request: GenerateRequest) -> Result<(), String> {
    let user = match current_user().await {
        Some(user) => user,
        None => {
            navigate("/login");
            return Err(SESSION_EXPIRED.to_string());
        }
    };

    let response = Request::post("/api/generate")
        .header(USER_ID_HEADER, &user.id)
        .json(&request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(error_message(response, UNKNOWN_ERROR).await);
    }

    let filename = filename_from_disposition(response.headers().get("content-disposition").as_deref());
    let bytes = response.binary().await.map_err(|e| e.to_string())?;
    trigger_download(&bytes, &filename, "application/zip")
        .map_err(|e| format!("{:?}", e))
}

async fn current_user() -> Option<SessionUser> {
    let response = Request::get("/api/session").send().await.ok()?;
    if !response.ok() {
        return None;
    }
    response.json::<SessionUser>().await.ok()
}
