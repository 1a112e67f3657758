//! Shared application state.
//!
//! The three external collaborators are built once in `main.rs` from the `AppConfig`
//! and handed to every handler as `web::Data<AppState>`. Nothing in here is mutated
//! after startup; requests share no state beyond these clients.

use crate::clients::auth::{AuthProvider, SupabaseAuth};
use crate::clients::completion::{CompletionClient, OpenAiClient};
use crate::clients::projects::{ProjectStore, SqliteProjectStore, SupabaseProjectStore};
use crate::clients::ClientError;
use crate::config::{AppConfig, ProjectStoreKind};
use log::info;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Text-completion API producing the file manifest.
    pub completion: Arc<dyn CompletionClient>,
    /// Hosted auth service: sessions, sign-up, sign-in, sign-out.
    pub auth: Arc<dyn AuthProvider>,
    /// Append-only project records.
    pub projects: Arc<dyn ProjectStore>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("nexcode/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let projects: Arc<dyn ProjectStore> = match &config.project_store {
            ProjectStoreKind::Supabase => Arc::new(SupabaseProjectStore::new(
                http.clone(),
                &config.supabase_url,
                config.supabase_anon_key.clone(),
            )),
            ProjectStoreKind::Sqlite(path) => {
                info!("project records stored in {}", path.display());
                Arc::new(SqliteProjectStore::open(path)?)
            }
        };

        Ok(Self {
            completion: Arc::new(OpenAiClient::new(
                http.clone(),
                config.openai_api_key.clone(),
                config.openai_base_url.clone(),
            )),
            auth: Arc::new(SupabaseAuth::new(
                http,
                &config.supabase_url,
                config.supabase_anon_key.clone(),
            )),
            projects,
        })
    }
}
