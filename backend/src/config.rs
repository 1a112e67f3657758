//! Process configuration, read once from the environment at startup.
//!
//! `main.rs` loads `.env.local` and `.env` (when present) before calling
//! [`AppConfig::from_env`]. The external collaborators built from this
//! configuration live in `state.rs`.

use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Where project records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStoreKind {
    /// The hosted `projects` table behind the Supabase REST API.
    Supabase,
    /// A local SQLite file, for running without the hosted database.
    Sqlite(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub json_limit: usize,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub project_store: ProjectStoreKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let port = match get("NEXCODE_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "NEXCODE_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let json_limit = match get("NEXCODE_JSON_LIMIT_BYTES") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "NEXCODE_JSON_LIMIT_BYTES",
                value: raw,
            })?,
            None => DEFAULT_JSON_LIMIT,
        };

        let open_browser = match get("NEXCODE_OPEN_BROWSER").as_deref().map(str::trim) {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "NEXCODE_OPEN_BROWSER",
                    value: other.to_string(),
                })
            }
        };

        let project_store = match get("NEXCODE_PROJECT_STORE") {
            None => ProjectStoreKind::Supabase,
            Some(raw) => parse_store_kind(&raw).ok_or(ConfigError::Invalid {
                key: "NEXCODE_PROJECT_STORE",
                value: raw,
            })?,
        };

        Ok(Self {
            host: get("NEXCODE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            open_browser,
            json_limit,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            project_store,
        })
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_store_kind(raw: &str) -> Option<ProjectStoreKind> {
    let raw = raw.trim();
    if raw == "supabase" {
        return Some(ProjectStoreKind::Supabase);
    }
    raw.strip_prefix("sqlite:")
        .filter(|path| !path.is_empty())
        .map(|path| ProjectStoreKind::Sqlite(PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("OPENAI_API_KEY", "sk-test"),
        ("SUPABASE_URL", "https://demo.supabase.co"),
        ("SUPABASE_ANON_KEY", "anon"),
    ];

    #[test]
    fn defaults_apply_when_only_required_keys_are_set() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(!config.open_browser);
        assert_eq!(config.json_limit, 10 * 1024 * 1024);
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.project_store, ProjectStoreKind::Supabase);
        assert_eq!(config.bind_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn missing_supabase_key_is_reported_by_name() {
        let err = AppConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn sqlite_store_and_overrides_are_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("NEXCODE_PORT", "9000"),
            ("NEXCODE_OPEN_BROWSER", "true"),
            ("NEXCODE_PROJECT_STORE", "sqlite:projects.sqlite"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.open_browser);
        assert_eq!(
            config.project_store,
            ProjectStoreKind::Sqlite(PathBuf::from("projects.sqlite"))
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("NEXCODE_PORT", "eighty"));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid { key: "NEXCODE_PORT", .. })
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("NEXCODE_PROJECT_STORE", "postgres://db"));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid { key: "NEXCODE_PROJECT_STORE", .. })
        ));
    }
}
