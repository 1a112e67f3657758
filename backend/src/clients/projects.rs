//! Project records: one append-only row per generation request.
//!
//! Two stores implement [`ProjectStore`]:
//! - `SupabaseProjectStore` talks to the hosted `projects` table through its REST API.
//! - `SqliteProjectStore` keeps the same rows in a local SQLite file, selected with
//!   `NEXCODE_PROJECT_STORE=sqlite:<path>`.
//!
//! There is no update or delete path.

use super::ClientError;
use async_trait::async_trait;
use common::model::project::{NewProject, Project};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Inserts a row and returns it as stored. `Ok(None)` when the store accepted the
    /// insert but handed no row back.
    async fn insert(&self, project: &NewProject) -> Result<Option<Project>, ClientError>;

    /// All rows owned by `user_id`, newest first. `access_token` is the owner's session
    /// token; hosted stores read with it so row-level policies see the signed-in user.
    async fn list_by_owner(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<Project>, ClientError>;
}

pub struct SupabaseProjectStore {
    http: reqwest::Client,
    table_url: String,
    anon_key: String,
}

impl SupabaseProjectStore {
    pub fn new(http: reqwest::Client, supabase_url: &str, anon_key: String) -> Self {
        Self {
            http,
            table_url: format!("{}/rest/v1/projects", supabase_url.trim_end_matches('/')),
            anon_key,
        }
    }
}

#[async_trait]
impl ProjectStore for SupabaseProjectStore {
    async fn insert(&self, project: &NewProject) -> Result<Option<Project>, ClientError> {
        let response = self
            .http
            .post(&self.table_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            .json(&[project])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let rows: Vec<Project> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn list_by_owner(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<Project>, ClientError> {
        let owner_filter = format!("eq.{}", user_id);
        let response = self
            .http
            .get(&self.table_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .query(&[
                ("select", "*"),
                ("user_id", owner_filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        Ok(response.json().await?)
    }
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    code_path TEXT,
    created_at TEXT NOT NULL
)";

/// SQLite-backed store. The connection is shared behind a mutex and every call runs on
/// tokio's blocking pool.
#[derive(Clone)]
pub struct SqliteProjectStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProjectStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, ClientError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, ClientError> {
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, job: F) -> Result<T, ClientError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| ClientError::Worker("sqlite connection poisoned".to_string()))?;
            job(&*conn).map_err(ClientError::from)
        })
        .await
        .map_err(|e| ClientError::Worker(e.to_string()))?
    }
}

fn insert_row(conn: &Connection, project: &NewProject) -> Result<Project, rusqlite::Error> {
    let row = Project {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: project.user_id.clone(),
        name: project.name.clone(),
        description: project.description.clone(),
        code_path: Some(project.code_path.clone()),
        created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
    };
    conn.execute(
        "INSERT INTO projects (id, user_id, name, description, code_path, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            &row.id,
            &row.user_id,
            &row.name,
            &row.description,
            &row.code_path,
            &row.created_at
        ],
    )?;
    Ok(row)
}

fn select_by_owner(conn: &Connection, user_id: &str) -> Result<Vec<Project>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, description, code_path, created_at
         FROM projects WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(Project {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            code_path: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;
    rows.collect()
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn insert(&self, project: &NewProject) -> Result<Option<Project>, ClientError> {
        let project = project.clone();
        self.run(move |conn| insert_row(conn, &project).map(Some))
            .await
    }

    async fn list_by_owner(
        &self,
        user_id: &str,
        _access_token: &str,
    ) -> Result<Vec<Project>, ClientError> {
        let user_id = user_id.to_string();
        self.run(move |conn| select_by_owner(conn, &user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::stub_http;

    #[actix_web::test]
    async fn lists_only_the_owners_rows_newest_first() {
        let store = SqliteProjectStore::in_memory().unwrap();
        let first = NewProject::from_description(Some("ana".to_string()), "Um blog simples");
        let second = NewProject::from_description(Some("ana".to_string()), "Uma loja");
        let other = NewProject::from_description(Some("bia".to_string()), "Outro app");

        let first_row = store.insert(&first).await.unwrap().unwrap();
        let second_row = store.insert(&second).await.unwrap().unwrap();
        store.insert(&other).await.unwrap();

        let rows = store.list_by_owner("ana", "token").await.unwrap();
        let ids: Vec<_> = rows.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![second_row.id.as_str(), first_row.id.as_str()]);
        assert_eq!(rows[1].name, "Um blog simples");
        assert_eq!(rows[1].code_path.as_deref(), Some("temp_path_placeholder"));
    }

    #[actix_web::test]
    async fn rows_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.sqlite");

        let store = SqliteProjectStore::open(&path).unwrap();
        store
            .insert(&NewProject::from_description(None, "Sem dono"))
            .await
            .unwrap();
        store
            .insert(&NewProject::from_description(Some("ana".to_string()), "Com dono"))
            .await
            .unwrap();
        drop(store);

        let reopened = SqliteProjectStore::open(&path).unwrap();
        let rows = reopened.list_by_owner("ana", "token").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Com dono");
    }

    #[actix_web::test]
    async fn hosted_listing_reads_with_the_owners_token() {
        let (url, request) = stub_http(
            200,
            r#"[{"id":7,"user_id":"user-1","name":"Loja","description":"Uma loja","code_path":"temp_path_placeholder","created_at":"2024-05-01T12:00:00Z"}]"#,
        );
        let store = SupabaseProjectStore::new(
            reqwest::Client::builder().no_proxy().build().unwrap(),
            &url,
            "anon".to_string(),
        );

        let rows = store.list_by_owner("user-1", "user-token").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "7");

        let head = request.join().unwrap().to_ascii_lowercase();
        assert!(head.starts_with("get /rest/v1/projects?"), "{head}");
        assert!(head.contains("user_id=eq.user-1"), "{head}");
        assert!(head.contains("authorization: bearer user-token"), "{head}");
        assert!(head.contains("apikey: anon"), "{head}");
    }
}
