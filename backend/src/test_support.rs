//! In-process fakes of the external collaborators, shared by the handler tests.

use crate::clients::auth::{AuthProvider, AuthSession};
use crate::clients::completion::{CompletionClient, CompletionRequest};
use crate::clients::projects::ProjectStore;
use crate::clients::ClientError;
use crate::state::AppState;
use async_trait::async_trait;
use common::model::project::{NewProject, Project};
use common::model::session::SessionUser;
use common::requests::Credentials;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Cursor, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use zip::ZipArchive;

/// Token accepted by [`FakeAuth`].
pub const VALID_TOKEN: &str = "valid-token";
pub const USER_ID: &str = "user-1";

#[derive(Clone, Copy)]
pub enum CompletionBehaviour {
    Content(&'static str),
    Empty,
    Fail,
}

pub struct FakeCompletion {
    behaviour: CompletionBehaviour,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn new(behaviour: CompletionBehaviour) -> Self {
        Self {
            behaviour,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.behaviour {
            CompletionBehaviour::Content(text) => Ok(Some(text.to_string())),
            CompletionBehaviour::Empty => Ok(None),
            CompletionBehaviour::Fail => Err(ClientError::Status {
                status: 503,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy)]
pub enum ProjectsBehaviour {
    Insert,
    NoRow,
    Fail,
    Panic,
}

pub struct FakeProjects {
    behaviour: ProjectsBehaviour,
    inserted: Mutex<Vec<NewProject>>,
    list_tokens: Mutex<Vec<String>>,
    rows: Vec<Project>,
}

impl FakeProjects {
    pub fn new(behaviour: ProjectsBehaviour) -> Self {
        Self {
            behaviour,
            inserted: Mutex::new(Vec::new()),
            list_tokens: Mutex::new(Vec::new()),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(rows: Vec<Project>) -> Self {
        Self {
            rows,
            ..Self::new(ProjectsBehaviour::Insert)
        }
    }

    pub fn inserted(&self) -> Vec<NewProject> {
        self.inserted.lock().unwrap().clone()
    }

    /// Access tokens passed to `list_by_owner`, in call order.
    pub fn list_tokens(&self) -> Vec<String> {
        self.list_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectStore for FakeProjects {
    async fn insert(&self, project: &NewProject) -> Result<Option<Project>, ClientError> {
        match self.behaviour {
            ProjectsBehaviour::Insert => {
                let mut inserted = self.inserted.lock().unwrap();
                inserted.push(project.clone());
                Ok(Some(Project {
                    id: format!("proj-{}", inserted.len()),
                    user_id: project.user_id.clone(),
                    name: project.name.clone(),
                    description: project.description.clone(),
                    code_path: Some(project.code_path.clone()),
                    created_at: "2024-05-01T12:00:00Z".to_string(),
                }))
            }
            ProjectsBehaviour::NoRow => Ok(None),
            ProjectsBehaviour::Fail => Err(ClientError::Status {
                status: 500,
                body: "insert failed".to_string(),
            }),
            ProjectsBehaviour::Panic => panic!("store crashed"),
        }
    }

    async fn list_by_owner(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<Vec<Project>, ClientError> {
        self.list_tokens.lock().unwrap().push(access_token.to_string());
        Ok(self
            .rows
            .iter()
            .filter(|p| p.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }
}

/// Accepts [`VALID_TOKEN`] and any credentials whose password is `"secret"`.
#[derive(Default)]
pub struct FakeAuth {
    pub fail_sign_out: bool,
    pub signed_out: Mutex<Vec<String>>,
}

impl FakeAuth {
    fn user() -> SessionUser {
        SessionUser {
            id: USER_ID.to_string(),
            email: Some("ana@example.com".to_string()),
        }
    }

    fn check(credentials: &Credentials) -> Result<AuthSession, ClientError> {
        if credentials.password == "secret" {
            Ok(AuthSession {
                user: Self::user(),
                access_token: Some(VALID_TOKEN.to_string()),
            })
        } else {
            Err(ClientError::Rejected("Invalid login credentials".to_string()))
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_up(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        Self::check(credentials)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, ClientError> {
        Self::check(credentials)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ClientError> {
        if self.fail_sign_out {
            return Err(ClientError::Status {
                status: 500,
                body: "logout failed".to_string(),
            });
        }
        self.signed_out.lock().unwrap().push(access_token.to_string());
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<SessionUser>, ClientError> {
        Ok((access_token == VALID_TOKEN).then(Self::user))
    }
}

pub fn test_state(completion: Arc<FakeCompletion>, projects: Arc<FakeProjects>) -> AppState {
    AppState {
        completion,
        auth: Arc::new(FakeAuth::default()),
        projects,
    }
}

pub fn state_with_auth(auth: Arc<FakeAuth>, projects: Arc<FakeProjects>) -> AppState {
    AppState {
        completion: Arc::new(FakeCompletion::new(CompletionBehaviour::Empty)),
        auth,
        projects,
    }
}

/// Reads every entry of a zip back into a path → content map.
pub fn unpack(bytes: &[u8]) -> BTreeMap<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut files = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        files.insert(entry.name().to_string(), content);
    }
    files
}

/// One-shot HTTP server on an ephemeral port. Answers the first request with `status`
/// and a JSON `body`; the handle resolves to the request line and headers it received.
pub fn stub_http(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral port");
    let url = format!("http://{}", listener.local_addr().expect("local addr"));

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read request head");
            if line.is_empty() || line == "\r\n" {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
            head.push_str(&line);
        }
        let mut request_body = vec![0; content_length];
        reader.read_exact(&mut request_body).expect("read request body");

        write!(
            stream,
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
        .expect("write response");
        head
    });

    (url, handle)
}
