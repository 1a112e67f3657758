use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder stored in `code_path`: generated archives are streamed back to the
/// caller and never uploaded anywhere.
pub const PLACEHOLDER_CODE_PATH: &str = "temp_path_placeholder";

/// Number of characters of the description kept as the project name.
pub const NAME_MAX_CHARS: usize = 50;

/// A persisted project row, as returned by the project store and listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Hosted tables may use numeric or uuid keys; both are carried as text.
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub code_path: Option<String>,
    pub created_at: String,
}

/// Row written once per generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub user_id: Option<String>,
    pub name: String,
    pub description: String,
    pub code_path: String,
}

impl NewProject {
    pub fn from_description(user_id: Option<String>, description: &str) -> Self {
        Self {
            user_id,
            name: description.chars().take(NAME_MAX_CHARS).collect(),
            description: description.to_string(),
            code_path: PLACEHOLDER_CODE_PATH.to_string(),
        }
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
