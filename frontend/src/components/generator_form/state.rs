use common::model::schema::SchemaDescription;
use common::requests::GenerateRequest;

pub struct GeneratorForm {
    /// Free-text description of the application.
    pub description: String,

    /// Tables being edited. Starts with `exemplo` / `nome: text`.
    pub schema: SchemaDescription,

    /// A generation request is in flight; the submit button is disabled.
    pub loading: bool,

    /// Last local validation or server error.
    pub error: Option<String>,
}

impl GeneratorForm {
    pub fn new() -> Self {
        Self {
            description: String::new(),
            schema: SchemaDescription::default(),
            loading: false,
            error: None,
        }
    }

    /// The body posted to `/api/generate`.
    pub fn request(&self) -> GenerateRequest {
        GenerateRequest {
            description: self.description.clone(),
            tables: self.schema.tables.clone(),
        }
    }
}
