use serde::{Deserialize, Serialize};
use std::fmt;

/// Column types offered by the schema form.
///
/// Serialized in lowercase (`"text"`, `"number"`, ...) both in the request body sent to
/// `POST /api/generate` and in the instruction rendered for the completion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
    Email,
    Password,
}

impl FieldType {
    /// Every selectable type, in the order the form lists them.
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::Email,
        FieldType::Password,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Password => "password",
        }
    }

    /// Parses the value of a `<select>` option back into a type.
    pub fn from_name(name: &str) -> Option<FieldType> {
        FieldType::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A table of the desired application. Names are not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Table {
    /// A table with the given name and a single blank text field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: vec![Field::default()],
        }
    }
}

/// The schema being edited in the generator form.
///
/// The editing operations keep at least one table, and at least one field per table,
/// mirroring the disabled remove buttons in the form. Every operation returns `true`
/// when the schema changed, which the Yew component uses as its re-render flag.
/// Out-of-range indices are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDescription {
    pub tables: Vec<Table>,
}

impl Default for SchemaDescription {
    fn default() -> Self {
        Self {
            tables: vec![Table {
                name: "exemplo".to_string(),
                fields: vec![Field::new("nome", FieldType::Text)],
            }],
        }
    }
}

impl SchemaDescription {
    pub fn add_table(&mut self) -> bool {
        self.tables.push(Table::new(""));
        true
    }

    pub fn remove_table(&mut self, index: usize) -> bool {
        if self.tables.len() <= 1 || index >= self.tables.len() {
            return false;
        }
        self.tables.remove(index);
        true
    }

    pub fn rename_table(&mut self, index: usize, name: String) -> bool {
        match self.tables.get_mut(index) {
            Some(table) => {
                table.name = name;
                true
            }
            None => false,
        }
    }

    pub fn add_field(&mut self, table_index: usize) -> bool {
        match self.tables.get_mut(table_index) {
            Some(table) => {
                table.fields.push(Field::default());
                true
            }
            None => false,
        }
    }

    pub fn remove_field(&mut self, table_index: usize, field_index: usize) -> bool {
        match self.tables.get_mut(table_index) {
            Some(table) if table.fields.len() > 1 && field_index < table.fields.len() => {
                table.fields.remove(field_index);
                true
            }
            _ => false,
        }
    }

    pub fn rename_field(&mut self, table_index: usize, field_index: usize, name: String) -> bool {
        match self.field_mut(table_index, field_index) {
            Some(field) => {
                field.name = name;
                true
            }
            None => false,
        }
    }

    pub fn set_field_type(
        &mut self,
        table_index: usize,
        field_index: usize,
        field_type: FieldType,
    ) -> bool {
        match self.field_mut(table_index, field_index) {
            Some(field) => {
                field.field_type = field_type;
                true
            }
            None => false,
        }
    }

    fn field_mut(&mut self, table_index: usize, field_index: usize) -> Option<&mut Field> {
        self.tables
            .get_mut(table_index)
            .and_then(|table| table.fields.get_mut(field_index))
    }
}
