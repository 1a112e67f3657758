use common::model::schema::FieldType;

#[derive(Clone)]
pub enum Msg {
    SetDescription(String),
    AddTable,
    RemoveTable(usize),
    RenameTable(usize, String),
    AddField(usize),
    RemoveField(usize, usize),
    RenameField(usize, usize, String),
    SetFieldType(usize, usize, FieldType),
    Submit,
    Failed(String),
    Generated,
}
