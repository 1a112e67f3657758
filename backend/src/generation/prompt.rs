use common::model::schema::Table;

/// Second conversation turn sent after the instruction.
pub const FOLLOW_UP: &str = "Generate the complete source code for the application now.";

const PREAMBLE: &str = "You are a senior full-stack software engineer specialised in Next.js (App Router), React, Tailwind CSS and Supabase.
Your task is to generate the COMPLETE source code of a full-stack web application from the user's description and the database structure below.

CRUCIAL RULES:
1. The code must be modular, clean, modern and follow best practices.
2. The application MUST be full-stack: a Next.js/React/Tailwind front end and a back end made of Next.js API routes or Supabase logic.
3. Data MUST be persisted with Supabase, using the '@supabase/supabase-js' library for every database operation (CRUD).
4. The application MUST include basic authentication (sign-up and login) with Supabase Auth.
5. The final result MUST be a JSON file structure representing the COMPLETE project.";

const OUTPUT_FORMAT: &str = r#"OUTPUT FORMAT:
The result MUST be a JSON object mapping each file path to its content, for example:
{
  "path/to/file.ext": "file content...",
  "src/app/page.tsx": "import React from 'react';\n// component code...",
  "package.json": "{ \"name\": \"generated-app\", ... }"
}
Include every file needed to run the project. Every value MUST be a string.
The JSON must be valid and complete. Do NOT include any explanation, introduction or conclusion outside the JSON object.
Start the answer with '{' and end it with '}'."#;

/// Renders the schema as one block per table:
///
/// ```text
/// Table: posts
///   - title: text
///   - published: boolean
/// ```
///
/// Blocks are separated by a blank line.
pub fn render_schema(tables: &[Table]) -> String {
    tables
        .iter()
        .map(|table| {
            let mut block = format!("Table: {}", table.name);
            for field in &table.fields {
                block.push_str(&format!("\n  - {}: {}", field.name, field.field_type));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the instruction sent as the system turn.
///
/// The description is embedded verbatim; user text is not escaped.
pub fn build_instruction(description: &str, tables: &[Table]) -> String {
    format!(
        "{PREAMBLE}\n\nAPPLICATION DESCRIPTION:\n\"{description}\"\n\nDATABASE STRUCTURE (Supabase):\n{schema}\n\n{OUTPUT_FORMAT}\n",
        schema = render_schema(tables),
    )
}
