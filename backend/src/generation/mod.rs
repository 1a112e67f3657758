//! # Generation pipeline
//!
//! The steps behind `POST /api/generate`, in call order:
//!
//! 1.  `prompt`: renders the description and schema into the model instruction.
//! 2.  The completion client (`clients::completion`) returns the raw model text.
//! 3.  `manifest`: validates that text as a path → content mapping.
//! 4.  `archive`: packs the manifest into an in-memory zip.
//! 5.  `record`: best-effort insert of the project row on its own task.
//!
//! The HTTP handler in `services::generate` strings these together.

pub mod archive;
pub mod manifest;
pub mod prompt;
pub mod record;
