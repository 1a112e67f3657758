//! Models shared by the Nexcode server and its browser client.
//!
//! Everything in here crosses the wire as JSON, so the types only depend on `serde`.

pub mod model;
pub mod requests;
pub mod responses;
