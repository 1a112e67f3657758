pub mod project;
pub mod schema;
pub mod session;
