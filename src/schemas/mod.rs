//! JSON schema support for provider output

pub mod schema;
pub mod validation;

pub use schema::{CompletionSchema, SchemaHandle};
pub use validation::validate_structured_payload;
