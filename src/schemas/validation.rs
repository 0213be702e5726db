use crate::{
    error::{ItineraryError, Result},
    schemas::SchemaHandle,
};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

const MAX_REPORTED_ERRORS: usize = 3;

/// Check provider output against a schema, reporting the first few mismatches.
pub fn validate_structured_payload(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            ItineraryError::Validation(format!(
                "Failed to compile `{}` schema: {}",
                schema.schema_name(),
                err
            ))
        })?;

    let Err(errors) = compiled.validate(payload) else {
        return Ok(());
    };

    let mut errors = errors.into_iter();
    let mut details: Vec<String> = errors
        .by_ref()
        .take(MAX_REPORTED_ERRORS)
        .map(|error| {
            let path = error.instance_path.to_string();
            let location = if path.is_empty() { "<root>".to_string() } else { path };
            format!("{}: {}", location, error)
        })
        .collect();

    if errors.next().is_some() {
        details.push("more errors omitted".to_string());
    }

    Err(ItineraryError::Validation(format!(
        "Provider output does not match `{}` schema: {}",
        schema.schema_name(),
        details.join("; ")
    )))
}
