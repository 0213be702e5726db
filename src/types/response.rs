use serde_json::Value;

use crate::{
    error::{ItineraryError, Result},
    schemas::CompletionSchema,
};

/// Deserialize provider output into a typed response, naming the failing field path.
pub fn deserialize_structured_response<T>(payload: &Value) -> Result<T>
where
    T: CompletionSchema,
{
    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ItineraryError::Validation(format!(
            "failed to deserialize `{}` at {}: {}",
            T::schema().schema_name(),
            location,
            err.inner()
        ))
    })
}
