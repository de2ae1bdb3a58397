use crate::extract::{extract_json_value, flat_object};
use crate::models::Lead;

/// Decodes a lead from a raw request body. Never fails.
///
/// A well-formed JSON object is read strictly. Anything else goes through the
/// legacy key scanner so that partial bodies still yield what they can. Every
/// field that cannot be found is the empty string.
pub fn decode_lead(body: &str) -> Lead {
    match flat_object(body) {
        Some(mut fields) => Lead::from_fields(|key| fields.remove(key).unwrap_or_default()),
        None => {
            tracing::debug!("Body is not a JSON object, falling back to key scan");
            Lead::from_fields(|key| extract_json_value(body, key))
        }
    }
}
