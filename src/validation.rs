//! Ballot input validation

use serde_json::Value;

use crate::types::VoteChoice;
use crate::{Result, validation_error};

/// True iff `input` is exactly one of the ballot literals
pub fn is_valid_choice(input: &str) -> bool {
    VoteChoice::ALL.iter().any(|choice| choice.as_str() == input)
}

/// Extract and validate the `choice` field of a vote submission body
///
/// A body that is not JSON, a missing field, `null`, an empty string or a
/// non-string value all count as "no choice given".
pub fn parse_choice(body: &[u8]) -> Result<VoteChoice> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| validation_error!("request body must be JSON"))?;

    let choice = match payload.get("choice") {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        _ => return Err(validation_error!("choice is required")),
    };

    if !is_valid_choice(choice) {
        return Err(validation_error!(
            "invalid choice '{}' (expected jjajang or jjamppong)",
            choice
        ));
    }

    choice.parse()
}
