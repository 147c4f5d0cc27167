use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::err_validation;
use crate::types;

pub fn require_text(kind: &str, field: &str, value: &str, max_len: usize) -> types::Result<()> {
    if value.trim().is_empty() {
        return Err(err_validation!(kind, "field '{}' must not be blank", field));
    }

    optional_text(kind, field, Some(value), max_len)
}

pub fn optional_text(
    kind: &str,
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> types::Result<()> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(err_validation!(
            kind,
            "field '{}' must be at most {} characters",
            field,
            max_len
        )),
        _ => Ok(()),
    }
}

/// `later` must be strictly after `earlier`.
pub fn require_ordered(
    kind: &str,
    earlier_field: &str,
    earlier: &DateTime<Utc>,
    later_field: &str,
    later: &DateTime<Utc>,
) -> types::Result<()> {
    if later <= earlier {
        return Err(err_validation!(
            kind,
            "field '{}' must be after '{}'",
            later_field,
            earlier_field
        ));
    }

    Ok(())
}

/// Open key-value payloads must at least be JSON objects.
pub fn require_object(kind: &str, field: &str, value: &Value) -> types::Result<()> {
    if !value.is_object() {
        return Err(err_validation!(kind, "field '{}' must be a JSON object", field));
    }

    Ok(())
}
