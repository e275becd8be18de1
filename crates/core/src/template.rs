//! Notification template tags and message rendering.
//!
//! A template body references metadata through `{{tag}}` placeholders. The
//! set of tags is extracted once when a notification type is saved; a message
//! must then supply exactly that set of keys, no more and no fewer.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Regex pattern matching `{{tag}}` placeholders (inner whitespace allowed).
pub const TAG_PATTERN: &str = r"\{\{\s*(\w+)\s*\}\}";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TAG_PATTERN).expect("valid regex"));

/// Extract placeholder names from a template body.
///
/// Order of first appearance is kept; repeated placeholders appear once.
pub fn extract_tags(template: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for caps in TAG_RE.captures_iter(template) {
        let tag = &caps[1];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Check that `metadata` is an object whose keys are exactly `tags`.
pub fn validate_metadata<'a>(
    tags: &[String],
    metadata: &'a Value,
) -> Result<&'a Map<String, Value>, CoreError> {
    let object = metadata.as_object().ok_or_else(|| {
        CoreError::Validation("\"metadata\" must be an object".to_string())
    })?;

    if let Some(missing) = tags.iter().find(|tag| !object.contains_key(tag.as_str())) {
        return Err(CoreError::Validation(format!(
            "\"{missing}\" is required in metadata object"
        )));
    }

    if let Some(extra) = object.keys().find(|key| !tags.iter().any(|tag| tag == *key)) {
        return Err(CoreError::Validation(format!(
            "\"{extra}\" is not allowed in metadata object"
        )));
    }

    Ok(object)
}

/// Validate `metadata` against `tags` and substitute every placeholder.
///
/// String values are inserted verbatim; any other JSON value is inserted as
/// its JSON text (`42`, `true`, `null`, ...).
pub fn render(template: &str, tags: &[String], metadata: &Value) -> Result<String, CoreError> {
    let values = validate_metadata(tags, metadata)?;

    let rendered = TAG_RE.replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
        Some(value) => value_text(value),
        // Tags are derived from this same template, so every match has a value.
        None => caps[0].to_string(),
    });

    Ok(rendered.into_owned())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
