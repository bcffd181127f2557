//! Structural check for caller-supplied parsing instructions.
//!
//! The extraction DSL itself (`_fns`, `_fn`, `_args`, ...) is evaluated by the
//! service; here we only make sure the document is a nested mapping of
//! reasonable depth before it leaves the process.

use serde_json::Value;

use crate::error::ScrapeError;

/// Maximum nesting depth of mappings and arrays below the root.
pub const MAX_DEPTH: usize = 8;

/// Validate a parsing-instructions document.
///
/// The root must be a mapping. Nested values may be strings, numbers,
/// booleans, null, mappings, or arrays of those. Errors carry a path
/// breadcrumb such as `parsing_instructions.title._fns[0]`.
pub fn validate(instructions: &Value) -> Result<(), ScrapeError> {
    match instructions {
        Value::Object(_) => walk(instructions, "parsing_instructions", 0),
        other => Err(ScrapeError::invalid(format!(
            "parsing_instructions must be a mapping, got {}",
            kind(other)
        ))),
    }
}

fn walk(value: &Value, path: &str, depth: usize) -> Result<(), ScrapeError> {
    match value {
        Value::Object(map) => {
            if depth >= MAX_DEPTH {
                return Err(too_deep(path));
            }
            for (key, child) in map {
                if key.is_empty() {
                    return Err(ScrapeError::invalid(format!("{path}: empty key")));
                }
                walk(child, &format!("{path}.{key}"), depth + 1)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            if depth >= MAX_DEPTH {
                return Err(too_deep(path));
            }
            for (i, child) in items.iter().enumerate() {
                walk(child, &format!("{path}[{i}]"), depth + 1)?;
            }
            Ok(())
        }
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => Ok(()),
    }
}

fn too_deep(path: &str) -> ScrapeError {
    ScrapeError::invalid(format!(
        "{path}: nesting exceeds the maximum depth of {MAX_DEPTH}"
    ))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn nested(depth: usize) -> Value {
        let mut value = json!("leaf");
        for _ in 0..depth {
            value = json!({ "k": value });
        }
        value
    }

    #[test]
    fn test_accepts_function_pipeline() {
        let instructions = json!({
            "name": {"_fns": [{"_fn": "xpath_one", "_args": ["//h1"]}]}
        });
        assert!(validate(&instructions).is_ok());
    }

    #[test]
    fn test_accepts_scalars_and_null() {
        let instructions = json!({"a": 1, "b": 2.5, "c": true, "d": null, "e": "x"});
        assert!(validate(&instructions).is_ok());
    }

    #[test]
    fn test_rejects_non_mapping_root() {
        for bad in [json!("xpath"), json!(["a"]), json!(3), Value::Null] {
            let err = validate(&bad).unwrap_err();
            assert!(matches!(err, ScrapeError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_depth_limit() {
        assert!(validate(&nested(MAX_DEPTH)).is_ok());

        let err = validate(&nested(MAX_DEPTH + 1)).unwrap_err();
        let ScrapeError::InvalidArgument(message) = err else {
            panic!("expected InvalidArgument");
        };
        assert!(message.starts_with("parsing_instructions.k.k"));
        assert!(message.contains("maximum depth"));
    }

    #[test]
    fn test_breadcrumb_through_arrays() {
        let instructions = json!({"title": {"_fns": [{"": "x"}]}});
        let err = validate(&instructions).unwrap_err();
        assert_eq!(
            err,
            ScrapeError::InvalidArgument("parsing_instructions.title._fns[0]: empty key".into())
        );
    }
}
