use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ScrapeError;
use crate::parsing;
use crate::source::Source;

const SOURCE_FIELD: &str = "source";
const PARSING_INSTRUCTIONS_FIELD: &str = "parsing_instructions";

/// Caller-supplied wire fields merged into the payload last.
pub type Extras = Map<String, Value>;

/// One `{key, value}` element of the `context` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextEntry {
    pub key: String,
    pub value: Value,
}

impl ContextEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// JSON request body sent to the service.
///
/// Always carries a `source` tag; never carries a null field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Assemble a payload from a source tag, typed fields, and extras.
    ///
    /// 1. Start with `{source}`.
    /// 2. Merge every typed field that is set.
    /// 3. Merge extras; they may overwrite anything except `source`.
    /// 4. Validate `parsing_instructions` if present.
    ///
    /// `fields` must serialize to a mapping (or unit/null for "no fields").
    pub fn build<T: Serialize + ?Sized>(
        source: Source,
        fields: &T,
        extras: &Extras,
    ) -> Result<Self, ScrapeError> {
        let mut map = Map::new();
        map.insert(SOURCE_FIELD.to_string(), Value::from(source.as_str()));

        let typed = serde_json::to_value(fields).map_err(|e| {
            ScrapeError::invalid(format!("Failed to serialize request fields: {e}"))
        })?;
        match typed {
            Value::Object(typed) => {
                for (key, value) in typed {
                    if key == SOURCE_FIELD {
                        continue;
                    }
                    map.insert(key, value);
                }
            }
            Value::Null => {}
            other => {
                return Err(ScrapeError::invalid(format!(
                    "request fields must serialize to a mapping, got {other}"
                )));
            }
        }

        for (key, value) in extras {
            if key == SOURCE_FIELD {
                return Err(ScrapeError::invalid(
                    "extras may not override the `source` field",
                ));
            }
            map.insert(key.clone(), value.clone());
        }

        map.retain(|_, value| !value.is_null());

        if let Some(instructions) = map.get(PARSING_INSTRUCTIONS_FIELD) {
            parsing::validate(instructions)?;
        }

        Ok(Self(map))
    }

    pub fn source(&self) -> Option<&str> {
        self.0.get(SOURCE_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ScrapeError> {
        serde_json::to_vec(&self.0)
            .map_err(|e| ScrapeError::invalid(format!("Failed to encode payload: {e}")))
    }
}
