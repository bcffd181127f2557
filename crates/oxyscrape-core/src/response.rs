use serde_json::Value;

/// Decoded body returned by a finished call.
///
/// Accessors never fail; missing fields read as empty or `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    raw: Value,
}

impl Response {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The decoded JSON document as returned by the service.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// The `results` array, or an empty slice when absent.
    pub fn results(&self) -> &[Value] {
        self.raw
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Status code reported by the service for the scraped page.
    ///
    /// Looks at the top level first, then at the first result.
    pub fn status_code(&self) -> Option<u16> {
        self.raw
            .get("status_code")
            .or_else(|| self.results().first().and_then(|r| r.get("status_code")))
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
    }

    /// `content` of every result, in order.
    pub fn contents(&self) -> Vec<&Value> {
        self.results()
            .iter()
            .filter_map(|result| result.get("content"))
            .collect()
    }

    /// Job metadata, present on async results and some realtime responses.
    pub fn job(&self) -> Option<&Value> {
        self.raw.get("job")
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job().and_then(|job| job.get("id")).and_then(Value::as_str)
    }
}
