//! Result envelope construction and serialization
//!
//! Every command emits exactly one JSON object on stdout. This module builds
//! that object and renders it as deterministic text: keys are emitted in
//! lexicographic order so output stays diff-stable and scriptable.

use serde_json::{Map, Value};
use tracing::warn;

/// Last-resort output if even the error envelope fails to serialize.
/// Unreachable with string-only bodies; kept so serialization can never
/// panic.
const FALLBACK_TEXT: &str = r#"{"error":"Serialization failure","status":"error"}"#;

/// The single structured result object returned by every operation.
///
/// An envelope is a value object: built once through [`Envelope::success`] or
/// [`Envelope::error`], never mutated afterwards, serialized exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    body: Map<String, Value>,
    failed: bool,
}

impl Envelope {
    /// Build a success envelope around a caller-supplied payload.
    ///
    /// `status` is set to `"success"` only if the payload does not already
    /// carry a `status` key; a caller-supplied value is authoritative and is
    /// preserved verbatim. An empty payload yields `{"status":"success"}`.
    pub fn success(payload: Map<String, Value>) -> Self {
        let mut body = payload;
        body.entry("status".to_string())
            .or_insert_with(|| Value::String("success".to_string()));
        Self { body, failed: false }
    }

    /// Build an error envelope: exactly `{"status":"error","error":message}`.
    ///
    /// Any other context is discarded; error envelopes are constructed only
    /// through this path.
    pub fn error(message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert(
            "status".to_string(),
            Value::String("error".to_string()),
        );
        body.insert("error".to_string(), Value::String(message.into()));
        Self { body, failed: true }
    }

    /// Whether this envelope was built through the error path.
    ///
    /// Drives the process exit code; a success payload that happens to carry
    /// its own `status` key is still a success.
    pub fn is_error(&self) -> bool {
        self.failed
    }

    /// Render the envelope as JSON text with lexicographically sorted keys.
    ///
    /// A payload that cannot be encoded degrades to a well-formed error
    /// envelope string; serialization never panics.
    pub fn serialize(&self) -> String {
        match serde_json::to_string(&Value::Object(self.body.clone())) {
            Ok(text) => text,
            Err(err) => {
                warn!("Result payload failed to serialize: {}", err);
                let fallback = Self::error(format!("Serialization failure: {err}"));
                serde_json::to_string(&Value::Object(fallback.body))
                    .unwrap_or_else(|_| FALLBACK_TEXT.to_string())
            }
        }
    }

    /// Re-parse the serialized text back into a plain mapping.
    ///
    /// True round trip: `as_mapping()` equals the mapping that was serialized
    /// for any JSON-representable payload. Used for introspection and tests.
    pub fn as_mapping(&self) -> Map<String, Value> {
        match serde_json::from_str::<Value>(&self.serialize()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
