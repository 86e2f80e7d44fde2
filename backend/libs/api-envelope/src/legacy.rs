/// Best-effort payload extraction for endpoints outside the standard envelope
///
/// Some listing endpoints the app consumes (jobs board, security notices)
/// answer with a bare array, `{success, data}`, or just `{data}`. Services in
/// this workspace always answer with [`crate::ApiResponse`]; this module only
/// exists so the client can still read those auxiliary endpoints. Remove a
/// caller once its endpoint moves to the standard envelope.
use serde_json::Value;

/// Which rule matched in [`extract_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyShape {
    /// The response itself is an array
    BareArray,
    /// `{success: <truthy>, data: ...}`
    Envelope,
    /// `{data: ...}` without a truthy `success`
    DataOnly,
    /// Anything else
    Unrecognized,
}

/// Classify a response body, testing the rules in precedence order.
pub fn classify(resp: &Value) -> LegacyShape {
    if resp.is_array() {
        return LegacyShape::BareArray;
    }

    let Some(map) = resp.as_object() else {
        return LegacyShape::Unrecognized;
    };

    let has_data = map.get("data").map(is_truthy).unwrap_or(false);
    let success = map.get("success").map(is_truthy).unwrap_or(false);

    match (success, has_data) {
        (true, true) => LegacyShape::Envelope,
        (false, true) => LegacyShape::DataOnly,
        _ => LegacyShape::Unrecognized,
    }
}

/// Extract the list payload from a response of unknown shape.
///
/// Precedence: bare array, then `{success, data}`, then `{data}`, then empty.
/// A `data` member that is not an array yields an empty list.
pub fn extract_data(resp: &Value) -> Vec<Value> {
    let payload = match classify(resp) {
        LegacyShape::BareArray => Some(resp),
        LegacyShape::Envelope | LegacyShape::DataOnly => resp.get("data"),
        LegacyShape::Unrecognized => None,
    };

    payload
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

// JavaScript truthiness, which is what these payloads were written against.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
