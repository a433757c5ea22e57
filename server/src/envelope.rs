use serde::Serialize;

/// The value sent as `predict` whenever the request is rejected.
pub const ERROR_SENTINEL: i8 = -1;

/// Whether the request produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// The `predict` field, a real prediction or the error sentinel.
///
/// The sentinel is serialized as the integer `-1`, it carries no numeric meaning and only the
/// status tells it apart from a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Prediction {
    Value(f64),
    Sentinel(i8),
}

/// The body of every `/predict` response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Envelope {
    pub status: Status,
    pub predict: Prediction,
}

impl Envelope {
    pub fn ok(value: f64) -> Self {
        Self {
            status: Status::Ok,
            predict: Prediction::Value(value),
        }
    }

    pub fn error() -> Self {
        Self {
            status: Status::Error,
            predict: Prediction::Sentinel(ERROR_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_envelope_shape() {
        let body = serde_json::to_value(Envelope::error()).unwrap();
        assert_eq!(body, json!({"status": "error", "predict": -1}));
        assert_eq!(
            serde_json::to_string(&Envelope::error()).unwrap(),
            r#"{"status":"error","predict":-1}"#
        );
    }

    #[test]
    fn ok_envelope_shape() {
        let body = serde_json::to_value(Envelope::ok(30.25)).unwrap();
        assert_eq!(body, json!({"status": "ok", "predict": 30.25}));
        assert_eq!(Envelope::ok(-1.0).status, Status::Ok);
        assert_eq!(Envelope::error().status, Status::Error);
    }
}
