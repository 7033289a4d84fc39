use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

/// Non-fatal condition attached to a successful result, such as a skipped
/// range filter or rows dropped for an unparseable date.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub code: String,
    pub message: String,
}

impl Notice {
    pub fn from_error(error: &ClientError) -> Self {
        Self {
            code: error.code.clone(),
            message: error.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

pub fn success<T>(command: &str, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    success_with_notices(command, data, Vec::new())
}

pub fn success_with_notices<T>(
    command: &str,
    data: T,
    notices: Vec<Notice>,
) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let json_data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data: json_data,
        notices,
    })
}

pub fn failure_from_error(error: &ClientError) -> FailureEnvelope {
    FailureEnvelope {
        ok: false,
        error: ErrorContract {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
        },
        data: error.data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{Notice, failure_from_error, success, success_with_notices};
    use crate::ClientError;

    #[test]
    fn success_omits_notices_when_empty() {
        let envelope = success("columns", json!({"rows_read": 3}));
        assert!(envelope.is_ok());
        if let Ok(value) = envelope {
            let payload = serde_json::to_value(value);
            assert!(payload.is_ok());
            if let Ok(body) = payload {
                assert_eq!(body["ok"], Value::Bool(true));
                assert!(body.get("notices").is_none());
            }
        }
    }

    #[test]
    fn notices_carry_error_codes() {
        let notice = Notice::from_error(&ClientError::unfilterable_column("assetAmount", 2, "n/a"));
        let envelope = success_with_notices("filter", json!({}), vec![notice]);
        assert!(envelope.is_ok());
        if let Ok(value) = envelope {
            assert_eq!(value.notices.len(), 1);
            assert_eq!(value.notices[0].code, "unfilterable_column");
        }
    }

    #[test]
    fn failure_keeps_error_data() {
        let failure = failure_from_error(&ClientError::missing_date_column(&[]));
        assert!(!failure.ok);
        assert_eq!(failure.error.code, "missing_date_column");
        assert!(failure.data.is_some());
    }
}
