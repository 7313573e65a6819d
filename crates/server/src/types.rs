use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{success, status, msg/summary[, data]}` response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the relay produced a summary
    pub success: bool,

    /// Outcome status (upstream status on relayed calls)
    pub status: u16,

    /// Full upstream body on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,

    /// Failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// Raw upstream body attached for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn success(status: u16, summary: Value) -> Self {
        Self {
            success: true,
            status,
            summary: Some(summary),
            msg: None,
            data: None,
        }
    }

    pub fn failure(status: u16, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            summary: None,
            msg: Some(msg.into()),
            data: None,
        }
    }

    /// Attach the upstream body that caused a failure
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// GET /transcript/{video_id} response
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    /// Concatenated caption text
    pub transcript: String,
}

/// GET / response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub docs: String,
}

/// One entry of GET /docs
#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /docs response
#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub endpoints: Vec<EndpointDoc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_omits_absent_fields() {
        let value = serde_json::to_value(Envelope::failure(400, "Invalid input")).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "status": 400, "msg": "Invalid input"})
        );
    }

    #[test]
    fn test_null_data_is_kept() {
        let envelope = Envelope::failure(500, "upstream error").with_data(Value::Null);
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "status": 500, "msg": "upstream error", "data": null})
        );
    }
}
