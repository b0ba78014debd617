//! Shared wire types and the host contract for modelsync.
//!
//! Both the listener binary and an embedding editor depend on this crate;
//! it carries no I/O of its own.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One model push from the coordination service.
///
/// Created remotely, transmitted once, decoded once, then discarded after
/// being handed to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Display name of the model.
    pub name: String,
    /// JSON-encoded model document.
    pub model: String,
    /// Host-specific format tag, e.g. "bedrock". `type` on the wire.
    #[serde(rename = "type")]
    pub format: String,
}

impl LoadRequest {
    /// Decode the embedded model document.
    pub fn decode_model(&self) -> Result<Value, NotifyError> {
        serde_json::from_str(&self.model).map_err(|source| NotifyError::Decode {
            name: self.name.clone(),
            source,
        })
    }
}

/// Wire envelope: `{"event": "...", "data": {...}}`.
///
/// Envelopes with an event name not listed here belong to other subscribers
/// and are skipped by the listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Notification {
    LoadModel(LoadRequest),
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("coordination service unreachable: {0}")]
    Connection(String),

    #[error("malformed model payload for '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("host rejected load of '{name}': {reason}")]
    HostCall { name: String, reason: String },
}

/// Contract the embedding editor exposes to the listener.
///
/// The host owns all model state and serializes access to it; the listener
/// only calls in, one request at a time.
pub trait ModelHost: Send + Sync {
    /// Flash a short status line to the user.
    fn show_transient_message(&self, text: &str);

    /// Load a decoded model document. `Err` carries the host's reason.
    fn load_model(&self, document: Value, format: &str, name: &str) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_uses_event_and_data_fields() {
        let wire = r#"{"event":"load_model","data":{"name":"Foo","model":"{}","type":"bedrock"}}"#;
        let Notification::LoadModel(req) = serde_json::from_str::<Notification>(wire).unwrap();
        assert_eq!(req.name, "Foo");
        assert_eq!(req.model, "{}");
        assert_eq!(req.format, "bedrock");
    }

    #[test]
    fn format_serializes_as_type() {
        let req = LoadRequest {
            name: "Foo".into(),
            model: "{}".into(),
            format: "java_block".into(),
        };
        let wire = serde_json::to_string(&Notification::LoadModel(req)).unwrap();
        assert!(wire.contains(r#""event":"load_model""#));
        assert!(wire.contains(r#""type":"java_block""#));
        assert!(!wire.contains(r#""format""#));
    }

    #[test]
    fn unknown_event_fails_envelope_parse() {
        let wire = r#"{"event":"save_model","data":{}}"#;
        assert!(serde_json::from_str::<Notification>(wire).is_err());
    }

    #[test]
    fn decode_model_parses_document() {
        let req = LoadRequest {
            name: "Foo".into(),
            model: r#"{"valid":true}"#.into(),
            format: "bedrock".into(),
        };
        assert_eq!(req.decode_model().unwrap(), json!({"valid": true}));
    }

    #[test]
    fn decode_model_reports_request_name() {
        let req = LoadRequest {
            name: "Broken".into(),
            model: "{not json".into(),
            format: "bedrock".into(),
        };
        let err = req.decode_model().unwrap_err();
        assert!(matches!(err, NotifyError::Decode { .. }));
        assert!(err.to_string().contains("Broken"));
    }
}
