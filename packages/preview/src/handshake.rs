//! Messages exchanged between the parent and the hosted runner

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of one refresh cycle, increasing per controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(pub u64);

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `{previewReady: true}` from the frame, `{userCode}` to the frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireMessage", into = "WireMessage")]
pub enum HandshakeMessage {
    PreviewReady,
    UserCode(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preview_ready: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_code: Option<String>,
}

impl TryFrom<WireMessage> for HandshakeMessage {
    type Error = &'static str;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        match wire {
            WireMessage {
                preview_ready: Some(true),
                ..
            } => Ok(HandshakeMessage::PreviewReady),
            WireMessage {
                user_code: Some(code),
                ..
            } => Ok(HandshakeMessage::UserCode(code)),
            _ => Err("not a handshake message"),
        }
    }
}

impl From<HandshakeMessage> for WireMessage {
    fn from(message: HandshakeMessage) -> Self {
        match message {
            HandshakeMessage::PreviewReady => WireMessage {
                preview_ready: Some(true),
                ..Default::default()
            },
            HandshakeMessage::UserCode(code) => WireMessage {
                user_code: Some(code),
                ..Default::default()
            },
        }
    }
}

impl HandshakeMessage {
    /// Interpret an arbitrary message payload; anything else is `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_value(&self) -> Value {
        match self {
            HandshakeMessage::PreviewReady => serde_json::json!({ "previewReady": true }),
            HandshakeMessage::UserCode(code) => serde_json::json!({ "userCode": code }),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, HandshakeMessage::PreviewReady)
    }

    pub fn user_code(&self) -> Option<&str> {
        match self {
            HandshakeMessage::UserCode(code) => Some(code),
            HandshakeMessage::PreviewReady => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ready_signal() {
        assert_eq!(
            HandshakeMessage::from_value(&json!({ "previewReady": true })),
            Some(HandshakeMessage::PreviewReady)
        );
    }

    #[test]
    fn test_ready_must_be_true() {
        assert_eq!(HandshakeMessage::from_value(&json!({ "previewReady": false })), None);
        assert_eq!(HandshakeMessage::from_value(&json!({ "previewReady": "yes" })), None);
    }

    #[test]
    fn test_unrelated_messages_are_ignored() {
        for value in [
            json!(null),
            json!("previewReady"),
            json!(42),
            json!([{ "previewReady": true }]),
            json!({}),
            json!({ "type": "webpackOk" }),
        ] {
            assert_eq!(HandshakeMessage::from_value(&value), None, "{}", value);
        }
    }

    #[test]
    fn test_user_code_serializes_to_wire_shape() {
        let message = HandshakeMessage::UserCode("run()".to_string());
        assert_eq!(serde_json::to_value(&message).unwrap(), json!({ "userCode": "run()" }));
        assert_eq!(message.to_value(), json!({ "userCode": "run()" }));
        assert_eq!(message.user_code(), Some("run()"));
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let value = json!({ "previewReady": true, "source": "runner" });
        assert!(HandshakeMessage::from_value(&value).unwrap().is_ready());
    }
}
