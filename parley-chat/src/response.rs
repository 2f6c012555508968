//! Chat-surface response and classification types.

use serde::{Deserialize, Serialize};

/// Which surface should render (or continue handling) the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Conversational reply rendered directly in the chat panel.
    AiChat,
    /// Not handled here; the general assistant pipeline takes over.
    AiBrain,
}

/// Reply from the orchestrator for one inbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub kind: ResponseKind,
    pub text: String,
}

impl ChatResponse {
    pub fn chat(text: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::AiChat,
            text: text.into(),
        }
    }

    /// Defer to the general pipeline, passing the message through.
    pub fn brain(text: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::AiBrain,
            text: text.into(),
        }
    }
}

/// Upstream intent classification for an inbound message. Produced
/// outside this crate; the orchestrator only inspects the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Classification {
    pub intent: String,
}

impl Classification {
    /// Label that routes a message into the scheduling flow.
    pub const SCHEDULE_CALL: &'static str = "schedule_call";

    pub fn schedule_call() -> Self {
        Self {
            intent: Self::SCHEDULE_CALL.to_string(),
        }
    }

    pub fn is_schedule_call(&self) -> bool {
        self.intent == Self::SCHEDULE_CALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_kind_wire_format() {
        let resp = ChatResponse::chat("done");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["kind"], "ai_chat");

        let resp = ChatResponse::brain("show my leads");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["kind"], "ai_brain");
    }

    #[test]
    fn test_classification_gate() {
        assert!(Classification::schedule_call().is_schedule_call());
        assert!(!Classification {
            intent: "smalltalk".to_string()
        }
        .is_schedule_call());
    }
}
