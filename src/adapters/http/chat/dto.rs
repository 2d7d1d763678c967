//! Request/response bodies for `POST /api/chat`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::application::{ChatReply, SendChatMessageCommand};
use crate::domain::learning::ChatMessage;
use crate::domain::prompt::ChatMode;
use crate::domain::twin::{CommunicationPreference, LearningStyle};

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Unknown or missing modes are treated as `general`.
    #[serde(default)]
    pub mode: ChatMode,
    #[serde(default)]
    pub context: JsonValue,
}

impl From<ChatRequest> for SendChatMessageCommand {
    fn from(request: ChatRequest) -> Self {
        SendChatMessageCommand::new(request.mode, request.messages).with_context(request.context)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub learning_style: LearningStyle,
    pub communication_preference: CommunicationPreference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub mode: ChatMode,
    pub profile: ProfileSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            message: reply.message,
            mode: reply.mode,
            profile: ProfileSummary {
                learning_style: reply.learning_style,
                communication_preference: reply.communication_preference,
            },
            note: reply.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_mode_and_context() {
        let request: ChatRequest = serde_json::from_value(json!({
            "messages": [{ "role": "user", "content": "hi" }]
        }))
        .unwrap();

        assert_eq!(request.mode, ChatMode::General);
        assert!(request.context.is_null());
    }

    #[test]
    fn unknown_mode_reads_as_general() {
        let request: ChatRequest = serde_json::from_value(json!({
            "messages": [],
            "mode": "poetry"
        }))
        .unwrap();

        assert_eq!(request.mode, ChatMode::General);
    }

    #[test]
    fn response_uses_profile_labels_and_omits_empty_note() {
        let response = ChatResponse {
            message: "Hello".to_string(),
            mode: ChatMode::Learning,
            profile: ProfileSummary {
                learning_style: LearningStyle::ReadingWriting,
                communication_preference: CommunicationPreference::Empathetic,
            },
            note: None,
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "message": "Hello",
                "mode": "learning",
                "profile": {
                    "learningStyle": "Reading/Writing",
                    "communicationPreference": "Empathetic"
                }
            })
        );
    }
}
