//! SendChatMessage command handler.
//!
//! Renders the user's cognitive twin into a system prompt, asks the
//! chat-completion provider for a reply (or answers from fallback text when
//! no provider is configured), and queues learning sessions for analysis.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{debug, error, warn};

use crate::application::handlers::learning::{
    AnalysisDispatcher, AnalysisJob, AnalyzeSessionCommand,
};
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode};
use crate::domain::learning::{ChatMessage, SessionContext, SessionRecord};
use crate::domain::prompt::{
    adaptive_modifiers, fallback_reply, with_adaptive_guidance, ChatMode, PromptContext,
    PromptRenderer, FALLBACK_NOTE,
};
use crate::domain::twin::{CognitiveProfile, CommunicationPreference, LearningStyle};
use crate::ports::{AIError, AIProvider, CompletionRequest, ProfileRepository, RequestMetadata};

/// Reply used when the provider answers with no content.
pub const APOLOGY_REPLY: &str = "I apologize, but I could not generate a response.";

/// Sampling settings sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// Command to answer the latest message of a conversation.
#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub mode: ChatMode,
    /// Conversation history, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Free-form caller context; `Null` when absent.
    pub context: JsonValue,
}

impl SendChatMessageCommand {
    pub fn new(mode: ChatMode, messages: Vec<ChatMessage>) -> Self {
        Self {
            mode,
            messages,
            context: JsonValue::Null,
        }
    }

    pub fn with_context(mut self, context: JsonValue) -> Self {
        self.context = context;
        self
    }
}

/// Result of a chat turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub message: String,
    pub mode: ChatMode,
    pub learning_style: LearningStyle,
    pub communication_preference: CommunicationPreference,
    /// Set when the reply came from fallback mode.
    pub note: Option<String>,
}

impl ChatReply {
    fn new(message: String, mode: ChatMode, profile: &CognitiveProfile) -> Self {
        Self {
            message,
            mode,
            learning_style: profile.learning_style(),
            communication_preference: profile.communication_preference(),
            note: None,
        }
    }
}

/// Handler for chat messages.
pub struct SendChatMessageHandler {
    profiles: Arc<dyn ProfileRepository>,
    ai_provider: Option<Arc<dyn AIProvider>>,
    dispatcher: Arc<AnalysisDispatcher>,
    settings: ChatSettings,
}

impl SendChatMessageHandler {
    /// Creates a handler in fallback mode.
    pub fn new(profiles: Arc<dyn ProfileRepository>, dispatcher: Arc<AnalysisDispatcher>) -> Self {
        Self {
            profiles,
            ai_provider: None,
            dispatcher,
            settings: ChatSettings::default(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn AIProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn with_settings(mut self, settings: ChatSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
        metadata: CommandMetadata,
    ) -> Result<ChatReply, DomainError> {
        let user_id = &metadata.user_id;
        let profile = match self.profiles.get(user_id).await? {
            Some(profile) => profile,
            None => {
                debug!(user_id = %user_id, "No stored twin, using default profile");
                CognitiveProfile::default_for(user_id.clone())
            }
        };

        let Some(provider) = &self.ai_provider else {
            let message = fallback_reply(cmd.mode, &cmd.messages, &profile);
            let mut reply = ChatReply::new(message, cmd.mode, &profile);
            reply.note = Some(FALLBACK_NOTE.to_string());
            return Ok(reply);
        };

        let system_prompt = Self::system_prompt(cmd.mode, &profile, &cmd.context);
        let trace_id = metadata
            .trace_id()
            .map(str::to_string)
            .unwrap_or_else(|| metadata.correlation_id());
        let request = CompletionRequest::new(RequestMetadata::new(user_id.clone(), trace_id))
            .with_system_prompt(system_prompt)
            .with_messages(cmd.messages.iter().cloned())
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = provider.complete(request).await.map_err(|err| {
            error!(user_id = %user_id, error = %err, "Chat completion failed");
            provider_error(err)
        })?;
        debug!(
            user_id = %user_id,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            "Chat completion received"
        );

        let message = if response.content.is_empty() {
            APOLOGY_REPLY.to_string()
        } else {
            response.content
        };

        if cmd.mode == ChatMode::Learning {
            self.queue_analysis(&cmd, profile.clone(), metadata.clone());
        }

        Ok(ChatReply::new(message, cmd.mode, &profile))
    }

    /// Mode prompt, then caller context, then adaptive guidance.
    pub fn system_prompt(mode: ChatMode, profile: &CognitiveProfile, context: &JsonValue) -> String {
        let prompt = PromptRenderer::with_additional_context(
            PromptRenderer::render(mode, profile),
            context,
        );
        match PromptContext::for_mode(mode, context) {
            Some(prompt_context) => {
                with_adaptive_guidance(prompt, &adaptive_modifiers(profile, &prompt_context))
            }
            None => prompt,
        }
    }

    fn queue_analysis(
        &self,
        cmd: &SendChatMessageCommand,
        profile: CognitiveProfile,
        metadata: CommandMetadata,
    ) {
        let session = SessionRecord::from_conversation(
            cmd.messages.clone(),
            &SessionContext::from_json(&cmd.context),
        );
        let user_id = metadata.user_id.clone();
        let job = AnalysisJob::new(AnalyzeSessionCommand { session, profile }, metadata);

        if let Err(err) = self.dispatcher.dispatch(job) {
            warn!(user_id = %user_id, error = %err, "Learning session not queued for analysis");
        }
    }
}

fn provider_error(err: AIError) -> DomainError {
    DomainError::new(ErrorCode::AIProviderError, "AI service error")
        .with_detail("reason", err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{InMemoryInsightRepository, InMemoryProfileRepository};
    use crate::application::handlers::learning::AnalyzeSessionHandler;
    use crate::domain::foundation::UserId;
    use crate::domain::prompt::{ADAPTIVE_GUIDANCE_HEADER, ADDITIONAL_CONTEXT_HEADER};
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("learner-1").unwrap()
    }

    struct Fixture {
        profiles: Arc<InMemoryProfileRepository>,
        bus: Arc<InMemoryEventBus>,
        dispatcher: Arc<AnalysisDispatcher>,
    }

    fn fixture() -> Fixture {
        let profiles = Arc::new(InMemoryProfileRepository::with_recording());
        let bus = Arc::new(InMemoryEventBus::new());
        let analyzer = Arc::new(AnalyzeSessionHandler::new(
            profiles.clone(),
            Arc::new(InMemoryInsightRepository::new()),
            bus.clone(),
        ));
        let dispatcher = Arc::new(AnalysisDispatcher::spawn(analyzer, bus.clone(), 8));
        Fixture {
            profiles,
            bus,
            dispatcher,
        }
    }

    impl Fixture {
        fn handler(&self) -> SendChatMessageHandler {
            SendChatMessageHandler::new(self.profiles.clone(), self.dispatcher.clone())
        }
    }

    #[tokio::test]
    async fn fallback_mode_returns_note_and_default_profile() {
        let f = fixture();

        let reply = f
            .handler()
            .handle(
                SendChatMessageCommand::new(ChatMode::General, vec![ChatMessage::user("hi")]),
                CommandMetadata::new(user()),
            )
            .await
            .unwrap();

        assert!(reply.message.starts_with("Hello! I'm Samvaad, your Cognitive Twin."));
        assert_eq!(reply.note.as_deref(), Some(FALLBACK_NOTE));
        assert_eq!(reply.learning_style, LearningStyle::Visual);
        assert_eq!(reply.communication_preference, CommunicationPreference::Professional);
    }

    #[tokio::test]
    async fn provider_receives_prompt_history_and_settings() {
        let f = fixture();
        let provider = Arc::new(MockAIProvider::new().with_response("Here is an answer"));
        let handler = f.handler().with_provider(provider.clone());

        let reply = handler
            .handle(
                SendChatMessageCommand::new(
                    ChatMode::Advocacy,
                    vec![ChatMessage::user("Help me ask for a raise")],
                )
                .with_context(json!({ "emotionalState": "anxious" })),
                CommandMetadata::new(user()),
            )
            .await
            .unwrap();

        assert_eq!(reply.message, "Here is an answer");
        assert!(reply.note.is_none());

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(0.7));
        assert_eq!(calls[0].max_tokens, Some(1000));
        assert_eq!(calls[0].messages, vec![ChatMessage::user("Help me ask for a raise")]);
        let prompt = calls[0].system_prompt.clone().unwrap();
        assert!(prompt.contains(ADDITIONAL_CONTEXT_HEADER));
        assert!(prompt.contains(ADAPTIVE_GUIDANCE_HEADER));
        assert!(prompt.ends_with(
            "The user is anxious. Be extra confident and reassuring in your advocacy."
        ));
    }

    #[tokio::test]
    async fn empty_provider_content_becomes_apology() {
        let f = fixture();
        let handler = f
            .handler()
            .with_provider(Arc::new(MockAIProvider::new().with_response("")));

        let reply = handler
            .handle(
                SendChatMessageCommand::new(ChatMode::General, vec![ChatMessage::user("hi")]),
                CommandMetadata::new(user()),
            )
            .await
            .unwrap();

        assert_eq!(reply.message, APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn provider_error_maps_to_ai_provider_error() {
        let f = fixture();
        let handler = f.handler().with_provider(Arc::new(
            MockAIProvider::new().with_error(AIError::unavailable("503")),
        ));

        let err = handler
            .handle(
                SendChatMessageCommand::new(ChatMode::Learning, vec![ChatMessage::user("hi")]),
                CommandMetadata::new(user()),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AIProviderError);
        assert!(f.profiles.recorded_updates().await.is_empty());
    }

    #[tokio::test]
    async fn learning_reply_queues_session_analysis() {
        let f = fixture();
        let handler = f
            .handler()
            .with_provider(Arc::new(MockAIProvider::new().with_response("Sure!")));

        handler
            .handle(
                SendChatMessageCommand::new(
                    ChatMode::Learning,
                    vec![ChatMessage::user("Can you explain fractions?")],
                )
                .with_context(json!({ "topic": "Fractions", "mistakes": ["calculation slip"] })),
                CommandMetadata::new(user()),
            )
            .await
            .unwrap();
        f.dispatcher.shutdown().await;

        let updates = f.profiles.recorded_updates().await;
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, user());
        let analyzed = f.bus.events_of_type("learning.session_analyzed.v1");
        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].payload["topic"], "Fractions");
    }

    #[tokio::test]
    async fn fallback_learning_reply_does_not_queue_analysis() {
        let f = fixture();

        f.handler()
            .handle(
                SendChatMessageCommand::new(ChatMode::Learning, vec![ChatMessage::user("hi")]),
                CommandMetadata::new(user()),
            )
            .await
            .unwrap();
        f.dispatcher.shutdown().await;

        assert_eq!(f.bus.event_count(), 0);
    }

    #[test]
    fn system_prompt_without_context_is_the_mode_prompt() {
        let profile = CognitiveProfile::default_for(user());
        assert_eq!(
            SendChatMessageHandler::system_prompt(ChatMode::Learning, &profile, &JsonValue::Null),
            PromptRenderer::learning(&profile)
        );
    }
}
