use dioxus::prelude::*;
use tracing::{error, warn};

use crate::models::{ProductLine, RequestType};
use crate::services::objectives::suggestion_prompt;
use crate::state::{use_app_actions, use_app_state, AppActions, AppSignal};
use crate::GENAI_CLIENT;

pub const CHAT_FAILURE_REPLY: &str = "Sorry, I'm having trouble connecting right now.";

pub const QUICK_QUESTIONS: [&str; 3] = [
    "What's my approval rate?",
    "Show pending requests",
    "Territory performance summary",
];

#[derive(Clone, Copy)]
pub struct ChatHandle {
    actions: AppActions,
    state: AppSignal,
}

impl ChatHandle {
    pub fn available(&self) -> bool {
        GENAI_CLIENT.get().is_some()
    }

    pub fn send(&self, text: &str) {
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }

        let Some(client) = GENAI_CLIENT.get().cloned() else {
            warn!("chat message dropped, AI client not configured");
            return;
        };

        if self.state.read().chat.is_typing {
            return;
        }

        let actions = self.actions;
        let mut session = self.state.read().chat.session.clone();
        actions.push_chat_question(&text);

        spawn(async move {
            match session.send_message(&client, &text).await {
                Ok(reply) => {
                    actions.set_chat_session(session);
                    actions.push_chat_answer(&reply);
                }
                Err(err) => {
                    error!(?err, "chat request failed");
                    actions.push_chat_answer(CHAT_FAILURE_REPLY);
                }
            }
        });
    }
}

pub fn use_chat() -> ChatHandle {
    ChatHandle {
        actions: use_app_actions(),
        state: use_app_state(),
    }
}

#[derive(Clone, Copy)]
pub struct SuggestionHandle {
    actions: AppActions,
    pub is_suggesting: Signal<bool>,
}

impl SuggestionHandle {
    /// Asks the model for an activity objective and hands the trimmed text
    /// to `apply`.
    pub fn suggest(
        &self,
        request_type: Option<RequestType>,
        line: Option<ProductLine>,
        apply: impl FnOnce(String) + 'static,
    ) {
        let actions = self.actions;
        let mut is_suggesting = self.is_suggesting;

        let prompt = match suggestion_prompt(request_type, line) {
            Ok(prompt) => prompt,
            Err(message) => {
                actions.set_operation_error("AI Suggestion", message.to_string());
                return;
            }
        };

        let Some(client) = GENAI_CLIENT.get().cloned() else {
            actions.set_operation_error(
                "AI Suggestion",
                "AI service is not available.".to_string(),
            );
            return;
        };

        is_suggesting.set(true);
        spawn(async move {
            match client.generate_text(&prompt).await {
                Ok(text) => apply(text.trim().to_string()),
                Err(err) => {
                    error!(?err, "objective suggestion failed");
                    actions.set_operation_error(
                        "AI Suggestion",
                        "Failed to get AI suggestion.".to_string(),
                    );
                }
            }
            is_suggesting.set(false);
        });
    }
}

pub fn use_objective_suggestion() -> SuggestionHandle {
    SuggestionHandle {
        actions: use_app_actions(),
        is_suggesting: use_signal(|| false),
    }
}
