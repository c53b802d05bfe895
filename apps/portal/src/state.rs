use std::collections::BTreeSet;

use dioxus::prelude::*;
use dioxus_signals::Signal;

use crate::api::genai::ChatSession;
use crate::models::{Request, RequestStatus, RiskLevel, User};
use crate::services::search::select_requests;

pub type AppSignal = Signal<AppState>;

pub const CHAT_GREETING: &str =
    "Hello! I'm your Sato Pharma AI assistant. How can I help you today?";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_id(value: &str) -> Self {
        match value {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestsState {
    pub items: Vec<Request>,
    pub is_loading: bool,
    pub is_submitting: bool,
    pub loaded: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestFilters {
    pub status: Option<RequestStatus>,
    pub risk: Option<RiskLevel>,
}

impl RequestFilters {
    pub fn matches(&self, request: &Request) -> bool {
        if let Some(status) = self.status {
            if request.status != status {
                return false;
            }
        }

        if let Some(risk) = self.risk {
            if request.risk_level() != risk {
                return false;
            }
        }

        true
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    /// Ids returned by the last AI search; `None` means dropdown filters apply.
    pub matches: Option<BTreeSet<String>>,
    pub is_searching: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::Bot,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatState {
    pub is_open: bool,
    pub is_typing: bool,
    pub messages: Vec<ChatMessage>,
    pub session: ChatSession,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            is_open: false,
            is_typing: false,
            messages: vec![ChatMessage::bot(CHAT_GREETING)],
            session: ChatSession::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OperationState {
    pub message: Option<String>,
    pub kind: Option<NoticeKind>,
    pub context: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub current_user: Option<User>,
    pub theme: Theme,
    pub requests: RequestsState,
    pub filters: RequestFilters,
    pub search: SearchState,
    pub chat: ChatState,
    pub is_busy: bool,
    pub operation: OperationState,
}

impl AppState {
    /// Rows for the request table: the AI search result when one is active,
    /// otherwise the dropdown filters over every request.
    pub fn displayed_requests(&self) -> Vec<Request> {
        match self.search.matches.as_ref() {
            Some(ids) => select_requests(&self.requests.items, ids),
            None => self
                .requests
                .items
                .iter()
                .filter(|request| self.filters.matches(request))
                .cloned()
                .collect(),
        }
    }

    pub fn sign_in(&mut self, user: User) {
        self.current_user = Some(user);
        self.operation = OperationState::default();
    }

    /// Ends the session. Loaded requests and the theme survive; everything
    /// tied to the signed-in user is reset.
    pub fn sign_out(&mut self) {
        self.current_user = None;
        self.filters = RequestFilters::default();
        self.search = SearchState::default();
        self.chat = ChatState::default();
        self.operation = OperationState::default();
        self.is_busy = false;
    }

    pub fn set_status_filter(&mut self, status: Option<RequestStatus>) {
        self.filters.status = status;
        self.search.matches = None;
    }

    pub fn set_risk_filter(&mut self, risk: Option<RiskLevel>) {
        self.filters.risk = risk;
        self.search.matches = None;
    }

    /// Swaps in a freshly loaded list. Any AI result refers to the old list,
    /// so the dropdown filters take over again.
    pub fn replace_requests(&mut self, items: Vec<Request>) {
        self.requests.items = items;
        self.requests.is_loading = false;
        self.requests.loaded = true;
        self.search.matches = None;
        self.is_busy = false;
    }

    /// Returns `false` when a submission is already in flight.
    pub fn start_submission(&mut self) -> bool {
        if self.requests.is_submitting {
            return false;
        }
        self.requests.is_submitting = true;
        true
    }

    pub fn finish_submission(&mut self, request: Request) {
        self.requests.is_submitting = false;
        self.append_request(request);
    }

    /// Applies an AI search result. A result landing after the search was
    /// reset (sign-out) is dropped.
    pub fn finish_search(&mut self, matches: Option<BTreeSet<String>>) {
        if !self.search.is_searching {
            return;
        }
        self.search.is_searching = false;
        self.search.matches = matches;
    }

    pub fn append_request(&mut self, request: Request) {
        self.search.matches = None;
        if let Some(existing) = self
            .requests
            .items
            .iter_mut()
            .find(|existing| existing.id == request.id)
        {
            *existing = request;
        } else {
            self.requests.items.push(request);
        }
    }

    pub fn push_chat_question(&mut self, text: &str) {
        self.chat.messages.push(ChatMessage::user(text));
        self.chat.is_typing = true;
    }

    pub fn push_chat_answer(&mut self, text: &str) {
        self.chat.messages.push(ChatMessage::bot(text));
        self.chat.is_typing = false;
    }

    fn notify(&mut self, kind: NoticeKind, context: Option<String>, message: String) {
        self.operation = OperationState {
            message: Some(message),
            kind: Some(kind),
            context,
        };
    }
}

/// The only way components mutate [`AppState`].
#[derive(Clone, Copy)]
pub struct AppActions {
    state: AppSignal,
}

impl AppActions {
    fn update(&self, apply: impl FnOnce(&mut AppState)) {
        let mut signal = self.state;
        apply(&mut *signal.write());
    }

    pub fn login(&self, user: User) {
        tracing::info!(user = %user.user_id, role = user.role.label(), "signed in");
        self.update(|state| state.sign_in(user));
    }

    pub fn logout(&self) {
        tracing::info!("signed out");
        self.update(AppState::sign_out);
    }

    pub fn set_theme(&self, theme: Theme) {
        self.update(|state| state.theme = theme);
    }

    pub fn set_requests_loading(&self, loading: bool) {
        self.update(|state| {
            state.requests.is_loading = loading;
            state.is_busy = loading;
        });
    }

    pub fn set_requests(&self, items: Vec<Request>) {
        self.update(|state| state.replace_requests(items));
    }

    pub fn start_submission(&self) -> bool {
        let mut started = false;
        self.update(|state| started = state.start_submission());
        started
    }

    pub fn finish_submission(&self, request: Request) {
        self.update(|state| state.finish_submission(request));
    }

    pub fn set_status_filter(&self, status: Option<RequestStatus>) {
        self.update(|state| state.set_status_filter(status));
    }

    pub fn set_risk_filter(&self, risk: Option<RiskLevel>) {
        self.update(|state| state.set_risk_filter(risk));
    }

    pub fn set_search_query(&self, query: String) {
        self.update(|state| state.search.query = query);
    }

    pub fn set_searching(&self, searching: bool) {
        self.update(|state| state.search.is_searching = searching);
    }

    pub fn clear_search_matches(&self) {
        self.update(|state| state.search.matches = None);
    }

    pub fn finish_search(&self, matches: Option<BTreeSet<String>>) {
        self.update(|state| state.finish_search(matches));
    }

    pub fn toggle_chat(&self) {
        self.update(|state| state.chat.is_open = !state.chat.is_open);
    }

    pub fn close_chat(&self) {
        self.update(|state| state.chat.is_open = false);
    }

    pub fn push_chat_question(&self, text: &str) {
        self.update(|state| state.push_chat_question(text));
    }

    pub fn push_chat_answer(&self, text: &str) {
        self.update(|state| state.push_chat_answer(text));
    }

    pub fn set_chat_session(&self, session: ChatSession) {
        self.update(|state| state.chat.session = session);
    }

    pub fn set_operation_success(&self, message: String) {
        self.update(|state| state.notify(NoticeKind::Success, None, message));
    }

    pub fn set_operation_warning(&self, context: impl Into<String>, message: String) {
        let context = context.into();
        self.update(|state| state.notify(NoticeKind::Warning, Some(context), message));
    }

    pub fn set_operation_error(&self, context: impl Into<String>, message: String) {
        let context = context.into();
        self.update(|state| state.notify(NoticeKind::Error, Some(context), message));
    }

    pub fn clear_operation_status(&self) {
        self.update(|state| state.operation = OperationState::default());
    }
}

pub fn use_app_state() -> AppSignal {
    use_context::<AppSignal>()
}

pub fn use_app_actions() -> AppActions {
    let state = use_app_state();
    AppActions { state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::requests::sample_requests;
    use crate::reference::find_user;

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.requests.items = sample_requests();
        state.requests.loaded = true;
        state
    }

    #[test]
    fn default_chat_starts_with_greeting() {
        let state = AppState::default();
        assert_eq!(state.chat.messages, vec![ChatMessage::bot(CHAT_GREETING)]);
        assert!(!state.chat.is_open);
    }

    #[test]
    fn dropdown_filters_combine() {
        let mut state = loaded_state();
        assert_eq!(state.displayed_requests().len(), 2);

        state.set_status_filter(Some(RequestStatus::Pending));
        let ids: Vec<_> = state.displayed_requests().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["R-1002"]);

        state.set_risk_filter(Some(RiskLevel::Medium));
        assert!(state.displayed_requests().is_empty());

        state.set_status_filter(None);
        state.set_risk_filter(Some(RiskLevel::Low));
        assert_eq!(state.displayed_requests().len(), 2);
    }

    #[test]
    fn ai_matches_override_filters_until_a_filter_changes() {
        let mut state = loaded_state();
        state.filters.status = Some(RequestStatus::Pending);
        state.search.matches = Some(["R-1001".to_string()].into_iter().collect());

        let ids: Vec<_> = state.displayed_requests().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["R-1001"]);

        state.set_risk_filter(None);
        assert!(state.search.matches.is_none());
        let ids: Vec<_> = state.displayed_requests().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["R-1002"]);
    }

    #[test]
    fn sign_out_resets_user_scoped_state() {
        let mut state = loaded_state();
        state.sign_in(find_user("nsm001").cloned().unwrap());
        state.theme = Theme::Dark;
        state.filters.risk = Some(RiskLevel::High);
        state.search.query = "oncology".into();
        state.push_chat_question("What's my approval rate?");

        state.sign_out();

        assert!(state.current_user.is_none());
        assert_eq!(state.filters, RequestFilters::default());
        assert!(state.search.query.is_empty());
        assert_eq!(state.chat.messages.len(), 1);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.requests.items.len(), 2);
    }

    #[test]
    fn appended_requests_replace_same_id() {
        let mut state = loaded_state();
        let mut updated = state.requests.items[1].clone();
        updated.risk_score = 88;
        state.append_request(updated);
        assert_eq!(state.requests.items.len(), 2);
        assert_eq!(state.requests.items[1].risk_score, 88);

        let mut fresh = state.requests.items[0].clone();
        fresh.id = "R-SIM-7".into();
        state.append_request(fresh);
        assert_eq!(state.requests.items.len(), 3);
    }

    #[test]
    fn submitted_request_is_visible_despite_earlier_ai_search() {
        let mut state = loaded_state();
        state.search.matches = Some(["R-1001".to_string()].into_iter().collect());

        let mut fresh = state.requests.items[0].clone();
        fresh.id = "R-SIM-42".into();
        assert!(state.start_submission());
        state.finish_submission(fresh);

        assert!(state.search.matches.is_none());
        assert!(!state.requests.is_submitting);
        let ids: Vec<_> = state.displayed_requests().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["R-1001", "R-1002", "R-SIM-42"]);
    }

    #[test]
    fn reloading_requests_drops_ai_matches() {
        let mut state = loaded_state();
        state.search.matches = Some(["R-1002".to_string()].into_iter().collect());
        state.is_busy = true;

        state.replace_requests(sample_requests());

        assert!(state.search.matches.is_none());
        assert!(!state.is_busy);
        assert_eq!(state.displayed_requests().len(), 2);
    }

    #[test]
    fn only_one_submission_runs_at_a_time() {
        let mut state = loaded_state();
        assert!(state.start_submission());
        assert!(!state.start_submission());

        let request = state.requests.items[0].clone();
        state.finish_submission(request);
        assert!(state.start_submission());
    }

    #[test]
    fn search_result_after_sign_out_is_dropped() {
        let mut state = loaded_state();
        state.search.query = "approved".into();
        state.search.is_searching = true;

        state.sign_out();
        state.finish_search(Some(["R-1001".to_string()].into_iter().collect()));
        assert!(state.search.matches.is_none());
        assert!(!state.search.is_searching);

        state.search.is_searching = true;
        state.finish_search(Some(["R-1001".to_string()].into_iter().collect()));
        assert!(!state.search.is_searching);
        assert_eq!(state.displayed_requests().len(), 1);
    }

    #[test]
    fn chat_typing_flag_follows_exchange() {
        let mut state = AppState::default();
        state.push_chat_question("Show pending requests");
        assert!(state.chat.is_typing);
        state.push_chat_answer("R-1002 is pending.");
        assert!(!state.chat.is_typing);
        assert_eq!(state.chat.messages.last().map(|m| m.sender), Some(ChatSender::Bot));
    }

    #[test]
    fn theme_round_trips_through_id() {
        assert_eq!(Theme::from_id(Theme::Dark.id()), Theme::Dark);
        assert_eq!(Theme::from_id("sepia"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
