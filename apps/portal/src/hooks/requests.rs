use dioxus::prelude::*;
use dioxus_router::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::models::NewRequest;
use crate::services::requests::{load_requests, submit_request, Submission};
use crate::state::{use_app_actions, use_app_state, AppActions, AppSignal};
use crate::{Route, API_CLIENT};

pub const SIMULATED_SUBMISSION_NOTICE: &str =
    "This is a demo. Simulating successful submission without a live backend.";

/// Loads the request list once per page load, behind the busy overlay.
pub fn use_requests_bootstrap() {
    let actions = use_app_actions();
    let state = use_app_state();

    use_future(move || async move {
        if state.read().requests.loaded {
            return;
        }

        TimeoutFuture::new(0).await;
        actions.set_requests_loading(true);

        let requests = load_requests(API_CLIENT.get()).await;
        tracing::info!(count = requests.len(), "requests loaded");
        actions.set_requests(requests);
    });
}

#[derive(Clone, Copy)]
pub struct SubmissionHandle {
    actions: AppActions,
    state: AppSignal,
    navigator: Navigator,
}

impl SubmissionHandle {
    pub fn is_submitting(&self) -> bool {
        self.state.read().requests.is_submitting
    }

    pub fn submit(&self, draft: NewRequest) {
        let actions = self.actions;
        let navigator = self.navigator;

        if !actions.start_submission() {
            return;
        }

        // Not tied to the form: leaving the page must not drop the result.
        spawn_forever(async move {
            let submission = submit_request(API_CLIENT.get(), draft).await;

            match &submission {
                Submission::Persisted(request) => {
                    actions.set_operation_success(format!(
                        "Request {} submitted successfully!",
                        request.id
                    ));
                }
                Submission::Simulated { request, reason } => {
                    tracing::warn!(id = %request.id, %reason, "submission kept locally");
                    actions.set_operation_warning(
                        format!("Request {} submitted", request.id),
                        SIMULATED_SUBMISSION_NOTICE.to_string(),
                    );
                }
            }

            actions.finish_submission(submission.into_request());
            navigator.push(Route::Requests {});
        });
    }
}

pub fn use_request_submission() -> SubmissionHandle {
    SubmissionHandle {
        actions: use_app_actions(),
        state: use_app_state(),
        navigator: use_navigator(),
    }
}
