use std::collections::BTreeSet;

use dioxus::prelude::*;
use tracing::{error, info};

use crate::api::genai::GenAiClient;
use crate::models::Request;
use crate::services::search::{build_search_prompt, parse_matching_ids, search_schema};
use crate::state::{use_app_actions, use_app_state, AppActions, AppSignal};
use crate::GENAI_CLIENT;

const SEARCH_CONTEXT: &str = "AI Search";
const SEARCH_UNAVAILABLE: &str = "AI service is not available.";
const SEARCH_FAILED: &str =
    "Sorry, the AI search failed. Please try a different query or use the filters.";

#[derive(Clone, Copy)]
pub struct AiSearchHandle {
    actions: AppActions,
    state: AppSignal,
}

impl AiSearchHandle {
    /// Runs the natural-language search over every loaded request. A blank
    /// query drops back to the dropdown filters.
    pub fn run(&self) {
        let actions = self.actions;
        let (query, requests, in_flight) = {
            let snapshot = self.state.read();
            (
                snapshot.search.query.trim().to_string(),
                snapshot.requests.items.clone(),
                snapshot.search.is_searching,
            )
        };

        if in_flight {
            return;
        }

        if query.is_empty() {
            actions.clear_search_matches();
            return;
        }

        let Some(client) = GENAI_CLIENT.get().cloned() else {
            actions.set_operation_error(SEARCH_CONTEXT, SEARCH_UNAVAILABLE.to_string());
            return;
        };

        actions.set_searching(true);
        // Outlives the requests view so the searching flag always settles.
        spawn_forever(async move {
            match search(&client, &query, &requests).await {
                Ok(ids) => {
                    info!(%query, matches = ids.len(), "ai search finished");
                    actions.finish_search(Some(ids));
                }
                Err(err) => {
                    error!(%query, "ai search failed: {err:#}");
                    actions.set_operation_error(SEARCH_CONTEXT, SEARCH_FAILED.to_string());
                    actions.finish_search(None);
                }
            }
        });
    }
}

async fn search(
    client: &GenAiClient,
    query: &str,
    requests: &[Request],
) -> anyhow::Result<BTreeSet<String>> {
    let prompt = build_search_prompt(query, requests)?;
    let answer = client.generate_json(&prompt, search_schema()).await?;
    Ok(parse_matching_ids(&answer)?)
}

pub fn use_ai_search() -> AiSearchHandle {
    AiSearchHandle {
        actions: use_app_actions(),
        state: use_app_state(),
    }
}
