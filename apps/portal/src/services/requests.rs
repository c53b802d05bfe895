use tracing::{error, info, warn};

use crate::api::PortalClient;
use crate::fixtures::requests::{sample_requests, simulated_request};
use crate::models::{NewRequest, Request};

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Persisted(Request),
    /// The API was unreachable; the request only exists in this session.
    Simulated { request: Request, reason: String },
}

impl Submission {
    pub fn into_request(self) -> Request {
        match self {
            Self::Persisted(request) => request,
            Self::Simulated { request, .. } => request,
        }
    }
}

/// Fetches every request, falling back to the bundled samples on failure.
pub async fn load_requests(client: Option<&PortalClient>) -> Vec<Request> {
    let Some(client) = client else {
        warn!("requests client unavailable, using sample data");
        return sample_requests();
    };

    info!(base = client.base_url(), "fetching requests");
    match client.get_requests().await {
        Ok(requests) => requests,
        Err(err) => {
            warn!(?err, status = ?err.status(), "requests fetch failed, using sample data");
            sample_requests()
        }
    }
}

/// Posts a new request. When the API cannot take it, a locally stamped copy
/// is returned instead so the session can carry on.
pub async fn submit_request(client: Option<&PortalClient>, draft: NewRequest) -> Submission {
    let Some(client) = client else {
        return simulate(draft, "requests client unavailable".to_string());
    };

    info!(dsm = %draft.dsm_id, "posting new request");
    match client.create_request(&draft).await {
        Ok(request) => Submission::Persisted(request),
        Err(err) => {
            error!(?err, status = ?err.status(), "request submission failed");
            simulate(draft, err.to_string())
        }
    }
}

fn simulate(draft: NewRequest, reason: String) -> Submission {
    let request = simulated_request(draft);
    warn!(id = %request.id, %reason, "simulating request submission");
    Submission::Simulated { request, reason }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::AppConfig;
    use crate::models::{ProductLine, RequestStatus, RequestType, WorkflowStage};
    use futures::executor::block_on;
    use time::macros::date;

    #[test]
    fn missing_client_serves_samples() {
        let requests = block_on(load_requests(None));
        let ids: Vec<_> = requests.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R-1001", "R-1002"]);
    }

    fn draft() -> NewRequest {
        NewRequest {
            request_date: date!(2024 - 10 - 02),
            dsm_id: "dsm001".into(),
            dsm_name: "Mohamed Saeed".into(),
            line: ProductLine::Neurology,
            request_type: RequestType::TrainingProgram,
            estimated_cost: 15_000.0,
            activity_objectives: "Train neurologists on NeuroProtect dosing.".into(),
            status: RequestStatus::Pending,
            current_stage: WorkflowStage::DsmEntry,
            products: Vec::new(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn unreachable_client() -> PortalClient {
        let mut config = AppConfig::default();
        config.api_base_url = "http://127.0.0.1:9/api".into();
        config.request_timeout = Duration::from_secs(2);
        PortalClient::new(config).unwrap()
    }

    #[test]
    fn missing_client_simulates_submission() {
        let submission = block_on(submit_request(None, draft()));
        let Submission::Simulated { request, reason } = submission else {
            panic!("expected a simulated submission");
        };
        assert!(request.id.starts_with("R-SIM-"));
        assert_eq!(request.line, ProductLine::Neurology);
        assert_eq!(reason, "requests client unavailable");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn unreachable_api_serves_samples() {
        let client = unreachable_client();
        let requests = load_requests(Some(&client)).await;
        let ids: Vec<_> = requests.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R-1001", "R-1002"]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn unreachable_api_simulates_submission() {
        let client = unreachable_client();
        let submission = submit_request(Some(&client), draft()).await;
        let Submission::Simulated { request, reason } = submission else {
            panic!("expected a simulated submission");
        };
        assert!(request.id.starts_with("R-SIM-"));
        assert_eq!(request.dsm_id, "dsm001");
        assert!(reason.starts_with("transport error"));
    }
}
