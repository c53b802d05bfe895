pub mod genai;

use anyhow::Context;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{NewRequest, Request};

pub type ClientResult<T> = Result<T, ClientError>;

/// Client for the portal's `/requests` REST resource.
#[derive(Clone)]
pub struct PortalClient {
    inner: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let base_url = config.resolved_api_base(page_origin().as_deref());

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        let client = builder
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            inner: client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_requests(&self) -> ClientResult<Vec<Request>> {
        let builder = self.request(Method::GET, "requests");
        self.send(builder).await
    }

    pub async fn create_request(&self, payload: &NewRequest) -> ClientResult<Request> {
        let builder = self.request(Method::POST, "requests").json(payload);
        self.send(builder).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.inner
            .request(method, self.join_path(path))
            .header(header::ACCEPT, "application/json")
    }

    fn join_path(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T>(&self, builder: reqwest::RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(ClientError::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::from)?;

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status,
                body: bytes.to_vec(),
            });
        }

        if bytes.is_empty() {
            return Err(ClientError::EmptyResponse(status));
        }

        serde_json::from_slice(&bytes).map_err(ClientError::from)
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Setup(#[from] anyhow::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("empty response body: {0}")]
    EmptyResponse(StatusCode),
    #[error("unexpected status {status}: {}", String::from_utf8_lossy(body))]
    UnexpectedStatus { status: StatusCode, body: Vec<u8> },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::EmptyResponse(status) => Some(*status),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_onto_normalized_base() {
        let mut config = AppConfig::default();
        config.api_base_url = "http://localhost:8080/api/".into();
        let client = PortalClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.join_path("/requests"), "http://localhost:8080/api/requests");
    }

    #[test]
    fn status_is_exposed_for_http_failures() {
        let err = ClientError::UnexpectedStatus {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: b"down for maintenance".to_vec(),
        };
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(
            err.to_string(),
            "unexpected status 503 Service Unavailable: down for maintenance"
        );
        assert_eq!(
            ClientError::EmptyResponse(StatusCode::NO_CONTENT).status(),
            Some(StatusCode::NO_CONTENT)
        );
    }
}
