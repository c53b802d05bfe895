use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "/api";
const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GENAI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_LOGIN_PASSCODE: &str = "1234";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub genai_base_url: String,
    pub genai_model: String,
    pub genai_api_key: Option<String>,
    pub login_passcode: String,
    pub profile: AppProfile,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            genai_base_url: DEFAULT_GENAI_BASE_URL.to_string(),
            genai_model: DEFAULT_GENAI_MODEL.to_string(),
            genai_api_key: None,
            login_passcode: DEFAULT_LOGIN_PASSCODE.to_string(),
            profile: AppProfile::Dev,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        Self::from_lookup(read_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("SATO_API_BASE_URL") {
            config.api_base_url = url;
        }

        if let Some(url) = lookup("SATO_GENAI_BASE_URL") {
            config.genai_base_url = url;
        }

        if let Some(model) = lookup("SATO_GENAI_MODEL") {
            config.genai_model = model;
        }

        config.genai_api_key = lookup("SATO_GENAI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(passcode) = lookup("SATO_LOGIN_PASSCODE") {
            config.login_passcode = passcode;
        }

        config.profile = AppProfile::from_env(lookup("SATO_PROFILE"));

        if let Some(secs) =
            lookup("SATO_REQUEST_TIMEOUT_SECS").and_then(|value| value.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        config
    }

    pub fn ai_enabled(&self) -> bool {
        self.genai_api_key.is_some()
    }

    /// Absolute base for the requests API. Relative paths such as `/api` are
    /// resolved against `origin` (the page origin in the browser).
    pub fn resolved_api_base(&self, origin: Option<&str>) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            return base.to_string();
        }

        match origin {
            Some(origin) => format!(
                "{}/{}",
                origin.trim_end_matches('/'),
                base.trim_start_matches('/')
            ),
            None => base.to_string(),
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "SATO_API_BASE_URL" => option_env!("SATO_API_BASE_URL"),
        "SATO_GENAI_BASE_URL" => option_env!("SATO_GENAI_BASE_URL"),
        "SATO_GENAI_MODEL" => option_env!("SATO_GENAI_MODEL"),
        "SATO_GENAI_API_KEY" => option_env!("SATO_GENAI_API_KEY"),
        "API_KEY" => option_env!("API_KEY"),
        "SATO_LOGIN_PASSCODE" => option_env!("SATO_LOGIN_PASSCODE"),
        "SATO_PROFILE" => option_env!("SATO_PROFILE"),
        "SATO_REQUEST_TIMEOUT_SECS" => option_env!("SATO_REQUEST_TIMEOUT_SECS"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.genai_model, "gemini-2.5-flash");
        assert_eq!(config.login_passcode, "1234");
        assert_eq!(config.profile, AppProfile::Dev);
        assert!(!config.ai_enabled());
    }

    #[test]
    fn api_key_alias_and_timeout_floor() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_KEY", "  secret  "),
            ("SATO_REQUEST_TIMEOUT_SECS", "0"),
            ("SATO_PROFILE", "production"),
        ]));
        assert_eq!(config.genai_api_key.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(1));
        assert_eq!(config.profile, AppProfile::Prod);
    }

    #[test]
    fn blank_api_key_disables_ai() {
        let config = AppConfig::from_lookup(lookup_from(&[("SATO_GENAI_API_KEY", "   ")]));
        assert!(!config.ai_enabled());
    }

    #[test]
    fn relative_api_base_resolves_against_origin() {
        let config = AppConfig::default();
        assert_eq!(
            config.resolved_api_base(Some("https://ops.example.com/")),
            "https://ops.example.com/api"
        );
        assert_eq!(config.resolved_api_base(None), "/api");

        let absolute = AppConfig::from_lookup(lookup_from(&[(
            "SATO_API_BASE_URL",
            "http://localhost:8080/api/",
        )]));
        assert_eq!(
            absolute.resolved_api_base(Some("https://ignored")),
            "http://localhost:8080/api"
        );
    }
}
