#![allow(non_snake_case)]

mod api;
mod config;
mod fixtures;
mod hooks;
mod models;
mod reference;
mod services;
mod state;
mod ui;

use api::genai::{GenAiClient, GenAiError};
use api::{ClientError, PortalClient};
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use hooks::requests::use_requests_bootstrap;
use hooks::theme::load_theme;
use once_cell::sync::OnceCell;
use state::AppState;
use tracing::{error, info, warn};
use ui::analytics::AnalyticsView;
use ui::dashboard::DashboardView;
use ui::login::LoginScreen;
use ui::new_request::NewRequestView;
use ui::notifications::{LoadingOverlay, NotificationCenter};
use ui::placeholders::{ComplianceView, NotFoundView, ReportsView};
use ui::requests::RequestsView;
use ui::shell::MainShell;
use ui::territory::TerritoryView;

pub(crate) static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();
pub(crate) static API_CLIENT: OnceCell<PortalClient> = OnceCell::new();
pub(crate) static GENAI_CLIENT: OnceCell<GenAiClient> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    bootstrap_infrastructure();
    launch_app();
}

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(tracing::Level::INFO);
    });
}

fn bootstrap_infrastructure() {
    let config = AppConfig::from_env();
    let _ = APP_CONFIG.set(config.clone());
    info!(
        profile = ?config.profile,
        api = %config.api_base_url,
        ai_enabled = config.ai_enabled(),
        "portal configuration loaded"
    );

    match PortalClient::new(config.clone()) {
        Ok(client) => {
            info!(base_url = %client.base_url(), "requests client initialized");
            let _ = API_CLIENT.set(client);
        }
        Err(err) => report_client_error("requests client setup failed", &err),
    }

    match GenAiClient::new(config) {
        Ok(client) => {
            info!(model = %client.model(), "AI client initialized");
            let _ = GENAI_CLIENT.set(client);
        }
        Err(GenAiError::MissingApiKey) => {
            warn!("no AI API key configured, chat, suggestions and AI search are disabled");
        }
        Err(err) => error!(?err, "AI client setup failed"),
    }
}

fn report_client_error(context: &str, err: &ClientError) {
    error!(%context, ?err, status = ?err.status(), "api bootstrap error");
}

#[cfg(target_arch = "wasm32")]
fn launch_app() {
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus_web::Config::new().rootname("main"))
        .launch(App);
}

#[cfg(not(target_arch = "wasm32"))]
fn launch_app() {
    launch(App);
}

#[component]
fn App() -> Element {
    let app_state = use_signal(|| AppState {
        theme: load_theme(),
        ..AppState::default()
    });

    use_context_provider(|| app_state);
    use_requests_bootstrap();

    rsx! {
        div { class: "relative",
            Router::<Route> {}
            NotificationCenter {}
            LoadingOverlay {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub(crate) enum Route {
    #[route("/")]
    Login {},
    #[layout(MainShell)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/requests")]
        Requests {},
        #[route("/requests/new")]
        NewRequest {},
        #[route("/analytics")]
        Analytics {},
        #[route("/reports")]
        Reports {},
        #[route("/territory")]
        Territory {},
        #[route("/compliance")]
        Compliance {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[component]
fn Login() -> Element {
    rsx! { LoginScreen {} }
}

#[component]
fn Dashboard() -> Element {
    rsx! { DashboardView {} }
}

#[component]
fn Requests() -> Element {
    rsx! { RequestsView {} }
}

#[component]
fn NewRequest() -> Element {
    rsx! { NewRequestView {} }
}

#[component]
fn Analytics() -> Element {
    rsx! { AnalyticsView {} }
}

#[component]
fn Reports() -> Element {
    rsx! { ReportsView {} }
}

#[component]
fn Territory() -> Element {
    rsx! { TerritoryView {} }
}

#[component]
fn Compliance() -> Element {
    rsx! { ComplianceView {} }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    rsx! { NotFoundView { segments } }
}
