use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::Route;

/// Tabs of the main screen, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Requests,
    NewRequest,
    Analytics,
    Reports,
    Territory,
    Compliance,
}

impl View {
    pub const ALL: [View; 7] = [
        Self::Dashboard,
        Self::Requests,
        Self::NewRequest,
        Self::Analytics,
        Self::Reports,
        Self::Territory,
        Self::Compliance,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Requests => "requests",
            Self::NewRequest => "new-request",
            Self::Analytics => "analytics",
            Self::Reports => "reports",
            Self::Territory => "territory",
            Self::Compliance => "compliance",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.id() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Requests => "Requests",
            Self::NewRequest => "New Request",
            Self::Analytics => "Analytics",
            Self::Reports => "Reports",
            Self::Territory => "Territory",
            Self::Compliance => "Compliance",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "📊",
            Self::Requests => "📋",
            Self::NewRequest => "➕",
            Self::Analytics => "📈",
            Self::Reports => "📄",
            Self::Territory => "🗺",
            Self::Compliance => "🛡",
        }
    }

    pub fn route(self) -> Route {
        match self {
            Self::Dashboard => Route::Dashboard {},
            Self::Requests => Route::Requests {},
            Self::NewRequest => Route::NewRequest {},
            Self::Analytics => Route::Analytics {},
            Self::Reports => Route::Reports {},
            Self::Territory => Route::Territory {},
            Self::Compliance => Route::Compliance {},
        }
    }

    pub fn from_route(route: &Route) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.route() == *route)
    }
}

#[component]
pub fn Navigation() -> Element {
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let active = View::from_route(&route);
    let active_id = active.map(View::id).unwrap_or_default();

    rsx! {
        nav { class: "border-b border-slate-200 bg-white dark:border-slate-700 dark:bg-slate-800",
            div { class: "mx-auto max-w-7xl px-4",
                div { class: "hidden gap-1 md:flex",
                    for view in View::ALL {
                        Link {
                            key: "{view.id()}",
                            to: view.route(),
                            class: tab_classes(active == Some(view)),
                            span { class: "mr-1", "{view.icon()}" }
                            "{view.label()}"
                        }
                    }
                }
                div { class: "py-2 md:hidden",
                    select {
                        class: "w-full rounded-md border border-slate-300 px-3 py-2 text-sm dark:border-slate-600 dark:bg-slate-700 dark:text-white",
                        value: "{active_id}",
                        onchange: move |evt| {
                            if let Some(view) = View::from_id(&evt.value()) {
                                navigator.push(view.route());
                            }
                        },
                        for view in View::ALL {
                            option { key: "{view.id()}", value: view.id(), "{view.icon()} {view.label()}" }
                        }
                    }
                }
            }
        }
    }
}

fn tab_classes(active: bool) -> &'static str {
    if active {
        "border-b-2 border-blue-600 px-4 py-3 text-sm font-semibold text-blue-600 dark:text-blue-400"
    } else {
        "border-b-2 border-transparent px-4 py-3 text-sm text-slate-500 hover:text-slate-800 dark:text-slate-400 dark:hover:text-white"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_for_the_mobile_selector() {
        for view in View::ALL {
            assert_eq!(View::from_id(view.id()), Some(view));
        }
        assert_eq!(View::from_id("settings"), None);
    }

    #[test]
    fn routes_map_back_to_their_tab() {
        assert_eq!(View::from_route(&Route::NewRequest {}), Some(View::NewRequest));
        assert_eq!(View::from_route(&Route::Login {}), None);
        assert_eq!(View::Compliance.route(), Route::Compliance {});
    }
}
