use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::hooks::theme::store_theme;
use crate::models::Role;
use crate::state::{use_app_actions, use_app_state, Theme};
use crate::ui::chat::ChatAssistant;
use crate::ui::navigation::Navigation;
use crate::Route;

/// Layout for every signed-in route. Without a user it redirects to login.
#[component]
pub fn MainShell() -> Element {
    let navigator = use_navigator();
    let state = use_app_state();
    let signed_in = state.read().current_user.is_some();
    let theme = state.read().theme;

    use_effect(move || {
        if state.read().current_user.is_none() {
            navigator.replace(Route::Login {});
        }
    });

    if !signed_in {
        return rsx! { Fragment {} };
    }

    let theme_class = match theme {
        Theme::Light => "",
        Theme::Dark => "theme-dark dark",
    };

    rsx! {
        div { class: format!("min-h-screen bg-slate-50 dark:bg-slate-900 {}", theme_class),
            Header {}
            Navigation {}
            main { class: "mx-auto max-w-7xl px-4 py-6",
                Outlet::<Route> {}
            }
            ChatAssistant {}
        }
    }
}

#[component]
fn Header() -> Element {
    let actions = use_app_actions();
    let navigator = use_navigator();
    let snapshot = use_app_state().read().clone();

    let Some(user) = snapshot.current_user else {
        return rsx! { Fragment {} };
    };
    let theme = snapshot.theme;
    let theme_icon = match theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    };
    let is_admin = user.role == Role::Admin;

    rsx! {
        header { class: "bg-gradient-to-r from-blue-600 to-indigo-700 text-white shadow",
            div { class: "mx-auto flex max-w-7xl items-center justify-between px-4 py-4",
                div { class: "space-y-0.5",
                    h1 { class: "text-xl font-bold", "Sato Pharma" }
                    p { class: "text-xs text-blue-100", "Welcome, {user.user_name} ({user.role.label()})" }
                }
                div { class: "flex items-center gap-2",
                    button {
                        class: "rounded-md bg-white/10 px-3 py-2 text-sm transition hover:bg-white/20",
                        title: "Toggle theme",
                        onclick: move |_| {
                            let next = theme.toggled();
                            store_theme(next);
                            actions.set_theme(next);
                        },
                        "{theme_icon}"
                    }
                    if is_admin {
                        button {
                            class: "rounded-md bg-white/10 px-3 py-2 text-sm transition hover:bg-white/20",
                            onclick: move |_| {
                                actions.set_operation_warning(
                                    "Advanced Tools",
                                    "Advanced tools are not available in this release.".to_string(),
                                );
                            },
                            "Advanced Tools"
                        }
                    }
                    button {
                        class: "rounded-md bg-white px-3 py-2 text-sm font-semibold text-blue-700 transition hover:bg-blue-50",
                        onclick: move |_| {
                            actions.logout();
                            navigator.replace(Route::Login {});
                        },
                        "Logout"
                    }
                }
            }
        }
    }
}
