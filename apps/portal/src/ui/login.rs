use dioxus::prelude::*;
use dioxus_router::prelude::*;

use crate::reference::login_groups;
use crate::services::auth::authenticate;
use crate::state::use_app_actions;
use crate::config::AppConfig;
use crate::{Route, APP_CONFIG};

#[component]
pub fn LoginScreen() -> Element {
    let actions = use_app_actions();
    let navigator = use_navigator();

    let mut selected_user = use_signal(String::new);
    let mut passcode = use_signal(String::new);
    let mut login_error = use_signal(|| None::<String>);

    let groups = login_groups();

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let expected = APP_CONFIG
            .get()
            .map(|config| config.login_passcode.clone())
            .unwrap_or_else(|| AppConfig::default().login_passcode);

        let outcome = authenticate(&selected_user.peek(), &passcode.peek(), &expected);
        match outcome {
            Ok(user) => {
                login_error.set(None);
                passcode.set(String::new());
                actions.login(user);
                navigator.push(Route::Dashboard {});
            }
            Err(err) => {
                tracing::warn!(%err, "login rejected");
                login_error.set(Some(err.to_string()));
            }
        }
    };

    rsx! {
        div { class: "flex min-h-screen items-center justify-center bg-gradient-to-br from-blue-600 to-indigo-800 p-4",
            div { class: "w-full max-w-md space-y-6 rounded-2xl bg-white p-8 shadow-2xl dark:bg-slate-800",
                header { class: "space-y-1 text-center",
                    div { class: "mx-auto flex h-14 w-14 items-center justify-center rounded-full bg-blue-600 text-2xl font-bold text-white", "S" }
                    h1 { class: "text-2xl font-bold text-slate-900 dark:text-white", "Sato Pharma" }
                    p { class: "text-sm text-slate-500 dark:text-slate-400", "Corporate Ops Hub" }
                }
                form { class: "space-y-4", onsubmit: on_submit,
                    label { class: "block space-y-1 text-sm",
                        span { class: "font-medium text-slate-700 dark:text-slate-200", "Select User" }
                        select {
                            class: "w-full rounded-md border border-slate-300 px-3 py-2 text-sm dark:border-slate-600 dark:bg-slate-700 dark:text-white",
                            value: "{selected_user}",
                            onchange: move |evt| selected_user.set(evt.value()),
                            option { value: "", "-- Select a user --" }
                            for group in groups {
                                optgroup { key: "{group.label}", label: group.label,
                                    for user in group.users {
                                        option { key: "{user.user_id}", value: "{user.user_id}", "{user.label}" }
                                    }
                                }
                            }
                        }
                    }
                    label { class: "block space-y-1 text-sm",
                        span { class: "font-medium text-slate-700 dark:text-slate-200", "Passcode" }
                        input {
                            r#type: "password",
                            class: "w-full rounded-md border border-slate-300 px-3 py-2 text-sm dark:border-slate-600 dark:bg-slate-700 dark:text-white",
                            placeholder: "Enter passcode",
                            value: "{passcode}",
                            oninput: move |evt| passcode.set(evt.value()),
                        }
                    }
                    if let Some(message) = login_error.read().as_ref() {
                        p { class: "rounded bg-red-50 px-3 py-2 text-xs text-red-600", "{message}" }
                    }
                    button {
                        r#type: "submit",
                        class: "w-full rounded-md bg-blue-600 px-4 py-2 text-sm font-semibold text-white transition hover:bg-blue-700",
                        "Sign In"
                    }
                }
            }
        }
    }
}
