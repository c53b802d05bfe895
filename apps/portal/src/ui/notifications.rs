use crate::state::{use_app_actions, use_app_state, NoticeKind};
use dioxus::prelude::*;

impl NoticeKind {
    fn accent_classes(self) -> (&'static str, &'static str) {
        match self {
            Self::Success => ("border-emerald-500 bg-emerald-50", "text-emerald-700"),
            Self::Warning => ("border-amber-500 bg-amber-50", "text-amber-700"),
            Self::Error => ("border-red-500 bg-red-50", "text-red-700"),
        }
    }

    fn default_title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Warning => "Notice",
            Self::Error => "Something went wrong",
        }
    }
}

#[derive(Props, Clone)]
#[props(no_eq)]
pub struct ToastProps {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    #[props(optional)]
    pub on_close: Option<EventHandler<MouseEvent>>,
}

impl PartialEq for ToastProps {
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

#[component]
pub fn Toast(props: ToastProps) -> Element {
    let (container_class, accent_text) = props.kind.accent_classes();

    rsx! {
        div { class: format!("pointer-events-auto rounded-lg border-l-4 p-4 shadow-lg {}", container_class),
            div { class: "flex items-start justify-between gap-4",
                div { class: "space-y-1",
                    h3 { class: format!("text-sm font-semibold {}", accent_text), "{props.title}" }
                    p { class: "text-xs text-slate-700", "{props.message}" }
                }
                if let Some(handler) = props.on_close.as_ref() {
                    button {
                        class: "rounded bg-slate-200 px-2 py-1 text-[11px] text-slate-600 transition hover:bg-slate-300",
                        onclick: *handler,
                        "Dismiss"
                    }
                }
            }
        }
    }
}

/// Renders the current operation notice, if any. One notice at a time; a new
/// one replaces the old.
#[component]
pub fn NotificationCenter() -> Element {
    let actions = use_app_actions();
    let operation = use_app_state().read().operation.clone();

    let (Some(message), Some(kind)) = (operation.message, operation.kind) else {
        return rsx! { Fragment {} };
    };

    let title = operation
        .context
        .unwrap_or_else(|| kind.default_title().to_string());

    rsx! {
        div { class: "pointer-events-none fixed right-4 top-4 z-50 flex w-80 flex-col gap-3",
            Toast {
                kind,
                title,
                message,
                on_close: move |_| actions.clear_operation_status(),
            }
        }
    }
}

#[component]
pub fn LoadingOverlay() -> Element {
    let is_busy = use_app_state().read().is_busy;

    if !is_busy {
        return rsx! { Fragment {} };
    }

    rsx! {
        div { class: "fixed inset-0 z-40 flex items-center justify-center bg-slate-900/40",
            div { class: "flex flex-col items-center gap-3 rounded-lg bg-white px-8 py-6 shadow-xl dark:bg-slate-800",
                div { class: "h-10 w-10 animate-spin rounded-full border-4 border-blue-200 border-t-blue-600" }
                p { class: "text-sm font-medium text-slate-700 dark:text-slate-200", "Processing with AI..." }
            }
        }
    }
}
