use dioxus::prelude::*;

use crate::hooks::assistant::{use_chat, QUICK_QUESTIONS};
use crate::state::{use_app_actions, use_app_state, ChatSender};

const CHAT_END_ID: &str = "chat-end";
const CHAT_INPUT_ID: &str = "chat-input";

/// Floating assistant bubble with its conversation panel.
#[component]
pub fn ChatAssistant() -> Element {
    let actions = use_app_actions();
    let state = use_app_state();
    let chat = use_chat();
    let mut input = use_signal(String::new);

    let snapshot = state.read().chat.clone();
    let available = chat.available();
    let is_typing = snapshot.is_typing;
    let panel_visibility = if snapshot.is_open {
        "opacity-100"
    } else {
        "pointer-events-none opacity-0"
    };

    use_effect(move || {
        let (is_open, is_typing) = {
            let snapshot = state.read();
            (snapshot.chat.is_open, snapshot.chat.is_typing)
        };
        if is_open && !is_typing {
            reveal_latest_message();
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let text = input.read().clone();
        if text.trim().is_empty() {
            return;
        }
        input.set(String::new());
        chat.send(&text);
    };

    rsx! {
        div { class: "fixed bottom-5 right-5 z-50 flex flex-col items-end gap-3",
            div { class: format!("transition-all duration-300 {}", panel_visibility),
                div { class: "flex h-[500px] w-[350px] flex-col overflow-hidden rounded-2xl border border-slate-200 bg-white shadow-2xl dark:border-slate-700 dark:bg-slate-800",
                    div { class: "flex items-center justify-between rounded-t-2xl bg-blue-600 p-4 text-white",
                        h3 { class: "font-semibold", "🤖 Sato AI Assistant" }
                        button {
                            class: "text-blue-100 hover:text-white",
                            title: "Close",
                            onclick: move |_| actions.close_chat(),
                            "✕"
                        }
                    }
                    div { class: "flex-1 space-y-4 overflow-y-auto bg-slate-50 p-4 dark:bg-slate-900",
                        for (idx, message) in snapshot.messages.iter().enumerate() {
                            div {
                                key: "{idx}",
                                class: row_classes(message.sender),
                                if message.sender == ChatSender::Bot {
                                    BotAvatar {}
                                }
                                div { class: bubble_classes(message.sender),
                                    p { class: "text-sm", "{message.text}" }
                                }
                            }
                        }
                        if is_typing {
                            div { class: "flex items-start gap-2.5",
                                BotAvatar {}
                                div { class: "rounded-xl bg-white p-3 shadow-sm dark:bg-slate-700",
                                    div { class: "flex items-center gap-1",
                                        span { class: "h-2 w-2 animate-bounce rounded-full bg-slate-400 [animation-delay:-0.3s]" }
                                        span { class: "h-2 w-2 animate-bounce rounded-full bg-slate-400 [animation-delay:-0.15s]" }
                                        span { class: "h-2 w-2 animate-bounce rounded-full bg-slate-400" }
                                    }
                                }
                            }
                        }
                        div { id: CHAT_END_ID }
                    }
                    div { class: "border-t border-slate-200 p-4 dark:border-slate-700",
                        if !available {
                            p { class: "mb-2 text-xs text-amber-600", "The AI assistant is not configured for this deployment." }
                        }
                        div { class: "mb-2 flex flex-wrap gap-1",
                            for question in QUICK_QUESTIONS {
                                button {
                                    key: "{question}",
                                    class: "rounded bg-slate-200 px-2 py-1 text-xs text-slate-700 transition hover:bg-slate-300 disabled:opacity-50 dark:bg-slate-700 dark:text-slate-200 dark:hover:bg-slate-600",
                                    disabled: !available || is_typing,
                                    onclick: move |_| chat.send(question),
                                    "{question}"
                                }
                            }
                        }
                        form { class: "flex gap-2", onsubmit: on_submit,
                            input {
                                id: CHAT_INPUT_ID,
                                r#type: "text",
                                class: "flex-1 rounded-lg border border-slate-300 px-3 py-2 text-sm focus:ring-2 focus:ring-blue-500 dark:border-slate-600 dark:bg-slate-700 dark:text-white",
                                placeholder: "Ask me anything...",
                                disabled: !available || is_typing,
                                value: "{input}",
                                oninput: move |evt| input.set(evt.value()),
                            }
                            button {
                                r#type: "submit",
                                class: "rounded-lg bg-blue-600 px-4 py-2 text-sm font-semibold text-white hover:bg-blue-700 disabled:opacity-50",
                                disabled: !available || is_typing,
                                "Send"
                            }
                        }
                    }
                }
            }
            button {
                class: "flex h-16 w-16 items-center justify-center rounded-full bg-gradient-to-br from-blue-600 to-blue-500 text-2xl text-white shadow-lg transition-transform hover:scale-110",
                title: "Open assistant",
                onclick: move |_| actions.toggle_chat(),
                "💬"
            }
        }
    }
}

#[component]
fn BotAvatar() -> Element {
    rsx! {
        div { class: "flex h-8 w-8 flex-shrink-0 items-center justify-center rounded-full bg-blue-600 text-sm text-white", "🤖" }
    }
}

fn row_classes(sender: ChatSender) -> &'static str {
    match sender {
        ChatSender::User => "flex items-start justify-end gap-2.5",
        ChatSender::Bot => "flex items-start gap-2.5",
    }
}

fn bubble_classes(sender: ChatSender) -> &'static str {
    match sender {
        ChatSender::User => "max-w-xs rounded-xl bg-blue-500 p-3 text-white",
        ChatSender::Bot => "max-w-xs rounded-xl bg-white p-3 shadow-sm dark:bg-slate-700 dark:text-slate-200",
    }
}

/// Scrolls the transcript to its end and puts the cursor back in the input.
#[cfg(target_arch = "wasm32")]
fn reveal_latest_message() {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    if let Some(end) = document.get_element_by_id(CHAT_END_ID) {
        end.scroll_into_view();
    }

    if let Some(input) = document
        .get_element_by_id(CHAT_INPUT_ID)
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
    {
        if let Err(err) = input.focus() {
            tracing::debug!(?err, "chat input focus failed");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn reveal_latest_message() {}
