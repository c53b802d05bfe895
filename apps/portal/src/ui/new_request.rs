use dioxus::prelude::*;

use crate::hooks::assistant::use_objective_suggestion;
use crate::hooks::requests::use_request_submission;
use crate::models::{ProductLine, RequestType};
use crate::reference::PRODUCTS;
use crate::services::intake::{parse_units, Field, RequestDraft};
use crate::state::{use_app_actions, use_app_state};

const FORM_CONTEXT: &str = "New Request";

const INPUT_BASE: &str =
    "w-full rounded-lg border px-3 py-2 transition-colors focus:ring-2 dark:bg-slate-700 dark:text-white";

fn input_classes(error: &str) -> String {
    let tone = if !error.is_empty() {
        "border-red-500 focus:ring-red-500"
    } else {
        "border-slate-300 focus:ring-blue-500 dark:border-slate-600"
    };
    format!("{INPUT_BASE} {tone}")
}

#[component]
pub fn NewRequestView() -> Element {
    let actions = use_app_actions();
    let current_user = use_app_state().read().current_user.clone();
    let submission = use_request_submission();
    let suggestion = use_objective_suggestion();

    let mut draft = use_signal(RequestDraft::default);
    let mut touched = use_signal(|| false);

    let snapshot = draft.read().clone();
    let errors = if *touched.read() {
        snapshot.validate()
    } else {
        Default::default()
    };
    let is_valid = snapshot.is_valid();
    let is_submitting = submission.is_submitting();
    let is_suggesting = *suggestion.is_suggesting.read();
    let dsm_name = current_user
        .as_ref()
        .map(|user| user.user_name.clone())
        .unwrap_or_default();
    let line_value = snapshot.line.map(ProductLine::label).unwrap_or_default();
    let type_value = snapshot.request_type.map(RequestType::label).unwrap_or_default();
    let error_for = |field: Field| errors.get(&field).copied().unwrap_or_default();

    let mut edit = move |apply: &dyn Fn(&mut RequestDraft)| {
        apply(&mut draft.write());
        touched.set(true);
    };

    let on_submit = {
        let current_user = current_user.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            touched.set(true);

            let Some(user) = current_user.as_ref() else {
                actions.set_operation_error(
                    FORM_CONTEXT,
                    "User not found. Please log in again.".to_string(),
                );
                return;
            };

            match draft.read().to_new_request(user) {
                Ok(request) => submission.submit(request),
                Err(err) => {
                    tracing::warn!(%err, "request form rejected");
                    actions.set_operation_error(
                        FORM_CONTEXT,
                        "Please fill out the form correctly before submitting.".to_string(),
                    );
                }
            }
        }
    };

    let on_suggest = move |_: MouseEvent| {
        let (request_type, line) = {
            let current = draft.read();
            (current.request_type, current.line)
        };
        suggestion.suggest(request_type, line, move |text| {
            draft.write().objectives = text;
            touched.set(true);
        });
    };

    rsx! {
        div { class: "mx-auto max-w-4xl",
            div { class: "rounded-lg bg-white shadow-xl dark:bg-slate-800",
                div { class: "border-b px-6 py-4 dark:border-slate-700",
                    h2 { class: "text-2xl font-bold text-slate-900 dark:text-white", "➕ Smart Request Submission" }
                    p { class: "mt-1 text-slate-600 dark:text-slate-400", "AI-assisted form with intelligent suggestions and validation" }
                }
                form { class: "space-y-8 p-6", onsubmit: on_submit,
                    FormSection { title: "📋 Basic Information",
                        div { class: "grid grid-cols-1 gap-6 md:grid-cols-2",
                            FieldShell { label: "Request Date", error: error_for(Field::RequestDate),
                                input {
                                    r#type: "date",
                                    class: input_classes(error_for(Field::RequestDate)),
                                    value: "{snapshot.request_date}",
                                    oninput: move |evt| edit(&|d| d.request_date = evt.value()),
                                }
                            }
                            FieldShell { label: "DSM Name",
                                input {
                                    r#type: "text",
                                    class: input_classes(""),
                                    readonly: true,
                                    value: "{dsm_name}",
                                }
                            }
                            FieldShell { label: "Product Line", error: error_for(Field::Line),
                                select {
                                    class: input_classes(error_for(Field::Line)),
                                    value: line_value,
                                    onchange: move |evt| edit(&|d| d.line = ProductLine::from_label(&evt.value())),
                                    option { value: "", "Select..." }
                                    for line in ProductLine::ALL {
                                        option { key: "{line.label()}", value: line.label(), "{line.label()}" }
                                    }
                                }
                            }
                            FieldShell { label: "Request Type", error: error_for(Field::RequestType),
                                select {
                                    class: input_classes(error_for(Field::RequestType)),
                                    value: type_value,
                                    onchange: move |evt| edit(&|d| d.request_type = RequestType::from_label(&evt.value())),
                                    option { value: "", "Select..." }
                                    for kind in RequestType::ALL {
                                        option { key: "{kind.label()}", value: kind.label(), "{kind.label()}" }
                                    }
                                }
                            }
                        }
                    }

                    FormSection { title: "💰 Financial Information",
                        div { class: "grid grid-cols-1 gap-6 md:grid-cols-2",
                            FieldShell { label: "Estimated Cost (EGP)", error: error_for(Field::EstimatedCost),
                                input {
                                    r#type: "number",
                                    class: input_classes(error_for(Field::EstimatedCost)),
                                    placeholder: "0.00",
                                    value: "{snapshot.estimated_cost}",
                                    oninput: move |evt| edit(&|d| d.estimated_cost = evt.value()),
                                }
                            }
                        }
                    }

                    FormSection { title: "🏥 Products & Pharmacies",
                        for (index, product) in snapshot.products.iter().cloned().enumerate() {
                            div { key: "{index}", class: "relative mb-4 rounded-lg border bg-slate-50 p-4 dark:border-slate-600 dark:bg-slate-700/50",
                                div { class: "mb-3 flex items-center justify-between",
                                    h4 { class: "font-medium text-slate-900 dark:text-white", "Product {index + 1}" }
                                    if snapshot.products.len() > 1 {
                                        button {
                                            r#type: "button",
                                            class: "text-sm text-red-500 hover:text-red-700",
                                            onclick: move |_| edit(&|d| d.remove_product(index)),
                                            "Remove"
                                        }
                                    }
                                }
                                div { class: "grid grid-cols-1 gap-4 md:grid-cols-2",
                                    FieldShell { label: "Select Product", error: error_for(Field::ProductId(index)),
                                        select {
                                            class: input_classes(error_for(Field::ProductId(index))),
                                            value: "{product.product_id}",
                                            onchange: move |evt| edit(&|d| {
                                                if let Some(row) = d.products.get_mut(index) {
                                                    row.product_id = evt.value();
                                                }
                                            }),
                                            option { value: "", "Select..." }
                                            for item in PRODUCTS.iter() {
                                                option { key: "{item.product_id}", value: "{item.product_id}", "{item.product_name}" }
                                            }
                                        }
                                    }
                                    FieldShell { label: "Target Units", error: error_for(Field::Units(index)),
                                        input {
                                            r#type: "number",
                                            class: input_classes(error_for(Field::Units(index))),
                                            placeholder: "0",
                                            value: units_value(product.units),
                                            oninput: move |evt| edit(&|d| {
                                                if let Some(row) = d.products.get_mut(index) {
                                                    row.units = parse_units(&evt.value());
                                                }
                                            }),
                                        }
                                    }
                                }
                            }
                        }
                        button {
                            r#type: "button",
                            class: "font-medium text-blue-600 hover:text-blue-800 dark:text-blue-400",
                            onclick: move |_| edit(&|d| d.add_product()),
                            "+ Add Another Product"
                        }
                    }

                    FormSection { title: "📝 Activity Details (AI-Assisted)",
                        FieldShell { label: "Activity Objectives", error: error_for(Field::Objectives),
                            textarea {
                                id: "activity-objectives",
                                rows: "4",
                                class: input_classes(error_for(Field::Objectives)),
                                placeholder: "Describe the objectives and expected outcomes...",
                                value: "{snapshot.objectives}",
                                oninput: move |evt| edit(&|d| d.objectives = evt.value()),
                            }
                        }
                        div { class: "mt-2",
                            button {
                                r#type: "button",
                                class: "inline-flex items-center gap-2 rounded-md bg-blue-600 px-4 py-2 text-sm font-medium text-white shadow-sm hover:bg-blue-700 disabled:cursor-wait disabled:opacity-50",
                                disabled: is_suggesting,
                                onclick: on_suggest,
                                if is_suggesting {
                                    span { class: "h-4 w-4 animate-spin rounded-full border-2 border-white border-t-transparent" }
                                    span { "Generating..." }
                                } else {
                                    "🤖 AI Suggestion"
                                }
                            }
                        }
                    }

                    div { class: "flex justify-end border-t pt-6 dark:border-slate-700",
                        button {
                            r#type: "submit",
                            class: "inline-flex items-center justify-center gap-3 rounded-lg bg-blue-600 px-6 py-3 font-medium text-white transition hover:-translate-y-0.5 hover:bg-blue-700 disabled:transform-none disabled:cursor-not-allowed disabled:bg-slate-400",
                            disabled: !is_valid || is_submitting,
                            if is_submitting {
                                span { class: "h-5 w-5 animate-spin rounded-full border-2 border-white border-t-transparent" }
                                "Submitting..."
                            } else {
                                "🚀 Submit Request"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn units_value(units: u32) -> String {
    if units > 0 {
        units.to_string()
    } else {
        String::new()
    }
}

#[component]
fn FormSection(title: &'static str, children: Element) -> Element {
    rsx! {
        div { class: "border-l-4 border-blue-500 pl-6",
            h3 { class: "mb-4 text-lg font-medium text-slate-900 dark:text-white", "{title}" }
            {children}
        }
    }
}

#[component]
fn FieldShell(label: &'static str, #[props(default)] error: &'static str, children: Element) -> Element {
    rsx! {
        div {
            label { class: "mb-2 block text-sm font-medium text-slate-700 dark:text-slate-300", "{label}" }
            {children}
            if !error.is_empty() {
                p { class: "mt-1 text-xs text-red-500", "{error}" }
            }
        }
    }
}
