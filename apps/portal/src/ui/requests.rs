use dioxus::prelude::*;

use crate::hooks::search::use_ai_search;
use crate::models::{
    format_cost, PharmacyAllocation, Request, RequestStatus, RiskLevel, WorkflowStage,
};
use crate::reference::{find_pharmacy, find_product, find_vendor};
use crate::state::{use_app_actions, use_app_state};

const TABLE_HEADERS: [&str; 9] = [
    "Request ID",
    "DSM",
    "Type",
    "Line",
    "Cost (EGP)",
    "Risk",
    "Status",
    "Stage",
    "Actions",
];

#[component]
pub fn RequestsView() -> Element {
    let actions = use_app_actions();
    let search = use_ai_search();
    let snapshot = use_app_state().read().clone();
    let mut expanded = use_signal(|| None::<String>);

    let displayed = snapshot.displayed_requests();
    let is_searching = snapshot.search.is_searching;
    let is_loading = snapshot.requests.is_loading;
    let status_value = snapshot.filters.status.map(RequestStatus::label).unwrap_or_default();
    let risk_value = snapshot.filters.risk.map(RiskLevel::id).unwrap_or_default();
    let query = snapshot.search.query.clone();
    let expanded_id = expanded.read().clone();

    rsx! {
        div { class: "space-y-6",
            div { class: "flex flex-col items-start justify-between gap-4 md:flex-row md:items-center",
                div {
                    h2 { class: "text-2xl font-bold text-slate-900 dark:text-white", "📋 Advanced Request Management" }
                    p { class: "mt-1 text-slate-600 dark:text-slate-400", "AI-powered request processing with smart insights" }
                }
                div { class: "flex w-full flex-col gap-2 md:w-auto md:flex-row",
                    select {
                        class: "w-full rounded-lg border border-slate-300 px-3 py-2 md:w-auto dark:border-slate-600 dark:bg-slate-700 dark:text-white",
                        value: status_value,
                        onchange: move |evt| actions.set_status_filter(RequestStatus::from_label(&evt.value())),
                        option { value: "", "All Status" }
                        for status in RequestStatus::ALL {
                            option { key: "{status.label()}", value: status.label(), "{status.label()}" }
                        }
                    }
                    select {
                        class: "w-full rounded-lg border border-slate-300 px-3 py-2 md:w-auto dark:border-slate-600 dark:bg-slate-700 dark:text-white",
                        value: risk_value,
                        onchange: move |evt| actions.set_risk_filter(RiskLevel::from_id(&evt.value())),
                        option { value: "", "All Risk Levels" }
                        for level in RiskLevel::ALL {
                            option { key: "{level.id()}", value: level.id(), "{level.label()} Risk" }
                        }
                    }
                }
            }

            div { class: "flex flex-col gap-2 sm:flex-row",
                input {
                    r#type: "text",
                    class: "w-full flex-grow rounded-lg border border-slate-300 px-3 py-2 dark:border-slate-600 dark:bg-slate-700 dark:text-white",
                    placeholder: "Ask AI to find requests... (e.g., approved marketing campaigns > 40k)",
                    value: "{query}",
                    oninput: move |evt| actions.set_search_query(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter {
                            search.run();
                        }
                    },
                }
                button {
                    class: "inline-flex items-center justify-center gap-2 rounded-lg bg-blue-600 px-4 py-2 font-medium text-white transition hover:bg-blue-700 disabled:cursor-wait disabled:bg-blue-400",
                    disabled: is_searching,
                    onclick: move |_| search.run(),
                    if is_searching {
                        span { class: "h-4 w-4 animate-spin rounded-full border-2 border-white border-t-transparent" }
                    } else {
                        "🤖"
                    }
                    span { "AI Search" }
                }
            }

            div { class: "overflow-hidden rounded-lg bg-white shadow-md dark:bg-slate-800",
                div { class: "overflow-x-auto",
                    table { class: "min-w-full divide-y divide-slate-200 dark:divide-slate-700",
                        thead { class: "bg-slate-50 dark:bg-slate-700",
                            tr {
                                for header in TABLE_HEADERS {
                                    th { key: "{header}", class: "px-6 py-3 text-left text-xs font-medium uppercase tracking-wider text-slate-500 dark:text-slate-300", "{header}" }
                                }
                            }
                        }
                        tbody { class: "divide-y divide-slate-200 bg-white dark:divide-slate-700 dark:bg-slate-800",
                            if is_searching {
                                tr {
                                    td { colspan: "9", class: "px-6 py-8 text-center text-slate-500 dark:text-slate-400",
                                        div { class: "flex items-center justify-center gap-2",
                                            span { class: "h-5 w-5 animate-spin rounded-full border-b-2 border-blue-500" }
                                            span { "🤖 Asking AI to find your requests..." }
                                        }
                                    }
                                }
                            } else if is_loading {
                                tr {
                                    td { colspan: "9", class: "px-6 py-8 text-center text-slate-500 dark:text-slate-400", "Loading requests..." }
                                }
                            } else if displayed.is_empty() {
                                tr {
                                    td { colspan: "9", class: "px-6 py-8 text-center text-slate-500 dark:text-slate-400", "No requests match your criteria." }
                                }
                            } else {
                                for request in displayed {
                                    RequestRow {
                                        key: "{request.id}",
                                        is_expanded: expanded_id.as_deref() == Some(request.id.as_str()),
                                        request: request.clone(),
                                        on_toggle: move |id: String| {
                                            let next = if expanded.peek().as_deref() == Some(id.as_str()) {
                                                None
                                            } else {
                                                Some(id)
                                            };
                                            expanded.set(next);
                                        },
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RequestRow(request: Request, is_expanded: bool, on_toggle: EventHandler<String>) -> Element {
    let cell = "whitespace-nowrap px-6 py-4 text-sm text-slate-500 dark:text-slate-300";
    let id = request.id.clone();

    rsx! {
        tr { class: "hover:bg-slate-50 dark:hover:bg-slate-700/50",
            td { class: "whitespace-nowrap px-6 py-4 text-sm font-medium text-blue-600 dark:text-blue-400", "{request.id}" }
            td { class: "whitespace-nowrap px-6 py-4 text-sm text-slate-900 dark:text-slate-200", "{request.dsm_name}" }
            td { class: cell, "{request.request_type.label()}" }
            td { class: cell, "{request.line.label()}" }
            td { class: cell, "{format_cost(request.estimated_cost)}" }
            td { class: cell, RiskIndicator { level: request.risk_level() } }
            td { class: "whitespace-nowrap px-6 py-4", StatusBadge { status: request.status } }
            td { class: cell, "{request.current_stage.label()}" }
            td { class: "whitespace-nowrap px-6 py-4 text-sm font-medium",
                button {
                    class: "text-blue-600 hover:text-blue-800 dark:text-blue-400 dark:hover:text-blue-300",
                    onclick: move |_| on_toggle.call(id.clone()),
                    if is_expanded { "Hide" } else { "View" }
                }
            }
        }
        if is_expanded {
            tr { class: "bg-slate-50 dark:bg-slate-900/40",
                td { colspan: "9", class: "px-6 py-4",
                    RequestDetail { request: request.clone() }
                }
            }
        }
    }
}

#[component]
fn RequestDetail(request: Request) -> Element {
    let step = request.current_stage.step();
    let total_steps = WorkflowStage::ALL.len();

    rsx! {
        div { class: "grid grid-cols-1 gap-4 text-sm text-slate-600 md:grid-cols-3 dark:text-slate-300",
            div { class: "space-y-1",
                h4 { class: "font-semibold text-slate-800 dark:text-white", "Workflow" }
                p { "Stage {step} of {total_steps}: {request.current_stage.label()}" }
                p { "Compliance: {request.compliance_status.label()}" }
                p { "Requested on {request.request_date}" }
            }
            div { class: "space-y-1 md:col-span-2",
                h4 { class: "font-semibold text-slate-800 dark:text-white", "Activity Objectives" }
                p { "{request.activity_objectives}" }
            }
            div { class: "space-y-2 md:col-span-3",
                h4 { class: "font-semibold text-slate-800 dark:text-white", "Products" }
                if request.products.is_empty() {
                    p { class: "italic text-slate-400", "No products listed." }
                }
                for (idx, product) in request.products.iter().enumerate() {
                    div { key: "{idx}", class: "rounded border border-slate-200 p-2 dark:border-slate-700",
                        p { class: "font-medium",
                            {find_product(&product.product_id).map(|p| p.product_name.clone()).unwrap_or_else(|| product.product_id.clone())}
                            " · {product.units} units"
                        }
                        for allocation in product.pharmacies.iter() {
                            p { key: "{allocation.pharmacy_id}", class: "pl-3 text-xs text-slate-500",
                                {allocation_summary(allocation)}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn allocation_summary(allocation: &PharmacyAllocation) -> String {
    let pharmacy = find_pharmacy(&allocation.pharmacy_id)
        .map(|pharmacy| pharmacy.pharmacy_name.as_str())
        .unwrap_or(allocation.pharmacy_id.as_str());
    let vendors: Vec<&str> = allocation
        .vendors
        .iter()
        .map(|id| {
            find_vendor(id)
                .map(|vendor| vendor.vendor_name.as_str())
                .unwrap_or(id.as_str())
        })
        .collect();

    if vendors.is_empty() {
        format!("{pharmacy}: {} units", allocation.units)
    } else {
        format!("{pharmacy}: {} units via {}", allocation.units, vendors.join(", "))
    }
}

#[component]
fn RiskIndicator(level: RiskLevel) -> Element {
    rsx! {
        div { class: "flex items-center",
            span { class: format!("mr-2 inline-block h-3 w-3 rounded-full {}", level.dot_class()) }
            span { "{level.label()}" }
        }
    }
}

#[component]
fn StatusBadge(status: RequestStatus) -> Element {
    rsx! {
        span { class: format!("inline-flex rounded-full px-2 text-xs font-semibold leading-5 {}", status.badge_classes()),
            "{status.label()}"
        }
    }
}
