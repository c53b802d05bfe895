use dioxus::prelude::*;

use crate::models::{format_cost, ProductLine, RequestStatus, WorkflowStage};
use crate::services::analytics::RequestBreakdown;
use crate::state::use_app_state;

#[component]
pub fn AnalyticsView() -> Element {
    let requests = use_app_state().read().requests.items.clone();
    let breakdown = RequestBreakdown::from_requests(&requests);

    let count_of = |map_count: Option<&usize>| map_count.copied().unwrap_or(0);

    let status_rows: Vec<(String, usize)> = RequestStatus::ALL
        .into_iter()
        .map(|status| (status.label().to_string(), count_of(breakdown.by_status.get(&status))))
        .collect();
    let line_rows: Vec<(String, usize)> = ProductLine::ALL
        .into_iter()
        .map(|line| (line.label().to_string(), count_of(breakdown.by_line.get(&line))))
        .collect();
    let stage_rows: Vec<(String, usize)> = WorkflowStage::ALL
        .into_iter()
        .map(|stage| {
            (
                format!("{}. {}", stage.step(), stage.label()),
                count_of(breakdown.by_stage.get(&stage)),
            )
        })
        .collect();

    let total_cost = format_cost(breakdown.total_cost);
    let average_cost = format_cost(breakdown.average_cost());
    let count = breakdown.count();

    rsx! {
        div { class: "space-y-6",
            div {
                h2 { class: "text-2xl font-bold text-slate-900 dark:text-white", "📈 Advanced Analytics" }
                p { class: "mt-1 text-slate-600 dark:text-slate-400", "Request volume and spend across lines and workflow stages" }
            }
            div { class: "grid grid-cols-1 gap-6 md:grid-cols-3",
                SummaryTile { label: "Requests", value: count.to_string() }
                SummaryTile { label: "Total Estimated Cost (EGP)", value: total_cost }
                SummaryTile { label: "Average Cost (EGP)", value: average_cost }
            }
            div { class: "grid grid-cols-1 gap-6 lg:grid-cols-3",
                BreakdownCard { title: "By Status", rows: status_rows, breakdown: breakdown.clone() }
                BreakdownCard { title: "By Product Line", rows: line_rows, breakdown: breakdown.clone() }
                BreakdownCard { title: "By Workflow Stage", rows: stage_rows, breakdown }
            }
        }
    }
}

#[component]
fn SummaryTile(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "rounded-xl bg-white p-6 shadow-md dark:bg-slate-800",
            p { class: "text-sm font-medium text-slate-500 dark:text-slate-400", "{label}" }
            p { class: "mt-1 text-2xl font-bold text-slate-900 dark:text-white", "{value}" }
        }
    }
}

#[component]
fn BreakdownCard(
    title: &'static str,
    rows: Vec<(String, usize)>,
    breakdown: RequestBreakdown,
) -> Element {
    rsx! {
        section { class: "rounded-xl bg-white p-6 shadow-md dark:bg-slate-800",
            h3 { class: "mb-4 text-lg font-semibold text-slate-900 dark:text-white", "{title}" }
            ul { class: "space-y-3",
                for (label, value) in rows {
                    li { key: "{label}", class: "space-y-1",
                        div { class: "flex justify-between text-sm text-slate-600 dark:text-slate-300",
                            span { "{label}" }
                            span { class: "font-medium", "{value}" }
                        }
                        div { class: "h-2 rounded-full bg-slate-200 dark:bg-slate-700",
                            div { class: "h-2 rounded-full bg-blue-600", style: "width: {breakdown.share(value)}%" }
                        }
                    }
                }
            }
        }
    }
}
