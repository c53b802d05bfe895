use dioxus::prelude::*;

use crate::hooks::insights::use_insights_ready;
use crate::models::Request;
use crate::services::analytics::{
    DashboardMetrics, APPROVAL_TARGET_PERCENT, PROCESSING_SLA_DAYS, PROCESSING_TIME_DAYS,
};
use crate::state::use_app_state;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Accent {
    Blue,
    Green,
    Yellow,
    Purple,
}

impl Accent {
    fn classes(self) -> (&'static str, &'static str) {
        match self {
            Self::Blue => ("bg-blue-100 text-blue-600 dark:bg-blue-900/50 dark:text-blue-400", "bg-blue-600"),
            Self::Green => ("bg-green-100 text-green-600 dark:bg-green-900/50 dark:text-green-400", "bg-green-600"),
            Self::Yellow => ("bg-yellow-100 text-yellow-600 dark:bg-yellow-900/50 dark:text-yellow-400", "bg-yellow-600"),
            Self::Purple => ("bg-purple-100 text-purple-600 dark:bg-purple-900/50 dark:text-purple-400", "bg-purple-600"),
        }
    }
}

#[component]
pub fn DashboardView() -> Element {
    let requests = use_app_state().read().requests.items.clone();
    let metrics = DashboardMetrics::from_requests(&requests);
    let insights_ready = *use_insights_ready().read();

    rsx! {
        div { class: "space-y-8",
            div { class: "grid grid-cols-1 gap-6 md:grid-cols-2 lg:grid-cols-4",
                KpiCard {
                    title: "Total Requests",
                    value: metrics.total.to_string(),
                    note: "↗️ +12% vs last month",
                    icon: "📄",
                    accent: Accent::Blue,
                    progress: metrics.volume_progress(),
                }
                KpiCard {
                    title: "Approval Rate",
                    value: format!("{}%", metrics.approval_rate),
                    note: format!("🎯 Target: {APPROVAL_TARGET_PERCENT}%"),
                    icon: "✅",
                    accent: Accent::Green,
                    progress: metrics.approval_rate,
                }
                KpiCard {
                    title: "Avg Processing Time",
                    value: format!("{PROCESSING_TIME_DAYS}d"),
                    note: format!("⚠️ SLA: {PROCESSING_SLA_DAYS} days"),
                    icon: "⏱",
                    accent: Accent::Yellow,
                    progress: DashboardMetrics::processing_progress(),
                }
                KpiCard {
                    title: "Avg. Risk Score",
                    value: metrics.average_risk.to_string(),
                    note: metrics.risk_label(),
                    icon: "🛡",
                    accent: Accent::Purple,
                    progress: metrics.average_risk,
                }
            }

            div { class: "grid grid-cols-1 gap-6 lg:grid-cols-3",
                section { class: "rounded-xl bg-white p-6 shadow-md dark:bg-slate-800 lg:col-span-2",
                    h3 { class: "mb-4 text-lg font-semibold text-slate-900 dark:text-white", "🤖 AI-Powered Insights & Recommendations" }
                    div { class: "grid grid-cols-1 gap-6 md:grid-cols-3",
                        if insights_ready {
                            InsightCard {
                                title: "💡 Smart Recommendations",
                                tone: "bg-blue-50 text-blue-900 dark:bg-blue-900/30 dark:text-blue-200",
                                items: vec![
                                    "Focus on Cardiovascular line in Alexandria region",
                                    "Increase budget allocation for Q4 campaigns",
                                ],
                            }
                            InsightCard {
                                title: "📊 Pattern Detection",
                                tone: "bg-green-50 text-green-900 dark:bg-green-900/30 dark:text-green-200",
                                items: vec![
                                    "23% increase in diabetes-related requests",
                                    "Peak submission time: Tuesday 10-11 AM",
                                ],
                            }
                            InsightCard {
                                title: "⚠️ Risk Alerts",
                                tone: "bg-purple-50 text-purple-900 dark:bg-purple-900/30 dark:text-purple-200",
                                items: vec![
                                    "Budget overrun risk in Oncology line",
                                    "3 requests pending >7 days",
                                ],
                            }
                        } else {
                            for idx in 0..3 {
                                InsightSkeleton { key: "{idx}" }
                            }
                        }
                    }
                }
                section { class: "rounded-xl bg-white p-6 shadow-md dark:bg-slate-800",
                    h3 { class: "mb-4 text-lg font-semibold text-slate-900 dark:text-white", "📋 Recent Requests" }
                    div { class: "space-y-4",
                        if metrics.recent.is_empty() {
                            p { class: "py-4 text-center text-slate-500 dark:text-slate-400", "No recent requests." }
                        }
                        for request in metrics.recent.iter().cloned() {
                            RecentRequestItem { key: "{request.id}", request }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn KpiCard(
    title: &'static str,
    value: String,
    #[props(into)] note: String,
    icon: &'static str,
    accent: Accent,
    progress: u32,
) -> Element {
    let (badge, bar) = accent.classes();
    let width = progress.min(100);

    rsx! {
        div { class: "rounded-xl border-l-4 border-blue-500 bg-white p-6 shadow-md transition hover:-translate-y-1 hover:shadow-lg dark:bg-slate-800",
            div { class: "flex items-center justify-between",
                div {
                    p { class: "text-sm font-medium text-slate-600 dark:text-slate-400", "{title}" }
                    p { class: "text-3xl font-bold text-slate-900 dark:text-white", "{value}" }
                    p { class: "text-sm text-slate-500 dark:text-slate-300", "{note}" }
                }
                div { class: format!("rounded-full p-3 text-xl {}", badge), "{icon}" }
            }
            div { class: "mt-4 h-2 rounded-full bg-slate-200 dark:bg-slate-700",
                div { class: format!("h-2 rounded-full {}", bar), style: "width: {width}%" }
            }
        }
    }
}

#[component]
fn InsightCard(title: &'static str, tone: &'static str, items: Vec<&'static str>) -> Element {
    rsx! {
        div { class: format!("rounded-lg p-4 {}", tone),
            h4 { class: "mb-2 font-medium", "{title}" }
            ul { class: "space-y-1 text-sm",
                for item in items {
                    li { "• {item}" }
                }
            }
        }
    }
}

#[component]
fn InsightSkeleton() -> Element {
    rsx! {
        div { class: "animate-pulse rounded-lg bg-slate-50 p-4 dark:bg-slate-900/30",
            div { class: "mb-3 h-4 w-3/4 rounded bg-slate-300 dark:bg-slate-600" }
            div { class: "mb-2 h-3 w-full rounded bg-slate-300 dark:bg-slate-600" }
            div { class: "h-3 w-5/6 rounded bg-slate-300 dark:bg-slate-600" }
        }
    }
}

#[component]
fn RecentRequestItem(request: Request) -> Element {
    let badge = request.status.badge_classes();
    let created = request.created_at.date();

    rsx! {
        div { class: "border-b border-slate-200 pb-3 last:border-0 last:pb-0 dark:border-slate-700",
            div { class: "flex items-start justify-between",
                div {
                    p { class: "font-semibold text-blue-600 dark:text-blue-400", "{request.id}" }
                    p { class: "text-sm text-slate-700 dark:text-slate-200", "{request.dsm_name}" }
                    p { class: "text-xs text-slate-500 dark:text-slate-400", "{request.request_type.label()}" }
                }
                div { class: "text-right",
                    span { class: format!("rounded-full px-2 py-1 text-xs font-medium {}", badge), "{request.status.label()}" }
                    p { class: "mt-1 text-xs text-slate-500 dark:text-slate-400", "{created}" }
                }
            }
        }
    }
}
