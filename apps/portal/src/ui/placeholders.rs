use dioxus::prelude::*;

#[component]
fn PlaceholderView(title: &'static str, subtitle: &'static str, body: &'static str) -> Element {
    rsx! {
        div { class: "space-y-6",
            div {
                h2 { class: "text-2xl font-bold text-slate-900 dark:text-white", "{title}" }
                p { class: "mt-1 text-slate-600 dark:text-slate-400", "{subtitle}" }
            }
            div { class: "flex min-h-[400px] items-center justify-center rounded-lg bg-white p-6 shadow-md dark:bg-slate-800",
                p { class: "text-slate-500 dark:text-slate-400", "{body}" }
            }
        }
    }
}

#[component]
pub fn ReportsView() -> Element {
    rsx! {
        PlaceholderView {
            title: "📄 Advanced Reporting Suite",
            subtitle: "Custom reports with AI insights and automated scheduling",
            body: "Report generation options will be available here.",
        }
    }
}

#[component]
pub fn ComplianceView() -> Element {
    rsx! {
        PlaceholderView {
            title: "🛡️ Compliance & Risk Management",
            subtitle: "Regulatory compliance monitoring and audit trails",
            body: "Compliance dashboards and audit logs will be available here.",
        }
    }
}

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        PlaceholderView {
            title: "Page not found",
            subtitle: "The address you followed does not match any view.",
            body: "Nothing lives at this address.",
        }
        p { class: "mt-2 text-center text-xs text-slate-400", "{path}" }
    }
}
