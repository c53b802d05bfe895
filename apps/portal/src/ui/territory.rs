use dioxus::prelude::*;

use crate::models::{Role, User};
use crate::reference::{direct_reports, users_with_role};
use crate::state::use_app_state;

#[component]
pub fn TerritoryView() -> Element {
    let state = use_app_state();
    let snapshot = state.read();
    let requests = &snapshot.requests.items;
    let count_for = |user_id: &str| {
        requests
            .iter()
            .filter(|request| request.dsm_id == user_id)
            .count()
    };

    let regions: Vec<(User, Vec<(User, usize)>)> = users_with_role(Role::Nsm)
        .map(|nsm| {
            let districts = direct_reports(&nsm.user_id)
                .into_iter()
                .map(|dsm| (dsm.clone(), count_for(&dsm.user_id)))
                .collect();
            (nsm.clone(), districts)
        })
        .collect();
    drop(snapshot);

    rsx! {
        div { class: "space-y-6",
            div {
                h2 { class: "text-2xl font-bold text-slate-900 dark:text-white", "🗺️ Territory Optimization & Performance" }
                p { class: "mt-1 text-slate-600 dark:text-slate-400", "AI-powered territory analysis and optimization recommendations" }
            }
            div { class: "grid grid-cols-1 gap-6 md:grid-cols-2",
                for (nsm, districts) in regions {
                    section { key: "{nsm.user_id}", class: "rounded-lg bg-white p-6 shadow-md dark:bg-slate-800",
                        header { class: "mb-4",
                            h3 { class: "text-lg font-semibold text-slate-900 dark:text-white",
                                {nsm.region.clone().unwrap_or_else(|| "Unassigned region".to_string())}
                            }
                            p { class: "text-xs text-slate-500 dark:text-slate-400", "National Sales Manager: {nsm.user_name}" }
                        }
                        if districts.is_empty() {
                            p { class: "text-sm italic text-slate-400", "No district managers assigned." }
                        }
                        ul { class: "divide-y divide-slate-200 dark:divide-slate-700",
                            for (dsm, count) in districts {
                                li { key: "{dsm.user_id}", class: "flex items-center justify-between py-2 text-sm",
                                    div {
                                        p { class: "font-medium text-slate-800 dark:text-slate-200", "{dsm.user_name}" }
                                        p { class: "text-xs text-slate-500 dark:text-slate-400",
                                            {dsm.territory.clone().unwrap_or_default()}
                                        }
                                    }
                                    span { class: "rounded-full bg-blue-100 px-2 py-1 text-xs font-medium text-blue-700 dark:bg-blue-900/50 dark:text-blue-300",
                                        "{count} requests"
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
