use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::{self, ApiError};
use crate::models::{DashboardCategories, DashboardSummary, DashboardTrends, Period};
use crate::utils::{format_minor, format_share, keep_if_current, today_iso, LoadGeneration};

const TOP_CATEGORIES_LIMIT: u32 = 5;
const DASHBOARD_CURRENCY: &str = "RUB";

/// One slot per aggregate source. `None` means the current load has
/// not resolved it yet; errors stay attributable to their source
/// instead of collapsing into one shared flag.
type Slot<T> = Option<Result<T, ApiError>>;

#[component]
pub fn DashboardView() -> Element {
    let mut period = use_signal(|| Period::Month);
    let mut base_date = use_signal(today_iso);

    // Parameter changes bump the generation; a task only stores its
    // result while its generation is still current. Stale responses
    // are discarded, never rendered.
    let mut generation = use_signal(LoadGeneration::default);
    let mut summary = use_signal(|| None as Slot<DashboardSummary>);
    let mut trends = use_signal(|| None as Slot<DashboardTrends>);
    let mut breakdown = use_signal(|| None as Slot<DashboardCategories>);

    use_effect(move || {
        let p = period();
        let d = base_date();

        let gen = generation.peek().next();
        generation.set(gen);
        summary.set(None);
        trends.set(None);
        breakdown.set(None);

        {
            let d = d.clone();
            spawn(async move {
                let result = api::dashboard::summary(p, &d, DASHBOARD_CURRENCY).await;
                if let Some(result) = keep_if_current(gen, *generation.peek(), result) {
                    summary.set(Some(result));
                }
            });
        }
        {
            let d = d.clone();
            spawn(async move {
                let result = api::dashboard::trends(p, &d, DASHBOARD_CURRENCY).await;
                if let Some(result) = keep_if_current(gen, *generation.peek(), result) {
                    trends.set(Some(result));
                }
            });
        }
        spawn(async move {
            let result =
                api::dashboard::categories(p, &d, TOP_CATEGORIES_LIMIT, DASHBOARD_CURRENCY).await;
            if let Some(result) = keep_if_current(gen, *generation.peek(), result) {
                breakdown.set(Some(result));
            }
        });
    });

    let loading = summary().is_none() || trends().is_none() || breakdown().is_none();

    let mut failures: Vec<String> = Vec::new();
    for (source, err) in [
        ("SUMMARY", summary().and_then(|r| r.err())),
        ("TRENDS", trends().and_then(|r| r.err())),
        ("CATEGORIES", breakdown().and_then(|r| r.err())),
    ] {
        if let Some(e) = err {
            tracing::warn!("dashboard {} fetch failed: {}", source, e);
            failures.push(format!("{}: {}", source, e));
        }
    }

    rsx! {
        div { class: "content-header",
            h1 { "DASHBOARD" }
            div { class: "flex gap-2 items-center",
                select {
                    value: "{period().value()}",
                    onchange: move |e| period.set(Period::from_value(&e.value())),
                    for p in Period::all() {
                        option { value: "{p.value()}", "{p.label()}" }
                    }
                }
                input {
                    r#type: "date",
                    value: "{base_date}",
                    onchange: move |e| base_date.set(e.value()),
                }
            }
        }

        for failure in failures.iter() {
            div { class: "error-message", "{failure}" }
        }

        if loading {
            div { class: "loading", "LOADING..." }
        } else if let (Some(Ok(s)), Some(Ok(t)), Some(Ok(c))) = (summary(), trends(), breakdown()) {
            {
                let max_trend = t
                    .points
                    .iter()
                    .map(|p| p.income_minor.max(p.expense_minor))
                    .max()
                    .unwrap_or(0);
                rsx! {
                    div { class: "period-range", "{s.date_from} — {s.date_to}" }

                    div { class: "kpi-grid",
                        div { class: "kpi-card",
                            div { class: "kpi-label", "NET FLOW" }
                            div { class: "kpi-value", "{format_minor(s.net_flow_minor, &s.currency)}" }
                        }
                        div { class: "kpi-card",
                            div { class: "kpi-label", "INCOME" }
                            div { class: "kpi-value income", "{format_minor(s.income_minor, &s.currency)}" }
                        }
                        div { class: "kpi-card",
                            div { class: "kpi-label", "EXPENSE" }
                            div { class: "kpi-value expense", "{format_minor(s.expense_minor, &s.currency)}" }
                        }
                        div { class: "kpi-card",
                            div { class: "kpi-label", "ACCOUNTS BALANCE" }
                            div { class: "kpi-value", "{format_minor(s.accounts_balance_minor, &s.currency)}" }
                        }
                    }

                    div { class: "dashboard-grid",
                        div { class: "dashboard-block",
                            h2 { "TREND" }
                            if t.points.is_empty() {
                                div { class: "empty-state", "NO DATA" }
                            } else {
                                div { class: "bar-chart",
                                    for point in t.points.iter() {
                                        {
                                            let income_pct = if max_trend > 0 {
                                                point.income_minor as f64 / max_trend as f64 * 100.0
                                            } else { 0.0 };
                                            let expense_pct = if max_trend > 0 {
                                                point.expense_minor as f64 / max_trend as f64 * 100.0
                                            } else { 0.0 };
                                            rsx! {
                                                div { class: "mb-2", key: "{point.label}",
                                                    div { class: "bar-label mb-1", "{point.label}" }
                                                    div { class: "bar-row",
                                                        span { class: "bar-label", "IN" }
                                                        div { class: "bar-track",
                                                            div { class: "bar-fill income", style: "width: {income_pct}%" }
                                                        }
                                                        span { class: "bar-value", "{format_minor(point.income_minor, &t.currency)}" }
                                                    }
                                                    div { class: "bar-row",
                                                        span { class: "bar-label", "OUT" }
                                                        div { class: "bar-track",
                                                            div { class: "bar-fill expense", style: "width: {expense_pct}%" }
                                                        }
                                                        span { class: "bar-value", "{format_minor(point.expense_minor, &t.currency)}" }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        div { class: "dashboard-block",
                            h2 { "TOP EXPENSE CATEGORIES" }
                            if c.categories.is_empty() {
                                div { class: "empty-state", "NO EXPENSES" }
                            } else {
                                div { class: "category-share-list",
                                    div { class: "share-total",
                                        "TOTAL {format_minor(c.total_expense_minor, &c.currency)}"
                                    }
                                    for item in c.categories.iter() {
                                        div { class: "bar-row", key: "{item.category_id}",
                                            span { class: "bar-label", "{item.name}" }
                                            div { class: "bar-track",
                                                div {
                                                    class: "bar-fill expense",
                                                    style: "width: {item.share * 100.0}%",
                                                }
                                            }
                                            span { class: "bar-value",
                                                "{format_minor(item.amount_minor, &c.currency)} ({format_share(item.share)})"
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
    }
}
