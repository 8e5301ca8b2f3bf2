use super::{build_query, request, ApiError};
use crate::models::{DashboardCategories, DashboardSummary, DashboardTrends, Period};

fn period_query(period: Period, base_date: &str, currency: &str) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("period", Some(period.value().to_string())),
        ("base_date", Some(base_date.to_string())),
        ("currency", Some(currency.to_string())),
    ]
}

pub async fn summary(
    period: Period,
    base_date: &str,
    currency: &str,
) -> Result<DashboardSummary, ApiError> {
    let query = build_query(&period_query(period, base_date, currency));
    request("GET", &format!("/dashboard/summary{}", query), None).await
}

pub async fn trends(
    period: Period,
    base_date: &str,
    currency: &str,
) -> Result<DashboardTrends, ApiError> {
    let query = build_query(&period_query(period, base_date, currency));
    request("GET", &format!("/dashboard/trends{}", query), None).await
}

pub async fn categories(
    period: Period,
    base_date: &str,
    limit: u32,
    currency: &str,
) -> Result<DashboardCategories, ApiError> {
    let mut params = period_query(period, base_date, currency);
    params.push(("limit", Some(limit.to_string())));
    let query = build_query(&params);
    request("GET", &format!("/dashboard/categories{}", query), None).await
}
