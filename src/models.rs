use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Card,
    Cash,
    Brokerage,
}

impl AccountType {
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Card => "CARD",
            AccountType::Cash => "CASH",
            AccountType::Brokerage => "BROKERAGE",
        }
    }

    pub fn all() -> &'static [AccountType] {
        &[AccountType::Card, AccountType::Cash, AccountType::Brokerage]
    }

    pub fn from_value(value: &str) -> AccountType {
        match value {
            "cash" => AccountType::Cash,
            "brokerage" => AccountType::Brokerage,
            _ => AccountType::Card,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            AccountType::Card => "card",
            AccountType::Cash => "cash",
            AccountType::Brokerage => "brokerage",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub currency: String,
    pub is_active: bool,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub currency: String,
    pub card_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub currency: String,
    pub card_number: Option<String>,
    pub is_active: bool,
}

/// Server-derived, read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountBalance {
    pub account_id: i64,
    pub balance_minor: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn value(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Income => "INCOME",
            CategoryKind::Expense => "EXPENSE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Discriminator carrying the sign of a transaction. `amount_minor` is
/// always a non-negative magnitude on the wire; display sign is derived
/// from the kind, never from the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
            TransactionKind::Transfer => "TRANSFER",
        }
    }

    pub fn all() -> &'static [TransactionKind] {
        &[
            TransactionKind::Expense,
            TransactionKind::Income,
            TransactionKind::Transfer,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub amount_minor: i64,
    pub currency: String,
    pub dt: String,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionCreate {
    pub account_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<i64>,
    pub category_id: Option<i64>,
    pub amount_minor: i64,
    pub currency: String,
    pub dt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: TransactionKind,
}

/// Only these three fields are editable after creation. Kind and the
/// account are fixed once the transaction exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_minor: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    pub fn value(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "DAY",
            Period::Week => "WEEK",
            Period::Month => "MONTH",
            Period::Quarter => "QUARTER",
            Period::Year => "YEAR",
        }
    }

    pub fn all() -> &'static [Period] {
        &[
            Period::Day,
            Period::Week,
            Period::Month,
            Period::Quarter,
            Period::Year,
        ]
    }

    pub fn from_value(value: &str) -> Period {
        match value {
            "day" => Period::Day,
            "week" => Period::Week,
            "quarter" => Period::Quarter,
            "year" => Period::Year,
            _ => Period::Month,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub period: Period,
    pub date_from: String,
    pub date_to: String,
    pub net_flow_minor: i64,
    pub income_minor: i64,
    pub expense_minor: i64,
    pub accounts_balance_minor: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub income_minor: i64,
    pub expense_minor: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardTrends {
    pub period: Period,
    pub date_from: String,
    pub date_to: String,
    pub points: Vec<TrendPoint>,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardCategoryItem {
    pub category_id: i64,
    pub name: String,
    pub amount_minor: i64,
    /// 0.27 == 27% of the period's expenses.
    pub share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardCategories {
    pub period: Period,
    pub date_from: String,
    pub date_to: String,
    pub total_expense_minor: i64,
    pub currency: String,
    pub categories: Vec<DashboardCategoryItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Expense).unwrap(),
            "\"expense\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Transfer).unwrap(),
            "\"transfer\""
        );
        assert_eq!(serde_json::to_string(&Period::Month).unwrap(), "\"month\"");
    }

    #[test]
    fn empty_transaction_update_serializes_to_empty_object() {
        let update = TransactionUpdate::default();
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
    }

    #[test]
    fn transaction_update_never_carries_kind_or_account() {
        let update = TransactionUpdate {
            category_id: Some(7),
            description: Some("lunch".to_string()),
            amount_minor: Some(12345),
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(!json.contains("kind"));
        assert!(!json.contains("account_id"));
        assert!(json.contains("\"category_id\":7"));
        assert!(json.contains("\"amount_minor\":12345"));
    }

    #[test]
    fn expense_create_has_no_transfer_fields() {
        let create = TransactionCreate {
            account_id: 1,
            to_account_id: None,
            category_id: Some(7),
            amount_minor: 12345,
            currency: "RUB".to_string(),
            dt: "2024-03-01T12:00:00Z".to_string(),
            description: Some("lunch".to_string()),
            kind: TransactionKind::Expense,
        };
        let json = serde_json::to_string(&create).unwrap();
        assert!(!json.contains("to_account_id"));
        assert!(json.contains("\"kind\":\"expense\""));
    }

    #[test]
    fn transfer_create_carries_explicit_null_category() {
        let create = TransactionCreate {
            account_id: 1,
            to_account_id: Some(2),
            category_id: None,
            amount_minor: 5000,
            currency: "RUB".to_string(),
            dt: "2024-03-01T12:00:00Z".to_string(),
            description: None,
            kind: TransactionKind::Transfer,
        };
        let json = serde_json::to_string(&create).unwrap();
        assert!(json.contains("\"category_id\":null"));
        assert!(json.contains("\"to_account_id\":2"));
        assert!(!json.contains("description"));
    }

    #[test]
    fn category_kind_maps_wire_field_name() {
        let cat: Category = serde_json::from_str(
            r#"{"id":3,"name":"Groceries","type":"expense","parent_id":null,"is_active":true}"#,
        )
        .unwrap();
        assert_eq!(cat.kind, CategoryKind::Expense);
        let json = serde_json::to_string(&cat).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
    }
}
