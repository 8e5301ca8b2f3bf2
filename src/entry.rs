//! Transaction entry form core. This is the one stateful workflow in
//! the app: a tagged create/edit form that normalizes amounts, tracks
//! kind-dependent fields, and builds the request payload. It is kept
//! free of any DOM or network concern so the rules can be tested
//! directly; the overlay in `views::transactions` drives it.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::models::{
    Account, Category, CategoryKind, Transaction, TransactionCreate, TransactionKind,
    TransactionUpdate,
};

const FALLBACK_CURRENCY: &str = "RUB";

/// Create mode keeps the kind switchable; edit mode locks it to the
/// transaction being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Create,
    Edit { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("enter a valid amount")]
    AmountNotANumber,
    #[error("amount must be greater than zero")]
    AmountNotPositive,
    #[error("select an account")]
    MissingAccount,
    #[error("select a destination account")]
    MissingDestination,
}

/// The request a submit resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPayload {
    Create(TransactionCreate),
    Update { id: i64, changes: TransactionUpdate },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    mode: EntryMode,
    kind: TransactionKind,
    pub amount: String,
    pub description: String,
    pub account_from: Option<i64>,
    pub account_to: Option<i64>,
    pub category_id: Option<i64>,
}

impl EntryForm {
    /// Fresh create form: expense, empty fields, first account
    /// preselected on both sides, first expense category preselected.
    pub fn create(accounts: &[Account], expense_categories: &[Category]) -> Self {
        let first_account = accounts.first().map(|a| a.id);
        EntryForm {
            mode: EntryMode::Create,
            kind: TransactionKind::Expense,
            amount: String::new(),
            description: String::new(),
            account_from: first_account,
            account_to: first_account,
            category_id: expense_categories.first().map(|c| c.id),
        }
    }

    /// Seed every field from an existing transaction. The kind is
    /// copied and stays locked for the lifetime of the form.
    pub fn edit(tx: &Transaction) -> Self {
        EntryForm {
            mode: EntryMode::Edit { id: tx.id },
            kind: tx.kind,
            amount: minor_to_amount_input(tx.amount_minor),
            description: tx.description.clone().unwrap_or_default(),
            account_from: Some(tx.account_id),
            account_to: Some(tx.account_id),
            category_id: tx.category_id,
        }
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EntryMode::Edit { .. })
    }

    /// Which category list the form needs: income kinds take income
    /// categories, everything else works in the expense-category
    /// context (transfers hide the selector but keep the context).
    pub fn category_kind(&self) -> CategoryKind {
        match self.kind {
            TransactionKind::Income => CategoryKind::Income,
            TransactionKind::Expense | TransactionKind::Transfer => CategoryKind::Expense,
        }
    }

    /// Switch the kind while creating. No-op when editing. The selected
    /// category is always reset to the head of the new kind's list so a
    /// category id from the previous kind can never leak through.
    pub fn switch_kind(&mut self, kind: TransactionKind, categories: &[Category]) {
        if self.is_edit() {
            return;
        }
        self.kind = kind;
        self.category_id = categories.first().map(|c| c.id);
    }

    /// Normalize a user-typed amount to integer minor units. Accepts a
    /// comma as the decimal separator and requires a strictly positive
    /// value; the API never sees a zero, negative, or non-numeric
    /// amount.
    pub fn parse_amount_minor(input: &str) -> Result<i64, EntryError> {
        let normalized = input.trim().replace(',', ".");
        let parsed: f64 = normalized
            .parse()
            .map_err(|_| EntryError::AmountNotANumber)?;
        if !parsed.is_finite() {
            return Err(EntryError::AmountNotANumber);
        }
        if parsed <= 0.0 {
            return Err(EntryError::AmountNotPositive);
        }
        Ok((parsed * 100.0).round() as i64)
    }

    /// Resolve the form into a request payload, or a validation error
    /// the caller must surface.
    pub fn build_payload(
        &self,
        accounts: &[Account],
        now: DateTime<Utc>,
    ) -> Result<EntryPayload, EntryError> {
        let amount_minor = Self::parse_amount_minor(&self.amount)?;
        let description = non_empty(&self.description);

        if let EntryMode::Edit { id } = self.mode {
            // Edits patch category, description and amount only; kind
            // and account are immutable after creation.
            return Ok(EntryPayload::Update {
                id,
                changes: TransactionUpdate {
                    category_id: self.category_id,
                    description,
                    amount_minor: Some(amount_minor),
                },
            });
        }

        let dt = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let payload = match self.kind {
            TransactionKind::Transfer => {
                let from = self.account_from.ok_or(EntryError::MissingAccount)?;
                let to = self.account_to.ok_or(EntryError::MissingDestination)?;
                TransactionCreate {
                    account_id: from,
                    to_account_id: Some(to),
                    category_id: None,
                    amount_minor,
                    currency: currency_of(accounts, from),
                    dt,
                    description,
                    kind: TransactionKind::Transfer,
                }
            }
            kind => {
                // Expenses draw from the source account, income lands
                // on the destination account.
                let account_id = match kind {
                    TransactionKind::Income => self.account_to,
                    _ => self.account_from,
                }
                .ok_or(EntryError::MissingAccount)?;
                TransactionCreate {
                    account_id,
                    to_account_id: None,
                    category_id: self.category_id,
                    amount_minor,
                    currency: currency_of(accounts, account_id),
                    dt,
                    description,
                    kind,
                }
            }
        };
        Ok(EntryPayload::Create(payload))
    }
}

fn currency_of(accounts: &[Account], account_id: i64) -> String {
    accounts
        .iter()
        .find(|a| a.id == account_id)
        .map(|a| a.currency.clone())
        .unwrap_or_else(|| FALLBACK_CURRENCY.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Render a stored magnitude back into the amount field: whole values
/// without a fraction, everything else with two decimals.
fn minor_to_amount_input(amount_minor: i64) -> String {
    let minor = amount_minor.abs();
    if minor % 100 == 0 {
        format!("{}", minor / 100)
    } else {
        format!("{}.{:02}", minor / 100, minor % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;
    use chrono::TimeZone;

    fn account(id: i64, currency: &str) -> Account {
        Account {
            id,
            name: format!("Account {}", id),
            account_type: AccountType::Card,
            currency: currency.to_string(),
            is_active: true,
            card_number: None,
            created_at: None,
        }
    }

    fn category(id: i64, kind: CategoryKind) -> Category {
        Category {
            id,
            name: format!("Category {}", id),
            kind,
            parent_id: None,
            is_active: true,
        }
    }

    fn tx(id: i64, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            account_id: 1,
            category_id: Some(7),
            amount_minor: 12345,
            currency: "RUB".to_string(),
            dt: "2024-03-01T10:00:00Z".to_string(),
            description: Some("lunch".to_string()),
            kind,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_dot_and_comma_decimals() {
        assert_eq!(EntryForm::parse_amount_minor("123.45"), Ok(12345));
        assert_eq!(EntryForm::parse_amount_minor("123,45"), Ok(12345));
        assert_eq!(EntryForm::parse_amount_minor("50"), Ok(5000));
        assert_eq!(EntryForm::parse_amount_minor(" 0.01 "), Ok(1));
    }

    #[test]
    fn rejects_zero_negative_and_garbage_amounts() {
        assert_eq!(
            EntryForm::parse_amount_minor("0"),
            Err(EntryError::AmountNotPositive)
        );
        assert_eq!(
            EntryForm::parse_amount_minor("-5"),
            Err(EntryError::AmountNotPositive)
        );
        assert_eq!(
            EntryForm::parse_amount_minor("lunch"),
            Err(EntryError::AmountNotANumber)
        );
        assert_eq!(
            EntryForm::parse_amount_minor(""),
            Err(EntryError::AmountNotANumber)
        );
    }

    #[test]
    fn create_defaults_to_expense_with_first_account_and_category() {
        let accounts = vec![account(1, "RUB"), account(2, "USD")];
        let cats = vec![
            category(7, CategoryKind::Expense),
            category(8, CategoryKind::Expense),
        ];
        let form = EntryForm::create(&accounts, &cats);
        assert_eq!(form.kind(), TransactionKind::Expense);
        assert_eq!(form.account_from, Some(1));
        assert_eq!(form.account_to, Some(1));
        assert_eq!(form.category_id, Some(7));
        assert!(!form.is_edit());
    }

    #[test]
    fn expense_payload_matches_creation_contract() {
        let accounts = vec![account(1, "RUB")];
        let cats = vec![category(7, CategoryKind::Expense)];
        let mut form = EntryForm::create(&accounts, &cats);
        form.amount = "123.45".to_string();
        form.description = "lunch".to_string();

        let payload = form.build_payload(&accounts, fixed_now()).unwrap();
        let EntryPayload::Create(create) = payload else {
            panic!("expected a create payload");
        };
        assert_eq!(create.account_id, 1);
        assert_eq!(create.category_id, Some(7));
        assert_eq!(create.amount_minor, 12345);
        assert_eq!(create.currency, "RUB");
        assert_eq!(create.kind, TransactionKind::Expense);
        assert_eq!(create.description.as_deref(), Some("lunch"));
        assert_eq!(create.to_account_id, None);
        assert!(create.dt.starts_with("2024-03-01T12:00:00"));
    }

    #[test]
    fn income_uses_destination_account() {
        let accounts = vec![account(1, "RUB"), account(2, "USD")];
        let mut form = EntryForm::create(&accounts, &[]);
        form.switch_kind(
            TransactionKind::Income,
            &[category(3, CategoryKind::Income)],
        );
        form.amount = "10".to_string();
        form.account_to = Some(2);

        let EntryPayload::Create(create) = form.build_payload(&accounts, fixed_now()).unwrap()
        else {
            panic!("expected a create payload");
        };
        assert_eq!(create.account_id, 2);
        assert_eq!(create.currency, "USD");
        assert_eq!(create.kind, TransactionKind::Income);
        assert_eq!(create.category_id, Some(3));
    }

    #[test]
    fn transfer_payload_requires_both_accounts() {
        let accounts = vec![account(1, "RUB"), account(2, "RUB")];
        let mut form = EntryForm::create(&accounts, &[]);
        form.switch_kind(TransactionKind::Transfer, &[]);
        form.amount = "50".to_string();
        form.account_from = Some(1);
        form.account_to = Some(2);

        let EntryPayload::Create(create) = form.build_payload(&accounts, fixed_now()).unwrap()
        else {
            panic!("expected a create payload");
        };
        assert_eq!(create.account_id, 1);
        assert_eq!(create.to_account_id, Some(2));
        assert_eq!(create.category_id, None);
        assert_eq!(create.amount_minor, 5000);
        assert_eq!(create.kind, TransactionKind::Transfer);

        form.account_to = None;
        assert_eq!(
            form.build_payload(&accounts, fixed_now()),
            Err(EntryError::MissingDestination)
        );
    }

    #[test]
    fn missing_account_blocks_submission_with_an_error() {
        let mut form = EntryForm::create(&[], &[]);
        form.amount = "5".to_string();
        assert_eq!(
            form.build_payload(&[], fixed_now()),
            Err(EntryError::MissingAccount)
        );
    }

    #[test]
    fn switch_kind_resets_category_to_head_of_new_list() {
        let accounts = vec![account(1, "RUB")];
        let expense_cats = vec![category(7, CategoryKind::Expense)];
        let income_cats = vec![
            category(20, CategoryKind::Income),
            category(21, CategoryKind::Income),
        ];
        let mut form = EntryForm::create(&accounts, &expense_cats);
        assert_eq!(form.category_id, Some(7));

        form.switch_kind(TransactionKind::Income, &income_cats);
        assert_eq!(form.category_id, Some(20));

        form.switch_kind(TransactionKind::Transfer, &[]);
        assert_eq!(form.category_id, None);
    }

    #[test]
    fn kind_is_locked_while_editing() {
        let mut form = EntryForm::edit(&tx(9, TransactionKind::Expense));
        form.switch_kind(
            TransactionKind::Income,
            &[category(3, CategoryKind::Income)],
        );
        assert_eq!(form.kind(), TransactionKind::Expense);
        assert_eq!(form.category_id, Some(7));
    }

    #[test]
    fn edit_seeds_fields_and_amount_rendering() {
        let form = EntryForm::edit(&tx(9, TransactionKind::Expense));
        assert_eq!(form.mode(), EntryMode::Edit { id: 9 });
        assert_eq!(form.amount, "123.45");
        assert_eq!(form.description, "lunch");
        assert_eq!(form.account_from, Some(1));

        let mut whole = tx(10, TransactionKind::Income);
        whole.amount_minor = 5000;
        assert_eq!(EntryForm::edit(&whole).amount, "50");
    }

    #[test]
    fn edit_payload_patches_without_kind_or_account() {
        let accounts = vec![account(1, "RUB")];
        let mut form = EntryForm::edit(&tx(9, TransactionKind::Expense));
        form.amount = "200".to_string();
        form.description = "dinner".to_string();
        form.category_id = Some(8);

        let EntryPayload::Update { id, changes } =
            form.build_payload(&accounts, fixed_now()).unwrap()
        else {
            panic!("expected an update payload");
        };
        assert_eq!(id, 9);
        assert_eq!(changes.category_id, Some(8));
        assert_eq!(changes.description.as_deref(), Some("dinner"));
        assert_eq!(changes.amount_minor, Some(20000));

        let json = serde_json::to_string(&changes).unwrap();
        assert!(!json.contains("kind"));
        assert!(!json.contains("account_id"));
    }

    #[test]
    fn invalid_amount_blocks_edit_submission_too() {
        let mut form = EntryForm::edit(&tx(9, TransactionKind::Income));
        form.amount = "-5".to_string();
        assert_eq!(
            form.build_payload(&[], fixed_now()),
            Err(EntryError::AmountNotPositive)
        );
    }

    #[test]
    fn category_context_follows_kind() {
        let accounts = vec![account(1, "RUB")];
        let mut form = EntryForm::create(&accounts, &[]);
        assert_eq!(form.category_kind(), CategoryKind::Expense);
        form.switch_kind(TransactionKind::Income, &[]);
        assert_eq!(form.category_kind(), CategoryKind::Income);
        form.switch_kind(TransactionKind::Transfer, &[]);
        assert_eq!(form.category_kind(), CategoryKind::Expense);
    }

    #[test]
    fn unknown_account_falls_back_to_default_currency() {
        let mut form = EntryForm::create(&[], &[]);
        form.amount = "1".to_string();
        form.account_from = Some(42);
        let EntryPayload::Create(create) = form.build_payload(&[], fixed_now()).unwrap() else {
            panic!("expected a create payload");
        };
        assert_eq!(create.currency, "RUB");
    }
}
