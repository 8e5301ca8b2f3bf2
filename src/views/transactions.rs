use chrono::Utc;
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api::{self, ApiError};
use crate::components::{ConfirmDeleteOverlay, Overlay};
use crate::entry::{EntryForm, EntryPayload};
use crate::models::{Account, Category, CategoryKind, Transaction, TransactionKind};
use crate::utils::{
    amount_class, format_dt, format_minor, keep_if_current, signed_amount, LoadGeneration,
};

type Slot<T> = Option<Result<T, ApiError>>;

/// Outcome of a delete applied to the loaded list: success removes the
/// one row, failure keeps every row and reports the error.
fn apply_delete(
    items: Vec<Transaction>,
    id: i64,
    result: Result<(), ApiError>,
) -> (Vec<Transaction>, Option<String>) {
    match result {
        Ok(()) => (items.into_iter().filter(|t| t.id != id).collect(), None),
        Err(e) => (items, Some(e.to_string())),
    }
}

#[component]
pub fn TransactionsView() -> Element {
    let mut generation = use_signal(LoadGeneration::default);
    let mut txs = use_signal(|| None as Slot<Vec<Transaction>>);
    let mut accounts = use_signal(|| None as Slot<Vec<Account>>);
    let mut categories = use_signal(|| None as Slot<Vec<Category>>);
    let mut action_error = use_signal(|| None::<String>);

    let mut show_add_overlay = use_signal(|| false);
    let mut editing_tx = use_signal(|| None::<Transaction>);
    let mut deleting_tx = use_signal(|| None::<Transaction>);

    // The page needs all three resources; they are fetched in parallel
    // and the view renders once every slot has resolved.
    let mut fetch_all = move || {
        let gen = generation.peek().next();
        generation.set(gen);
        txs.set(None);
        accounts.set(None);
        categories.set(None);
        action_error.set(None);

        spawn(async move {
            let result = api::transactions::list().await;
            if let Some(result) = keep_if_current(gen, *generation.peek(), result) {
                txs.set(Some(result));
            }
        });
        spawn(async move {
            let result = api::accounts::list().await;
            if let Some(result) = keep_if_current(gen, *generation.peek(), result) {
                accounts.set(Some(result));
            }
        });
        spawn(async move {
            let result = api::categories::list(None).await;
            if let Some(result) = keep_if_current(gen, *generation.peek(), result) {
                categories.set(Some(result));
            }
        });
    };

    use_effect(move || {
        fetch_all();
    });

    let loading = txs().is_none() || accounts().is_none() || categories().is_none();

    let mut failures: Vec<String> = Vec::new();
    for (source, err) in [
        ("TRANSACTIONS", txs().and_then(|r| r.err())),
        ("ACCOUNTS", accounts().and_then(|r| r.err())),
        ("CATEGORIES", categories().and_then(|r| r.err())),
    ] {
        if let Some(e) = err {
            tracing::warn!("transactions page {} fetch failed: {}", source, e);
            failures.push(format!("{}: {}", source, e));
        }
    }

    let account_list = match accounts() {
        Some(Ok(accs)) => accs,
        _ => Vec::new(),
    };
    let category_list = match categories() {
        Some(Ok(cats)) => cats,
        _ => Vec::new(),
    };
    let tx_list = match txs() {
        Some(Ok(items)) => items,
        _ => Vec::new(),
    };

    rsx! {
        div { class: "content-header",
            h1 { "TRANSACTIONS" }
            button { onclick: move |_| show_add_overlay.set(true), "ADD" }
        }

        for failure in failures.iter() {
            div { class: "error-message", "{failure}" }
        }

        if let Some(err) = action_error() {
            div { class: "error-message", "{err}" }
        }

        if loading {
            div { class: "loading", "LOADING..." }
        } else if tx_list.is_empty() {
            div { class: "empty-state", "NO TRANSACTIONS" }
        } else {
            div { class: "transaction-list border p-2",
                for tx in tx_list {
                    {
                        let account_name = account_list
                            .iter()
                            .find(|a| a.id == tx.account_id)
                            .map(|a| a.name.clone())
                            .unwrap_or_else(|| "—".to_string());
                        let category_name = tx
                            .category_id
                            .and_then(|id| category_list.iter().find(|c| c.id == id))
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| "NO CATEGORY".to_string());
                        let description = tx.description.clone().unwrap_or_else(|| "—".to_string());
                        let tx_for_edit = tx.clone();
                        let tx_for_delete = tx.clone();
                        rsx! {
                            div { class: "transaction-row", key: "{tx.id}",
                                span { class: "date", "{format_dt(&tx.dt)}" }
                                span { class: "name", "{description}" }
                                span { class: "account", "{account_name}" }
                                span { class: "category", "{category_name}" }
                                span {
                                    class: amount_class(tx.kind),
                                    "{signed_amount(tx.kind, tx.amount_minor, &tx.currency)}"
                                }
                                div { class: "row-actions",
                                    button {
                                        class: "btn-text",
                                        onclick: move |_| editing_tx.set(Some(tx_for_edit.clone())),
                                        "EDIT"
                                    }
                                    button {
                                        class: "btn-text danger",
                                        onclick: move |_| deleting_tx.set(Some(tx_for_delete.clone())),
                                        "DELETE"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if show_add_overlay() {
            TransactionEntryOverlay {
                initial: None,
                on_close: move |_| show_add_overlay.set(false),
                on_success: move |_| fetch_all(),
            }
        }

        if let Some(tx) = editing_tx() {
            TransactionEntryOverlay {
                initial: Some(tx.clone()),
                on_close: move |_| editing_tx.set(None),
                on_success: move |_| fetch_all(),
            }
        }

        if let Some(tx) = deleting_tx() {
            ConfirmDeleteOverlay {
                title: "DELETE TRANSACTION".to_string(),
                prompt: format!(
                    "Delete \"{}\" for {}?",
                    tx.description.clone().unwrap_or_else(|| "—".to_string()),
                    format_minor(tx.amount_minor.abs(), &tx.currency),
                ),
                on_close: move |_| deleting_tx.set(None),
                on_confirm: move |_| {
                    let id = tx.id;
                    spawn(async move {
                        let result = api::transactions::delete(id).await;
                        if let Err(e) = &result {
                            tracing::warn!("transaction delete failed: {}", e);
                        }
                        // Success removes the row locally with no refetch;
                        // failure keeps the loaded list and raises the
                        // banner.
                        if let Some(Ok(items)) = txs() {
                            let (remaining, failure) = apply_delete(items, id, result);
                            txs.set(Some(Ok(remaining)));
                            action_error.set(failure);
                        }
                        deleting_tx.set(None);
                    });
                }
            }
        }
    }
}

#[component]
fn TransactionEntryOverlay(
    initial: Option<Transaction>,
    on_close: EventHandler<()>,
    on_success: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| None::<EntryForm>);
    let mut accounts = use_signal(Vec::<Account>::new);
    let mut categories = use_signal(Vec::<Category>::new);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| true);
    let mut saving = use_signal(|| false);

    // Dependent-field loading: accounts always, categories filtered by
    // the form's kind. Transfers have no category context to load.
    use_effect({
        let initial = initial.clone();
        move || {
            let initial = initial.clone();
            spawn(async move {
                loading.set(true);
                match api::accounts::list().await {
                    Ok(accs) => {
                        if let Some(tx) = initial {
                            let seeded = EntryForm::edit(&tx);
                            if tx.kind != TransactionKind::Transfer {
                                match api::categories::list(Some(seeded.category_kind())).await {
                                    Ok(cats) => categories.set(cats),
                                    Err(e) => {
                                        tracing::warn!("category load failed: {}", e);
                                        error.set(Some(e.to_string()));
                                    }
                                }
                            }
                            form.set(Some(seeded));
                        } else {
                            match api::categories::list(Some(CategoryKind::Expense)).await {
                                Ok(cats) => {
                                    form.set(Some(EntryForm::create(&accs, &cats)));
                                    categories.set(cats);
                                }
                                Err(e) => {
                                    tracing::warn!("category load failed: {}", e);
                                    form.set(Some(EntryForm::create(&accs, &[])));
                                    error.set(Some(e.to_string()));
                                }
                            }
                        }
                        accounts.set(accs);
                    }
                    Err(e) => {
                        tracing::warn!("account load failed: {}", e);
                        error.set(Some(e.to_string()));
                    }
                }
                loading.set(false);
            });
        }
    });

    // Kind switch re-triggers the category load and resets the
    // selection to the head of the new list.
    let mut switch_kind = move |kind: TransactionKind| {
        spawn(async move {
            let cats = if kind == TransactionKind::Transfer {
                Vec::new()
            } else {
                let context = if kind == TransactionKind::Income {
                    CategoryKind::Income
                } else {
                    CategoryKind::Expense
                };
                match api::categories::list(Some(context)).await {
                    Ok(cats) => cats,
                    Err(e) => {
                        tracing::warn!("category load failed: {}", e);
                        error.set(Some(e.to_string()));
                        return;
                    }
                }
            };
            if let Some(mut f) = form() {
                f.switch_kind(kind, &cats);
                form.set(Some(f));
            }
            categories.set(cats);
        });
    };

    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();
        e.stop_propagation();

        let Some(f) = form() else {
            return;
        };
        match f.build_payload(&accounts(), Utc::now()) {
            Err(validation) => error.set(Some(validation.to_string())),
            Ok(payload) => {
                saving.set(true);
                error.set(None);
                spawn(async move {
                    let result = match payload {
                        EntryPayload::Create(create) => {
                            api::transactions::create(create).await.map(|_| ())
                        }
                        EntryPayload::Update { id, changes } => {
                            api::transactions::update(id, changes).await.map(|_| ())
                        }
                    };
                    saving.set(false);
                    match result {
                        Ok(()) => {
                            on_success.call(());
                            on_close.call(());
                        }
                        Err(e) => {
                            tracing::warn!("transaction save failed: {}", e);
                            error.set(Some(e.to_string()));
                        }
                    }
                });
            }
        }
    };

    let title = if initial.is_some() {
        "EDIT TRANSACTION"
    } else {
        "ADD TRANSACTION"
    };

    rsx! {
        Overlay { title: title.to_string(), on_close: on_close,
            if let Some(err) = error() {
                div { class: "error-message", "{err}" }
            }

            if loading() {
                div { class: "loading", "LOADING..." }
            } else if let Some(f) = form() {
                {
                    let kind = f.kind();
                    let kind_locked = f.is_edit();
                    let show_from = matches!(
                        kind,
                        TransactionKind::Expense | TransactionKind::Transfer
                    );
                    let show_to = matches!(
                        kind,
                        TransactionKind::Income | TransactionKind::Transfer
                    );
                    let from_value = f.account_from.map(|id| id.to_string()).unwrap_or_default();
                    let to_value = f.account_to.map(|id| id.to_string()).unwrap_or_default();
                    let category_value = f.category_id.map(|id| id.to_string()).unwrap_or_default();
                    let amount = f.amount.clone();
                    let description = f.description.clone();
                    rsx! {
                        form { onsubmit: handle_submit,
                            div { class: "kind-tabs",
                                for k in TransactionKind::all() {
                                    button {
                                        r#type: "button",
                                        class: if *k == kind { "active" } else { "" },
                                        disabled: kind_locked || saving(),
                                        onclick: move |_| switch_kind(*k),
                                        "{k.label()}"
                                    }
                                }
                            }

                            div { class: "form-group",
                                label { "AMOUNT" }
                                input {
                                    r#type: "text",
                                    inputmode: "decimal",
                                    placeholder: "0",
                                    value: "{amount}",
                                    oninput: move |e| {
                                        if let Some(mut f) = form() {
                                            f.amount = e.value();
                                            form.set(Some(f));
                                        }
                                    },
                                    disabled: saving(),
                                }
                            }

                            if show_from {
                                div { class: "form-group",
                                    label { "FROM ACCOUNT" }
                                    select {
                                        value: "{from_value}",
                                        onchange: move |e| {
                                            if let Some(mut f) = form() {
                                                f.account_from = e.value().parse().ok();
                                                form.set(Some(f));
                                            }
                                        },
                                        disabled: kind_locked || saving(),
                                        for acc in accounts() {
                                            option { value: "{acc.id}", "{acc.name} ({acc.currency})" }
                                        }
                                    }
                                }
                            }

                            if show_to {
                                div { class: "form-group",
                                    label { "TO ACCOUNT" }
                                    select {
                                        value: "{to_value}",
                                        onchange: move |e| {
                                            if let Some(mut f) = form() {
                                                f.account_to = e.value().parse().ok();
                                                form.set(Some(f));
                                            }
                                        },
                                        disabled: kind_locked || saving(),
                                        for acc in accounts() {
                                            option { value: "{acc.id}", "{acc.name} ({acc.currency})" }
                                        }
                                    }
                                }
                            }

                            if kind != TransactionKind::Transfer {
                                div { class: "form-group",
                                    label { "CATEGORY" }
                                    select {
                                        value: "{category_value}",
                                        onchange: move |e| {
                                            if let Some(mut f) = form() {
                                                f.category_id = e.value().parse().ok();
                                                form.set(Some(f));
                                            }
                                        },
                                        disabled: saving(),
                                        for cat in categories() {
                                            option { value: "{cat.id}", "{cat.name}" }
                                        }
                                    }
                                }
                            }

                            div { class: "form-group",
                                label { "DESCRIPTION" }
                                input {
                                    r#type: "text",
                                    placeholder: "Comment...",
                                    value: "{description}",
                                    oninput: move |e| {
                                        if let Some(mut f) = form() {
                                            f.description = e.value();
                                            form.set(Some(f));
                                        }
                                    },
                                    disabled: saving(),
                                }
                            }

                            button {
                                class: "primary w-full",
                                r#type: "submit",
                                disabled: saving(),
                                if saving() { "SAVING..." } else { "SAVE" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::apply_delete;
    use crate::api::ApiError;
    use crate::models::{Transaction, TransactionKind};

    fn tx(id: i64) -> Transaction {
        Transaction {
            id,
            account_id: 1,
            category_id: Some(7),
            amount_minor: 12345,
            currency: "RUB".to_string(),
            dt: "2024-03-01T10:00:00Z".to_string(),
            description: Some("lunch".to_string()),
            kind: TransactionKind::Expense,
        }
    }

    #[test]
    fn successful_delete_removes_only_that_row() {
        let (remaining, failure) = apply_delete(vec![tx(1), tx(2), tx(3)], 2, Ok(()));
        let ids: Vec<i64> = remaining.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(failure, None);
    }

    #[test]
    fn failed_delete_keeps_the_loaded_list() {
        let items = vec![tx(1), tx(2)];
        let err = ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        let (remaining, failure) = apply_delete(items.clone(), 1, Err(err));
        assert_eq!(remaining, items);
        assert_eq!(failure.as_deref(), Some("HTTP 500: boom"));
    }
}
