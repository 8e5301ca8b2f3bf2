use std::collections::HashMap;

use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api;
use crate::components::{ConfirmDeleteOverlay, Overlay};
use crate::models::{Account, AccountCreate, AccountType, AccountUpdate};
use crate::utils::format_minor;

const CURRENCIES: &[&str] = &["RUB", "USD", "EUR"];

#[component]
pub fn AccountsView() -> Element {
    let mut accounts = use_signal(Vec::<Account>::new);
    let mut balances = use_signal(HashMap::<i64, i64>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);

    let mut show_add_overlay = use_signal(|| false);
    let mut editing_account = use_signal(|| None::<Account>);
    let mut deleting_account = use_signal(|| None::<Account>);

    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match api::accounts::list().await {
                Ok(accs) => {
                    // Balances are fetched one by one after the list; a
                    // failed balance keeps the page usable but is shown.
                    for acc in &accs {
                        match api::accounts::balance(acc.id).await {
                            Ok(b) => {
                                let mut current = balances();
                                current.insert(b.account_id, b.balance_minor);
                                balances.set(current);
                            }
                            Err(e) => {
                                tracing::warn!("balance fetch for account {} failed: {}", acc.id, e);
                                error.set(Some(e.to_string()));
                            }
                        }
                    }
                    accounts.set(accs);
                }
                Err(e) => {
                    tracing::warn!("account list fetch failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    rsx! {
        div { class: "content-header",
            h1 { "ACCOUNTS" }
            button { onclick: move |_| show_add_overlay.set(true), "ADD" }
        }

        if let Some(err) = error() {
            div { class: "error-message", "{err}" }
        }

        if loading() {
            div { class: "loading", "LOADING..." }
        } else if accounts().is_empty() {
            div { class: "empty-state", "NO ACCOUNTS" }
        } else {
            div { class: "account-list border p-2",
                for acc in accounts() {
                    {
                        let balance = balances().get(&acc.id).map(|b| format_minor(*b, &acc.currency));
                        let acc_for_edit = acc.clone();
                        let acc_for_delete = acc.clone();
                        rsx! {
                            div { class: "account-row", key: "{acc.id}",
                                div { class: "account-main",
                                    span { class: "name", "{acc.name}" }
                                    span { class: "type-tag", "{acc.account_type.label()}" }
                                    if let Some(card) = acc.card_number.as_ref() {
                                        span { class: "card-number", "**** {card}" }
                                    }
                                    span {
                                        class: if acc.is_active { "status active" } else { "status inactive" },
                                        if acc.is_active { "ACTIVE" } else { "INACTIVE" }
                                    }
                                }
                                div { class: "account-side",
                                    span { class: "balance",
                                        match balance {
                                            Some(b) => rsx! { "{b}" },
                                            None => rsx! { "—" },
                                        }
                                    }
                                    button {
                                        class: "btn-text",
                                        onclick: move |_| editing_account.set(Some(acc_for_edit.clone())),
                                        "EDIT"
                                    }
                                    button {
                                        class: "btn-text danger",
                                        onclick: move |_| deleting_account.set(Some(acc_for_delete.clone())),
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
            AddAccountOverlay {
                on_close: move |_| show_add_overlay.set(false),
                on_save: move |acc| {
                    let mut current = accounts();
                    current.push(acc);
                    accounts.set(current);
                    show_add_overlay.set(false);
                }
            }
        }

        if let Some(acc) = editing_account() {
            EditAccountOverlay {
                account: acc.clone(),
                on_close: move |_| editing_account.set(None),
                on_save: move |updated: Account| {
                    let current: Vec<Account> = accounts()
                        .into_iter()
                        .map(|a| if a.id == updated.id { updated.clone() } else { a })
                        .collect();
                    accounts.set(current);
                    editing_account.set(None);
                }
            }
        }

        if let Some(acc) = deleting_account() {
            ConfirmDeleteOverlay {
                title: "DELETE ACCOUNT".to_string(),
                prompt: format!("Delete account \"{}\"? This cannot be undone.", acc.name),
                on_close: move |_| deleting_account.set(None),
                on_confirm: move |_| {
                    let id = acc.id;
                    spawn(async move {
                        match api::accounts::delete(id).await {
                            Ok(()) => {
                                let current: Vec<Account> = accounts()
                                    .into_iter()
                                    .filter(|a| a.id != id)
                                    .collect();
                                accounts.set(current);
                                deleting_account.set(None);
                            }
                            Err(e) => {
                                tracing::warn!("account delete failed: {}", e);
                                error.set(Some(e.to_string()));
                                deleting_account.set(None);
                            }
                        }
                    });
                }
            }
        }
    }
}

#[component]
fn AddAccountOverlay(on_close: EventHandler<()>, on_save: EventHandler<Account>) -> Element {
    let mut name = use_signal(String::new);
    let mut account_type = use_signal(|| AccountType::Card);
    let mut currency = use_signal(|| "RUB".to_string());
    let mut card_number = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();
        e.stop_propagation();

        let name_val = name().trim().to_string();
        if name_val.is_empty() {
            error.set(Some("Name is required".to_string()));
            return;
        }

        loading.set(true);
        error.set(None);

        let card_val = card_number().trim().to_string();
        let payload = AccountCreate {
            name: name_val,
            account_type: account_type(),
            currency: currency(),
            card_number: if card_val.is_empty() { None } else { Some(card_val) },
        };

        spawn(async move {
            let result = api::accounts::create(payload).await;
            loading.set(false);
            match result {
                Ok(acc) => on_save.call(acc),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        Overlay { title: "ADD ACCOUNT".to_string(), on_close: on_close,
            if let Some(err) = error() {
                div { class: "error-message", "{err}" }
            }

            form { onsubmit: handle_submit,
                div { class: "form-group",
                    label { "NAME" }
                    input {
                        r#type: "text",
                        value: "{name}",
                        oninput: move |e| name.set(e.value()),
                        disabled: loading(),
                    }
                }

                div { class: "form-group",
                    label { "TYPE" }
                    select {
                        value: "{account_type().value()}",
                        onchange: move |e| account_type.set(AccountType::from_value(&e.value())),
                        disabled: loading(),
                        for t in AccountType::all() {
                            option { value: "{t.value()}", "{t.label()}" }
                        }
                    }
                }

                div { class: "form-group",
                    label { "CURRENCY" }
                    select {
                        value: "{currency}",
                        onchange: move |e| currency.set(e.value()),
                        disabled: loading(),
                        for c in CURRENCIES {
                            option { value: "{c}", "{c}" }
                        }
                    }
                }

                div { class: "form-group",
                    label { "CARD LAST 4 DIGITS" }
                    input {
                        r#type: "text",
                        maxlength: "4",
                        value: "{card_number}",
                        oninput: move |e| card_number.set(e.value()),
                        disabled: loading(),
                    }
                }

                button {
                    class: "primary w-full",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "SAVING..." } else { "SAVE" }
                }
            }
        }
    }
}

#[component]
fn EditAccountOverlay(
    account: Account,
    on_close: EventHandler<()>,
    on_save: EventHandler<Account>,
) -> Element {
    let mut name = use_signal(|| account.name.clone());
    let mut account_type = use_signal(|| account.account_type);
    let mut currency = use_signal(|| account.currency.clone());
    let mut card_number = use_signal(|| account.card_number.clone().unwrap_or_default());
    let mut is_active = use_signal(|| account.is_active);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let account_id = account.id;

    let handle_submit = move |e: Event<FormData>| {
        e.prevent_default();
        e.stop_propagation();

        let name_val = name().trim().to_string();
        if name_val.is_empty() {
            error.set(Some("Name is required".to_string()));
            return;
        }

        loading.set(true);
        error.set(None);

        let card_val = card_number().trim().to_string();
        let payload = AccountUpdate {
            name: name_val,
            account_type: account_type(),
            currency: currency(),
            card_number: if card_val.is_empty() { None } else { Some(card_val) },
            is_active: is_active(),
        };

        spawn(async move {
            let result = api::accounts::update(account_id, payload).await;
            loading.set(false);
            match result {
                Ok(acc) => on_save.call(acc),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        Overlay { title: "EDIT ACCOUNT".to_string(), on_close: on_close,
            if let Some(err) = error() {
                div { class: "error-message", "{err}" }
            }

            form { onsubmit: handle_submit,
                div { class: "form-group",
                    label { "NAME" }
                    input {
                        r#type: "text",
                        value: "{name}",
                        oninput: move |e| name.set(e.value()),
                        disabled: loading(),
                    }
                }

                div { class: "form-group",
                    label { "TYPE" }
                    select {
                        value: "{account_type().value()}",
                        onchange: move |e| account_type.set(AccountType::from_value(&e.value())),
                        disabled: loading(),
                        for t in AccountType::all() {
                            option { value: "{t.value()}", "{t.label()}" }
                        }
                    }
                }

                div { class: "form-group",
                    label { "CURRENCY" }
                    select {
                        value: "{currency}",
                        onchange: move |e| currency.set(e.value()),
                        disabled: loading(),
                        for c in CURRENCIES {
                            option { value: "{c}", "{c}" }
                        }
                    }
                }

                div { class: "form-group",
                    label { "CARD LAST 4 DIGITS" }
                    input {
                        r#type: "text",
                        maxlength: "4",
                        value: "{card_number}",
                        oninput: move |e| card_number.set(e.value()),
                        disabled: loading(),
                    }
                }

                div { class: "form-group",
                    label {
                        input {
                            r#type: "checkbox",
                            checked: is_active(),
                            onchange: move |e| is_active.set(e.checked()),
                            disabled: loading(),
                        }
                        " ACTIVE"
                    }
                }

                button {
                    class: "primary w-full",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "SAVING..." } else { "SAVE" }
                }
            }
        }
    }
}
