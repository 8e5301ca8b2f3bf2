use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::api;
use crate::components::{ConfirmDeleteOverlay, Overlay};
use crate::models::{Category, CategoryCreate, CategoryKind, CategoryUpdate};

fn sorted(mut categories: Vec<Category>) -> Vec<Category> {
    categories.sort_by(|a, b| {
        a.kind
            .value()
            .cmp(b.kind.value())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    categories
}

#[component]
pub fn CategoriesView() -> Element {
    let mut categories = use_signal(Vec::<Category>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);

    let mut show_add_overlay = use_signal(|| false);
    let mut editing_category = use_signal(|| None::<Category>);
    let mut archiving_category = use_signal(|| None::<Category>);

    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match api::categories::list(None).await {
                Ok(cats) => categories.set(sorted(cats)),
                Err(e) => {
                    tracing::warn!("category list fetch failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    rsx! {
        div { class: "content-header",
            h1 { "CATEGORIES" }
            button { onclick: move |_| show_add_overlay.set(true), "ADD" }
        }

        if let Some(err) = error() {
            div { class: "error-message", "{err}" }
        }

        if loading() {
            div { class: "loading", "LOADING..." }
        } else if categories().is_empty() {
            div { class: "empty-state", "NO CATEGORIES" }
        } else {
            div { class: "category-list border p-2",
                for cat in categories() {
                    {
                        let cat_for_edit = cat.clone();
                        let cat_for_archive = cat.clone();
                        rsx! {
                            div { class: "category-row", key: "{cat.id}",
                                span { class: "name", "{cat.name}" }
                                span { class: "type-tag", "{cat.kind.label()}" }
                                span {
                                    class: if cat.is_active { "status active" } else { "status inactive" },
                                    if cat.is_active { "ACTIVE" } else { "ARCHIVED" }
                                }
                                div { class: "row-actions",
                                    button {
                                        class: "btn-text",
                                        onclick: move |_| editing_category.set(Some(cat_for_edit.clone())),
                                        "EDIT"
                                    }
                                    if cat.is_active {
                                        button {
                                            class: "btn-text danger",
                                            onclick: move |_| archiving_category.set(Some(cat_for_archive.clone())),
                                            "ARCHIVE"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if show_add_overlay() {
            AddCategoryOverlay {
                on_close: move |_| show_add_overlay.set(false),
                on_save: move |cat| {
                    let mut current = categories();
                    current.push(cat);
                    categories.set(sorted(current));
                    show_add_overlay.set(false);
                }
            }
        }

        if let Some(cat) = editing_category() {
            EditCategoryOverlay {
                category: cat.clone(),
                on_close: move |_| editing_category.set(None),
                on_save: move |updated: Category| {
                    let current: Vec<Category> = categories()
                        .into_iter()
                        .map(|c| if c.id == updated.id { updated.clone() } else { c })
                        .collect();
                    categories.set(sorted(current));
                    editing_category.set(None);
                }
            }
        }

        if let Some(cat) = archiving_category() {
            ConfirmDeleteOverlay {
                title: "ARCHIVE CATEGORY".to_string(),
                prompt: format!(
                    "Archive category \"{}\"? It stays in the list but becomes inactive.",
                    cat.name
                ),
                on_close: move |_| archiving_category.set(None),
                on_confirm: move |_| {
                    let id = cat.id;
                    spawn(async move {
                        match api::categories::delete(id).await {
                            Ok(()) => {
                                // Soft delete: flip the flag locally and
                                // keep the row visible.
                                let current: Vec<Category> = categories()
                                    .into_iter()
                                    .map(|mut c| {
                                        if c.id == id {
                                            c.is_active = false;
                                        }
                                        c
                                    })
                                    .collect();
                                categories.set(current);
                                archiving_category.set(None);
                            }
                            Err(e) => {
                                tracing::warn!("category archive failed: {}", e);
                                error.set(Some(e.to_string()));
                                archiving_category.set(None);
                            }
                        }
                    });
                }
            }
        }
    }
}

#[component]
fn AddCategoryOverlay(on_close: EventHandler<()>, on_save: EventHandler<Category>) -> Element {
    let mut name = use_signal(String::new);
    let mut kind = use_signal(|| CategoryKind::Expense);
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

        let payload = CategoryCreate {
            name: name_val,
            kind: kind(),
            parent_id: None,
        };
        spawn(async move {
            let result = api::categories::create(payload).await;
            loading.set(false);
            match result {
                Ok(cat) => on_save.call(cat),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        Overlay { title: "ADD CATEGORY".to_string(), on_close: on_close,
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
                        value: "{kind().value()}",
                        onchange: move |e| {
                            kind.set(if e.value() == "income" {
                                CategoryKind::Income
                            } else {
                                CategoryKind::Expense
                            })
                        },
                        disabled: loading(),
                        option { value: "expense", "EXPENSE" }
                        option { value: "income", "INCOME" }
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
fn EditCategoryOverlay(
    category: Category,
    on_close: EventHandler<()>,
    on_save: EventHandler<Category>,
) -> Element {
    let mut name = use_signal(|| category.name.clone());
    let mut kind = use_signal(|| category.kind);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let category_id = category.id;

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

        let payload = CategoryUpdate {
            name: Some(name_val),
            kind: Some(kind()),
            is_active: None,
        };
        spawn(async move {
            let result = api::categories::update(category_id, payload).await;
            loading.set(false);
            match result {
                Ok(cat) => on_save.call(cat),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        Overlay { title: "EDIT CATEGORY".to_string(), on_close: on_close,
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
                        value: "{kind().value()}",
                        onchange: move |e| {
                            kind.set(if e.value() == "income" {
                                CategoryKind::Income
                            } else {
                                CategoryKind::Expense
                            })
                        },
                        disabled: loading(),
                        option { value: "expense", "EXPENSE" }
                        option { value: "income", "INCOME" }
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
