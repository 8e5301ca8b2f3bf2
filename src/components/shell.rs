use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum Section {
    Dashboard,
    Accounts,
    Categories,
    Transactions,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "DASHBOARD",
            Section::Accounts => "ACCOUNTS",
            Section::Categories => "CATEGORIES",
            Section::Transactions => "TRANSACTIONS",
        }
    }

    pub fn all() -> &'static [Section] {
        &[
            Section::Dashboard,
            Section::Accounts,
            Section::Categories,
            Section::Transactions,
        ]
    }
}

#[component]
pub fn TopStrip(on_logout: EventHandler<()>) -> Element {
    rsx! {
        div { class: "top-strip",
            div { class: "app-name", "FINTRACK" }
            div { class: "user-area",
                button { class: "btn-text", onclick: move |_| on_logout.call(()), "LOGOUT" }
            }
        }
    }
}

#[component]
pub fn SectionSwitcher(current: Section, on_change: EventHandler<Section>) -> Element {
    rsx! {
        div { class: "section-switcher",
            for section in Section::all() {
                button {
                    class: if *section == current { "active" } else { "" },
                    onclick: move |_| on_change.call(*section),
                    "{section.label()}"
                }
            }
        }
    }
}

#[component]
pub fn Shell(
    current_section: Section,
    on_section_change: EventHandler<Section>,
    on_logout: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        div { id: "main",
            TopStrip { on_logout: on_logout }
            SectionSwitcher { current: current_section, on_change: on_section_change }
            div { class: "content container",
                {children}
            }
        }
    }
}
