mod api;
mod auth;
mod components;
mod entry;
mod models;
mod utils;
mod views;

use dioxus::prelude::*;

use components::{Section, Shell};
use views::{AccountsView, AuthScreen, CategoriesView, DashboardView, TransactionsView};

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[allow(non_snake_case)]
fn App() -> Element {
    // A stored bearer token is what "logged in" means here; the server
    // rejects it with 401 once it expires and the user logs in again.
    let mut authed = use_signal(|| auth::token().is_some());
    let mut current_section = use_signal(|| Section::Dashboard);

    let handle_login = move |_| {
        authed.set(true);
        current_section.set(Section::Dashboard);
    };

    let handle_logout = move |_| {
        auth::clear_token();
        authed.set(false);
        current_section.set(Section::Dashboard);
    };

    if !authed() {
        return rsx! {
            AuthScreen { on_login: handle_login }
        };
    }

    rsx! {
        Shell {
            current_section: current_section(),
            on_section_change: move |section| current_section.set(section),
            on_logout: handle_logout,

            match current_section() {
                Section::Dashboard => rsx! {
                    DashboardView {}
                },
                Section::Accounts => rsx! {
                    AccountsView {}
                },
                Section::Categories => rsx! {
                    CategoriesView {}
                },
                Section::Transactions => rsx! {
                    TransactionsView {}
                },
            }
        }
    }
}
