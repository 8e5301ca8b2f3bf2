use dioxus::prelude::*;

/// Modal layer behind every add/edit/confirm dialog. Clicking the
/// scrim closes it; clicks inside the panel never bubble out.
#[component]
pub fn Overlay(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "modal-scrim", onclick: move |_| on_close.call(()),
            section {
                class: "modal-panel",
                onclick: move |e| e.stop_propagation(),
                header { class: "modal-head",
                    span { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                div { class: "modal-body",
                    {children}
                }
            }
        }
    }
}
