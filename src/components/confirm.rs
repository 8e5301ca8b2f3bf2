use dioxus::prelude::*;

use super::Overlay;

/// The literal word the user has to type before a destructive action
/// goes through.
pub const CONFIRMATION_WORD: &str = "да";

/// Case-insensitive, whitespace-tolerant match against the
/// confirmation word. Anything else leaves the action untaken.
pub fn confirmation_matches(input: &str) -> bool {
    input.trim().to_lowercase() == CONFIRMATION_WORD
}

/// Delete dialog guarded by the typed confirmation. `on_confirm` fires
/// only when the input matches; closing or mistyping is a no-op for
/// the caller.
#[component]
pub fn ConfirmDeleteOverlay(
    title: String,
    prompt: String,
    on_confirm: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let mut input = use_signal(String::new);

    rsx! {
        Overlay { title: title, on_close: on_close,
            p { class: "confirm-prompt", "{prompt}" }
            p { class: "confirm-hint", "Type \"{CONFIRMATION_WORD}\" to confirm." }

            div { class: "form-group",
                input {
                    r#type: "text",
                    value: "{input}",
                    placeholder: "{CONFIRMATION_WORD}",
                    oninput: move |e| input.set(e.value()),
                }
            }

            div { class: "flex gap-2",
                button {
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "CANCEL"
                }
                button {
                    class: "danger flex-1",
                    r#type: "button",
                    disabled: !confirmation_matches(&input()),
                    onclick: move |_| {
                        if confirmation_matches(&input()) {
                            on_confirm.call(());
                        }
                    },
                    "DELETE"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::confirmation_matches;

    #[test]
    fn accepts_the_word_in_any_case() {
        assert!(confirmation_matches("да"));
        assert!(confirmation_matches("ДА"));
        assert!(confirmation_matches(" Да "));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!confirmation_matches(""));
        assert!(!confirmation_matches("yes"));
        assert!(!confirmation_matches("нет"));
        assert!(!confirmation_matches("да да"));
    }
}
