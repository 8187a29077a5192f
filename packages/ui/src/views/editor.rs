use dioxus::prelude::*;
use store::{Secret, MAX_SECRET_LEN};

use crate::{render_page, Layout};

/// Form for a new secret, posted as `secret`.
#[component]
pub fn SubmitSecret() -> Element {
    rsx! {
        h1 { "Secrets" }
        p { "Don't keep your secrets, share them anonymously!" }
        form {
            class: "stacked",
            action: "/submit",
            method: "post",
            textarea {
                name: "secret",
                placeholder: "What's your secret?",
                maxlength: "{MAX_SECRET_LEN}",
                required: true,
            }
            button { class: "btn", r#type: "submit", "Submit" }
        }
    }
}

/// Form that replaces a secret's body, posted as `changedSecret`.
#[component]
pub fn EditSecret(secret: Secret) -> Element {
    let id = secret.id;
    rsx! {
        h1 { "Edit secret" }
        form {
            class: "stacked",
            action: "/mysecrets/{id}?_method=PUT",
            method: "post",
            textarea {
                name: "changedSecret",
                maxlength: "{MAX_SECRET_LEN}",
                required: true,
                "{secret.body}"
            }
            div {
                class: "actions",
                button { class: "btn", r#type: "submit", "Save" }
                a { class: "btn", href: "/mysecrets", "Cancel" }
            }
        }
    }
}

pub fn submit_page() -> String {
    render_page(
        "Submit",
        rsx! {
            Layout { signed_in: true, SubmitSecret {} }
        },
    )
}

pub fn edit_page(signed_in: bool, secret: Secret) -> String {
    render_page(
        "Edit",
        rsx! {
            Layout { signed_in: signed_in,
                EditSecret { secret: secret }
            }
        },
    )
}
