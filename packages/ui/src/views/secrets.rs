//! Secret listings: the public feed and the signed-in user's own secrets.

use dioxus::prelude::*;
use store::{Secret, UserInfo};

use crate::{render_page, Layout};

fn timestamp(secret: &Secret) -> (String, String) {
    (
        secret.updated_at.to_rfc3339(),
        secret.updated_at.format("%b %e, %Y %H:%M").to_string(),
    )
}

/// Read-only list of secrets in the order given.
#[component]
pub fn SecretList(secrets: Vec<Secret>) -> Element {
    rsx! {
        if secrets.is_empty() {
            p { class: "empty", "Nobody has shared a secret yet." }
        }
        ul {
            class: "secrets",
            for secret in secrets {
                SecretItem { key: "{secret.id}", secret: secret.clone() }
            }
        }
    }
}

#[component]
fn SecretItem(secret: Secret) -> Element {
    let (datetime, shown) = timestamp(&secret);
    rsx! {
        li {
            class: "secret",
            p { "{secret.body}" }
            time { datetime: "{datetime}", "{shown}" }
        }
    }
}

/// The current user's secrets, each with edit and delete controls.
#[component]
pub fn MySecrets(user: UserInfo, secrets: Vec<Secret>) -> Element {
    rsx! {
        h1 { "Secrets of {user.username}" }
        if user.federated {
            p { class: "muted", "Signed in with Google" }
        }
        if secrets.is_empty() {
            p {
                class: "empty",
                "You have not shared anything yet. "
                a { href: "/submit", "Submit a secret" }
            }
        }
        ul {
            class: "secrets",
            for secret in secrets {
                OwnedSecret { key: "{secret.id}", secret: secret.clone() }
            }
        }
    }
}

#[component]
fn OwnedSecret(secret: Secret) -> Element {
    let (datetime, shown) = timestamp(&secret);
    let id = secret.id;
    rsx! {
        li {
            class: "secret",
            p { "{secret.body}" }
            time { datetime: "{datetime}", "{shown}" }
            div {
                class: "actions",
                a { class: "btn", href: "/mysecrets/{id}/edit", "Edit" }
                form {
                    action: "/mysecrets?_method=DELETE",
                    method: "post",
                    input { r#type: "hidden", name: "deleteSecret", value: "{id}" }
                    button { class: "btn danger", r#type: "submit", "Delete" }
                }
            }
        }
    }
}

/// `/secrets`: every user's secrets, already sorted by the caller.
pub fn secrets_page(signed_in: bool, secrets: Vec<Secret>) -> String {
    render_page(
        "Secrets",
        rsx! {
            Layout { signed_in: signed_in,
                h1 { "You've discovered my secret!" }
                SecretList { secrets: secrets }
                if signed_in {
                    a { class: "btn", href: "/submit", "Submit a secret" }
                }
            }
        },
    )
}

/// `/mysecrets`: the signed-in user's secrets.
pub fn my_secrets_page(user: UserInfo, secrets: Vec<Secret>) -> String {
    render_page(
        "My secrets",
        rsx! {
            Layout { signed_in: true,
                MySecrets { user: user, secrets: secrets }
            }
        },
    )
}
