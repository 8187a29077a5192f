//! Login and registration forms.
//!
//! Both forms post `username` and `password`. Failed attempts come back to the
//! same page with no message, so nothing distinguishes an unknown user from a
//! wrong password.

use dioxus::prelude::*;

use crate::{render_page, Layout};

#[component]
fn GoogleButton(label: String) -> Element {
    rsx! {
        a {
            class: "btn google",
            href: "/auth/google",
            "{label}"
        }
    }
}

#[component]
fn CredentialsForm(action: String, submit_label: String) -> Element {
    rsx! {
        form {
            class: "stacked",
            action: "{action}",
            method: "post",
            label { r#for: "username", "Username" }
            input { r#type: "text", id: "username", name: "username", required: true }
            label { r#for: "password", "Password" }
            input { r#type: "password", id: "password", name: "password", required: true }
            button { class: "btn", r#type: "submit", "{submit_label}" }
        }
    }
}

/// Login page component.
#[component]
pub fn Login() -> Element {
    rsx! {
        h1 { "Log in" }
        CredentialsForm { action: "/login", submit_label: "Log in" }
        p { "or" }
        GoogleButton { label: "Sign in with Google" }
    }
}

/// Registration page component.
#[component]
pub fn Register() -> Element {
    rsx! {
        h1 { "Register" }
        CredentialsForm { action: "/register", submit_label: "Register" }
        p { "or" }
        GoogleButton { label: "Sign up with Google" }
    }
}

pub fn login_page() -> String {
    render_page(
        "Log in",
        rsx! {
            Layout { signed_in: false, Login {} }
        },
    )
}

pub fn register_page() -> String {
    render_page(
        "Register",
        rsx! {
            Layout { signed_in: false, Register {} }
        },
    )
}
