use dioxus::prelude::*;

use crate::{render_page, Layout};

#[component]
pub fn Home(signed_in: bool) -> Element {
    rsx! {
        section {
            class: "hero",
            h1 { "Konfessions" }
            p { "Don't keep your secrets, share them anonymously!" }
            div {
                class: "actions",
                if signed_in {
                    a { class: "btn", href: "/submit", "Submit a secret" }
                    a { class: "btn", href: "/secrets", "Read secrets" }
                } else {
                    a { class: "btn", href: "/register", "Register" }
                    a { class: "btn", href: "/login", "Log in" }
                }
            }
        }
    }
}

pub fn home_page(signed_in: bool) -> String {
    render_page(
        "Home",
        rsx! {
            Layout { signed_in: signed_in,
                Home { signed_in: signed_in }
            }
        },
    )
}
