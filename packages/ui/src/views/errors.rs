use dioxus::prelude::*;

use crate::{render_page, Layout};

pub fn not_found_page(signed_in: bool) -> String {
    render_page(
        "Not found",
        rsx! {
            Layout { signed_in: signed_in,
                h1 { "Not found" }
                p { "There is no secret here." }
                a { href: "/secrets", "Back to secrets" }
            }
        },
    )
}

pub fn server_error_page() -> String {
    render_page(
        "Error",
        rsx! {
            Layout { signed_in: false,
                h1 { "Something went wrong" }
                p { "Please try again in a moment." }
            }
        },
    )
}
