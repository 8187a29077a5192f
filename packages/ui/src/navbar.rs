use dioxus::prelude::*;

/// Top navigation. Links depend on whether a user is signed in.
#[component]
pub fn Navbar(signed_in: bool) -> Element {
    rsx! {
        nav {
            class: "navbar",
            a { class: "brand", href: "/", "Konfessions" }
            div {
                class: "nav-links",
                a { href: "/secrets", "All secrets" }
                if signed_in {
                    a { href: "/mysecrets", "My secrets" }
                    a { href: "/submit", "Submit a secret" }
                    a { href: "/logout", "Log out" }
                } else {
                    a { href: "/login", "Log in" }
                    a { href: "/register", "Register" }
                }
            }
        }
    }
}

/// Page frame shared by every view.
#[component]
pub fn Layout(signed_in: bool, children: Element) -> Element {
    rsx! {
        Navbar { signed_in: signed_in }
        main {
            class: "container",
            {children}
        }
        footer {
            class: "footer",
            p { "Konfessions. Say it anonymously." }
        }
    }
}
