//! Server-rendered pages for Konfessions.
//!
//! Every page is a dioxus component tree rendered once to an HTML string with
//! `dioxus-ssr`; there is no client-side hydration. The `page` functions in
//! [`views`] are what the route layer calls.

mod navbar;
pub use navbar::{Layout, Navbar};

mod render;
pub use render::render_page;

pub mod views;
