//! Page components and the functions that render them to HTML.

mod auth;
pub use auth::{login_page, register_page, Login, Register};

mod home;
pub use home::{home_page, Home};

mod secrets;
pub use secrets::{my_secrets_page, secrets_page, MySecrets, SecretList};

mod editor;
pub use editor::{edit_page, submit_page, EditSecret, SubmitSecret};

mod errors;
pub use errors::{not_found_page, server_error_page};
