use dioxus::prelude::*;

const STYLES: &str = r#"
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    color: #37352f;
    background: #ffffff;
}
.navbar {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 0.75rem 2rem;
    border-bottom: 1px solid #e9e9e7;
}
.navbar a { color: #37352f; text-decoration: none; margin-left: 1rem; }
.navbar .brand { font-weight: 700; margin-left: 0; }
.container { max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
.secret { padding: 1rem 0; border-bottom: 1px solid #f1f1ef; }
.secret time { color: #787774; font-size: 0.8125rem; }
.muted { color: #787774; }
.actions { display: flex; gap: 0.5rem; margin-top: 0.5rem; }
.btn {
    padding: 0.5rem 1rem;
    border: none;
    border-radius: 4px;
    background: #37352f;
    color: white;
    cursor: pointer;
    text-decoration: none;
    font-size: 0.875rem;
}
.btn.google { background: #4285f4; }
.btn.danger { background: #eb5757; }
form.stacked { display: flex; flex-direction: column; gap: 0.75rem; max-width: 360px; }
textarea { min-height: 6rem; font: inherit; }
.footer { text-align: center; color: #787774; font-size: 0.8125rem; padding: 2rem 0; }
"#;

/// Render a component tree into a complete HTML document.
pub fn render_page(title: &str, page: Element) -> String {
    let body = dioxus_ssr::render_element(page);
    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} | Konfessions</title>\
         <style>{STYLES}</style>\
         </head>\
         <body>{body}</body>\
         </html>"
    )
}
