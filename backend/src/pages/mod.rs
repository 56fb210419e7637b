//! Server-side HTML for every screen.
//!
//! Pages are plain format strings around a shared [`document`] shell. All
//! dynamic text goes through [`escape`]; path segments built from ids go
//! through [`encode_segment`].

use axum::response::Html;
use taskboard_adapters::TaskStatus;

pub mod auth;
pub mod dashboards;
pub mod forms;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f3f4f6;color:#111827}\
header{display:flex;justify-content:space-between;align-items:center;background:#2563eb;color:#fff;padding:1rem 1.5rem}\
main{padding:1.5rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(18rem,1fr));gap:1.5rem}\
.card{background:#fff;border-radius:.5rem;padding:1.5rem;box-shadow:0 4px 6px rgba(0,0,0,.1)}\
.status-completed{color:#22c55e}.status-in-progress{color:#eab308}.status-pending{color:#ef4444}\
.error{background:#fee2e2;color:#b91c1c;padding:1rem;border-radius:.5rem;text-align:center}\
.center{display:flex;justify-content:center;align-items:center;min-height:100vh}\
form.inline{display:inline}\
label{display:block;margin-top:1rem;font-weight:600}\
";

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode one path segment, keeping only RFC 3986 unreserved bytes.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// The page shell.
pub fn document(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    ))
}

/// A blocking alert the user dismisses in place.
pub fn alert(message: &str) -> String {
    format!(
        "<dialog open class=\"alert\"><p>{}</p><form method=\"dialog\"><button>OK</button></form></dialog>",
        escape(message)
    )
}

/// A blocking alert whose dismissal navigates to `href`.
pub fn alert_then(message: &str, href: &str) -> String {
    format!(
        "<dialog open class=\"alert\"><p>{}</p><form method=\"get\" action=\"{}\"><button>Close</button></form></dialog>",
        escape(message),
        escape(href)
    )
}

pub fn error_page(title: &str, message: &str) -> Html<String> {
    document(
        title,
        &format!("<main><div class=\"error\"><p>{}</p></div></main>", escape(message)),
    )
}

pub fn not_found() -> Html<String> {
    error_page("Not found", "This page does not exist.")
}

/// Class giving a status its colour: green, yellow, red for the rest.
pub fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "status-completed",
        TaskStatus::InProgress => "status-in-progress",
        _ => "status-pending",
    }
}

/// The header bar shared by the signed-in screens, with its sign-out button.
fn header(title: &str) -> String {
    format!(
        "<header><h1>{}</h1><form method=\"post\" action=\"/logout\" class=\"inline\">\
<button>Sign Out</button></form></header>",
        escape(title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn encode_segment_escapes_reserved_bytes() {
        assert_eq!(encode_segment("task-1_a.b~"), "task-1_a.b~");
        assert_eq!(encode_segment("a b/c?"), "a%20b%2Fc%3F");
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn status_colours() {
        assert_eq!(status_class(TaskStatus::Completed), "status-completed");
        assert_eq!(status_class(TaskStatus::InProgress), "status-in-progress");
        assert_eq!(status_class(TaskStatus::Pending), "status-pending");
        assert_eq!(status_class(TaskStatus::Unknown), "status-pending");
    }
}
