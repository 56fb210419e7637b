//! Root screen states: sign-in prompt, loading placeholders, role error.

use axum::response::Html;

use super::{document, escape};

pub fn sign_in(error: Option<&str>) -> Html<String> {
    let error = error
        .map(|message| format!("<div class=\"error\"><p>{}</p></div>", escape(message)))
        .unwrap_or_default();

    document(
        "The Task App",
        &format!(
            "<main class=\"center\"><div class=\"card\">\
<h1>The Task App</h1>{error}\
<h2>Please Sign In</h2>\
<form method=\"get\" action=\"/login\"><button>Sign In</button></form>\
</div></main>"
        ),
    )
}

/// Shown while a login redirect is in flight.
pub fn signing_in() -> Html<String> {
    document(
        "Signing in",
        "<main class=\"center\"><div><p>Signing you in…</p>\
<p><a href=\"/login\">Start again</a></p></div></main>",
    )
}

/// The non-navigating placeholder of gated screens.
pub fn placeholder() -> Html<String> {
    document("Loading", "<div>Loading...</div>")
}

pub fn role_error(message: &str) -> Html<String> {
    document(
        "The Task App",
        &format!(
            "<main><div class=\"error\"><p>Error: {}</p></div>\
<form method=\"post\" action=\"/logout\"><button>Sign Out</button></form></main>",
            escape(message)
        ),
    )
}
