//! HTML pages: the landing page and the deprecated login pages.
//!
//! Both login pages render `template.html` from the static directory with a title and a
//! message. They are kept for links still posted by old bot versions.

use axum::{
    extract::{RawQuery, State},
    response::Html,
};

use crate::server::{
    error::AppError, service::template::render_file, state::AppState, util::text::escape_html,
};

/// Landing page, relative to the static directory.
pub const INDEX_FILE: &str = "index.html";

/// Template file, relative to the static directory.
pub const TEMPLATE_FILE: &str = "template.html";

const DEFAULT_USERNAME: &str = "there";
const LOGGED_IN_MESSAGE: &str =
    "You can now go back to discord and use the `<code>update</code>` command.";
const ALREADY_LOGGED_IN_TITLE: &str = "Already Logged In!";
const ALREADY_LOGGED_IN_MESSAGE: &str =
    "Please use the `<code>github logout</code>` command and logout first.";

/// Serves the landing page.
///
/// A missing or unreadable file is an unstructured error.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = tokio::fs::read_to_string(state.static_dir.join(INDEX_FILE)).await?;

    Ok(Html(html))
}

/// Greets the user named by the `username` query parameter.
///
/// The name is HTML-escaped before it is substituted into the title.
pub async fn logged_in(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, AppError> {
    let username = username_from_query(query.as_deref());
    let title = format!("Hey {}!", escape_html(&username));

    let html = render_file(
        &state.static_dir.join(TEMPLATE_FILE),
        &[("title", &title), ("message", LOGGED_IN_MESSAGE)],
    )
    .await?;

    Ok(Html(html))
}

/// First `username` value in the query string; `there` when absent or empty.
///
/// Repeated parameters are not an error, later values are ignored.
fn username_from_query(query: Option<&str>) -> String {
    query
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "username")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|username| !username.is_empty())
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
}

pub async fn already_logged_in(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let html = render_file(
        &state.static_dir.join(TEMPLATE_FILE),
        &[
            ("title", ALREADY_LOGGED_IN_TITLE),
            ("message", ALREADY_LOGGED_IN_MESSAGE),
        ],
    )
    .await?;

    Ok(Html(html))
}
