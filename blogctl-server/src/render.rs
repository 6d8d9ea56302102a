//! HTML views
//!
//! Small hand-written pages sharing one layout. Every user-supplied string
//! goes through `escape`.

use axum::http::StatusCode;
use axum::response::Html;

use blogctl_core::Entry;

use crate::session::Session;

/// Per-page layout inputs: login state for the nav and pending notices.
pub struct Chrome {
    logged_in: bool,
    flashes: Vec<String>,
}

impl Chrome {
    /// Consumes the session's flashes, so the caller must write the session
    /// back for them to disappear.
    pub fn from_session(session: &mut Session) -> Self {
        Self {
            logged_in: session.is_logged_in(),
            flashes: session.take_flashes(),
        }
    }

    fn anonymous() -> Self {
        Self {
            logged_in: false,
            flashes: Vec::new(),
        }
    }
}

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(chrome: &Chrome, body: &str) -> Html<String> {
    let nav = if chrome.logged_in {
        r#"<a href="/logout">log out</a>"#
    } else {
        r#"<a href="/login">log in</a>"#
    };

    let mut flashes = String::new();
    for message in &chrome.flashes {
        flashes.push_str(&format!(r#"<div class="flash">{}</div>"#, escape(message)));
    }

    Html(format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>blogctl</title></head>
<body>
<div class="page">
  <h1><a href="/">blogctl</a></h1>
  <div class="metanav">{nav}</div>
  {flashes}
  {body}
</div>
</body>
</html>
"#
    ))
}

/// Front page: newest entries, plus the add form when logged in.
pub fn entry_list(entries: &[Entry], chrome: &Chrome) -> Html<String> {
    let mut body = String::new();

    if chrome.logged_in {
        body.push_str(
            r#"<form action="/add" method="post" class="add-entry">
  <dl>
    <dt>Title:</dt><dd><input type="text" size="30" name="title"></dd>
    <dt>Text:</dt><dd><textarea name="text" rows="5" cols="40"></textarea></dd>
    <dd><input type="submit" value="Share"></dd>
  </dl>
</form>
"#,
        );
    }

    body.push_str(r#"<ul class="entries">"#);
    if entries.is_empty() {
        body.push_str("<li><em>Unbelievable. No entries here so far</em></li>");
    }
    for entry in entries {
        body.push_str(&format!(
            r#"<li><h2><a href="/entries/{id}">{title}</a></h2>{text}<div class="actions"><a href="/entries/{id}/edit">edit</a>"#,
            id = entry.id,
            title = escape(&entry.title),
            text = escape(&entry.text),
        ));
        if chrome.logged_in {
            body.push_str(&format!(r#" <a href="/entries/{}/delete">delete</a>"#, entry.id));
        }
        body.push_str("</div></li>");
    }
    body.push_str("</ul>");

    layout(chrome, &body)
}

pub fn entry_detail(entry: &Entry, chrome: &Chrome) -> Html<String> {
    let body = format!(
        r#"<div class="entry"><h2>{title}</h2><p>{text}</p></div>
<div class="actions"><a href="/entries/{id}/edit">edit</a> <a href="/">back</a></div>"#,
        id = entry.id,
        title = escape(&entry.title),
        text = escape(&entry.text),
    );
    layout(chrome, &body)
}

/// Edit form pre-filled with the current title and text.
pub fn edit_form(entry: &Entry, chrome: &Chrome) -> Html<String> {
    let body = format!(
        r#"<h2>Edit</h2>
<form action="/entries/{id}/update" method="post" class="edit-entry">
  <dl>
    <dt>Title:</dt><dd><input type="text" size="30" name="title" value="{title}"></dd>
    <dt>Text:</dt><dd><textarea name="text" rows="5" cols="40">{text}</textarea></dd>
    <dd><input type="submit" value="Update"></dd>
  </dl>
</form>"#,
        id = entry.id,
        title = escape(&entry.title),
        text = escape(&entry.text),
    );
    layout(chrome, &body)
}

pub fn login_form(error: Option<&str>, chrome: &Chrome) -> Html<String> {
    let error = error
        .map(|e| format!(r#"<p class="error"><strong>Error:</strong> {}</p>"#, escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"<h2>Login</h2>
{error}
<form action="/login" method="post">
  <dl>
    <dt>Username:</dt><dd><input type="text" name="username"></dd>
    <dt>Password:</dt><dd><input type="password" name="password"></dd>
    <dd><input type="submit" value="Login"></dd>
  </dl>
</form>"#
    );
    layout(chrome, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let body = format!(
        r#"<h2>{code} {reason}</h2><p>{message}</p>"#,
        code = status.as_u16(),
        reason = status.canonical_reason().unwrap_or("Error"),
        message = escape(message),
    );
    layout(&Chrome::anonymous(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, title: &str, text: &str) -> Entry {
        Entry {
            id,
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    fn chrome(logged_in: bool) -> Chrome {
        Chrome {
            logged_in,
            flashes: Vec::new(),
        }
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape(r#"<script>alert("x & y")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn list_hides_write_controls_when_anonymous() {
        let Html(page) = entry_list(&[entry(1, "Hi", "there")], &chrome(false));
        assert!(page.contains(r#"<a href="/entries/1">Hi</a>"#));
        assert!(!page.contains(r#"action="/add""#));
        assert!(!page.contains("/entries/1/delete"));
        assert!(page.contains(r#"href="/login""#));
    }

    #[test]
    fn list_shows_write_controls_when_logged_in() {
        let Html(page) = entry_list(&[entry(1, "Hi", "there")], &chrome(true));
        assert!(page.contains(r#"action="/add""#));
        assert!(page.contains("/entries/1/delete"));
        assert!(page.contains(r#"href="/logout""#));
    }

    #[test]
    fn empty_list_says_so() {
        let Html(page) = entry_list(&[], &chrome(false));
        assert!(page.contains("No entries here so far"));
    }

    #[test]
    fn entry_text_is_escaped() {
        let Html(page) = entry_detail(&entry(2, "<b>bold</b>", "a & b"), &chrome(false));
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(page.contains("a &amp; b"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let Html(page) = edit_form(&entry(4, "Title \"quoted\"", "Body"), &chrome(false));
        assert!(page.contains(r#"action="/entries/4/update""#));
        assert!(page.contains(r#"value="Title &quot;quoted&quot;""#));
        assert!(page.contains(">Body</textarea>"));
    }

    #[test]
    fn login_form_shows_error() {
        let Html(page) = login_form(Some("Invalid username"), &chrome(false));
        assert!(page.contains("<strong>Error:</strong> Invalid username"));

        let Html(page) = login_form(None, &chrome(false));
        assert!(!page.contains("Error:"));
    }

    #[test]
    fn flashes_render_in_layout() {
        let mut session = Session::default();
        session.flash("Entry was successfully edited");

        let chrome = Chrome::from_session(&mut session);
        let Html(page) = entry_list(&[], &chrome);

        assert!(page.contains(r#"<div class="flash">Entry was successfully edited</div>"#));
        assert!(session.take_flashes().is_empty());
    }
}
