//! HTML pages
//!
//! The explorer form served at `/` and the page rendered after a form
//! submission. Result values sit in `span#name`, `span#surname` and
//! `span#dates`.

use crate::explorers::ExplorerRecord;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Famous Italian Explorers</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            max-width: 640px;
            margin: 40px auto;
            padding: 0 20px;
            color: #222;
        }
        form { margin: 24px 0; }
        input[type="text"] { padding: 6px 10px; font-size: 1em; }
        #result { padding: 12px 20px; background: #f3f4f8; border-radius: 8px; }
    </style>
</head>
<body>
    <h1>Famous Italian Explorers</h1>
    <form id="explorer-form" action="/travellers" method="post">
        <label for="surname-input">Surname</label>
        <input type="text" id="surname-input" name="surname" placeholder="Colombo">
        <input type="submit" id="submit" name="submit" value="submit">
    </form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// The form page served at `/`
pub fn render_index() -> String {
    format!("{PAGE_HEAD}{PAGE_TAIL}")
}

/// The form page followed by the looked-up explorer
pub fn render_result(record: &ExplorerRecord) -> String {
    format!(
        r#"{PAGE_HEAD}    <div id="result">
        <p>First name: <span id="name">{}</span></p>
        <p>Last name: <span id="surname">{}</span></p>
        <p>Dates: <span id="dates">{}</span></p>
    </div>
{PAGE_TAIL}"#,
        escape_html(&record.first_name),
        escape_html(&record.surname),
        escape_html(&record.dates),
    )
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
