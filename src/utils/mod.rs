//! Some utility functions

use crate::render::RenderedList;

/// Escape the characters that have a special meaning in HTML, so that user-provided text can be interpolated into markup
pub fn escape_html<S: AsRef<str>>(text: S) -> String {
    let text = text.as_ref();
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '`' => escaped.push_str("&#x60;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// A debug utility that pretty-prints a task list
pub fn print_task_list(list: &RenderedList) {
    for line in list.to_text().lines() {
        println!("    {}", line);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
        assert_eq!(escape_html("`x`"), "&#x60;x&#x60;");
        assert_eq!(escape_html("Média"), "Média");
    }
}
