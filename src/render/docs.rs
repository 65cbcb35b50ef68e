//! Docstring layout
//!
//! Word wrapping never breaks a word. [`rewrap`] picks the first candidate
//! width whose last line is not a short dangling fragment.

/// Candidate wrap widths, in preference order
const WIDTHS: [usize; 4] = [80, 90, 100, 70];

/// A final line this short or shorter counts as dangling
const SHORT_LAST_LINE: usize = 25;

/// Greedy word wrap; `width` includes `subsequent_indent` on continuation lines
pub fn wrap(text: &str, width: usize, subsequent_indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            if !lines.is_empty() {
                current.push_str(subsequent_indent);
            }
            current.push_str(word);
            continue;
        }
        if current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(subsequent_indent);
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap `text` at the first width in `WIDTHS` whose last line is longer than
/// 25 characters, falling back to the first width
pub fn rewrap(text: &str, subsequent_indent: &str) -> String {
    let candidates: Vec<Vec<String>> = WIDTHS
        .iter()
        .map(|w| wrap(text, *w, subsequent_indent))
        .collect();
    let chosen = candidates
        .iter()
        .find(|lines| {
            lines
                .last()
                .is_some_and(|l| l.chars().count() > SHORT_LAST_LINE)
        })
        .or_else(|| candidates.first());
    chosen.map(|lines| lines.join("\n")).unwrap_or_default()
}

/// Escape text for a triple-quoted string
fn escape_block(text: &str) -> String {
    text.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
}

/// Quote a docstring body: single line in `"..."`, multiple lines in a
/// `"""` block with the quotes on their own lines
pub fn format_docstring(doc: &str) -> String {
    if doc.contains('\n') {
        format!("\"\"\"\n{}\n\"\"\"", escape_block(doc))
    } else {
        crate::util::py_string(doc)
    }
}

/// Quote a one-line docstring in `"""..."""`
pub fn format_block_line(doc: &str) -> String {
    format!("\"\"\"{}\"\"\"", escape_block(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_wrap_never_breaks_words() {
        let long = "x".repeat(30);
        let lines = wrap(&format!("a {} b", long), 10, "");
        assert_eq!(lines, vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn test_wrap_indents_continuation_lines() {
        let lines = wrap("aaa bbb ccc ddd", 9, "    ");
        assert_eq!(lines, ["aaa bbb", "    ccc", "    ddd"]);
    }

    #[test]
    fn test_rewrap_avoids_short_last_line() {
        let text = ":param number_sharing: Indicates if Signal should share its phone number when sending a message.";
        // 80 and 90 columns leave "message." dangling; 100 fits on one line
        assert_eq!(rewrap(text, "    "), text);
    }

    #[test]
    fn test_rewrap_short_text_unchanged() {
        assert_eq!(rewrap("Show a list of known sticker packs.", ""), "Show a list of known sticker packs.");
        assert_eq!(rewrap("Short.", ""), "Short.");
    }

    #[test]
    fn test_rewrap_hanging_indent() {
        let text = ":param admins: Specify one or more members to make a group admin, required if you're currently the only admin.";
        assert_eq!(
            rewrap(text, "    "),
            ":param admins: Specify one or more members to make a group admin, required if\n    you're currently the only admin."
        );
    }

    #[rstest]
    #[case("One line", "\"One line\"")]
    #[case("a\n\nb", "\"\"\"\na\n\nb\n\"\"\"")]
    #[case("say \"hi\"", "\"say \\\"hi\\\"\"")]
    fn test_format_docstring(#[case] doc: &str, #[case] expected: &str) {
        assert_eq!(format_docstring(doc), expected);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(rewrap("", ""), "");
        assert!(wrap("   ", 80, "").is_empty());
    }
}
