//! Shared utility functions
//!
//! Case conversion and Python literal helpers used by the extractors and
//! the emitter.

/// Convert snake_case or camelCase to PascalCase
///
/// # Examples
/// ```
/// use signal_cli_bindgen::util::to_pascal_case;
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("listGroups"), "ListGroups");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert PascalCase or camelCase to snake_case
///
/// # Examples
/// ```
/// use signal_cli_bindgen::util::to_snake_case;
/// assert_eq!(to_snake_case("HelloWorld"), "hello_world");
/// assert_eq!(to_snake_case("lastUpdateTimestamp"), "last_update_timestamp");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 && !result.ends_with('_') {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            // A capital run is one word; it ends before the capital that starts the next word
            let starts_word = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase()
                    && next.is_some_and(|n| n.is_ascii_lowercase())
                    && !is_plural_suffix(&chars[i + 1..]));
            if starts_word {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Whether `rest` is the plural `s` closing an acronym, as in `IDs` or `IDsSent`
fn is_plural_suffix(rest: &[char]) -> bool {
    matches!(rest, ['s'] | ['s', '_', ..]) || matches!(rest, ['s', n, ..] if n.is_ascii_uppercase())
}

/// Render a Python string literal with double quotes
///
/// # Examples
/// ```
/// use signal_cli_bindgen::util::py_string;
/// assert_eq!(py_string("accept"), "\"accept\"");
/// ```
pub fn py_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Join names as English prose: `a`, `a or b`, `a, b, or c`
pub fn join_prose(items: &[String], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} {} {}", a, conjunction, b),
        [init @ .., last] => format!("{}, {} {}", init.join(", "), conjunction, last),
    }
}
