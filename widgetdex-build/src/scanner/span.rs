//! Brace-depth walk used to find a struct body.

use std::ops::Range;

/// Find the body that starts right after an opening `{`.
///
/// `open_at` is the byte offset just past the opening brace. Returns the range
/// from `open_at` up to (not including) the brace that brings the depth back
/// to zero, or `None` if the text ends first.
///
/// This is a plain delimiter count. Braces inside string literals, char
/// literals or comments are counted like any other brace.
pub fn find_balanced_span(text: &str, open_at: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    if open_at > bytes.len() {
        return None;
    }

    let mut depth = 1usize;
    for (offset, byte) in bytes[open_at..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open_at..open_at + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_after_first_brace(text: &str) -> Option<&str> {
        let open = text.find('{')? + 1;
        find_balanced_span(text, open).map(|r| &text[r])
    }

    #[test]
    fn test_flat_body() {
        assert_eq!(body_after_first_brace("struct A { x: u32 }"), Some(" x: u32 "));
    }

    #[test]
    fn test_nested_body() {
        let text = "struct A { a: B<{ 1 }>, c: D { e: F } } trailing { }";
        assert_eq!(
            body_after_first_brace(text),
            Some(" a: B<{ 1 }>, c: D { e: F } ")
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(body_after_first_brace("struct A {}"), Some(""));
    }

    #[test]
    fn test_unbalanced_returns_none() {
        assert_eq!(body_after_first_brace("struct A { x: u32"), None);
    }

    #[test]
    fn test_open_past_end() {
        assert_eq!(find_balanced_span("{}", 10), None);
    }

    #[test]
    fn test_braces_in_string_literals_are_counted() {
        // Known limitation: the `}` inside the literal closes the body early.
        let text = r#"struct A { #[live("}")] x: String, y: u32 }"#;
        assert_eq!(body_after_first_brace(text), Some(r#" #[live(""#));

        // Balanced braces in a literal happen to work.
        let text = r#"struct A { #[live("{}")] x: String }"#;
        assert_eq!(body_after_first_brace(text), Some(r#" #[live("{}")] x: String "#));
    }

    #[test]
    fn test_multibyte_text() {
        let text = "struct Ä { ü: Ö }";
        assert_eq!(body_after_first_brace(text), Some(" ü: Ö "));
    }
}
