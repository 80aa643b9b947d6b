//! Handle generation
//!
//! A handle is the URL-safe slug that identifies a relationship. Handles are
//! lowercase runs of letters and digits joined by single dashes.

/// Maximum length of a handle, in characters
pub const MAX_HANDLE_LENGTH: usize = 255;

const DELIMITER: char = '-';

/// Turn free text into a handle
///
/// Apostrophes, quotes and full stops are dropped outright so that
/// `"Editor's picks"` becomes `editors-picks` rather than `editor-s-picks`.
/// Whitespace and other punctuation separate words.
///
/// # Examples
///
/// ```
/// use trellis_domain::create_handle;
///
/// assert_eq!(create_handle("Authors"), "authors");
/// assert_eq!(create_handle("  Blog Posts & Tags "), "blog-posts-tags");
/// assert_eq!(create_handle("Editor's picks"), "editors-picks");
/// ```
pub fn create_handle(text: &str) -> String {
    let mut handle = String::with_capacity(text.len());
    let mut pending_delimiter = false;

    for c in text.trim().chars() {
        if matches!(c, '.' | '\'' | '"') {
            continue;
        }

        if is_separator(c) {
            pending_delimiter = !handle.is_empty();
            continue;
        }

        if pending_delimiter {
            handle.push(DELIMITER);
            pending_delimiter = false;
        }
        handle.extend(c.to_lowercase());
    }

    if handle.chars().count() > MAX_HANDLE_LENGTH {
        handle = handle.chars().take(MAX_HANDLE_LENGTH).collect();
    }

    handle.trim_end_matches(DELIMITER).to_string()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation() || matches!(c, '‘' | '’' | '…')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_name() {
        assert_eq!(create_handle("Authors"), "authors");
    }

    #[test]
    fn test_punctuation_separates_words() {
        assert_eq!(create_handle("Posts/Comments: linked!"), "posts-comments-linked");
        assert_eq!(create_handle("snake_case_name"), "snake-case-name");
        assert_eq!(create_handle("--already-a-handle--"), "already-a-handle");
    }

    #[test]
    fn test_dropped_characters() {
        assert_eq!(create_handle("v1.2 \"final\""), "v12-final");
        assert_eq!(create_handle("Editor’s picks…"), "editor-s-picks");
    }

    #[test]
    fn test_unicode_letters_kept() {
        assert_eq!(create_handle("Über Café"), "über-café");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(create_handle(""), "");
        assert_eq!(create_handle("  \t "), "");
        assert_eq!(create_handle("?!"), "");
    }

    #[test]
    fn test_length_cap() {
        let long = "a".repeat(300);
        assert_eq!(create_handle(&long).len(), MAX_HANDLE_LENGTH);

        let words = "ab ".repeat(100);
        let handle = create_handle(&words);
        assert!(handle.chars().count() <= MAX_HANDLE_LENGTH);
        assert!(!handle.ends_with('-'));
    }

    proptest! {
        #[test]
        fn prop_handle_is_idempotent(text in "[a-zA-Z0-9 .,'_!?&-]{0,300}") {
            let once = create_handle(&text);
            prop_assert_eq!(create_handle(&once), once);
        }

        #[test]
        fn prop_handle_is_url_safe(text in "\\PC{0,80}") {
            let handle = create_handle(&text);
            prop_assert!(!handle.starts_with('-'));
            prop_assert!(!handle.ends_with('-'));
            prop_assert!(!handle.contains("--"));
            prop_assert!(!handle.chars().any(|c| c.is_whitespace() || (c.is_ascii_punctuation() && c != '-')));
        }
    }
}
