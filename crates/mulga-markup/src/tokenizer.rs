//! Delimiter tokenizer for decomposing tag text.
//!
//! Tag bodies are taken apart in three rounds of splitting, all through
//! [`split_tokens`]: on spaces to separate the tag name from attribute
//! fragments, on `=` to separate keys from value fragments, and on `"` to
//! free a value from its quote marks.

/// Split `input` on `delimiter`, with an optional `excluder` character that
/// suspends splitting while active.
///
/// Splitting rules:
/// - A maximal run of delimiters is a single boundary and the delimiters
///   themselves are dropped. A leading run therefore yields one empty first
///   token; a trailing run yields no token at all.
/// - Each excluder occurrence toggles splitting off or on. Excluder
///   characters stay in the token text, so quoted fragments keep their
///   quotes.
/// - Empty input yields no tokens.
///
/// ```
/// use mulga_markup::split_tokens;
///
/// let plain = split_tokens("a b c", ' ', None);
/// assert_eq!(plain, vec!["a", "b", "c"]);
///
/// let quoted = split_tokens("key=\"a b\"", ' ', Some('"'));
/// assert_eq!(quoted, vec!["key=\"a b\""]);
/// ```
///
/// # Panics
///
/// Panics when `excluder` is the delimiter itself.
#[must_use]
pub fn split_tokens(input: &str, delimiter: char, excluder: Option<char>) -> Vec<String> {
    assert!(
        excluder != Some(delimiter),
        "excluder must differ from the delimiter"
    );

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut excluded = false;
    let mut ended_on_boundary = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if excluder == Some(c) {
            excluded = !excluded;
            current.push(c);
            ended_on_boundary = false;
        } else if c == delimiter && !excluded {
            // Absorb the rest of the delimiter run; it is one boundary.
            while chars.peek() == Some(&delimiter) {
                let _ = chars.next();
            }
            tokens.push(std::mem::take(&mut current));
            ended_on_boundary = true;
        } else {
            current.push(c);
            ended_on_boundary = false;
        }
    }
    if !ended_on_boundary && !input.is_empty() {
        tokens.push(current);
    }
    tokens
}
