//! Utility functions for text manipulation.
//!
//! This module provides small string helpers used throughout the Luna bot
//! for normalizing message content and building user-facing sentences.

/// Collapses every run of whitespace into a single space and trims both ends.
///
/// # Examples
///
/// ```
/// # use luna::utils::normalise_spaces;
/// assert_eq!(normalise_spaces("  ban   alice\t now "), "ban alice now");
/// ```
pub fn normalise_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Removes the first space-delimited word and the space following it.
///
/// Returns an empty string when the text holds a single word.
pub fn remove_first_word(text: &str) -> String {
    match text.split_once(' ') {
        Some((_, rest)) => rest.to_owned(),
        None => String::new(),
    }
}

/// Returns the first space-delimited word of the text, lower-cased.
pub fn first_word(text: &str) -> String {
    text.split(' ').next().unwrap_or_default().to_lowercase()
}

/// Prefixes a word with a count, adding a plural `s` when needed.
///
/// # Examples
///
/// ```
/// # use luna::utils::pluralise;
/// assert_eq!(pluralise("argument", 1), "1 argument");
/// assert_eq!(pluralise("argument", 3), "3 arguments");
/// ```
pub fn pluralise(word: &str, count: usize) -> String {
    match count {
        1 => format!("{} {}", count, word),
        _ => format!("{} {}s", count, word),
    }
}

/// Keeps only the alphanumeric characters of a name, lower-cased.
///
/// Channel names often carry emoji or separators (`#📢-announcements`), so
/// they are compared in this form.
pub fn sanitise_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns `true` when the text is an unsigned or signed decimal number.
pub fn is_number(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok_and(|value| value.is_finite())
}
