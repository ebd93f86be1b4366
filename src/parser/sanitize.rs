//! Text cleanup for labels and time values pulled out of the markup
//!
//! The publisher pads labels with non-breaking spaces and, occasionally,
//! invisible formatting characters; both would otherwise end up in catalog
//! labels or break `HH:MM` parsing.

use scraper::ElementRef;

use crate::utils::normalize_whitespace;

/// Concatenated, cleaned text content of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    sanitize_text(&element.text().collect::<String>())
}

/// Remove invisible characters and collapse whitespace
///
/// # Examples
///
/// ```
/// use energyua::parser::sanitize::sanitize_text;
///
/// assert_eq!(sanitize_text("\u{a0}Черга\u{200B} 1.1 "), "Черга 1.1");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let visible: String = remove_zero_width(text)
        .chars()
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .collect();

    normalize_whitespace(&visible)
}

/// Remove zero-width spaces and similar invisible characters
///
/// Removes:
/// - \u{200B}-\u{200F} zero-width spaces, joiners and direction marks
/// - \u{2028}-\u{202E} separators and embedding controls
/// - \u{FEFF} byte order mark
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202E}' |
                '\u{FEFF}'
            )
        })
        .collect()
}
