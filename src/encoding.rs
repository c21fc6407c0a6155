//! Encoding safety for text handed to the PDF backend.
//!
//! The report is written with the builtin Helvetica font, which only covers a single-byte
//! character set. Every string is folded into the printable part of ISO-8859-1 that the
//! WinAnsi encoding of the builtin fonts accepts before it reaches a rendering primitive, so
//! the backend never rejects a glyph.

use std::borrow::Cow;

/// Character substituted for anything outside the supported repertoire.
pub const SUBSTITUTE: char = '?';

const NO_BREAK_SPACE: char = '\u{a0}';
const SOFT_HYPHEN: char = '\u{ad}';

/// Returns whether `ch` can be printed with a builtin font.
///
/// The no-break space and the soft hyphen are ISO-8859-1 code points without a WinAnsi
/// mapping, so they are excluded.
pub fn is_representable(ch: char) -> bool {
    matches!(ch, '\u{20}'..='\u{7e}' | '\u{a1}'..='\u{ac}' | '\u{ae}'..='\u{ff}')
}

/// Folds `text` into the representable repertoire.
///
/// A no-break space becomes a plain space and a soft hyphen is dropped; every other character
/// outside the repertoire is replaced with [`SUBSTITUTE`]. Borrows the input unchanged when
/// nothing needs replacing.
pub fn to_single_byte(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_representable) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .filter(|&ch| ch != SOFT_HYPHEN)
            .map(|ch| match ch {
                NO_BREAK_SPACE => ' ',
                ch if is_representable(ch) => ch,
                _ => SUBSTITUTE,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_text_is_borrowed() {
        let text = "Grâce à l'équipe, le contrôleur reçoit ses dépendances.";
        assert!(matches!(to_single_byte(text), Cow::Borrowed(_)));
    }

    #[test]
    fn characters_outside_latin1_are_substituted() {
        assert_eq!(to_single_byte("mise en œuvre"), "mise en ?uvre");
        assert_eq!(to_single_byte("coût → 5€"), "coût ? 5?");
        assert_eq!(to_single_byte("emoji 🚀!"), "emoji ?!");
    }

    #[test]
    fn control_characters_are_substituted() {
        assert_eq!(to_single_byte("a\tb"), "a?b");
        assert_eq!(to_single_byte("x\u{85}y"), "x?y");
    }

    #[test]
    fn no_break_space_and_soft_hyphen_are_folded() {
        assert!(!is_representable('\u{a0}'));
        assert!(!is_representable('\u{ad}'));
        assert_eq!(to_single_byte("Total\u{a0}: 5"), "Total : 5");
        assert_eq!(to_single_byte("pro\u{ad}jet"), "projet");
    }

    #[test]
    fn folded_text_stays_in_the_repertoire() {
        let every: String = ('\u{0}'..='\u{2ff}').collect();
        assert!(to_single_byte(&every).chars().all(is_representable));
    }

    #[test]
    fn substitution_preserves_character_count() {
        let input = "Ünïcødé ✓ ∑";
        assert_eq!(
            to_single_byte(input).chars().count(),
            input.chars().count()
        );
    }
}
