//! # Clause Display Order
//!
//! Clauses are listed by their reference string: the up-to-three reference
//! labels joined with single spaces (`"4.1 (a) (1)"`). Clauses without any
//! label sort last. Reference strings compare under German collation.
//!
//! ## Collation
//!
//! [`compare_german`] is a three-level comparison in the manner of DIN 5007
//! variant 1, which is what German dictionary order uses:
//!
//! 1. **Primary**: base letters, ignoring case and diacritics. `ä` sorts as
//!    `a`, `ß` as `ss`. Character classes come first: whitespace, then
//!    punctuation (`§` included), then other symbols, then digits, then
//!    letters. So `§ 3` sorts before `1` and `1` before `Art. 5`.
//! 2. **Secondary**: diacritics. `Masse` before `Maße`, `Arger` before
//!    `Ärger`.
//! 3. **Tertiary**: case, lowercase first.
//!
//! Strings equal on all three levels compare equal, and the stable sort
//! keeps their input order. There is no numeric collation: `4.10` sorts
//! before `4.2`.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use cmx_core::MatrixClause;

/// The clause's reference labels joined with single spaces, skipping absent
/// or blank levels.
pub fn reference_string(clause: &MatrixClause) -> String {
    clause
        .references
        .iter()
        .filter_map(|r| r.label.as_deref())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Order clauses for display. Returns references into the input slice.
pub fn sort_clauses(clauses: &[MatrixClause]) -> Vec<&MatrixClause> {
    let mut keyed: Vec<(String, &MatrixClause)> =
        clauses.iter().map(|c| (reference_string(c), c)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_references(a, b));
    keyed.into_iter().map(|(_, c)| c).collect()
}

fn compare_references(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare_german(a, b),
    }
}

/// Compare two strings under German collation.
pub fn compare_german(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
}

/// Base letters only: decomposed, marks stripped, lowercased, `ß` expanded.
/// Each character is ranked by its class before its code point.
fn primary_key(s: &str) -> Vec<(CharClass, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(fold_char)
        .map(|c| (CharClass::of(c), c))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            Self::Whitespace
        } else if c.is_alphabetic() {
            Self::Letter
        } else if c.is_numeric() {
            Self::Digit
        } else if is_punctuation(c) {
            Self::Punctuation
        } else {
            Self::Symbol
        }
    }
}

fn is_punctuation(c: char) -> bool {
    match c {
        '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' => false,
        '§' | '¶' | '«' | '»' | '„' | '‚' | '“' | '”' | '‘' | '’' | '‹' | '›' => true,
        '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205E}' => true,
        _ => c.is_ascii_punctuation(),
    }
}

/// Decomposed and lowercased, marks and `ß` kept. Unmarked letters sort
/// before marked ones because a combining mark is compared against the next
/// base letter, or against nothing.
fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Case of each letter, lowercase first.
fn tertiary_key(s: &str) -> Vec<bool> {
    s.chars()
        .filter(|c| c.is_alphabetic())
        .map(char::is_uppercase)
        .collect()
}

fn fold_char(c: char) -> Vec<char> {
    match c {
        'ß' | 'ẞ' => vec!['s', 's'],
        _ => c.to_lowercase().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(labels: [Option<&str>; 3]) -> MatrixClause {
        let mut c = MatrixClause::new();
        for (level, label) in labels.iter().enumerate() {
            c.set_reference(level, *label, None);
        }
        c
    }

    #[test]
    fn test_reference_string_skips_absent_levels() {
        assert_eq!(reference_string(&clause([Some("4.1"), None, Some("(1)")])), "4.1 (1)");
        assert_eq!(reference_string(&clause([None, Some(" "), None])), "");
        assert_eq!(
            reference_string(&clause([Some("Art. 5"), Some("(a)"), Some("(ii)")])),
            "Art. 5 (a) (ii)"
        );
    }

    #[test]
    fn test_unreferenced_clauses_sort_last() {
        let clauses = vec![
            clause([None, None, None]),
            clause([Some("B"), None, None]),
            clause([Some("A"), None, None]),
        ];
        let refs: Vec<String> = sort_clauses(&clauses).into_iter().map(reference_string).collect();
        assert_eq!(refs, vec!["A", "B", ""]);
    }

    #[test]
    fn test_stable_for_equal_references() {
        let first = clause([Some("§ 3"), None, None]);
        let second = clause([Some("§ 3"), None, None]);
        let clauses = vec![first.clone(), second.clone()];
        let sorted = sort_clauses(&clauses);
        assert_eq!(sorted[0].id, first.id);
        assert_eq!(sorted[1].id, second.id);
    }

    #[test]
    fn test_umlauts_sort_with_base_letter() {
        assert_eq!(compare_german("Ärger", "Brief"), Ordering::Less);
        assert_eq!(compare_german("Öl", "Ofen"), Ordering::Greater);
        assert_eq!(compare_german("Zürich", "Zypern"), Ordering::Less);
    }

    #[test]
    fn test_accent_is_secondary() {
        assert_eq!(compare_german("Arger", "Ärger"), Ordering::Less);
        assert_eq!(compare_german("Masse", "Maße"), Ordering::Less);
    }

    #[test]
    fn test_case_is_tertiary() {
        assert_eq!(compare_german("abschnitt", "Abschnitt"), Ordering::Less);
        assert_eq!(compare_german("Abschnitt", "anlage"), Ordering::Less);
    }

    #[test]
    fn test_no_numeric_collation() {
        assert_eq!(compare_german("4.10", "4.2"), Ordering::Less);
        assert_eq!(compare_german("4.1", "4.1 (a)"), Ordering::Less);
        assert_eq!(compare_german("§ 3", "§ 10"), Ordering::Greater);
    }

    #[test]
    fn test_section_sign_before_digits_and_letters() {
        assert_eq!(compare_german("§ 3", "Art. 5"), Ordering::Less);
        assert_eq!(compare_german("§ 3", "1"), Ordering::Less);
        assert_eq!(compare_german("1", "Art. 5"), Ordering::Less);
        assert_eq!(compare_german("§§ 3", "§ 3"), Ordering::Greater);
    }

    #[test]
    fn test_character_classes() {
        assert_eq!(compare_german("Art 5", "Art. 5"), Ordering::Less);
        assert_eq!(compare_german("(a)", "a"), Ordering::Less);
        assert_eq!(compare_german("(a)", "+a"), Ordering::Less);
        assert_eq!(compare_german("+a", "1a"), Ordering::Less);
        assert_eq!(compare_german("-1", "+1"), Ordering::Less);
    }

    #[test]
    fn test_legal_references_in_display_order() {
        let clauses = vec![
            clause([Some("Art. 5"), None, None]),
            clause([Some("Anhang I"), None, None]),
            clause([Some("1.2"), None, None]),
            clause([Some("§ 3"), Some("Abs. 1"), None]),
            clause([Some("§ 3"), None, None]),
        ];
        let refs: Vec<String> = sort_clauses(&clauses).into_iter().map(reference_string).collect();
        assert_eq!(refs, vec!["§ 3", "§ 3 Abs. 1", "1.2", "Anhang I", "Art. 5"]);
    }
}
