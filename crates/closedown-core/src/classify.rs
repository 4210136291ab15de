//! Shutdown and early-close classification.
//!
//! Both classifiers are pure functions of a record's current field values.
//! Nothing is cached on the record, so a classification can never go stale.

use std::fmt;
use std::str::FromStr;

use crate::filter::ParseSelectionError;
use crate::record::Agreement;

/// Phrases that mark a clause as explicitly "no shutdown".
///
/// Matched as lowercase substrings. The bare `"no"` entry matches any clause
/// text containing those two letters ("no earlier than ...", "announced").
pub const NEGATIVE_CLAUSE_PHRASES: &[&str] = &[
    "no",
    "no shutdown",
    "no closedown",
    "no christmas shutdown",
    "no christmas closedown",
    "not closed",
    "does not close",
    "no annual shutdown",
];

/// Normalised early-close values that mean "no early close".
pub const NEGATIVE_EARLY_CLOSE: &[&str] = &[
    "no",
    "none",
    "n/a",
    "n.a.",
    "n.a",
    "na",
    "nil",
    "not applicable",
    "not stated",
    "no early close",
    "no early closure",
    "-",
    "\u{2014}",
    "\u{2013}",
];

/// Whether an agreement provides for an end-of-year shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutdownStatus {
    Yes,
    No,
    Unknown,
}

impl ShutdownStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Unknown => "unknown",
        }
    }

    /// Badge and export text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ShutdownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShutdownStatus {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseSelectionError::new("shutdown", s)),
        }
    }
}

/// True when the clause text contains any explicit "no shutdown" phrase.
pub fn is_explicit_no(clauses: &str) -> bool {
    if clauses.is_empty() {
        return false;
    }
    let lower = clauses.to_lowercase();
    NEGATIVE_CLAUSE_PHRASES.iter().any(|p| lower.contains(p))
}

/// Classify an agreement's shutdown provision.
///
/// `No` when the clauses carry a negative phrase; otherwise `Yes` when there
/// is any clause text or a PDF page reference; otherwise `Unknown`.
pub fn shutdown_status(a: &Agreement) -> ShutdownStatus {
    if is_explicit_no(&a.clauses) {
        return ShutdownStatus::No;
    }
    let has_text = !a.clauses.trim().is_empty();
    if has_text || a.page().is_some() {
        ShutdownStatus::Yes
    } else {
        ShutdownStatus::Unknown
    }
}

pub fn has_shutdown(a: &Agreement) -> bool {
    shutdown_status(a) == ShutdownStatus::Yes
}

/// Trimmed early-close text exactly as written in the register.
pub fn early_close_raw(a: &Agreement) -> &str {
    a.early_close.as_deref().unwrap_or_default().trim()
}

/// True when the text is empty or one of the negative tokens.
pub fn is_early_no_text(text: &str) -> bool {
    let normalised = text.trim().to_lowercase();
    normalised.is_empty() || NEGATIVE_EARLY_CLOSE.contains(&normalised.as_str())
}

pub fn early_close_yes(a: &Agreement) -> bool {
    !is_early_no_text(early_close_raw(a))
}

/// Badge text for the early-close column: `"Yes, <raw text>"` or `"No"`.
pub fn early_close_text(a: &Agreement) -> String {
    if early_close_yes(a) {
        format!("Yes, {}", early_close_raw(a))
    } else {
        "No".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_clauses(clauses: &str, page_start: Option<f64>) -> Agreement {
        Agreement {
            clauses: clauses.into(),
            page_start,
            ..Default::default()
        }
    }

    fn with_early(early: Option<&str>) -> Agreement {
        Agreement {
            early_close: early.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_no_phrase_wins() {
        let a = with_clauses("No shutdown required", Some(4.0));
        assert_eq!(shutdown_status(&a), ShutdownStatus::No);
    }

    #[test]
    fn page_reference_alone_is_yes() {
        let a = with_clauses("", Some(12.0));
        assert_eq!(shutdown_status(&a), ShutdownStatus::Yes);
        assert!(has_shutdown(&a));
    }

    #[test]
    fn nothing_known_is_unknown() {
        let a = with_clauses("", Some(f64::NAN));
        assert_eq!(shutdown_status(&a), ShutdownStatus::Unknown);
        let a = with_clauses("   ", None);
        assert_eq!(shutdown_status(&a), ShutdownStatus::Unknown);
    }

    #[test]
    fn clause_text_is_yes() {
        let a = with_clauses("Clause 23.4", None);
        assert_eq!(shutdown_status(&a), ShutdownStatus::Yes);
    }

    #[test]
    fn bare_no_substring_matches_unrelated_text() {
        // "no earlier than" contains "no"; the broad match is kept.
        let a = with_clauses("Office closes no earlier than 1 January", None);
        assert_eq!(shutdown_status(&a), ShutdownStatus::No);
        let a = with_clauses("Announced closure period, clause 9", None);
        assert_eq!(shutdown_status(&a), ShutdownStatus::No);
    }

    #[test]
    fn negative_match_is_case_insensitive() {
        assert!(is_explicit_no("DOES NOT CLOSE"));
        assert!(!is_explicit_no(""));
        assert!(!is_explicit_no("Clause 45"));
    }

    #[test]
    fn early_close_negatives() {
        for token in [
            "N/A", "none", " nil ", "Not stated", "—", "–", "-", "n.a.", "No early closure",
        ] {
            assert!(!early_close_yes(&with_early(Some(token))), "{token:?}");
        }
        assert!(!early_close_yes(&with_early(None)));
        assert!(!early_close_yes(&with_early(Some("   "))));
    }

    #[test]
    fn early_close_positive_keeps_raw_text() {
        let a = with_early(Some(" 24 December "));
        assert!(early_close_yes(&a));
        assert_eq!(early_close_text(&a), "Yes, 24 December");
        assert_eq!(early_close_text(&with_early(Some("N/A"))), "No");
    }

    #[test]
    fn shutdown_status_parses_selector_values() {
        assert_eq!("yes".parse::<ShutdownStatus>().unwrap(), ShutdownStatus::Yes);
        assert_eq!("Unknown".parse::<ShutdownStatus>().unwrap(), ShutdownStatus::Unknown);
        assert!("maybe".parse::<ShutdownStatus>().is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Classification depends only on clauses and page reference.
            #[test]
            fn shutdown_depends_only_on_clauses_and_page(
                clauses in ".{0,40}",
                page in proptest::option::of(any::<f64>()),
                agency in ".{0,20}",
                early in proptest::option::of(".{0,10}"),
            ) {
                let base = with_clauses(&clauses, page);
                let other = Agreement {
                    agency,
                    early_close: early,
                    description: "<p>x</p>".into(),
                    ..base.clone()
                };
                prop_assert_eq!(shutdown_status(&base), shutdown_status(&other));
            }

            #[test]
            fn early_close_matches_token_set(text in ".{0,20}") {
                let a = with_early(Some(&text));
                let norm = text.trim().to_lowercase();
                let negative = norm.is_empty() || NEGATIVE_EARLY_CLOSE.contains(&norm.as_str());
                prop_assert_eq!(early_close_yes(&a), !negative);
            }
        }
    }
}
