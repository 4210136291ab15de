//! Stable row anchors and direct links.
//!
//! An anchor is `entry-<slug(portfolio)>-<slug(agency)>`. It is what the
//! navigation fragment carries and what "copy link" hands out; the slug rules
//! are part of every shared link and must stay fixed.

use unicode_normalization::UnicodeNormalization;

/// Prefix shared by every row anchor.
pub const ANCHOR_PREFIX: &str = "entry-";

/// Slug a label for use in an anchor.
///
/// NFKD-decompose, drop everything that is not an ASCII word character,
/// whitespace or `-`, trim, collapse whitespace runs into a single `-`, and
/// lowercase. Accented letters survive as their base letter.
pub fn slugify(s: &str) -> String {
    let kept: String = s
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase()
}

/// Anchor for a portfolio/agency pair.
pub fn anchor_for(portfolio: &str, agency: &str) -> String {
    format!("{ANCHOR_PREFIX}{}-{}", slugify(portfolio), slugify(agency))
}

/// Anchor carried by a navigation fragment, without the leading `#`.
///
/// Returns `None` for an empty fragment.
pub fn fragment_anchor(fragment: &str) -> Option<&str> {
    let anchor = fragment.strip_prefix('#').unwrap_or(fragment);
    (!anchor.is_empty()).then_some(anchor)
}

/// Page URL with any existing fragment replaced by `#<anchor>`.
pub fn direct_link(page_url: &str, anchor: &str) -> String {
    let base = page_url.split_once('#').map_or(page_url, |(b, _)| b);
    format!("{base}#{anchor}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_strips_punctuation_and_hyphenates() {
        assert_eq!(slugify("Attorney-General's"), "attorney-generals");
        assert_eq!(
            slugify("Parliamentary Departments (not a portfolio)"),
            "parliamentary-departments-not-a-portfolio"
        );
        assert_eq!(slugify("  Prime   Minister\tand Cabinet "), "prime-minister-and-cabinet");
    }

    #[test]
    fn slug_folds_diacritics() {
        assert_eq!(slugify("Régie Café"), "regie-cafe");
    }

    #[test]
    fn slug_drops_non_latin_letters() {
        assert_eq!(slugify("Agency — 機関"), "agency");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slug_keeps_existing_hyphens_and_underscores() {
        assert_eq!(slugify("Snowy_Hydro - Ltd"), "snowy_hydro---ltd");
    }

    #[test]
    fn anchor_combines_portfolio_and_agency() {
        assert_eq!(
            anchor_for("Treasury", "Australian Taxation Office"),
            "entry-treasury-australian-taxation-office"
        );
    }

    #[test]
    fn fragment_strips_hash() {
        assert_eq!(fragment_anchor("#entry-a-b"), Some("entry-a-b"));
        assert_eq!(fragment_anchor("entry-a-b"), Some("entry-a-b"));
        assert_eq!(fragment_anchor("#"), None);
        assert_eq!(fragment_anchor(""), None);
    }

    #[test]
    fn direct_link_replaces_fragment() {
        assert_eq!(
            direct_link("https://example.org/ea/#entry-old", "entry-new"),
            "https://example.org/ea/#entry-new"
        );
        assert_eq!(
            direct_link("https://example.org/ea/", "entry-new"),
            "https://example.org/ea/#entry-new"
        );
    }
}
