//! Row ordering for the register table.
//!
//! Two orders are offered:
//!
//! - `az`: agency name, alphabetical.
//! - `pgpa`: grouped the way the PGPA flipchart lists bodies. Portfolio
//!   first, then departments, other non-corporate entities, corporate
//!   entities and companies, then agency name. The parliamentary departments
//!   are not a portfolio and always come last, ordered by agency alone.
//!
//! Text comparison ignores case and accents ("base" strength collation), so
//! `Énergie` and `energie` tie. Sorting is stable: tied rows keep the order
//! they had in the filtered sequence.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::filter::ParseSelectionError;
use crate::record::{Agreement, EntityType};

/// Portfolio label that holds the parliamentary departments.
pub const PARLIAMENTARY_PORTFOLIO: &str = "Parliamentary Departments (not a portfolio)";

/// User-selectable sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Agency A–Z.
    #[default]
    Alphabetical,
    /// Portfolio, then PGPA group, then agency.
    PortfolioGrouped,
}

impl SortOrder {
    /// Selector value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alphabetical => "az",
            Self::PortfolioGrouped => "pgpa",
        }
    }

    pub fn comparator(&self) -> fn(&Agreement, &Agreement) -> Ordering {
        match self {
            Self::Alphabetical => compare_az,
            Self::PortfolioGrouped => compare_pgpa,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "az" => Ok(Self::Alphabetical),
            "pgpa" => Ok(Self::PortfolioGrouped),
            _ => Err(ParseSelectionError::new("sort", s)),
        }
    }
}

/// Collation key: NFKD-decomposed, combining marks dropped, typographic
/// punctuation folded to ASCII, lowercased.
///
/// Keys compare by code point, so this is an approximation of locale
/// collation: ASCII punctuation and digits sort before letters, and letters
/// outside Latin sort after them.
pub fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(fold_punctuation)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Curly quotes, primes and dashes to their ASCII counterparts.
fn fold_punctuation(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
        '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
        _ => c,
    }
}

/// Case- and accent-insensitive comparison.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

pub fn compare_az(a: &Agreement, b: &Agreement) -> Ordering {
    collate(&a.agency, &b.agency)
}

/// PGPA group bucket: department NCCEs 0, other NCCEs 1, CCEs 2,
/// companies 3, everything else 4.
pub fn pgpa_group_index(a: &Agreement) -> u8 {
    match a.entity_type {
        EntityType::Ncce if a.agency.to_lowercase().contains("department") => 0,
        EntityType::Ncce => 1,
        EntityType::Cce => 2,
        EntityType::Company => 3,
        EntityType::Other => 4,
    }
}

pub fn is_parliamentary_portfolio(portfolio: &str) -> bool {
    portfolio
        .trim()
        .eq_ignore_ascii_case(PARLIAMENTARY_PORTFOLIO)
}

pub fn compare_pgpa(a: &Agreement, b: &Agreement) -> Ordering {
    let a_parl = is_parliamentary_portfolio(&a.portfolio);
    let b_parl = is_parliamentary_portfolio(&b.portfolio);
    match (a_parl, b_parl) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => collate(&a.agency, &b.agency),
        (false, false) => collate(&a.portfolio, &b.portfolio)
            .then_with(|| pgpa_group_index(a).cmp(&pgpa_group_index(b)))
            .then_with(|| collate(&a.agency, &b.agency)),
    }
}

/// Stable sort of borrowed rows by the selected order.
pub fn sort_agreements(rows: &mut [&Agreement], order: SortOrder) {
    let cmp = order.comparator();
    rows.sort_by(|a, b| cmp(a, b));
}
