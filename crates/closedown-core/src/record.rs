//! Agreement records and the read-only dataset they are loaded into.

use std::collections::BTreeSet;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of Commonwealth body that made the agreement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Non-corporate Commonwealth entity.
    Ncce,
    /// Corporate Commonwealth entity.
    Cce,
    /// Commonwealth company.
    Company,
    /// Anything the register does not classify.
    #[default]
    #[serde(other)]
    Other,
}

impl EntityType {
    /// Selector value, as used in filter options.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ncce => "ncce",
            Self::Cce => "cce",
            Self::Company => "company",
            Self::Other => "other",
        }
    }

    /// Short tag shown in the entity column.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Ncce => "NCCE",
            Self::Cce => "CCE",
            Self::Company => "Company",
            Self::Other => "",
        }
    }

    /// Long label shown in the entity tooltip and in exports.
    pub fn long_label(&self) -> &'static str {
        match self {
            Self::Ncce => "Non\u{2011}corporate Commonwealth entity (NCCE)",
            Self::Cce => "Corporate Commonwealth entity (CCE)",
            Self::Company => "Commonwealth company",
            Self::Other => "",
        }
    }
}

/// One enterprise agreement and its closedown provisions.
///
/// Field names follow the camelCase keys of the published data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub portfolio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity_type: EntityType,
    /// "Listed as" heading from the source register.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ea_heading: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub ea_url: Option<String>,
    /// Agreement title.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text references to the shutdown clause(s).
    #[serde(default, deserialize_with = "null_as_default")]
    pub clauses: String,
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub page_start: Option<f64>,
    #[serde(default)]
    pub early_close: Option<String>,
    /// HTML fragment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl Agreement {
    /// Starting PDF page, if the record carries a usable one.
    pub fn page(&self) -> Option<f64> {
        self.page_start.filter(|p| p.is_finite())
    }

    /// Page number as display text; empty when absent.
    pub fn page_text(&self) -> String {
        self.page().map(|p| p.to_string()).unwrap_or_default()
    }

    /// Agreement title, treating an empty string as absent.
    pub fn title(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Read-only collection of agreements, built once at load time.
///
/// Every filter, sort and render operation borrows from this context; nothing
/// mutates it after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Box<[Agreement]>,
}

impl Dataset {
    pub fn new(records: Vec<Agreement>) -> Self {
        Self {
            records: records.into_boxed_slice(),
        }
    }

    pub fn records(&self) -> &[Agreement] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-empty portfolios, sorted. Populates the portfolio filter.
    pub fn portfolios(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|a| a.portfolio.as_str()))
    }

    /// Distinct non-empty "listed as" headings (trimmed), sorted.
    pub fn listed_as(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|a| a.ea_heading.trim()))
    }
}

impl From<Vec<Agreement>> for Dataset {
    fn from(records: Vec<Agreement>) -> Self {
        Self::new(records)
    }
}

/// The data file writes `null` for blank cells.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Page references are only honoured when they are JSON numbers.
fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PageRef {
        Number(f64),
        #[allow(dead_code)]
        Other(IgnoredAny),
    }

    Ok(match Option::<PageRef>::deserialize(deserializer)? {
        Some(PageRef::Number(n)) => Some(n),
        _ => None,
    })
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    let mut out: Vec<String> = unique.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| crate::order::collate(a, b));
    out
}
