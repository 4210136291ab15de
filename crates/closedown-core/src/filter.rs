//! Filter criteria and the filter pipeline.
//!
//! Each dimension is an `Option`: `None` means the selector is on "all".
//! The `"all"` string only exists at the parsing boundary ([`parse_selection`]).

use std::str::FromStr;

use thiserror::Error;

use crate::classify::{ShutdownStatus, early_close_yes, shutdown_status};
use crate::record::{Agreement, Dataset, EntityType};

/// Selector value that disables a filter dimension.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {dimension} selection: {value:?}")]
pub struct ParseSelectionError {
    pub dimension: &'static str,
    pub value: String,
}

impl ParseSelectionError {
    pub fn new(dimension: &'static str, value: &str) -> Self {
        Self {
            dimension,
            value: value.to_string(),
        }
    }
}

impl FromStr for EntityType {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ncce" => Ok(Self::Ncce),
            "cce" => Ok(Self::Cce),
            "company" => Ok(Self::Company),
            _ => Err(ParseSelectionError::new("entity", s)),
        }
    }
}

/// Parse a selector value, mapping `"all"` (or an empty value) to `None`.
pub fn parse_selection<T: FromStr>(value: &str) -> Result<Option<T>, T::Err> {
    let v = value.trim();
    if v.is_empty() || v.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    v.parse().map(Some)
}

/// Parse an early-close selector (`yes`/`no`/`all`).
pub fn parse_early_close(value: &str) -> Result<Option<bool>, ParseSelectionError> {
    let v = value.trim();
    if v.is_empty() || v.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    match v.to_ascii_lowercase().as_str() {
        "yes" => Ok(Some(true)),
        "no" => Ok(Some(false)),
        _ => Err(ParseSelectionError::new("early close", value)),
    }
}

/// Free-text selectors (portfolio, listed as) only treat `"all"` specially.
pub fn parse_text_selection(value: &str) -> Option<String> {
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}

/// The active search query and filter selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Raw search box text; matching trims and lowercases it.
    pub query: String,
    pub shutdown: Option<ShutdownStatus>,
    pub entity: Option<EntityType>,
    /// Exact portfolio.
    pub portfolio: Option<String>,
    /// `Some(true)` keeps only early-close agreements, `Some(false)` the rest.
    pub early_close: Option<bool>,
    /// Exact "listed as" heading.
    pub listed_as: Option<String>,
}

impl Criteria {
    /// True when nothing is filtered out.
    pub fn is_relaxed(&self) -> bool {
        self.query.trim().is_empty()
            && self.shutdown.is_none()
            && self.entity.is_none()
            && self.portfolio.is_none()
            && self.early_close.is_none()
            && self.listed_as.is_none()
    }

    /// Clear the query and put every filter back on "all".
    pub fn relax(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, a: &Agreement) -> bool {
        self.matches_query(a)
            && self
                .shutdown
                .is_none_or(|s| shutdown_status(a) == s)
            && self.entity.is_none_or(|e| a.entity_type == e)
            && self
                .portfolio
                .as_deref()
                .is_none_or(|p| a.portfolio == p)
            && self.early_close.is_none_or(|yes| early_close_yes(a) == yes)
            && self
                .listed_as
                .as_deref()
                .is_none_or(|l| a.ea_heading == l)
    }

    fn matches_query(&self, a: &Agreement) -> bool {
        let q = self.query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        search_haystack(a).contains(&q)
    }
}

/// Lowercased text the search box matches against.
pub fn search_haystack(a: &Agreement) -> String {
    [
        a.portfolio.as_str(),
        a.agency.as_str(),
        a.name.as_deref().unwrap_or_default(),
        a.ea_heading.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Records passing every criterion, in dataset order.
pub fn filter<'a>(dataset: &'a Dataset, criteria: &Criteria) -> Vec<&'a Agreement> {
    dataset
        .records()
        .iter()
        .filter(|a| criteria.matches(a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(portfolio: &str, agency: &str, entity_type: EntityType) -> Agreement {
        Agreement {
            portfolio: portfolio.into(),
            agency: agency.into(),
            entity_type,
            ..Default::default()
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            Agreement {
                name: Some("Treasury Enterprise Agreement 2024".into()),
                clauses: "Clause 40".into(),
                early_close: Some("24 December".into()),
                ..rec("Treasury", "Department of the Treasury", EntityType::Ncce)
            },
            Agreement {
                ea_heading: "Treasury group".into(),
                ..rec("Finance", "Future Fund", EntityType::Cce)
            },
            Agreement {
                clauses: "No shutdown".into(),
                ..rec("Defence", "ASC Pty Ltd", EntityType::Company)
            },
            Agreement {
                page_start: Some(3.0),
                early_close: Some("n/a".into()),
                ..rec("Health", "Department of Health", EntityType::Ncce)
            },
        ])
    }

    fn agencies(rows: &[&Agreement]) -> Vec<String> {
        rows.iter().map(|a| a.agency.clone()).collect()
    }

    #[test]
    fn empty_criteria_match_everything() {
        let ds = sample();
        let c = Criteria::default();
        assert!(c.is_relaxed());
        assert_eq!(filter(&ds, &c).len(), ds.len());
    }

    #[test]
    fn search_covers_portfolio_agency_name_and_listed_as() {
        let ds = sample();
        let c = Criteria {
            query: "  TREASURY ".into(),
            ..Default::default()
        };
        assert_eq!(
            agencies(&filter(&ds, &c)),
            vec!["Department of the Treasury", "Future Fund"]
        );
    }

    #[test]
    fn search_ignores_clauses_and_description() {
        let ds = sample();
        let c = Criteria {
            query: "clause 40".into(),
            ..Default::default()
        };
        assert!(filter(&ds, &c).is_empty());
    }

    #[test]
    fn dimensions_combine_with_and() {
        let ds = sample();
        let c = Criteria {
            entity: Some(EntityType::Ncce),
            shutdown: Some(ShutdownStatus::Yes),
            early_close: Some(false),
            ..Default::default()
        };
        assert_eq!(agencies(&filter(&ds, &c)), vec!["Department of Health"]);
        assert!(!c.is_relaxed());
    }

    #[test]
    fn portfolio_and_listed_as_are_exact() {
        let ds = sample();
        let c = Criteria {
            portfolio: Some("Treas".into()),
            ..Default::default()
        };
        assert!(filter(&ds, &c).is_empty());
        let c = Criteria {
            listed_as: Some("Treasury group".into()),
            ..Default::default()
        };
        assert_eq!(agencies(&filter(&ds, &c)), vec!["Future Fund"]);
    }

    #[test]
    fn relax_resets_every_dimension() {
        let mut c = Criteria {
            query: "x".into(),
            shutdown: Some(ShutdownStatus::No),
            entity: Some(EntityType::Cce),
            portfolio: Some("Health".into()),
            early_close: Some(true),
            listed_as: Some("y".into()),
        };
        c.relax();
        assert_eq!(c, Criteria::default());
    }

    #[test]
    fn selections_parse_all_as_none() {
        assert_eq!(parse_selection::<EntityType>("all").unwrap(), None);
        assert_eq!(
            parse_selection::<EntityType>("company").unwrap(),
            Some(EntityType::Company)
        );
        assert_eq!(
            parse_selection::<ShutdownStatus>("unknown").unwrap(),
            Some(ShutdownStatus::Unknown)
        );
        assert!(parse_selection::<EntityType>("agency").is_err());
        assert_eq!(parse_early_close("ALL").unwrap(), None);
        assert_eq!(parse_early_close("yes").unwrap(), Some(true));
        assert!(parse_early_close("sometimes").is_err());
        assert_eq!(parse_text_selection("all"), None);
        assert_eq!(parse_text_selection("Health"), Some("Health".to_string()));
    }

    #[test]
    fn selection_error_names_dimension() {
        let err = parse_early_close("maybe").unwrap_err();
        assert_eq!(err.to_string(), "invalid early close selection: \"maybe\"");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn entity() -> impl Strategy<Value = EntityType> {
            prop_oneof![
                Just(EntityType::Ncce),
                Just(EntityType::Cce),
                Just(EntityType::Company),
            ]
        }

        fn agreement() -> impl Strategy<Value = Agreement> {
            (
                prop_oneof![Just("Health"), Just("Treasury")],
                "[a-z ]{0,8}",
                entity(),
                prop_oneof![Just(""), Just("No shutdown"), Just("Clause 4")],
                prop_oneof![Just(None), Just(Some("Yes".to_string()))],
                prop_oneof![Just(""), Just("Health EA"), Just("Treasury EA")],
            )
                .prop_map(|(p, a, e, c, early, heading)| Agreement {
                    clauses: c.to_string(),
                    early_close: early,
                    ea_heading: heading.to_string(),
                    ..rec(p, &a, e)
                })
        }

        fn criteria() -> impl Strategy<Value = Criteria> {
            (
                "[a-z]{0,2}",
                proptest::option::of(prop_oneof![
                    Just(ShutdownStatus::Yes),
                    Just(ShutdownStatus::No),
                    Just(ShutdownStatus::Unknown),
                ]),
                proptest::option::of(entity()),
                proptest::option::of(prop_oneof![
                    Just("Health".to_string()),
                    Just("Treasury".to_string())
                ]),
                proptest::option::of(any::<bool>()),
                proptest::option::of(prop_oneof![
                    Just(String::new()),
                    Just("Health EA".to_string()),
                    Just("Treasury EA".to_string())
                ]),
            )
                .prop_map(
                    |(query, shutdown, entity, portfolio, early_close, listed_as)| Criteria {
                        query,
                        shutdown,
                        entity,
                        portfolio,
                        early_close,
                        listed_as,
                    },
                )
        }

        /// Split criteria into one single-dimension criteria per active filter.
        fn split(c: &Criteria) -> Vec<Criteria> {
            vec![
                Criteria {
                    query: c.query.clone(),
                    ..Default::default()
                },
                Criteria {
                    shutdown: c.shutdown,
                    ..Default::default()
                },
                Criteria {
                    entity: c.entity,
                    ..Default::default()
                },
                Criteria {
                    portfolio: c.portfolio.clone(),
                    ..Default::default()
                },
                Criteria {
                    early_close: c.early_close,
                    ..Default::default()
                },
                Criteria {
                    listed_as: c.listed_as.clone(),
                    ..Default::default()
                },
            ]
        }

        fn apply_in_sequence(ds: &Dataset, parts: &[Criteria]) -> Vec<Agreement> {
            let mut rows: Vec<Agreement> = ds.records().to_vec();
            for part in parts {
                rows.retain(|a| part.matches(a));
            }
            rows
        }

        proptest! {
            #[test]
            fn filtering_is_idempotent(
                recs in proptest::collection::vec(agreement(), 0..12),
                c in criteria(),
            ) {
                let ds = Dataset::new(recs);
                let once: Vec<Agreement> = filter(&ds, &c).into_iter().cloned().collect();
                let again = Dataset::new(once.clone());
                let twice: Vec<Agreement> = filter(&again, &c).into_iter().cloned().collect();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn dimensions_commute(
                recs in proptest::collection::vec(agreement(), 0..12),
                c in criteria(),
            ) {
                let ds = Dataset::new(recs);
                let combined: Vec<Agreement> = filter(&ds, &c).into_iter().cloned().collect();
                let mut parts = split(&c);
                let forward = apply_in_sequence(&ds, &parts);
                parts.reverse();
                let backward = apply_in_sequence(&ds, &parts);
                prop_assert_eq!(&combined, &forward);
                prop_assert_eq!(&combined, &backward);
            }
        }
    }
}
