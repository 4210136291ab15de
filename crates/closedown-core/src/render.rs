//! Projection of view state onto display rows.
//!
//! [`render`] is a pure function of the dataset and a [`ViewState`]: it
//! filters, sorts, classifies and labels every visible record and reports
//! the headline counts. Display surfaces only lay the result out.

use crate::anchor::anchor_for;
use crate::classify::{
    ShutdownStatus, early_close_text, early_close_yes, has_shutdown, shutdown_status,
};
use crate::record::{Agreement, Dataset};
use crate::view::ViewState;

/// Placeholder for absent clause or page values in the detail section.
pub const PLACEHOLDER: &str = "\u{2014}";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const WEBSITE_LINK_TEXT: &str = "(website)";
pub const EXPAND_ALL_LABEL: &str = "Expand all details";
pub const COLLAPSE_ALL_LABEL: &str = "Collapse all details";

/// Distance from the viewport bottom at which tooltips flip above.
pub const TOOLTIP_EDGE_MARGIN: f64 = 8.0;
/// Scroll offset after which the scroll-to-top control appears.
pub const BACK_TO_TOP_THRESHOLD: f64 = 250.0;

/// Headline numbers, always computed over the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub with_shutdown: usize,
    pub with_early_close: usize,
    pub total: usize,
}

impl Counts {
    pub fn of(dataset: &Dataset) -> Self {
        let records = dataset.records();
        Self {
            with_shutdown: records.iter().filter(|a| has_shutdown(a)).count(),
            with_early_close: records.iter().filter(|a| early_close_yes(a)).count(),
            total: records.len(),
        }
    }
}

/// An outbound link. `href` falls back to `#` when the record has no URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link<'a> {
    pub href: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView<'a> {
    /// Clause references, or [`PLACEHOLDER`].
    pub clauses: &'a str,
    /// PDF page, or [`PLACEHOLDER`].
    pub page: String,
    /// Link to the agreement document, when the record names one.
    pub agreement: Option<Link<'a>>,
    /// Description HTML, or [`NO_DESCRIPTION`] when the record has none.
    pub description: &'a str,
    pub has_description: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a> {
    pub anchor: String,
    pub portfolio: &'a str,
    pub agency: &'a str,
    pub website: Link<'a>,
    pub entity_short: &'static str,
    pub entity_long: &'static str,
    pub tooltip_id: String,
    pub listed_as: &'a str,
    pub clauses: &'a str,
    pub page: String,
    pub shutdown: ShutdownStatus,
    pub early_close: bool,
    pub early_close_text: String,
    pub expanded: bool,
    pub detail_id: String,
    pub detail: DetailView<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub counts: Counts,
    pub rows: Vec<RowView<'a>>,
    /// Label for the bulk expand/collapse control.
    pub toggle_all_label: &'static str,
    /// True when every rendered row is expanded.
    pub all_expanded: bool,
    /// The search clear control shows only while there is search text.
    pub clear_search_visible: bool,
}

impl TableView<'_> {
    /// First row carrying `anchor`.
    pub fn row_by_anchor(&self, anchor: &str) -> Option<&RowView<'_>> {
        self.rows.iter().find(|r| r.anchor == anchor)
    }
}

pub fn render<'a>(dataset: &'a Dataset, state: &ViewState) -> TableView<'a> {
    let rows: Vec<RowView<'a>> = state
        .visible(dataset)
        .into_iter()
        .enumerate()
        .map(|(i, a)| row_view(i, a, state.is_expanded(i)))
        .collect();
    let any_collapsed = state.any_collapsed(rows.len());
    TableView {
        counts: Counts::of(dataset),
        rows,
        toggle_all_label: if any_collapsed {
            EXPAND_ALL_LABEL
        } else {
            COLLAPSE_ALL_LABEL
        },
        all_expanded: !any_collapsed,
        clear_search_visible: !state.criteria.query.is_empty(),
    }
}

fn row_view(index: usize, a: &Agreement, expanded: bool) -> RowView<'_> {
    RowView {
        anchor: anchor_for(&a.portfolio, &a.agency),
        portfolio: &a.portfolio,
        agency: &a.agency,
        website: Link {
            href: a.website.as_deref().filter(|w| !w.is_empty()).unwrap_or("#"),
            text: WEBSITE_LINK_TEXT,
        },
        entity_short: a.entity_type.short_label(),
        entity_long: a.entity_type.long_label(),
        tooltip_id: format!("tip-{index}"),
        listed_as: &a.ea_heading,
        clauses: &a.clauses,
        page: a.page_text(),
        shutdown: shutdown_status(a),
        early_close: early_close_yes(a),
        early_close_text: early_close_text(a),
        expanded,
        detail_id: format!("desc-{index}"),
        detail: detail_view(a),
    }
}

fn detail_view(a: &Agreement) -> DetailView<'_> {
    let clauses = if a.clauses.trim().is_empty() {
        PLACEHOLDER
    } else {
        a.clauses.as_str()
    };
    let page = a.page().map_or_else(|| PLACEHOLDER.to_string(), |p| p.to_string());
    let agreement = a.title().map(|title| Link {
        href: a.ea_url.as_deref().filter(|u| !u.is_empty()).unwrap_or("#"),
        text: title,
    });
    let has_description = !a.description.trim().is_empty();
    DetailView {
        clauses,
        page,
        agreement,
        description: if has_description {
            a.description.as_str()
        } else {
            NO_DESCRIPTION
        },
        has_description,
    }
}

/// Whether a tooltip whose bottom edge sits at `bottom` must flip above its
/// trigger to stay inside a viewport `viewport_height` tall.
pub fn tooltip_flips_up(bottom: f64, viewport_height: f64) -> bool {
    bottom > viewport_height - TOOLTIP_EDGE_MARGIN
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}
