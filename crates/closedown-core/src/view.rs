//! Table view state and the actions that change it.
//!
//! `ViewState` is the whole of the interactive state: search text, filter
//! selections, sort order and which detail rows are open. Every action is a
//! plain state transition; what the user sees is recomputed from scratch by
//! [`render`](crate::render::render). Rows are identified by their position in
//! the rendered sequence, so any change to criteria or sort rebuilds the
//! table and closes every detail row.

use std::collections::BTreeSet;

use tracing::debug;

use crate::anchor::{anchor_for, fragment_anchor};
use crate::classify::ShutdownStatus;
use crate::filter::{Criteria, filter};
use crate::order::{SortOrder, sort_agreements};
use crate::record::{Agreement, Dataset, EntityType};

/// Gap left between the fixed table header and a row scrolled into view.
pub const SCROLL_MARGIN: f64 = 12.0;

/// A user interaction with the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search(String),
    ClearSearch,
    Shutdown(Option<ShutdownStatus>),
    Entity(Option<EntityType>),
    Portfolio(Option<String>),
    EarlyClose(Option<bool>),
    ListedAs(Option<String>),
    Sort(SortOrder),
    /// Open or close one detail row, by rendered position.
    ToggleRow(usize),
    /// Expand every row if any is collapsed, otherwise collapse every row.
    ToggleAll,
    /// Navigation fragment changed (or was present at load).
    Navigate(String),
}

/// Request to bring a row into view after a deep link resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub row: usize,
    pub anchor: String,
    pub smooth: bool,
}

impl ScrollRequest {
    /// Document scroll offset that puts the row just below a fixed header.
    ///
    /// `row_top` is the row's top edge relative to the viewport.
    pub fn target_y(&self, row_top: f64, scroll_y: f64, header_height: f64) -> f64 {
        row_top + scroll_y - (header_height + SCROLL_MARGIN)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub criteria: Criteria,
    pub sort: SortOrder,
    expanded: BTreeSet<usize>,
}

impl ViewState {
    pub fn new(criteria: Criteria, sort: SortOrder) -> Self {
        Self {
            criteria,
            sort,
            expanded: BTreeSet::new(),
        }
    }

    /// Filtered and sorted rows, exactly as the table shows them.
    pub fn visible<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Agreement> {
        let mut rows = filter(dataset, &self.criteria);
        sort_agreements(&mut rows, self.sort);
        rows
    }

    pub fn is_expanded(&self, row: usize) -> bool {
        self.expanded.contains(&row)
    }

    /// True when at least one of `row_count` rendered rows is collapsed.
    pub fn any_collapsed(&self, row_count: usize) -> bool {
        (0..row_count).any(|r| !self.expanded.contains(&r))
    }

    /// Apply an action. Returns a scroll request when a deep link resolved.
    pub fn apply(&mut self, dataset: &Dataset, action: Action) -> Option<ScrollRequest> {
        match action {
            Action::Search(q) => self.set_criteria(|c| c.query = q),
            Action::ClearSearch => self.set_criteria(|c| c.query.clear()),
            Action::Shutdown(s) => self.set_criteria(|c| c.shutdown = s),
            Action::Entity(e) => self.set_criteria(|c| c.entity = e),
            Action::Portfolio(p) => self.set_criteria(|c| c.portfolio = p),
            Action::EarlyClose(e) => self.set_criteria(|c| c.early_close = e),
            Action::ListedAs(l) => self.set_criteria(|c| c.listed_as = l),
            Action::Sort(order) => {
                self.sort = order;
                self.expanded.clear();
            }
            Action::ToggleRow(row) => {
                if row < self.visible(dataset).len() && !self.expanded.remove(&row) {
                    self.expanded.insert(row);
                }
            }
            Action::ToggleAll => {
                let count = self.visible(dataset).len();
                if self.any_collapsed(count) {
                    self.expanded = (0..count).collect();
                } else {
                    self.expanded.clear();
                }
            }
            Action::Navigate(fragment) => {
                let anchor = fragment_anchor(&fragment)?;
                return self.focus_anchor(dataset, anchor);
            }
        }
        None
    }

    /// Expand the row carrying `anchor` and ask for it to be scrolled to.
    ///
    /// When no rendered row carries the anchor, the search and all filters
    /// are reset and the lookup is retried once. An anchor that matches no
    /// record at all is ignored.
    pub fn focus_anchor(&mut self, dataset: &Dataset, anchor: &str) -> Option<ScrollRequest> {
        let mut row = self.position_of(dataset, anchor);
        if row.is_none() {
            debug!(anchor, "deep link target hidden, relaxing filters");
            self.criteria.relax();
            self.expanded.clear();
            row = self.position_of(dataset, anchor);
        }
        let Some(row) = row else {
            debug!(anchor, "deep link target not found");
            return None;
        };
        self.expanded.insert(row);
        debug!(anchor, row, "deep link resolved");
        Some(ScrollRequest {
            row,
            anchor: anchor.to_string(),
            smooth: true,
        })
    }

    /// First rendered row carrying `anchor`.
    fn position_of(&self, dataset: &Dataset, anchor: &str) -> Option<usize> {
        self.visible(dataset)
            .iter()
            .position(|a| anchor_for(&a.portfolio, &a.agency) == anchor)
    }

    fn set_criteria(&mut self, change: impl FnOnce(&mut Criteria)) {
        change(&mut self.criteria);
        self.expanded.clear();
    }
}
