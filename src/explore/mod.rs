//! Application shell.
//!
//! [`Explorer`] owns every piece of view state: the loaded records, the
//! loading flag, the search term and the category filter. Front ends mutate
//! it through setters and call [`Explorer::view`] after each mutation to get
//! the derived, render-ready [`View`].
//!
//! [`Session`] wraps an `Explorer` together with the one-shot fetch that
//! populates it.

pub mod derive;
mod session;

pub use derive::{CategoryCount, CategoryFilter};
pub use session::Session;

use crate::record::Record;
use crate::source::FetchError;

/// Shown while the fetch is outstanding.
pub const LOADING_MESSAGE: &str = "Loading experiments...";
/// Shown when the filtered list is empty after the fetch settled.
pub const EMPTY_MESSAGE: &str = "No experiments found.";

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// The user-controlled inputs: search box text and dropdown selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search_term: String,
    pub category_filter: CategoryFilter,
}

impl Query {
    pub fn new(search_term: impl Into<String>, category_filter: CategoryFilter) -> Self {
        Self {
            search_term: search_term.into(),
            category_filter,
        }
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// What the card area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body<'a> {
    Loading,
    Empty,
    /// One card per filtered record, keyed by `id`.
    Cards(Vec<&'a Record>),
}

impl Body<'_> {
    /// Status text for the non-card states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Empty => Some(EMPTY_MESSAGE),
            Self::Cards(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Empty => "empty",
            Self::Cards(_) => "cards",
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub body: Body<'a>,
    /// Category aggregate of the full, unfiltered record set. `None` while
    /// loading or when no records are loaded.
    pub chart: Option<Vec<CategoryCount>>,
    /// Dropdown options, sentinel first.
    pub options: Vec<String>,
    /// Number of loaded records.
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

/// The single owned state holder of one explorer view.
#[derive(Debug)]
pub struct Explorer {
    records: Vec<Record>,
    loading: bool,
    query: Query,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Explorer {
    /// A fresh view: no records, waiting on the fetch.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            query: Query::default(),
        }
    }

    /// Apply the fetch outcome.
    ///
    /// Success replaces the record set wholesale. Failure is reported on the
    /// diagnostic channel only; the record set is left as it was. Either way
    /// the loading state ends.
    pub fn settle(&mut self, outcome: Result<Vec<Record>, FetchError>) {
        match outcome {
            Ok(records) => self.records = records,
            Err(e) => tracing::error!("Error fetching experiments: {e}"),
        }
        self.loading = false;
    }

    /// End the loading state without new data.
    pub(crate) fn abandon_fetch(&mut self) {
        self.loading = false;
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.query.search_term = search_term.into();
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.query.category_filter = filter;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Records passing the current search term and category filter.
    pub fn filtered(&self) -> Vec<&Record> {
        derive::filter_records(
            &self.records,
            &self.query.search_term,
            &self.query.category_filter,
        )
    }

    /// Per-category counts over all loaded records.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        derive::aggregate_by_category(&self.records)
    }

    /// `"All"` followed by the distinct loaded categories.
    pub fn category_options(&self) -> Vec<String> {
        derive::category_options(&self.records)
    }

    /// Derive the view for the explorer's own query.
    pub fn view(&self) -> View<'_> {
        self.view_for(&self.query)
    }

    /// Derive the view for an arbitrary query against the loaded records.
    ///
    /// The web dashboard uses this so each browser tab can carry its own
    /// search state over one shared record set.
    pub fn view_for(&self, query: &Query) -> View<'_> {
        let body = if self.loading {
            Body::Loading
        } else {
            let filtered =
                derive::filter_records(&self.records, &query.search_term, &query.category_filter);
            if filtered.is_empty() {
                Body::Empty
            } else {
                Body::Cards(filtered)
            }
        };

        let chart = (!self.loading && !self.records.is_empty()).then(|| self.category_counts());

        View {
            body,
            chart,
            options: self.category_options(),
            total: self.records.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_records() -> Vec<Record> {
        vec![
            Record {
                id: "1".to_string(),
                title: Some("Plant Growth".to_string()),
                organism: Some("Arabidopsis".to_string()),
                category: Some("Botany".to_string()),
                ..Record::default()
            },
            Record {
                id: "2".to_string(),
                title: Some("Bone Density".to_string()),
                organism: Some("Mouse".to_string()),
                category: Some("Physiology".to_string()),
                ..Record::default()
            },
        ]
    }

    #[test]
    fn new_explorer_is_loading_without_chart() {
        let explorer = Explorer::new();
        let view = explorer.view();
        assert_eq!(view.body, Body::Loading);
        assert_eq!(view.body.message(), Some(LOADING_MESSAGE));
        assert_eq!(view.chart, None);
        assert_eq!(view.options, ["All"]);
    }

    #[test]
    fn input_is_accepted_while_loading() {
        let mut explorer = Explorer::new();
        explorer.set_search_term("bone");
        explorer.set_category_filter(CategoryFilter::parse("Physiology"));
        assert!(explorer.filtered().is_empty());
        assert_eq!(explorer.view().body, Body::Loading);

        explorer.settle(Ok(two_records()));
        let view = explorer.view();
        match view.body {
            Body::Cards(cards) => assert_eq!(cards[0].id, "2"),
            other => panic!("expected cards, got {other:?}"),
        }
    }

    #[test]
    fn failed_fetch_keeps_previous_records() {
        let mut explorer = Explorer::new();
        explorer.settle(Ok(two_records()));
        explorer.settle(Err(FetchError::Status {
            url: "http://x".to_string(),
            status: 500,
        }));
        assert!(!explorer.is_loading());
        assert_eq!(explorer.records().len(), 2);
    }

    #[test]
    fn view_for_ignores_the_explorer_query() {
        let mut explorer = Explorer::new();
        explorer.settle(Ok(two_records()));
        explorer.set_search_term("plant");

        let query = Query::new("bone", CategoryFilter::All);
        match explorer.view_for(&query).body {
            Body::Cards(cards) => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].id, "2");
            }
            other => panic!("expected cards, got {other:?}"),
        }
        assert_eq!(explorer.query().search_term, "plant");
    }

    #[test]
    fn body_kinds() {
        assert_eq!(Body::Loading.kind(), "loading");
        assert_eq!(Body::Empty.kind(), "empty");
        assert_eq!(Body::Cards(Vec::new()).kind(), "cards");
        assert_eq!(Body::Cards(Vec::new()).message(), None);
    }
}
