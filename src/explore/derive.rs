//! Pure derivations over the loaded records.
//!
//! Everything here is a side-effect-free function of its inputs, recomputed
//! on every view. No caching.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::Record;

/// Wire/display text of the "no category restriction" sentinel.
pub const ALL_SENTINEL: &str = "All";

// ---------------------------------------------------------------------------
// Category filter
// ---------------------------------------------------------------------------

/// The category dropdown's current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only records whose category equals this label.
    Only(String),
}

impl CategoryFilter {
    /// Parse a dropdown value. `"All"` and the empty string mean no filter.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_SENTINEL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => record.category.as_deref() == Some(category.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SENTINEL,
            Self::Only(category) => category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Case-insensitive substring match against title or organism.
///
/// Absent fields never match, so a record with neither field is excluded
/// even for an empty search term.
pub fn matches_search(record: &Record, search_term: &str) -> bool {
    let needle = search_term.to_lowercase();
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    };
    contains(&record.title) || contains(&record.organism)
}

/// The filtered list: search AND category, in record order.
pub fn filter_records<'a>(
    records: &'a [Record],
    search_term: &str,
    filter: &CategoryFilter,
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| matches_search(r, search_term) && filter.matches(r))
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// One chart bar: a category and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Group records by category in first-appearance order, skipping records
/// with an empty or absent category.
pub fn aggregate_by_category(records: &[Record]) -> Vec<CategoryCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for category in records.iter().filter_map(Record::category_label) {
        match index.get(category) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(category, counts.len());
                counts.push(CategoryCount {
                    category: category.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Distinct non-empty categories in first-appearance order.
pub fn distinct_categories(records: &[Record]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for category in records.iter().filter_map(Record::category_label) {
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// The dropdown option set: the sentinel followed by the distinct categories.
pub fn category_options(records: &[Record]) -> Vec<String> {
    std::iter::once(ALL_SENTINEL)
        .chain(distinct_categories(records))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: Option<&str>, organism: Option<&str>, category: Option<&str>) -> Record {
        Record {
            id: id.to_string(),
            title: title.map(str::to_string),
            organism: organism.map(str::to_string),
            category: category.map(str::to_string),
            ..Record::default()
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("1", Some("Plant Growth"), Some("Arabidopsis"), Some("Botany")),
            record("2", Some("Bone Density"), Some("Mouse"), Some("Physiology")),
            record("3", Some("Root Gravitropism"), Some("Arabidopsis"), Some("Botany")),
            record("4", Some("Muscle Atrophy"), None, None),
            record("5", None, Some("Mouse"), Some("")),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_organism() {
        let records = sample();
        let ids: Vec<_> = filter_records(&records, "BONE", &CategoryFilter::All)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["2"]);

        let ids: Vec<_> = filter_records(&records, "mouse", &CategoryFilter::All)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["2", "5"]);
    }

    #[test]
    fn empty_search_keeps_records_with_a_title_or_organism() {
        let mut records = sample();
        records.push(record("6", None, None, Some("Botany")));
        let filtered = filter_records(&records, "", &CategoryFilter::All);
        assert_eq!(filtered.len(), 5);
        assert!(filtered.iter().all(|r| r.id != "6"));
    }

    #[test]
    fn absent_fields_never_match_a_search_term() {
        let r = record("x", None, None, None);
        assert!(!matches_search(&r, "a"));
    }

    #[test]
    fn category_filter_restricts_to_exact_label() {
        let records = sample();
        let filter = CategoryFilter::parse("Botany");
        let filtered = filter_records(&records, "", &filter);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.category.as_deref() == Some("Botany")));

        let filtered = filter_records(&records, "", &CategoryFilter::parse("botany"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn search_and_category_combine() {
        let records = sample();
        let filtered = filter_records(&records, "root", &CategoryFilter::parse("Botany"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "3");

        let filtered = filter_records(&records, "bone", &CategoryFilter::parse("Botany"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn parse_treats_sentinel_and_empty_as_all() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Physiology"),
            CategoryFilter::Only("Physiology".to_string())
        );
        assert_eq!(CategoryFilter::All.to_string(), "All");
    }

    #[test]
    fn aggregate_groups_in_first_appearance_order() {
        let records = sample();
        assert_eq!(
            aggregate_by_category(&records),
            vec![
                CategoryCount { category: "Botany".to_string(), count: 2 },
                CategoryCount { category: "Physiology".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn aggregate_counts_sum_to_categorized_records() {
        let records = sample();
        let total: usize = aggregate_by_category(&records).iter().map(|c| c.count).sum();
        let categorized = records.iter().filter(|r| r.category_label().is_some()).count();
        assert_eq!(total, categorized);
    }

    #[test]
    fn options_prepend_the_sentinel() {
        let records = sample();
        assert_eq!(category_options(&records), ["All", "Botany", "Physiology"]);
        assert_eq!(category_options(&[]), ["All"]);
    }

    #[test]
    fn derivations_are_idempotent() {
        let records = sample();
        let filter = CategoryFilter::parse("Botany");
        assert_eq!(
            filter_records(&records, "a", &filter),
            filter_records(&records, "a", &filter)
        );
        assert_eq!(aggregate_by_category(&records), aggregate_by_category(&records));
    }
}
