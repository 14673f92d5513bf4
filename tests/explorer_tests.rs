/// End-to-end explorer tests.
///
/// These drive a [`Session`] from an in-memory source (or one that always
/// fails) and check what a front end would draw after each state change:
/// the card body, the chart and the dropdown options.
use biospace_explorer::explore::{Body, CategoryFilter, EMPTY_MESSAGE, Query, Session, derive};
use biospace_explorer::record::{Record, parse_records};
use biospace_explorer::render::{self, BarChart, Card};
use biospace_explorer::source::{FetchError, RecordSource, StaticSource};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const TWO_RECORDS: &str = r#"[
    {"id": 1, "Title": "Plant Growth", "Organism": "Arabidopsis", "Category": "Botany"},
    {"id": 2, "Title": "Bone Density", "Organism": "Mouse", "Category": "Physiology"}
]"#;

struct FailingSource;

impl RecordSource for FailingSource {
    fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        Err(FetchError::Transport {
            url: "http://127.0.0.1:1/api/experiments".to_string(),
            message: "connection refused".to_string(),
        })
    }

    fn describe(&self) -> String {
        "unreachable backend".to_string()
    }
}

fn settled(source: impl RecordSource) -> Session {
    let mut session = Session::start(source).unwrap();
    session.wait_settled();
    session
}

fn two_record_session() -> Session {
    settled(StaticSource::new(parse_records(TWO_RECORDS).unwrap()))
}

fn card_ids(body: &Body<'_>) -> Vec<String> {
    match body {
        Body::Cards(records) => records.iter().map(|r| r.id.clone()).collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn empty_fetch_shows_empty_state_without_chart() {
    let session = settled(StaticSource::new(parse_records("[]").unwrap()));
    let explorer = session.lock();
    let view = explorer.view();

    assert!(!explorer.is_loading());
    assert_eq!(view.body, Body::Empty);
    assert_eq!(view.body.message(), Some(EMPTY_MESSAGE));
    assert!(view.chart.is_none());
}

#[test]
fn unfiltered_dataset_renders_every_card_and_one_bar_per_category() {
    let session = two_record_session();
    let explorer = session.lock();
    let view = explorer.view();

    assert_eq!(card_ids(&view.body), vec!["1", "2"]);
    let chart = view.chart.unwrap();
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0].category, "Botany");
    assert_eq!(chart[1].category, "Physiology");
    assert!(chart.iter().all(|c| c.count == 1));
}

#[test]
fn search_narrows_cards_but_chart_keeps_full_dataset() {
    let session = two_record_session();
    session.lock().set_search_term("bone");

    let explorer = session.lock();
    let view = explorer.view();
    assert_eq!(card_ids(&view.body), vec!["2"]);

    let chart = view.chart.unwrap();
    assert_eq!(chart.len(), 2);
    assert!(chart.iter().all(|c| c.count == 1));
}

#[test]
fn failed_fetch_clears_loading_and_keeps_records_empty() {
    let session = settled(FailingSource);
    let explorer = session.lock();
    let view = explorer.view();

    assert!(!explorer.is_loading());
    assert!(explorer.records().is_empty());
    assert_eq!(view.body.message(), Some(EMPTY_MESSAGE));
    assert!(view.chart.is_none());
    assert_eq!(session.origin(), "unreachable backend");
}

#[test]
fn category_with_no_search_matches_shows_empty_state() {
    let session = two_record_session();
    {
        let mut explorer = session.lock();
        explorer.set_search_term("bone");
        explorer.set_category_filter(CategoryFilter::Only("Botany".to_string()));
    }

    let explorer = session.lock();
    let view = explorer.view();
    assert_eq!(view.body, Body::Empty);
    assert_eq!(view.body.message(), Some(EMPTY_MESSAGE));
    assert!(view.chart.is_some());
}

#[test]
fn view_for_leaves_explorer_query_untouched() {
    let session = two_record_session();
    let explorer = session.lock();
    let query = Query::new("arabidopsis", CategoryFilter::parse("Botany"));

    assert_eq!(card_ids(&explorer.view_for(&query).body), vec!["1"]);
    assert_eq!(explorer.query(), &Query::default());
}

// ---------------------------------------------------------------------------
// Properties over a mixed dataset
// ---------------------------------------------------------------------------

fn mixed_records() -> Vec<Record> {
    parse_records(
        r#"[
        {"_id": "a", "Title": "Microgravity and Bone Loss", "Organism": "Mouse", "Category": "Physiology"},
        {"_id": "b", "Title": "Root Tropism in Orbit", "Organism": "Arabidopsis thaliana", "Category": "Botany"},
        {"_id": "c", "Title": "Spaceflight Immune Response", "Organism": "Human", "Category": "Immunology"},
        {"_id": "d", "Title": "Radiation and Seed Germination", "Organism": "Wheat", "Category": "Botany"},
        {"_id": "e", "Title": "Untitled Category", "Organism": "Yeast", "Category": ""},
        {"_id": "f", "Organism": "Mouse Muscle"},
        {"_id": "g", "Title": "Cell Culture", "Category": "Physiology", "Impact": "High"}
    ]"#,
    )
    .unwrap()
}

#[test]
fn every_search_result_contains_the_term() {
    let records = mixed_records();
    for term in ["", "mouse", "MOUSE", "bone", "a", "orbit", "zzz"] {
        let needle = term.to_lowercase();
        for record in derive::filter_records(&records, term, &CategoryFilter::All) {
            let title = record.title.as_deref().unwrap_or("").to_lowercase();
            let organism = record.organism.as_deref().unwrap_or("").to_lowercase();
            assert!(
                term.is_empty() || title.contains(&needle) || organism.contains(&needle),
                "{term:?} matched {:?}",
                record.id
            );
        }
    }
}

#[test]
fn every_category_result_has_that_category() {
    let records = mixed_records();
    for category in derive::distinct_categories(&records) {
        let filter = CategoryFilter::Only(category.to_string());
        let hits = derive::filter_records(&records, "", &filter);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|r| r.category.as_deref() == Some(category)));
    }
}

#[test]
fn aggregate_counts_sum_to_categorized_records() {
    let records = mixed_records();
    let counts = derive::aggregate_by_category(&records);
    let total: usize = counts.iter().map(|c| c.count).sum();
    let categorized = records.iter().filter(|r| r.category_label().is_some()).count();

    assert_eq!(total, categorized);
    assert_eq!(total, 5);
}

#[test]
fn derivations_are_idempotent() {
    let session = settled(StaticSource::new(mixed_records()));
    session.lock().set_search_term("o");
    let explorer = session.lock();

    assert_eq!(explorer.filtered(), explorer.filtered());
    assert_eq!(explorer.category_counts(), explorer.category_counts());
    assert_eq!(explorer.view(), explorer.view());
}

#[test]
fn dropdown_options_start_with_all_and_skip_blank_categories() {
    let session = settled(StaticSource::new(mixed_records()));
    assert_eq!(
        session.lock().category_options(),
        vec!["All", "Physiology", "Botany", "Immunology"]
    );
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn missing_fields_render_as_placeholders() {
    let records = mixed_records();
    let card = Card::from_record(&records[5]);
    assert_eq!(card.title, "");
    assert_eq!(card.organism, "Mouse Muscle");
    assert_eq!(card.category, "N/A");
    assert_eq!(card.impact, "N/A");
    assert_eq!(card.url, "");
}

#[test]
fn terminal_frame_lists_cards_and_chart() {
    colored::control::set_override(false);
    let session = two_record_session();
    let explorer = session.lock();
    let frame = render::render_frame(&explorer.view(), &BarChart::from_config(&Default::default()));

    assert!(frame.contains("Plant Growth"));
    assert!(frame.contains("Bone Density"));
    assert!(frame.contains("Publication Categories Overview"));
    assert!(frame.contains("Botany"));
}
