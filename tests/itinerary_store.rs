use std::fs;

use itinerary_lib::adapters::JsonItineraryStore;
use itinerary_lib::domain::{fallback_advice, AdviceIntent};
use itinerary_lib::{Destination, DomainError, ItineraryStore};
use tempfile::TempDir;

fn destination(city: &str, country: &str, start: &str, end: &str, budget: f64, activities: &[&str]) -> Destination {
    Destination::new(
        city,
        country,
        start,
        end,
        budget,
        activities.iter().map(|a| a.to_string()).collect(),
    )
    .unwrap()
}

fn sample() -> Vec<Destination> {
    vec![
        destination("Paris", "France", "2024-05-01", "2024-05-05", 1500.0, &["Museums", "Food"]),
        destination("Tokyo", "Japan", "2024-03-10", "2024-03-20", 3200.0, &["Sushi", "Temples"]),
        destination("Nice", "France", "2024-05-01", "2024-05-03", 700.0, &["Beach"]),
        destination("Cusco", "Peru", "2023-11-02", "2023-11-09", 1500.0, &["Hiking", "Museums"]),
    ]
}

fn store_at(dir: &TempDir) -> ItineraryStore {
    ItineraryStore::new(Box::new(JsonItineraryStore::new(dir.path().join("itinerary.json"))))
}

#[test]
fn save_then_load_reproduces_order_and_fields() {
    let dir = TempDir::new().unwrap();
    let mut store = store_at(&dir);
    for d in sample() {
        store.add(d);
    }
    store.sort_by_budget();
    store.save().unwrap();

    let mut reloaded = store_at(&dir);
    reloaded.load().unwrap();
    assert_eq!(reloaded.list_all(), store.list_all());
}

#[test]
fn loading_missing_file_succeeds_with_empty_list() {
    let dir = TempDir::new().unwrap();
    let mut store = store_at(&dir);
    store.load().unwrap();
    assert!(store.is_empty());
}

#[test]
fn malformed_file_leaves_memory_untouched() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("itinerary.json"),
        r#"[{"city": "Paris", "country": "France"}]"#,
    )
    .unwrap();

    let mut store = store_at(&dir);
    store.add(sample().remove(0));
    let err = store.load().unwrap_err();
    assert!(matches!(err, DomainError::MalformedRecord(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn search_returns_matching_subsequence() {
    let dir = TempDir::new().unwrap();
    let mut store = store_at(&dir);
    for d in sample() {
        store.add(d);
    }

    let query = "MUSEUM";
    let expected: Vec<&Destination> = store
        .list_all()
        .iter()
        .filter(|d| {
            d.city().to_lowercase().contains("museum")
                || d.country().to_lowercase().contains("museum")
                || d.activities().iter().any(|a| a.to_lowercase().contains("museum"))
        })
        .collect();
    let found = store.search(query);
    assert_eq!(found, expected);
    assert_eq!(found.len(), 2);

    assert_eq!(store.search("france").len(), 2);
    assert_eq!(store.search("").len(), store.len());
}

#[test]
fn sorting_is_stable_and_persisted() {
    let dir = TempDir::new().unwrap();
    let mut store = store_at(&dir);
    for d in sample() {
        store.add(d);
    }

    store.sort_by_date();
    let by_date: Vec<&str> = store.list_all().iter().map(Destination::city).collect();
    // Paris and Nice share a start date and keep insertion order.
    assert_eq!(by_date, vec!["Cusco", "Tokyo", "Paris", "Nice"]);

    store.sort_by_budget();
    let by_budget: Vec<&str> = store.list_all().iter().map(Destination::city).collect();
    // Cusco and Paris share a budget and keep the date order.
    assert_eq!(by_budget, vec!["Nice", "Cusco", "Paris", "Tokyo"]);

    store.save().unwrap();
    let mut reloaded = store_at(&dir);
    reloaded.load().unwrap();
    let persisted: Vec<&str> = reloaded.list_all().iter().map(Destination::city).collect();
    assert_eq!(persisted, by_budget);
}

#[test]
fn remove_is_case_insensitive_and_first_match_only() {
    let dir = TempDir::new().unwrap();
    let mut store = store_at(&dir);
    store.add(destination("Paris", "France", "2024-05-01", "2024-05-05", 1500.0, &["Museums"]));
    store.add(destination("paris", "USA", "2024-07-01", "2024-07-02", 300.0, &["Eiffel replica"]));

    assert!(store.remove("PARIS"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.list_all()[0].country(), "USA");

    assert!(store.remove("Paris"));
    assert!(!store.remove("Paris"));
    assert!(store.is_empty());
}

#[test]
fn inverted_record_from_disk_renders_positive_day_count() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("itinerary.json"),
        r#"[{"city": "Lisbon", "country": "Portugal", "start_date": "2024-09-10",
            "end_date": "2024-09-07", "budget": 800.0, "activities": ["Trams", "Fado"]}]"#,
    )
    .unwrap();

    let mut store = store_at(&dir);
    store.load().unwrap();
    let lisbon = store.find_by_city("lisbon").unwrap();

    let text = fallback_advice(lisbon, AdviceIntent::Itinerary);
    assert!(text.contains("(1 days)"));
    assert!(!text.contains("-2 days"));
    assert!(text.contains("End date is before start date"));
    assert!(!text.contains("Main Activities"));
}
