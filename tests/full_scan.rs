// tests/full_scan.rs
//! Bounded full-scan behaviour against a scripted upstream.

mod common;

use common::{endless_people_page, fixture, requested_page, status_error, ScriptedSource};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use swapi_bridge::api::full_scan::scan_all;
use swapi_bridge::{
    Film, PageSize, Person, Resource, ScanOptions, ScanStop, UpstreamCatalog,
};

fn names(people: &[Person]) -> Vec<String> {
    people.iter().filter_map(|p| p.name.clone()).collect()
}

#[tokio::test]
async fn stops_after_ten_pages_when_upstream_never_ends() {
    let source = Arc::new(ScriptedSource::new(|request| {
        Ok(endless_people_page(requested_page(request)))
    }));
    let catalog = UpstreamCatalog::new(source.clone());

    let outcome = catalog.scan_all::<Person>(Resource::People).await;

    let expected_requests: Vec<String> = (1..=10)
        .map(|page| format!("people?page={}&limit=100", page))
        .collect();
    assert_eq!(source.requests(), expected_requests);

    let expected_names: Vec<String> = (1..=10).map(|page| format!("Person {}", page)).collect();
    assert_eq!(names(&outcome.records), expected_names);
    assert_eq!(outcome.pages_fetched, 10);
    assert_eq!(outcome.stop, ScanStop::PageBoundReached);
    assert!(outcome.is_truncated());
}

#[tokio::test]
async fn fetch_all_returns_the_same_records_as_scan_all() {
    let source = Arc::new(ScriptedSource::new(|request| {
        Ok(endless_people_page(requested_page(request)))
    }));
    let catalog = UpstreamCatalog::new(source);

    let people = catalog.fetch_all::<Person>(Resource::People).await;
    assert_eq!(people.len(), 10);
    assert_eq!(people[9].uid.as_deref(), Some("10"));
}

#[tokio::test]
async fn stops_when_next_cursor_is_gone() {
    let source = Arc::new(ScriptedSource::new(|request| {
        let page = requested_page(request);
        let mut body = endless_people_page(page);
        if page == 3 {
            body["next"] = json!(null);
        }
        Ok(body)
    }));
    let catalog = UpstreamCatalog::new(source.clone());

    let outcome = catalog.scan_all::<Person>(Resource::People).await;

    assert_eq!(source.requests().len(), 3);
    assert_eq!(names(&outcome.records), vec!["Person 1", "Person 2", "Person 3"]);
    assert_eq!(outcome.stop, ScanStop::Exhausted);
    assert!(!outcome.is_truncated());
}

#[tokio::test]
async fn empty_next_cursor_ends_the_walk() {
    let source = Arc::new(ScriptedSource::new(|request| {
        let mut body = endless_people_page(requested_page(request));
        body["next"] = json!("");
        Ok(body)
    }));
    let outcome = UpstreamCatalog::new(source.clone())
        .scan_all::<Person>(Resource::People)
        .await;

    assert_eq!(source.requests().len(), 1);
    assert_eq!(outcome.stop, ScanStop::Exhausted);
}

#[tokio::test]
async fn flat_shape_is_a_single_page() {
    let source = Arc::new(ScriptedSource::fixed(fixture("films.json")));
    let outcome = UpstreamCatalog::new(source.clone())
        .scan_all::<Film>(Resource::Films)
        .await;

    assert_eq!(source.requests(), vec!["films?page=1&limit=100".to_string()]);
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.stop, ScanStop::Exhausted);
}

#[tokio::test]
async fn error_keeps_what_was_gathered() {
    let source = Arc::new(ScriptedSource::new(|request| {
        let page = requested_page(request);
        if page == 3 {
            Err(status_error(StatusCode::BAD_GATEWAY, "people?page=3&limit=100"))
        } else {
            Ok(endless_people_page(page))
        }
    }));
    let catalog = UpstreamCatalog::new(source.clone());

    let outcome = catalog.scan_all::<Person>(Resource::People).await;

    assert_eq!(source.requests().len(), 3);
    assert_eq!(names(&outcome.records), vec!["Person 1", "Person 2"]);
    assert_eq!(outcome.pages_fetched, 2);
    assert!(matches!(outcome.stop, ScanStop::Aborted { .. }));
}

#[tokio::test]
async fn spent_deadline_requests_nothing() {
    let source = Arc::new(ScriptedSource::new(|request| {
        Ok(endless_people_page(requested_page(request)))
    }));
    let options = ScanOptions::default().with_deadline(Some(Duration::ZERO));

    let outcome = scan_all::<Person>(source.as_ref(), Resource::People, &options).await;

    assert!(source.requests().is_empty());
    assert!(outcome.records.is_empty());
    assert_eq!(outcome.stop, ScanStop::DeadlineElapsed);
}

#[tokio::test]
async fn deadline_abandons_a_slow_request() {
    let source = Arc::new(
        ScriptedSource::new(|request| Ok(endless_people_page(requested_page(request))))
            .with_delay(Duration::from_secs(5)),
    );
    let options = ScanOptions::default().with_deadline(Some(Duration::from_millis(50)));

    let outcome = scan_all::<Person>(source.as_ref(), Resource::People, &options).await;

    assert_eq!(source.requests().len(), 1);
    assert_eq!(outcome.pages_fetched, 0);
    assert_eq!(outcome.stop, ScanStop::DeadlineElapsed);
}

#[tokio::test]
async fn custom_bounds_are_honoured() {
    let source = Arc::new(ScriptedSource::new(|request| {
        Ok(endless_people_page(requested_page(request)))
    }));
    let options = ScanOptions {
        batch_size: PageSize::new(25).unwrap(),
        max_pages: 2,
        deadline: None,
    };

    let outcome = scan_all::<Person>(source.as_ref(), Resource::People, &options).await;

    assert_eq!(
        source.requests(),
        vec![
            "people?page=1&limit=25".to_string(),
            "people?page=2&limit=25".to_string()
        ]
    );
    assert_eq!(outcome.stop, ScanStop::PageBoundReached);
}
