// src/api/normalizer.rs
//! Structural detection of upstream envelope shapes.
//!
//! The same collection can come back flat (`result`, items nested under
//! `properties`) or cursor-paged (`results`, already flat) depending on the
//! query, so the shape is decided from the body alone, once, and everything
//! downstream matches on the resulting variant.

use super::types::RawRecord;
use crate::error::AdaptationFailure;
use serde_json::{Map, Value};

/// A decoded response body, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEnvelope {
    /// `{ result: [...] }` or `{ result: {...} }`, with no pagination
    /// metadata. Also what name/model-filtered queries return.
    Flat(Vec<RawItem>),
    /// `{ results: [...], total_records, total_pages, previous, next }`
    CursorPaged(CursorPage),
    /// Neither shape. Carries the top-level keys for diagnostics.
    Unrecognized { keys: Vec<String> },
}

/// One element of a flat envelope, possibly nesting its fields under
/// `properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem(pub RawRecord);

/// The cursor-paged envelope, records untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CursorPage {
    pub results: Vec<RawRecord>,
    pub meta: PageMeta,
}

/// Pagination metadata as the upstream reported it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageMeta {
    pub total_records: Option<u64>,
    pub total_pages: Option<u32>,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// Which shape a body had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Flat,
    CursorPaged,
    Unrecognized,
}

/// Records extracted from one body, plus whatever paging metadata came with
/// them. Flat bodies carry empty metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub records: Vec<RawRecord>,
    pub meta: PageMeta,
    pub shape: ShapeKind,
}

impl RawEnvelope {
    /// Classifies a body. `result` is checked before `results`.
    pub fn detect(body: Value) -> Self {
        let mut map = match body {
            Value::Object(map) => map,
            other => {
                return RawEnvelope::Unrecognized {
                    keys: vec![format!("<{}>", json_kind(&other))],
                }
            }
        };

        if let Some(result) = map.shift_remove("result") {
            return match result {
                Value::Array(items) => RawEnvelope::Flat(collect_items(items)),
                Value::Object(item) => RawEnvelope::Flat(vec![RawItem(into_record(item))]),
                _ => RawEnvelope::Unrecognized {
                    keys: keys_with(&map, "result"),
                },
            };
        }

        match map.shift_remove("results") {
            Some(Value::Array(results)) => {
                let meta = PageMeta {
                    total_records: map.get("total_records").and_then(as_u64),
                    total_pages: map
                        .get("total_pages")
                        .and_then(as_u64)
                        .and_then(|n| u32::try_from(n).ok()),
                    previous: map.get("previous").and_then(as_string),
                    next: map.get("next").and_then(as_string),
                };
                RawEnvelope::CursorPaged(CursorPage {
                    results: collect_records(results),
                    meta,
                })
            }
            Some(_) => RawEnvelope::Unrecognized {
                keys: keys_with(&map, "results"),
            },
            None => RawEnvelope::Unrecognized {
                keys: map.keys().cloned().collect(),
            },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            RawEnvelope::Flat(_) => ShapeKind::Flat,
            RawEnvelope::CursorPaged(_) => ShapeKind::CursorPaged,
            RawEnvelope::Unrecognized { .. } => ShapeKind::Unrecognized,
        }
    }
}

impl RawItem {
    /// The item's effective record.
    ///
    /// With a `properties` object, that object with the outer `uid` and
    /// `_id` copied over it; otherwise the item itself.
    pub fn into_record(self) -> RawRecord {
        let mut outer = self.0;
        match outer.shift_remove("properties") {
            Some(Value::Object(properties)) => {
                let mut record = into_record(properties);
                for key in ["uid", "_id"] {
                    if let Some(value) = outer.get(key) {
                        record.insert(key.to_string(), value.clone());
                    }
                }
                record
            }
            Some(other) => {
                log::debug!(
                    "Ignoring non-object properties ({}) on item {:?}",
                    json_kind(&other),
                    outer.get("uid")
                );
                outer.insert("properties".to_string(), other);
                outer
            }
            None => outer,
        }
    }
}

/// Flattens any envelope into records.
pub fn normalize(envelope: RawEnvelope) -> Normalized {
    let shape = envelope.kind();
    let (records, meta) = match envelope {
        RawEnvelope::Flat(items) => (
            items.into_iter().map(RawItem::into_record).collect(),
            PageMeta::default(),
        ),
        RawEnvelope::CursorPaged(page) => (page.results, page.meta),
        RawEnvelope::Unrecognized { keys } => {
            log::warn!("{}", AdaptationFailure::ShapeUnrecognized { keys });
            (Vec::new(), PageMeta::default())
        }
    };

    Normalized {
        records,
        meta,
        shape,
    }
}

/// Detects and normalizes a body in one step.
pub fn normalize_body(body: Value) -> Normalized {
    normalize(RawEnvelope::detect(body))
}

fn collect_items(values: Vec<Value>) -> Vec<RawItem> {
    collect_records(values).into_iter().map(RawItem).collect()
}

fn collect_records(values: Vec<Value>) -> Vec<RawRecord> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(into_record(map)),
            other => {
                log::warn!("Dropping non-object element ({}) from envelope", json_kind(&other));
                None
            }
        })
        .collect()
}

fn into_record(map: Map<String, Value>) -> RawRecord {
    map.into_iter().collect()
}

fn keys_with(map: &Map<String, Value>, removed: &str) -> Vec<String> {
    std::iter::once(removed.to_string())
        .chain(map.keys().cloned())
        .collect()
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn flat_items_merge_outer_ids_over_properties() {
        let body = json!({
            "message": "ok",
            "result": [{
                "uid": "1",
                "_id": "outer-id",
                "description": "A starship",
                "properties": {
                    "uid": "inner-uid",
                    "_id": "inner-id",
                    "name": "CR90 corvette",
                    "model": "CR90 corvette"
                }
            }]
        });

        let normalized = normalize_body(body);
        assert_eq!(normalized.shape, ShapeKind::Flat);
        assert_eq!(normalized.records.len(), 1);

        let record = &normalized.records[0];
        assert_eq!(record["uid"], json!("1"));
        assert_eq!(record["_id"], json!("outer-id"));
        assert_eq!(record["name"], json!("CR90 corvette"));
        assert!(!record.contains_key("description"));
        assert!(!record.contains_key("properties"));
    }

    #[test]
    fn flat_item_without_properties_is_emitted_as_is() {
        let body = json!({ "result": [{ "uid": "7", "name": "Sand Crawler" }] });
        let normalized = normalize_body(body);
        assert_eq!(normalized.records[0]["name"], json!("Sand Crawler"));
        assert_eq!(normalized.records[0]["uid"], json!("7"));
    }

    #[test]
    fn flat_item_missing_outer_id_keeps_inner_one() {
        let body = json!({ "result": [{ "uid": "3", "properties": { "_id": "inner", "title": "x" } }] });
        let record = &normalize_body(body).records[0];
        assert_eq!(record["uid"], json!("3"));
        assert_eq!(record["_id"], json!("inner"));
    }

    #[test]
    fn singular_result_object_is_one_item() {
        let body = json!({
            "result": { "uid": "4", "_id": "abc", "properties": { "title": "A New Hope" } }
        });
        let normalized = normalize_body(body);
        assert_eq!(normalized.shape, ShapeKind::Flat);
        assert_eq!(normalized.records.len(), 1);
        assert_eq!(normalized.records[0]["_id"], json!("abc"));
    }

    #[test]
    fn cursor_paged_records_pass_through_unmodified() {
        let results = vec![
            json!({ "uid": "1", "name": "Luke Skywalker", "url": "https://www.swapi.tech/api/people/1" }),
            json!({ "uid": "2", "name": "C-3PO", "url": "https://www.swapi.tech/api/people/2" }),
            json!({ "uid": "3", "name": "R2-D2", "url": "https://www.swapi.tech/api/people/3", "properties": { "x": 1 } }),
        ];
        let body = json!({
            "message": "ok",
            "total_records": 82,
            "total_pages": 28,
            "previous": null,
            "next": "https://www.swapi.tech/api/people?page=2&limit=3",
            "results": results.clone(),
        });

        let normalized = normalize_body(body);
        assert_eq!(normalized.shape, ShapeKind::CursorPaged);
        assert_eq!(normalized.records.len(), results.len());
        for (record, original) in normalized.records.iter().zip(&results) {
            assert_eq!(&serde_json::to_value(record).unwrap(), original);
        }
        assert_eq!(normalized.meta.total_records, Some(82));
        assert_eq!(normalized.meta.total_pages, Some(28));
        assert_eq!(normalized.meta.previous, None);
        assert!(normalized.meta.has_next());
    }

    #[test]
    fn record_fields_keep_upstream_order() {
        let body = json!({
            "results": [{ "url": "https://www.swapi.tech/api/starships/2", "name": "CR90 corvette", "uid": "2" }]
        });
        let record = &normalize_body(body).records[0];
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["url", "name", "uid"]);

        let body = json!({
            "result": { "uid": "9", "properties": { "title": "x", "episode_id": 4, "director": "y" } }
        });
        let record = &normalize_body(body).records[0];
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "episode_id", "director", "uid"]);
    }

    #[test]
    fn result_wins_over_results() {
        let body = json!({ "result": [{ "uid": "1" }], "results": [{ "uid": "2" }, { "uid": "3" }] });
        let envelope = RawEnvelope::detect(body);
        assert_eq!(envelope.kind(), ShapeKind::Flat);
        assert_eq!(normalize(envelope).records.len(), 1);
    }

    #[test]
    fn unknown_shape_yields_no_records() {
        let normalized = normalize_body(json!({ "message": "not found", "data": [] }));
        assert_eq!(normalized.shape, ShapeKind::Unrecognized);
        assert!(normalized.records.is_empty());
        assert!(!normalized.meta.has_next());

        assert_eq!(
            RawEnvelope::detect(json!([1, 2])),
            RawEnvelope::Unrecognized { keys: vec!["<array>".to_string()] }
        );
        assert_eq!(
            RawEnvelope::detect(json!({ "result": "oops" })).kind(),
            ShapeKind::Unrecognized
        );
    }

    #[test]
    fn non_object_elements_are_dropped() {
        let normalized = normalize_body(json!({ "results": [{ "uid": "1" }, 5, null] }));
        assert_eq!(normalized.records.len(), 1);
    }

    #[test]
    fn numeric_strings_in_metadata_are_accepted() {
        let normalized = normalize_body(json!({ "results": [], "total_records": "12", "next": "" }));
        assert_eq!(normalized.meta.total_records, Some(12));
        assert!(!normalized.meta.has_next());
    }
}
