// src/api/decoder.rs
//! Field-by-field decoding of flat upstream records into catalog entities.
//!
//! Each entity lists the upstream fields it reads. Anything else in the
//! record is ignored, and absent or null fields decode to `None`. Only a
//! value of the wrong kind fails a record.

use super::types::RawRecord;
use crate::error::AdaptationFailure;
use crate::model::{Film, Person, Starship, Vehicle};
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

/// Why a record could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("field '{field}' is not a valid date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("field '{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Builds a typed value from one flat upstream record.
pub trait FromRecord: Sized {
    fn from_record(record: &RawRecord) -> Result<Self, DecodeError>;
}

/// Decodes a single record.
pub fn decode<T: FromRecord>(record: &RawRecord) -> Result<T, DecodeError> {
    T::from_record(record)
}

/// Decodes every record it can and drops the rest, keeping order.
pub fn decode_batch<T: FromRecord>(records: Vec<RawRecord>) -> Vec<T> {
    let total = records.len();
    let decoded: Vec<T> = records
        .iter()
        .filter_map(|record| match T::from_record(record) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!(
                    "{} (uid: {})",
                    AdaptationFailure::FieldDecodeFailure {
                        cause: e.to_string()
                    },
                    record.get("uid").and_then(Value::as_str).unwrap_or("?")
                );
                None
            }
        })
        .collect();

    if decoded.len() < total {
        log::debug!("Decoded {}/{} records", decoded.len(), total);
    }
    decoded
}

/// Typed accessors over a record.
struct RecordReader<'a> {
    record: &'a RawRecord,
}

impl<'a> RecordReader<'a> {
    fn new(record: &'a RawRecord) -> Self {
        Self { record }
    }

    fn present(&self, field: &'static str) -> Option<&'a Value> {
        self.record.get(field).filter(|v| !v.is_null())
    }

    /// Text field. Numbers and booleans are rendered as their text.
    fn text(&self, field: &'static str) -> Result<Option<String>, DecodeError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(mismatch(field, "text", other)),
        }
    }

    /// Integer field, accepting integer strings.
    fn int(&self, field: &'static str) -> Result<Option<i32>, DecodeError> {
        let raw: i64 = match self.present(field) {
            None => return Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| mismatch(field, "integer", &Value::Number(n.clone())))?,
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| mismatch(field, "integer", &Value::String(s.clone())))?,
            Some(other) => return Err(mismatch(field, "integer", other)),
        };
        i32::try_from(raw).map(Some).map_err(|_| DecodeError::OutOfRange {
            field,
            value: raw.to_string(),
        })
    }

    /// ISO `YYYY-MM-DD` date field.
    fn date(&self, field: &'static str) -> Result<Option<NaiveDate>, DecodeError> {
        match self.present(field) {
            None => Ok(None),
            Some(Value::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|_| DecodeError::InvalidDate {
                    field,
                    value: s.clone(),
                }),
            Some(other) => Err(mismatch(field, "date string", other)),
        }
    }
}

fn mismatch(field: &'static str, expected: &'static str, found: &Value) -> DecodeError {
    let found = match found {
        Value::String(s) => format!("'{}'", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
        other => other.to_string(),
    };
    DecodeError::TypeMismatch {
        field,
        expected,
        found,
    }
}

impl FromRecord for Film {
    fn from_record(record: &RawRecord) -> Result<Self, DecodeError> {
        let r = RecordReader::new(record);
        Ok(Film {
            uid: r.text("uid")?,
            internal_id: r.text("_id")?,
            title: r.text("title")?,
            episode_id: r.int("episode_id")?,
            opening_crawl: r.text("opening_crawl")?,
            director: r.text("director")?,
            producer: r.text("producer")?,
            release_date: r.date("release_date")?,
            url: r.text("url")?,
        })
    }
}

impl FromRecord for Person {
    fn from_record(record: &RawRecord) -> Result<Self, DecodeError> {
        let r = RecordReader::new(record);
        Ok(Person {
            uid: r.text("uid")?,
            internal_id: r.text("_id")?,
            name: r.text("name")?,
            height: r.text("height")?,
            mass: r.text("mass")?,
            hair_color: r.text("hair_color")?,
            skin_color: r.text("skin_color")?,
            eye_color: r.text("eye_color")?,
            birth_year: r.text("birth_year")?,
            gender: r.text("gender")?,
            homeworld: r.text("homeworld")?,
            url: r.text("url")?,
        })
    }
}

impl FromRecord for Starship {
    fn from_record(record: &RawRecord) -> Result<Self, DecodeError> {
        let r = RecordReader::new(record);
        Ok(Starship {
            uid: r.text("uid")?,
            internal_id: r.text("_id")?,
            name: r.text("name")?,
            model: r.text("model")?,
            manufacturer: r.text("manufacturer")?,
            cost_in_credits: r.text("cost_in_credits")?,
            length: r.text("length")?,
            crew: r.text("crew")?,
            passengers: r.text("passengers")?,
            cargo_capacity: r.text("cargo_capacity")?,
            starship_class: r.text("starship_class")?,
            url: r.text("url")?,
        })
    }
}

impl FromRecord for Vehicle {
    fn from_record(record: &RawRecord) -> Result<Self, DecodeError> {
        let r = RecordReader::new(record);
        Ok(Vehicle {
            uid: r.text("uid")?,
            internal_id: r.text("_id")?,
            name: r.text("name")?,
            model: r.text("model")?,
            manufacturer: r.text("manufacturer")?,
            cost_in_credits: r.text("cost_in_credits")?,
            length: r.text("length")?,
            crew: r.text("crew")?,
            passengers: r.text("passengers")?,
            cargo_capacity: r.text("cargo_capacity")?,
            vehicle_class: r.text("vehicle_class")?,
            url: r.text("url")?,
        })
    }
}
