//! Durable storage for the panel position.
//!
//! The record is a small JSON object, `{"x": 82, "y": 62}`, kept under a
//! fixed key. Older bookmarklet builds wrote the coordinates as strings, so
//! numeric strings are accepted when reading. Anything missing, unreadable or
//! non-finite falls back to the configured default; mounting never fails
//! because of the stored position.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::{InspectorError, Point};

/// A string key/value store the panel position is persisted in.
///
/// In the browser this is `localStorage`; [`MemoryPositionStore`] keeps values
/// in memory.
pub trait PositionStore {
    /// Retrieve the value (if any) stored against `key`
    fn get(&self, key: &str) -> Result<Option<String>, InspectorError>;
    /// Store `value` against `key`
    fn set(&mut self, key: &str, value: String) -> Result<(), InspectorError>;
}

/// A trivial [`PositionStore`] backed by a [`HashMap`]. Clones share their
/// entries, which lets a store outlive the overlay that wrote to it.
#[derive(Debug, Clone, Default)]
pub struct MemoryPositionStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl PositionStore for MemoryPositionStore {
    fn get(&self, key: &str) -> Result<Option<String>, InspectorError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), InspectorError> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct PositionRecord {
    x: Coordinate,
    y: Coordinate,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Result<f64, InspectorError> {
        let value = match self {
            Coordinate::Number(value) => *value,
            Coordinate::Text(text) => text
                .trim()
                .trim_end_matches("px")
                .parse::<f64>()
                .map_err(|e| InspectorError::CorruptRecord(format!("{text:?}: {e}")))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(InspectorError::CorruptRecord(format!(
                "non-finite coordinate {value}"
            )))
        }
    }
}

/// Decode a stored position record
pub fn decode_position(record: &str) -> Result<Point, InspectorError> {
    let record: PositionRecord = serde_json::from_str(record)?;
    Ok(Point::new(record.x.value()?, record.y.value()?))
}

/// Encode a position for storage
pub fn encode_position(position: Point) -> Result<String, InspectorError> {
    Ok(serde_json::to_string(&PositionRecord {
        x: Coordinate::Number(position.x),
        y: Coordinate::Number(position.y),
    })?)
}

/// Read the persisted position, falling back to `default` when there is no
/// usable record.
pub fn load_position<S: PositionStore>(store: &S, key: &str, default: Point) -> Point {
    let record = match store.get(key) {
        Ok(Some(record)) => record,
        Ok(None) => return default,
        Err(error) => {
            tracing::warn!(%error, "Unable to read panel position; using default");
            return default;
        }
    };

    match decode_position(&record) {
        Ok(position) => position,
        Err(error) => {
            tracing::warn!(%error, "Ignoring stored panel position");
            default
        }
    }
}

/// Persist `position` under `key`
pub fn save_position<S: PositionStore>(
    store: &mut S,
    key: &str,
    position: Point,
) -> Result<(), InspectorError> {
    store.set(key, encode_position(position)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    const KEY: &str = "i_position";
    const DEFAULT: Point = Point::new(32.0, 32.0);

    struct BrokenStore;

    impl PositionStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, InspectorError> {
            Err(InspectorError::Storage("SecurityError".into()))
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), InspectorError> {
            Err(InspectorError::Storage("QuotaExceededError".into()))
        }
    }

    #[test]
    fn it_writes_and_reads_a_position() -> TestResult {
        let mut store = MemoryPositionStore::default();
        save_position(&mut store, KEY, Point::new(82.0, 62.0))?;

        assert_eq!(store.get(KEY)?, Some(r#"{"x":82.0,"y":62.0}"#.to_string()));
        assert_eq!(load_position(&store, KEY, DEFAULT), Point::new(82.0, 62.0));
        Ok(())
    }

    #[test]
    fn it_accepts_records_with_string_coordinates() -> TestResult {
        assert_eq!(
            decode_position(r#"{"x":"120","y":"48px"}"#)?,
            Point::new(120.0, 48.0)
        );
        Ok(())
    }

    #[test]
    fn it_falls_back_to_the_default_when_absent() {
        let store = MemoryPositionStore::default();
        assert_eq!(load_position(&store, KEY, DEFAULT), DEFAULT);
    }

    #[test]
    fn it_falls_back_to_the_default_when_corrupt() -> TestResult {
        let mut store = MemoryPositionStore::default();

        for record in [
            "not json",
            "null",
            r#"{"x":1}"#,
            r#"{"x":"left","y":"top"}"#,
            r#"{"x":"NaN","y":"4"}"#,
            r#"{"x":"inf","y":"4"}"#,
        ] {
            store.set(KEY, record.to_string())?;
            assert_eq!(load_position(&store, KEY, DEFAULT), DEFAULT, "{record}");
        }
        Ok(())
    }

    #[test]
    fn it_falls_back_to_the_default_when_storage_fails() {
        assert_eq!(load_position(&BrokenStore, KEY, DEFAULT), DEFAULT);
        assert!(matches!(
            save_position(&mut BrokenStore, KEY, DEFAULT),
            Err(InspectorError::Storage(_))
        ));
    }
}
