//! Freight station directory records.

use std::collections::BTreeMap;

use serde::Serialize;

/// CSV header of the station name column.
pub const STATION_NAME_COLUMN: &str = "역명";

/// One freight-handling station from the station directory file.
///
/// The name may be missing or blank in the source data. Such records are
/// kept so the listing stays faithful to the file, but they never match a
/// name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    #[serde(rename = "역명", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Remaining columns, keyed by header.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl StationRecord {
    /// Build a record from a header → value map.
    pub fn from_columns(mut columns: BTreeMap<String, String>) -> Self {
        let name = columns.remove(STATION_NAME_COLUMN);
        Self {
            name,
            extra: columns,
        }
    }

    /// Whether the station name contains `query`.
    ///
    /// Always false for a missing or empty name.
    pub fn name_contains(&self, query: &str) -> bool {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.contains(query),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: Option<&str>) -> StationRecord {
        StationRecord {
            name: name.map(str::to_string),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn name_contains_substring() {
        let s = station(Some("부산신항"));
        assert!(s.name_contains("신항"));
        assert!(s.name_contains("부산신항"));
        assert!(!s.name_contains("오봉"));
    }

    #[test]
    fn missing_or_empty_name_never_matches() {
        assert!(!station(None).name_contains("역"));
        assert!(!station(Some("")).name_contains(""));
    }

    #[test]
    fn from_columns_takes_name() {
        let columns = [("역명", "오봉"), ("소속", "수도권본부")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let s = StationRecord::from_columns(columns);
        assert_eq!(s.name.as_deref(), Some("오봉"));
        assert_eq!(s.extra.get("소속").unwrap(), "수도권본부");
    }

    #[test]
    fn missing_name_is_not_serialized() {
        let json = serde_json::to_value(station(None)).unwrap();
        assert!(json.get("역명").is_none());
    }
}
