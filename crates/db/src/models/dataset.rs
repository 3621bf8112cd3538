//! Dataset row and its projections.
//!
//! [`Dataset`] mirrors a `datasets` row. Callers never see it directly; they
//! get one of the projections below, each with a fixed field set. Optional
//! fields are always present and serialize as `null` when unset.

use chrono::NaiveDate;
use datacontrol_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `datasets` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Dataset {
    pub id: DbId,
    pub name: String,
    pub area: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub creator: Option<String>,
    pub permitted: bool,
    pub copyright: Option<String>,
    pub link: Option<String>,
    pub info: Option<String>,
    pub coordinate_system: String,
    pub creation_date: Option<NaiveDate>,
    pub update_date: Option<NaiveDate>,
    pub format: String,
    pub check_date: Timestamp,
    pub update_frequency_days: Option<i32>,
    pub bounding_box: Option<String>,
}

// ---------------------------------------------------------------------------
// Projections (response payloads)
// ---------------------------------------------------------------------------

/// Single-record view: identity, every record field and `check_date`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DatasetView {
    /// Server-assigned identity.
    #[schema(value_type = i64)]
    pub id: DbId,
    #[serde(flatten)]
    pub entry: DatasetEntry,
}

/// One element of a list projection: every record field and `check_date`.
///
/// Enumerated fields always hold their canonical spelling.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DatasetEntry {
    pub name: String,
    #[schema(example = "Cork")]
    pub area: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub creator: Option<String>,
    pub permitted: bool,
    pub copyright: Option<String>,
    pub link: Option<String>,
    pub info: Option<String>,
    #[schema(example = "ITM")]
    pub coordinate_system: String,
    pub creation_date: Option<NaiveDate>,
    pub update_date: Option<NaiveDate>,
    #[schema(example = "SHP")]
    pub format: String,
    /// When the record was last confirmed current.
    #[schema(value_type = String, format = DateTime)]
    pub check_date: Timestamp,
    pub update_frequency_days: Option<i32>,
    pub bounding_box: Option<String>,
}

/// List projection, serialized as `{"dataset": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DatasetList {
    pub dataset: Vec<DatasetEntry>,
}

impl From<&Dataset> for DatasetEntry {
    fn from(row: &Dataset) -> Self {
        Self {
            name: row.name.clone(),
            area: row.area.clone(),
            description: row.description.clone(),
            source: row.source.clone(),
            creator: row.creator.clone(),
            permitted: row.permitted,
            copyright: row.copyright.clone(),
            link: row.link.clone(),
            info: row.info.clone(),
            coordinate_system: row.coordinate_system.clone(),
            creation_date: row.creation_date,
            update_date: row.update_date,
            format: row.format.clone(),
            check_date: row.check_date,
            update_frequency_days: row.update_frequency_days,
            bounding_box: row.bounding_box.clone(),
        }
    }
}

impl From<&Dataset> for DatasetView {
    fn from(row: &Dataset) -> Self {
        Self {
            id: row.id,
            entry: DatasetEntry::from(row),
        }
    }
}

impl From<&[Dataset]> for DatasetList {
    fn from(rows: &[Dataset]) -> Self {
        Self {
            dataset: rows.iter().map(DatasetEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use super::*;

    const ENTRY_KEYS: &[&str] = &[
        "name",
        "area",
        "description",
        "source",
        "creator",
        "permitted",
        "copyright",
        "link",
        "info",
        "coordinate_system",
        "creation_date",
        "update_date",
        "format",
        "check_date",
        "update_frequency_days",
        "bounding_box",
    ];

    fn row() -> Dataset {
        Dataset {
            id: 7,
            name: "Ireland County Boundaries".to_string(),
            area: Some("All Ireland".to_string()),
            description: None,
            source: Some("https://data.gov.ie".to_string()),
            creator: None,
            permitted: true,
            copyright: Some("CC BY 4.0".to_string()),
            link: None,
            info: None,
            coordinate_system: "ITM".to_string(),
            creation_date: NaiveDate::from_ymd_opt(2019, 1, 1),
            update_date: None,
            format: "SHP".to_string(),
            check_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            update_frequency_days: Some(365),
            bounding_box: None,
        }
    }

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn sorted(fields: &[&str]) -> Vec<String> {
        let mut fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        fields.sort();
        fields
    }

    #[test]
    fn view_has_exact_field_set() {
        let value = serde_json::to_value(DatasetView::from(&row())).unwrap();
        let mut expected = ENTRY_KEYS.to_vec();
        expected.push("id");
        assert_eq!(keys(&value), sorted(&expected));
    }

    #[test]
    fn view_values() {
        let value = serde_json::to_value(DatasetView::from(&row())).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Ireland County Boundaries");
        assert_eq!(value["description"], Value::Null);
        assert_eq!(value["creation_date"], "2019-01-01");
        assert_eq!(value["check_date"], "2024-03-01T12:00:00Z");
        assert_eq!(value["update_frequency_days"], 365);
    }

    #[test]
    fn list_wraps_entries_without_id() {
        let rows = vec![row(), Dataset { id: 8, name: "Roads".to_string(), ..row() }];
        let value = serde_json::to_value(DatasetList::from(rows.as_slice())).unwrap();
        assert_eq!(keys(&value), vec!["dataset".to_string()]);

        let entries = value["dataset"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(keys(&entries[0]), sorted(ENTRY_KEYS));
        assert_eq!(entries[1]["name"], "Roads");
    }

    #[test]
    fn empty_list() {
        let rows: Vec<Dataset> = Vec::new();
        let value = serde_json::to_value(DatasetList::from(rows.as_slice())).unwrap();
        assert_eq!(value, json!({"dataset": []}));
    }

    #[test]
    fn projection_is_deterministic() {
        let a = serde_json::to_value(DatasetView::from(&row())).unwrap();
        let b = serde_json::to_value(DatasetView::from(&row())).unwrap();
        assert_eq!(a, b);
    }
}
