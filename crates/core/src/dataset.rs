//! Record schema validation for inbound dataset payloads.
//!
//! [`parse_dataset`] turns an untyped JSON body into a [`DatasetDraft`] or a
//! single [`CoreError::Validation`] naming every field that failed. Nothing
//! here touches storage, so a rejected payload never causes a write.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::vocabulary;

/// Maximum length for short text columns (`VARCHAR(140)`).
pub const SHORT_TEXT_MAX: u64 = 140;

/// Maximum length for long text columns (`VARCHAR(255)`).
pub const LONG_TEXT_MAX: u64 = 255;

/// Maximum length for the format column (`VARCHAR(150)`).
pub const FORMAT_MAX: u64 = 150;

/// Payload fields in the order they are reported back to callers.
pub const FIELDS: &[&str] = &[
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

/// Loosely-typed view of an inbound payload.
///
/// Every field is optional here; required-ness and vocabulary checks happen
/// in [`parse_dataset`] so that all problems are reported together.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct DatasetPayload {
    /// Unique, non-blank name.
    #[schema(required = true, max_length = 140)]
    #[validate(length(max = 140))]
    pub name: Option<String>,
    /// Region, province or county, matched case-insensitively. County names
    /// may carry a `County` or `Co.` prefix; common aliases such as `ROI` or
    /// `Londonderry` are accepted. Stored in canonical spelling.
    #[schema(max_length = 140, example = "Co. Cork")]
    #[validate(length(max = 140))]
    pub area: Option<String>,
    #[schema(max_length = 255)]
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[schema(max_length = 140)]
    #[validate(length(max = 140))]
    pub source: Option<String>,
    #[schema(max_length = 140)]
    #[validate(length(max = 140))]
    pub creator: Option<String>,
    /// Defaults to `true`.
    pub permitted: Option<bool>,
    #[schema(max_length = 140)]
    #[validate(length(max = 140))]
    pub copyright: Option<String>,
    #[schema(max_length = 140)]
    #[validate(length(max = 140))]
    pub link: Option<String>,
    #[schema(max_length = 255)]
    #[validate(length(max = 255))]
    pub info: Option<String>,
    /// `ITM`, `Irish Grid` or `WGS84`, matched case-insensitively. EPSG codes
    /// (`EPSG:2157`, `EPSG:29903`, `EPSG:4326`) and datum names are accepted.
    #[schema(required = true, max_length = 140, example = "EPSG:2157")]
    #[validate(length(max = 140))]
    pub coordinate_system: Option<String>,
    /// ISO date, `YYYY-MM-DD`.
    pub creation_date: Option<NaiveDate>,
    /// ISO date, `YYYY-MM-DD`.
    pub update_date: Option<NaiveDate>,
    /// One of SHP, GPKG, GeoJSON, KML, KMZ, GML, CSV, GeoTIFF, DXF, DWG, FGDB,
    /// LAS, WMS or WFS, matched case-insensitively. Aliases such as
    /// `shapefile`, `geopackage` or `tiff` are accepted.
    #[schema(required = true, max_length = 150, example = "shapefile")]
    #[validate(length(max = 150))]
    pub format: Option<String>,
    /// RFC 3339 timestamp. Defaults to the time of insertion; ignored on update.
    #[schema(value_type = Option<String>, format = DateTime)]
    pub check_date: Option<Timestamp>,
    #[schema(minimum = 1)]
    #[validate(range(min = 1))]
    pub update_frequency_days: Option<i32>,
    #[schema(max_length = 255)]
    #[validate(length(max = 255))]
    pub bounding_box: Option<String>,
}

/// A fully validated record, ready to be written.
///
/// Enumerated fields hold their canonical spelling. `check_date` is `None`
/// when the caller did not supply one; the store fills in the current time.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDraft {
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
    pub check_date: Option<Timestamp>,
    pub update_frequency_days: Option<i32>,
    pub bounding_box: Option<String>,
}

/// Collected per-field problems, kept in [`FIELDS`] order.
#[derive(Debug, Default)]
struct Problems(Vec<(String, String)>);

impl Problems {
    fn push(&mut self, field: impl Into<String>, problem: impl Into<String>) {
        self.0.push((field.into(), problem.into()));
    }

    fn into_result(mut self) -> Result<(), CoreError> {
        if self.0.is_empty() {
            return Ok(());
        }
        self.0.sort_by_key(|(field, _)| {
            FIELDS
                .iter()
                .position(|f| *f == field.as_str())
                .unwrap_or(FIELDS.len())
        });
        let message = self
            .0
            .iter()
            .map(|(field, problem)| format!("{field}: {problem}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(CoreError::Validation(message))
    }
}

/// Validate an inbound JSON body and produce a [`DatasetDraft`].
///
/// Required: `name` (non-blank), `coordinate_system`, `format`. When present,
/// `area`, `coordinate_system` and `format` must be recognized values (see
/// [`vocabulary`]). `permitted` defaults to `true`. Unknown keys are ignored
/// and `null` is treated the same as an absent key.
pub fn parse_dataset(body: &Value) -> Result<DatasetDraft, CoreError> {
    let Some(map) = body.as_object() else {
        return Err(CoreError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    };

    let mut problems = Problems::default();
    let payload = read_payload(map, &mut problems);

    if let Err(errors) = payload.validate() {
        collect_validator_errors(&errors, &mut problems);
    }

    let name = match payload.name.as_deref() {
        Some(name) if !name.trim().is_empty() => Some(name.to_string()),
        Some(_) => {
            problems.push("name", "must not be blank");
            None
        }
        None => {
            missing(map, "name", &mut problems);
            None
        }
    };

    let coordinate_system = match payload.coordinate_system.as_deref() {
        Some(value) => canonical(
            "coordinate_system",
            value,
            vocabulary::canonical_coordinate_system,
            || vocabulary::COORDINATE_SYSTEMS.join(", "),
            &mut problems,
        ),
        None => {
            missing(map, "coordinate_system", &mut problems);
            None
        }
    };

    let format = match payload.format.as_deref() {
        Some(value) => canonical(
            "format",
            value,
            vocabulary::canonical_format,
            || vocabulary::FORMATS.join(", "),
            &mut problems,
        ),
        None => {
            missing(map, "format", &mut problems);
            None
        }
    };

    let area = match payload.area.as_deref() {
        Some(value) => canonical(
            "area",
            value,
            vocabulary::canonical_area,
            || vocabulary::all_areas().collect::<Vec<_>>().join(", "),
            &mut problems,
        ),
        None => None,
    };

    problems.into_result()?;

    // All three are Some once `problems` is empty.
    let (Some(name), Some(coordinate_system), Some(format)) = (name, coordinate_system, format)
    else {
        return Err(CoreError::Validation(
            "name, coordinate_system and format are required".to_string(),
        ));
    };

    Ok(DatasetDraft {
        name,
        area: area.map(str::to_string),
        description: payload.description,
        source: payload.source,
        creator: payload.creator,
        permitted: payload.permitted.unwrap_or(true),
        copyright: payload.copyright,
        link: payload.link,
        info: payload.info,
        coordinate_system: coordinate_system.to_string(),
        creation_date: payload.creation_date,
        update_date: payload.update_date,
        format: format.to_string(),
        check_date: payload.check_date,
        update_frequency_days: payload.update_frequency_days,
        bounding_box: payload.bounding_box,
    })
}

/// Pull each known field out of `map`, recording type mismatches.
fn read_payload(map: &Map<String, Value>, problems: &mut Problems) -> DatasetPayload {
    DatasetPayload {
        name: field(map, "name", problems),
        area: field(map, "area", problems),
        description: field(map, "description", problems),
        source: field(map, "source", problems),
        creator: field(map, "creator", problems),
        permitted: field(map, "permitted", problems),
        copyright: field(map, "copyright", problems),
        link: field(map, "link", problems),
        info: field(map, "info", problems),
        coordinate_system: field(map, "coordinate_system", problems),
        creation_date: field(map, "creation_date", problems),
        update_date: field(map, "update_date", problems),
        format: field(map, "format", problems),
        check_date: field(map, "check_date", problems),
        update_frequency_days: field(map, "update_frequency_days", problems),
        bounding_box: field(map, "bounding_box", problems),
    }
}

fn field<T: DeserializeOwned>(
    map: &Map<String, Value>,
    key: &'static str,
    problems: &mut Problems,
) -> Option<T> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                problems.push(key, format!("malformed value ({e})"));
                None
            }
        },
    }
}

/// Report a required field as missing unless it was already reported as malformed.
fn missing(map: &Map<String, Value>, key: &'static str, problems: &mut Problems) {
    if matches!(map.get(key), None | Some(Value::Null)) {
        problems.push(key, "is required");
    }
}

fn canonical(
    key: &'static str,
    value: &str,
    lookup: fn(&str) -> Option<&'static str>,
    allowed: impl FnOnce() -> String,
    problems: &mut Problems,
) -> Option<&'static str> {
    let found = lookup(value);
    if found.is_none() {
        problems.push(key, format!("'{value}' is not recognized (allowed: {})", allowed()));
    }
    found
}

fn collect_validator_errors(errors: &ValidationErrors, problems: &mut Problems) {
    for (field, field_errors) in errors.field_errors() {
        let field = field.to_string();
        for error in field_errors {
            let problem = match error.code.as_ref() {
                "length" => format!("must be at most {} characters", max_length(&field)),
                "range" => "must be a positive number of days".to_string(),
                other => format!("failed check '{other}'"),
            };
            problems.push(field.clone(), problem);
        }
    }
}

fn max_length(field: &str) -> u64 {
    match field {
        "description" | "info" | "bounding_box" => LONG_TEXT_MAX,
        "format" => FORMAT_MAX,
        _ => SHORT_TEXT_MAX,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn ireland() -> Value {
        json!({
            "name": "Ireland County Boundaries",
            "area": "All Ireland",
            "coordinate_system": "ITM",
            "format": "SHP",
            "permitted": true
        })
    }

    fn validation_message(body: &Value) -> String {
        match parse_dataset(body) {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn minimal_record_gets_defaults() {
        let body = json!({"name": "Roads", "coordinate_system": "WGS84", "format": "GeoJSON"});
        let draft = parse_dataset(&body).unwrap();
        assert_eq!(draft.name, "Roads");
        assert!(draft.permitted);
        assert_eq!(draft.area, None);
        assert_eq!(draft.check_date, None);
        assert_eq!(draft.update_frequency_days, None);
    }

    #[test]
    fn full_record() {
        let draft = parse_dataset(&ireland()).unwrap();
        assert_eq!(draft.area.as_deref(), Some("All Ireland"));
        assert_eq!(draft.coordinate_system, "ITM");
        assert_eq!(draft.format, "SHP");
    }

    #[test]
    fn enumerations_are_canonicalised() {
        let mut body = ireland();
        body["area"] = json!("county cork");
        body["coordinate_system"] = json!("epsg:2157");
        body["format"] = json!("shapefile");
        let draft = parse_dataset(&body).unwrap();
        assert_eq!(draft.area.as_deref(), Some("Cork"));
        assert_eq!(draft.coordinate_system, "ITM");
        assert_eq!(draft.format, "SHP");
    }

    #[test]
    fn permitted_false_is_kept() {
        let mut body = ireland();
        body["permitted"] = json!(false);
        assert!(!parse_dataset(&body).unwrap().permitted);
    }

    #[test]
    fn dates_parse_as_iso() {
        let mut body = ireland();
        body["creation_date"] = json!("2019-01-01");
        body["check_date"] = json!("2024-05-06T07:08:09Z");
        let draft = parse_dataset(&body).unwrap();
        assert_eq!(draft.creation_date, NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(draft.check_date.unwrap().to_rfc3339(), "2024-05-06T07:08:09+00:00");
    }

    #[test]
    fn all_missing_required_fields_are_listed() {
        let msg = validation_message(&json!({}));
        assert_eq!(
            msg,
            "name: is required; coordinate_system: is required; format: is required"
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let mut body = ireland();
        body["format"] = Value::Null;
        assert_eq!(validation_message(&body), "format: is required");
    }

    #[test]
    fn blank_name_rejected() {
        let mut body = ireland();
        body["name"] = json!("   ");
        assert_eq!(validation_message(&body), "name: must not be blank");
    }

    #[test]
    fn wrong_type_is_malformed_not_missing() {
        let mut body = ireland();
        body["name"] = json!(42);
        let msg = validation_message(&body);
        assert!(msg.starts_with("name: malformed value"), "{msg}");
        assert!(!msg.contains("is required"), "{msg}");
    }

    #[test]
    fn unknown_enumerations_are_rejected() {
        let mut body = ireland();
        body["area"] = json!("Atlantis");
        body["coordinate_system"] = json!("EPSG:3857");
        body["format"] = json!("docx");
        let msg = validation_message(&body);
        assert!(msg.starts_with("area: 'Atlantis' is not recognized"), "{msg}");
        assert!(msg.contains("coordinate_system: 'EPSG:3857' is not recognized"), "{msg}");
        assert!(msg.contains("format: 'docx' is not recognized"), "{msg}");
    }

    #[test]
    fn over_long_text_is_rejected() {
        let mut body = ireland();
        body["description"] = json!("x".repeat(256));
        assert_eq!(
            validation_message(&body),
            "description: must be at most 255 characters"
        );
    }

    #[test]
    fn non_positive_frequency_is_rejected() {
        let mut body = ireland();
        body["update_frequency_days"] = json!(0);
        assert_eq!(
            validation_message(&body),
            "update_frequency_days: must be a positive number of days"
        );
    }

    #[test]
    fn bad_date_is_malformed() {
        let mut body = ireland();
        body["update_date"] = json!("01/01/2019");
        let msg = validation_message(&body);
        assert!(msg.starts_with("update_date: malformed value"), "{msg}");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut body = ireland();
        body["colour"] = json!("blue");
        assert!(parse_dataset(&body).is_ok());
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert_matches!(parse_dataset(&json!([1, 2])), Err(CoreError::Validation(_)));
    }
}
