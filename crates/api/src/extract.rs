//! Request body extraction for dataset payloads.
//!
//! Accepts either a JSON object or an HTML form. Form values arrive as
//! strings, so the boolean and integer fields are coerced here and empty
//! inputs become `null`; everything else is left for the record validator.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Untyped dataset payload, ready for `datacontrol_core::dataset::parse_dataset`.
#[derive(Debug)]
pub struct DatasetBody(pub Value);

impl<S> FromRequest<S> for DatasetBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(DatasetBody(form_to_json(pairs)));
        }

        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(DatasetBody(value))
    }
}

/// Convert form pairs into a JSON object. Later duplicates win.
pub fn form_to_json(pairs: Vec<(String, String)>) -> Value {
    let mut map = Map::new();
    for (key, raw) in pairs {
        let value = if raw.trim().is_empty() {
            Value::Null
        } else {
            match key.as_str() {
                "permitted" => parse_flag(&raw).map_or(Value::String(raw), Value::Bool),
                "update_frequency_days" => match raw.trim().parse::<i64>() {
                    Ok(days) => Value::from(days),
                    Err(_) => Value::String(raw),
                },
                _ => Value::String(raw),
            }
        };
        map.insert(key, value);
    }
    Value::Object(map)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn strings_pass_through() {
        let value = form_to_json(pairs(&[("name", "Roads"), ("format", "SHP")]));
        assert_eq!(value, json!({"name": "Roads", "format": "SHP"}));
    }

    #[test]
    fn flags_and_numbers_are_coerced() {
        let value = form_to_json(pairs(&[
            ("permitted", "off"),
            ("update_frequency_days", " 30 "),
        ]));
        assert_eq!(value, json!({"permitted": false, "update_frequency_days": 30}));
    }

    #[test]
    fn unparseable_values_stay_strings() {
        let value = form_to_json(pairs(&[
            ("permitted", "maybe"),
            ("update_frequency_days", "weekly"),
        ]));
        assert_eq!(
            value,
            json!({"permitted": "maybe", "update_frequency_days": "weekly"})
        );
    }

    #[test]
    fn empty_inputs_are_null() {
        let value = form_to_json(pairs(&[("area", ""), ("info", "  ")]));
        assert_eq!(value, json!({"area": null, "info": null}));
    }
}
