use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Extracts the `data` query parameter as `T`.
///
/// The front end sends `data` in one of three shapes:
/// - a plain string: `?data=seattle`
/// - a JSON object: `?data={"latitude":47.6,...}`
/// - form-encoded object fields: `?data[latitude]=47.6&data[id]=3`
///
/// Field values from the bracketed form are strings, so numeric fields of `T`
/// should accept strings too.
pub struct DataQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for DataQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadQuery(e.to_string()))?;

        let value = data_value(pairs)
            .ok_or_else(|| AppError::BadQuery("missing data parameter".to_string()))?;

        let data = serde_json::from_value(value).map_err(|e| AppError::BadQuery(e.to_string()))?;
        Ok(DataQuery(data))
    }
}

fn data_value(pairs: Vec<(String, String)>) -> Option<Value> {
    let mut whole = None;
    let mut fields = Map::new();

    for (key, value) in pairs {
        if key == "data" {
            whole = Some(parse_whole(value));
        } else if let Some(field) = key
            .strip_prefix("data[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            fields.insert(field.to_string(), Value::String(value));
        }
    }

    whole.or_else(|| (!fields.is_empty()).then_some(Value::Object(fields)))
}

fn parse_whole(raw: String) -> Value {
    if raw.trim_start().starts_with('{') {
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&raw) {
            return value;
        }
    }
    Value::String(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(
            data_value(pairs(&[("data", "seattle")])),
            Some(json!("seattle"))
        );
    }

    #[test]
    fn test_json_object_string() {
        assert_eq!(
            data_value(pairs(&[("data", r#"{"latitude":47.6,"id":3}"#)])),
            Some(json!({ "latitude": 47.6, "id": 3 }))
        );
        // not an object, so kept verbatim
        assert_eq!(data_value(pairs(&[("data", "{oops")])), Some(json!("{oops")));
    }

    #[test]
    fn test_bracketed_fields() {
        let value = data_value(pairs(&[
            ("data[latitude]", "47.6"),
            ("data[id]", "3"),
            ("other", "ignored"),
        ]));
        assert_eq!(value, Some(json!({ "latitude": "47.6", "id": "3" })));
    }

    #[test]
    fn test_missing_data() {
        assert_eq!(data_value(pairs(&[("q", "seattle")])), None);
        assert_eq!(data_value(Vec::new()), None);
    }
}
