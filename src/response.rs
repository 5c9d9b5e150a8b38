//! Response envelopes: every payload is wrapped in an object keyed by what it is
//! (`{"car": {...}}`, `{"cars": [...], "metadata": {...}}`, `{"message": "..."}`).

use crate::error::AppError;
use crate::filters::Metadata;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

pub type Envelope = Json<Map<String, Value>>;

fn to_value<T: Serialize>(data: T) -> Result<Value, AppError> {
    serde_json::to_value(data).map_err(|e| AppError::Internal(format!("unserializable response: {}", e)))
}

pub fn envelope<T: Serialize>(key: &str, data: T) -> Result<Envelope, AppError> {
    let mut map = Map::new();
    map.insert(key.to_string(), to_value(data)?);
    Ok(Json(map))
}

pub fn envelope_page<T: Serialize>(key: &str, items: Vec<T>, metadata: Metadata) -> Result<Envelope, AppError> {
    let mut map = Map::new();
    map.insert(key.to_string(), to_value(items)?);
    map.insert("metadata".to_string(), to_value(metadata)?);
    Ok(Json(map))
}

pub fn message(text: String) -> Envelope {
    let mut map = Map::new();
    map.insert("message".to_string(), Value::String(text));
    Json(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::calculate_metadata;

    #[test]
    fn page_envelope_has_items_and_metadata() {
        let Json(body) = envelope_page("cars", vec![1, 2], calculate_metadata(12, 1, 2)).unwrap();
        assert_eq!(body["cars"], serde_json::json!([1, 2]));
        assert_eq!(body["metadata"]["last_page"], 6);
        assert_eq!(body["metadata"]["total_records"], 12);
    }

    #[test]
    fn single_envelope_and_message() {
        let Json(body) = envelope("car", serde_json::json!({"id": 1})).unwrap();
        assert_eq!(body["car"]["id"], 1);
        let Json(body) = message("car successfully deleted".into());
        assert_eq!(body["message"], "car successfully deleted");
    }
}
