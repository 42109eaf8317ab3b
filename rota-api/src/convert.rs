use rota_core::CreatedDuty;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RotaError;

/// Builds the error for a non-success response.
///
/// The server reports validation failures as `{"message": "..."}`. Anything
/// else (HTML error pages, empty bodies) yields an error without a message.
pub fn parse_api_error(status: u16, body: &str) -> RotaError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .filter(|m| !m.is_empty());

    RotaError::Api { status, message }
}

/// Decodes a successful JSON body.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, RotaError> {
    Ok(serde_json::from_str(body)?)
}

/// Extracts the created duty's id from a creation response.
///
/// Accepts the duty itself (`{"_id": ..}` or `{"id": ..}`), a wrapper
/// (`{"duty": {..}}`), or an empty body.
pub fn parse_created(body: &str) -> Result<CreatedDuty, RotaError> {
    if body.trim().is_empty() {
        return Ok(CreatedDuty::default());
    }

    let value: Value = serde_json::from_str(body)?;
    let record = value.get("duty").unwrap_or(&value);

    let id = ["_id", "id"]
        .iter()
        .find_map(|key| record.get(*key))
        .and_then(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

    Ok(CreatedDuty { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::{DayBucket, Vehicle};

    #[test]
    fn test_api_error_with_message() {
        let err = parse_api_error(400, r#"{"message": "Driver is already on duty"}"#);
        assert_eq!(err.server_message(), Some("Driver is already on duty"));
        match err {
            RotaError::Api { status, .. } => assert_eq!(status, 400),
            _ => panic!("Expected API error"),
        }
    }

    #[test]
    fn test_api_error_without_message() {
        let err = parse_api_error(500, "<html>Internal Server Error</html>");
        assert_eq!(err.server_message(), None);

        let err = parse_api_error(422, r#"{"error": "bad"}"#);
        assert_eq!(err.server_message(), None);

        let err = parse_api_error(422, r#"{"message": ""}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_error_display() {
        let err = parse_api_error(404, "");
        assert_eq!(err.to_string(), "API error: 404 - no message");
    }

    #[test]
    fn test_parse_created_variants() {
        assert_eq!(parse_created("").unwrap().id, None);
        assert_eq!(
            parse_created(r#"{"_id": "665f1c"}"#).unwrap().id.as_deref(),
            Some("665f1c")
        );
        assert_eq!(
            parse_created(r#"{"duty": {"id": 12}}"#).unwrap().id.as_deref(),
            Some("12")
        );
        assert!(parse_created("not json").is_err());
    }

    #[test]
    fn test_decode_vehicles() {
        let vehicles: Vec<Vehicle> =
            decode_body(r#"[{"_id": "v1", "name": "Bus 12"}, {"_id": "v2"}]"#).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[1].label(), "v2");
    }

    #[test]
    fn test_decode_week_rejects_wrong_shape() {
        let result: Result<Vec<DayBucket>, _> = decode_body(r#"{"date": "2024-06-11"}"#);
        assert!(matches!(result, Err(RotaError::Json(_))));
    }
}
