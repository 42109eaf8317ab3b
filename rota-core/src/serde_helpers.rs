//! Serde helpers for lenient decoding of server payloads.
//!
//! The duty API is backed by a document store, so identifiers and durations
//! arrive either as JSON strings or as numbers, and dates sometimes carry a
//! time component. These modules normalize such values into plain text and
//! calendar dates.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

/// Accept a string or a number, keep it as a `String`.
pub mod string_or_number {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Scalar;

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Scalar::deserialize(deserializer).map(Scalar::into_text)
    }
}

/// Like [`string_or_number`], but `null` maps to `None`.
pub mod option_string_or_number {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Scalar;

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
    }
}

/// `null` decodes like a missing key. Pair with `#[serde(default)]`.
pub mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Calendar date written as `YYYY-MM-DD`; a trailing time part
/// (`2024-06-11T00:00:00.000Z`) is ignored on input.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let day = raw.get(..10).unwrap_or(&raw);
        NaiveDate::parse_from_str(day, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(with = "super::string_or_number")]
        id: String,
        #[serde(with = "super::option_string_or_number", default)]
        hours: Option<String>,
        #[serde(with = "super::iso_date")]
        date: NaiveDate,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Sample =
            serde_json::from_str(r#"{"id": 17, "hours": 7.5, "date": "2024-06-11"}"#).unwrap();
        assert_eq!(p.id, "17");
        assert_eq!(p.hours.as_deref(), Some("7.5"));

        let p: Sample =
            serde_json::from_str(r#"{"id": "abc", "hours": "8", "date": "2024-06-11"}"#).unwrap();
        assert_eq!(p.id, "abc");
        assert_eq!(p.hours.as_deref(), Some("8"));
    }

    #[test]
    fn missing_or_null_hours_is_none() {
        let p: Sample = serde_json::from_str(r#"{"id": 1, "date": "2024-06-11"}"#).unwrap();
        assert!(p.hours.is_none());
        let p: Sample =
            serde_json::from_str(r#"{"id": 1, "hours": null, "date": "2024-06-11"}"#).unwrap();
        assert!(p.hours.is_none());
    }

    #[derive(Debug, Deserialize)]
    struct Card {
        #[serde(deserialize_with = "super::null_as_default::deserialize", default)]
        vehicle: String,
        #[serde(deserialize_with = "super::null_as_default::deserialize", default)]
        tags: Vec<String>,
    }

    #[test]
    fn null_reads_as_default() {
        let c: Card = serde_json::from_str(r#"{"vehicle": null, "tags": null}"#).unwrap();
        assert_eq!(c.vehicle, "");
        assert!(c.tags.is_empty());

        let c: Card = serde_json::from_str(r#"{"vehicle": "Bus 12", "tags": ["a"]}"#).unwrap();
        assert_eq!(c.vehicle, "Bus 12");
        assert_eq!(c.tags, vec!["a"]);
    }

    #[test]
    fn date_with_time_part() {
        let p: Sample =
            serde_json::from_str(r#"{"id": 1, "date": "2024-06-11T00:00:00.000Z"}"#).unwrap();
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
    }

    #[test]
    fn rejects_garbage_date() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"id": 1, "date": "next tuesday"}"#);
        assert!(result.is_err());
    }
}
