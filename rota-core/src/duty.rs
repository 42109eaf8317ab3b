use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::form::FormField;
use crate::serde_helpers::{
    iso_date, null_as_default, option_string_or_number, string_or_number,
};

/// A scheduled assignment of one vehicle, one driver and one conductor to a
/// time window, as returned inside a [`DayBucket`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duty {
    #[serde(alias = "_id", with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default::deserialize", default)]
    pub vehicle: String,
    #[serde(deserialize_with = "null_as_default::deserialize", default)]
    pub driver: String,
    #[serde(deserialize_with = "null_as_default::deserialize", default)]
    pub conductor: String,
    #[serde(deserialize_with = "null_as_default::deserialize", default)]
    pub start_time: String,
    #[serde(deserialize_with = "null_as_default::deserialize", default)]
    pub end_time: Option<String>,
    /// Length of the duty in hours.
    #[serde(with = "option_string_or_number", default)]
    pub duration: Option<String>,
}

impl Duty {
    pub fn time_range(&self) -> String {
        match self.end_time.as_deref().filter(|e| !e.is_empty()) {
            Some(end) => format!("{}-{}", self.start_time, end),
            None => self.start_time.clone(),
        }
    }

    pub fn duration_label(&self) -> String {
        match &self.duration {
            Some(hours) => format!("{} h", hours),
            None => "-".to_string(),
        }
    }
}

/// A calendar day paired with its duties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "null_as_default::deserialize", default)]
    pub duties: Vec<Duty>,
}

/// Body of a duty creation request. Values are carried exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDuty {
    pub date: String,
    pub start_time: String,
    pub vehicle_id: String,
    pub duration: String,
    pub driver_id: String,
    pub conductor_id: String,
}

impl NewDuty {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::StartTime => &self.start_time,
            FormField::Vehicle => &self.vehicle_id,
            FormField::Duration => &self.duration,
            FormField::Driver => &self.driver_id,
            FormField::Conductor => &self.conductor_id,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Date => &mut self.date,
            FormField::StartTime => &mut self.start_time,
            FormField::Vehicle => &mut self.vehicle_id,
            FormField::Duration => &mut self.duration,
            FormField::Driver => &mut self.driver_id,
            FormField::Conductor => &mut self.conductor_id,
        }
    }
}

/// What the server returned for a successful creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedDuty {
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_duty_wire_names() {
        let duty = NewDuty {
            date: "2024-06-11".to_string(),
            start_time: "08:00".to_string(),
            vehicle_id: "v1".to_string(),
            duration: "8".to_string(),
            driver_id: "d1".to_string(),
            conductor_id: "c1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&duty).unwrap(),
            json!({
                "date": "2024-06-11",
                "startTime": "08:00",
                "vehicleId": "v1",
                "duration": "8",
                "driverId": "d1",
                "conductorId": "c1",
            })
        );
    }

    #[test]
    fn decodes_day_bucket() {
        let bucket: DayBucket = serde_json::from_value(json!({
            "date": "2024-06-11",
            "duties": [{
                "id": 4,
                "vehicle": "Bus 12",
                "driver": "Asha",
                "conductor": "Ravi",
                "startTime": "06:00",
                "endTime": "14:00",
                "duration": 8
            }]
        }))
        .unwrap();

        assert_eq!(bucket.date, NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        let duty = &bucket.duties[0];
        assert_eq!(duty.id, "4");
        assert_eq!(duty.time_range(), "06:00-14:00");
        assert_eq!(duty.duration_label(), "8 h");
    }

    #[test]
    fn bucket_without_duties_is_empty() {
        let bucket: DayBucket = serde_json::from_value(json!({ "date": "2024-06-09" })).unwrap();
        assert!(bucket.duties.is_empty());
    }

    #[test]
    fn null_fields_render_empty_instead_of_failing_the_week() {
        let week: Vec<DayBucket> = serde_json::from_value(json!([
            {
                "date": "2024-06-10",
                "duties": [{ "id": 1, "vehicle": null, "driver": "Asha", "conductor": null,
                             "startTime": "06:00", "endTime": null, "duration": null }]
            },
            { "date": "2024-06-11", "duties": null }
        ]))
        .unwrap();

        let duty = &week[0].duties[0];
        assert_eq!(duty.vehicle, "");
        assert_eq!(duty.driver, "Asha");
        assert_eq!(duty.conductor, "");
        assert_eq!(duty.time_range(), "06:00");
        assert_eq!(duty.duration_label(), "-");
        assert!(week[1].duties.is_empty());
    }

    #[test]
    fn time_range_without_end() {
        let duty: Duty = serde_json::from_value(json!({
            "_id": "abc",
            "startTime": "09:30"
        }))
        .unwrap();
        assert_eq!(duty.time_range(), "09:30");
        assert_eq!(duty.duration_label(), "-");
    }
}
