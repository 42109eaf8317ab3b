use chrono::{Datelike, NaiveDate, Weekday};
use rota_core::{DayBucket, DutyForm, FormField, LoadStatus, SubmitOutcome, WeekView};
use serde_json::json;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn wednesday_week_shows_tuesday_duties_only() {
    let mut view = WeekView::new(ymd(2024, 6, 10));
    let request = view.select_date(ymd(2024, 6, 12));

    assert_eq!(
        serde_json::to_value(request.range).unwrap(),
        json!([
            "2024-06-09",
            "2024-06-10",
            "2024-06-11",
            "2024-06-12",
            "2024-06-13",
            "2024-06-14",
            "2024-06-15"
        ])
    );

    let response = json!([
        { "date": "2024-06-09", "duties": [] },
        { "date": "2024-06-10", "duties": [] },
        { "date": "2024-06-11", "duties": [{
            "id": "d-1",
            "vehicle": "Bus 12",
            "driver": "Asha",
            "conductor": "Ravi",
            "startTime": "06:00",
            "endTime": "14:00",
            "duration": 8
        }]},
        { "date": "2024-06-12", "duties": [] },
        { "date": "2024-06-13", "duties": [] },
        { "date": "2024-06-14", "duties": [] },
        { "date": "2024-06-15", "duties": [] }
    ]);
    let buckets: Vec<DayBucket> = serde_json::from_value(response).unwrap();
    assert!(view.apply::<String>(request.token, Ok(buckets)));
    assert!(matches!(view.status(), LoadStatus::Loaded(_)));

    let columns = view.columns();
    for column in &columns {
        if column.date.weekday() == Weekday::Tue {
            assert_eq!(column.duties.len(), 1);
            assert_eq!(column.duties[0].vehicle, "Bus 12");
        } else {
            assert!(column.is_day_off(), "{} should be a day off", column.weekday_name());
        }
    }
    assert!(columns[3].is_selected);
}

#[test]
fn rapid_date_changes_keep_only_the_last_week() {
    let mut view = WeekView::new(ymd(2024, 6, 12));
    let first = view.refresh();
    let second = view.select_date(ymd(2024, 7, 3));

    let late_second: Vec<DayBucket> = vec![];
    let late_first: Vec<DayBucket> = serde_json::from_value(json!([
        { "date": "2024-06-11", "duties": [{ "id": 1, "startTime": "06:00" }] }
    ]))
    .unwrap();

    assert!(view.apply::<String>(second.token, Ok(late_second)));
    assert!(!view.apply::<String>(first.token, Ok(late_first)));
    assert_eq!(view.status(), &LoadStatus::Loaded(vec![]));
    assert_eq!(view.week().start(), ymd(2024, 6, 30));
}

#[test]
fn form_round_trip_with_rejection_then_success() {
    let mut form = DutyForm::new();
    form.set(FormField::Date, "2024-06-11");
    form.set(FormField::StartTime, "06:00");
    form.set(FormField::Vehicle, "v1");

    assert!(form.submit().is_none());
    assert_eq!(
        form.invalid_fields(),
        vec![FormField::Duration, FormField::Driver, FormField::Conductor]
    );

    form.set(FormField::Duration, "8");
    form.set(FormField::Driver, "d1");
    form.set(FormField::Conductor, "c1");
    let body = form.submit().unwrap();
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({
            "date": "2024-06-11",
            "startTime": "06:00",
            "vehicleId": "v1",
            "duration": "8",
            "driverId": "d1",
            "conductorId": "c1"
        })
    );

    form.finish(SubmitOutcome::Rejected {
        message: Some("Vehicle not found".to_string()),
    });
    assert_eq!(form.get(FormField::Vehicle), "v1");

    assert!(form.submit().is_some());
    form.finish(SubmitOutcome::Created);
    assert_eq!(form.get(FormField::Vehicle), "");
}
