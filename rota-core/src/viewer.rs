//! Weekly duty viewer state.
//!
//! Every date change mints a request token. Only the response carrying the
//! latest token is applied, so a slow answer for a week the user already
//! left can never overwrite the current one.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::{debug, warn};

use crate::duty::{DayBucket, Duty};
use crate::week::WeekRange;

pub const DAY_OFF: &str = "Day off";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded(Vec<DayBucket>),
    Failed(String),
}

/// A week fetch the caller should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRequest {
    pub token: u64,
    pub range: WeekRange,
}

/// One rendered calendar column.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub duties: Vec<Duty>,
}

impl DayColumn {
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.date.weekday())
    }

    pub fn is_day_off(&self) -> bool {
        self.duties.is_empty()
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

#[derive(Debug, Clone)]
pub struct WeekView {
    selected: NaiveDate,
    week: WeekRange,
    status: LoadStatus,
    latest_token: u64,
}

impl WeekView {
    pub fn new(selected: NaiveDate) -> Self {
        Self {
            selected,
            week: WeekRange::containing(selected),
            status: LoadStatus::Loading,
            latest_token: 0,
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn week(&self) -> WeekRange {
        self.week
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Re-requests the current week.
    pub fn refresh(&mut self) -> WeekRequest {
        self.latest_token += 1;
        self.status = LoadStatus::Loading;
        WeekRequest {
            token: self.latest_token,
            range: self.week,
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) -> WeekRequest {
        self.selected = date;
        self.week = WeekRange::containing(date);
        self.refresh()
    }

    /// Moves the selection by `days`, which may be negative. Returns `None`
    /// only when the move would leave the supported calendar.
    pub fn shift_days(&mut self, days: i64) -> Option<WeekRequest> {
        let step = Days::new(days.unsigned_abs());
        let target = if days >= 0 {
            self.selected.checked_add_days(step)
        } else {
            self.selected.checked_sub_days(step)
        }?;
        Some(self.select_date(target))
    }

    /// Applies a week response. Returns `false` if the token was superseded
    /// and the response was dropped.
    pub fn apply<E: Display>(&mut self, token: u64, result: Result<Vec<DayBucket>, E>) -> bool {
        if token != self.latest_token {
            debug!(token, latest = self.latest_token, "Discarding stale week response");
            return false;
        }

        self.status = match result {
            Ok(buckets) => LoadStatus::Loaded(buckets),
            Err(e) => {
                warn!(week = %self.week, error = %e, "Failed to fetch duties");
                LoadStatus::Failed(e.to_string())
            }
        };
        true
    }

    /// Seven columns for the current week. Columns are empty unless the
    /// week has loaded.
    pub fn columns(&self) -> Vec<DayColumn> {
        let buckets = match &self.status {
            LoadStatus::Loaded(buckets) => buckets.as_slice(),
            _ => &[],
        };
        day_columns(self.week, self.selected, buckets)
    }
}

/// Distributes buckets over the days of `week`. Buckets outside the week are
/// ignored; several buckets for one date are concatenated.
pub fn day_columns(week: WeekRange, selected: NaiveDate, buckets: &[DayBucket]) -> Vec<DayColumn> {
    let mut by_day: BTreeMap<NaiveDate, Vec<Duty>> = BTreeMap::new();
    for bucket in buckets.iter().filter(|b| week.contains(b.date)) {
        by_day
            .entry(bucket.date)
            .or_default()
            .extend(bucket.duties.iter().cloned());
    }

    week.days()
        .into_iter()
        .map(|date| DayColumn {
            date,
            is_selected: date == selected,
            duties: by_day.remove(&date).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn duty(id: &str) -> Duty {
        Duty {
            id: id.to_string(),
            vehicle: "Bus 12".to_string(),
            driver: "Asha".to_string(),
            conductor: "Ravi".to_string(),
            start_time: "06:00".to_string(),
            end_time: Some("14:00".to_string()),
            duration: Some("8".to_string()),
        }
    }

    #[test]
    fn starts_loading() {
        let view = WeekView::new(ymd(2024, 6, 12));
        assert_eq!(view.status(), &LoadStatus::Loading);
        assert_eq!(view.week().start(), ymd(2024, 6, 9));
    }

    #[test]
    fn applies_latest_response() {
        let mut view = WeekView::new(ymd(2024, 6, 12));
        let req = view.refresh();
        assert!(view.apply::<String>(req.token, Ok(vec![])));
        assert_eq!(view.status(), &LoadStatus::Loaded(vec![]));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = WeekView::new(ymd(2024, 6, 12));
        let old = view.refresh();
        let new = view.select_date(ymd(2024, 6, 20));
        assert_ne!(old.token, new.token);

        let stale = vec![DayBucket {
            date: ymd(2024, 6, 11),
            duties: vec![duty("old")],
        }];
        assert!(!view.apply::<String>(old.token, Ok(stale)));
        assert_eq!(view.status(), &LoadStatus::Loading);

        assert!(view.apply::<String>(new.token, Ok(vec![])));
        assert_eq!(view.week().start(), ymd(2024, 6, 16));
    }

    #[test]
    fn failure_is_distinct_from_loading() {
        let mut view = WeekView::new(ymd(2024, 6, 12));
        let req = view.refresh();
        view.apply(req.token, Err("connection refused"));
        assert_eq!(
            view.status(),
            &LoadStatus::Failed("connection refused".to_string())
        );
        assert!(view.columns().iter().all(DayColumn::is_day_off));
    }

    #[test]
    fn shift_days_moves_across_weeks() {
        let mut view = WeekView::new(ymd(2024, 6, 15));
        let req = view.shift_days(1).unwrap();
        assert_eq!(view.selected(), ymd(2024, 6, 16));
        assert_eq!(req.range.start(), ymd(2024, 6, 16));

        view.shift_days(-7).unwrap();
        assert_eq!(view.selected(), ymd(2024, 6, 9));
    }

    #[test]
    fn buckets_land_in_their_columns() {
        let week = WeekRange::containing(ymd(2024, 6, 12));
        let buckets = vec![
            DayBucket {
                date: ymd(2024, 6, 11),
                duties: vec![duty("a"), duty("b")],
            },
            DayBucket {
                date: ymd(2024, 6, 12),
                duties: vec![],
            },
            DayBucket {
                date: ymd(2024, 6, 30),
                duties: vec![duty("elsewhere")],
            },
        ];

        let columns = day_columns(week, ymd(2024, 6, 12), &buckets);
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[2].weekday_name(), "Tuesday");
        assert_eq!(columns[2].duties.len(), 2);
        assert!(columns[3].is_day_off());
        assert!(columns[3].is_selected);
        assert_eq!(columns.iter().filter(|c| !c.is_day_off()).count(), 1);
    }

    #[test]
    fn duplicate_buckets_are_merged() {
        let week = WeekRange::containing(ymd(2024, 6, 12));
        let buckets = vec![
            DayBucket {
                date: ymd(2024, 6, 10),
                duties: vec![duty("a")],
            },
            DayBucket {
                date: ymd(2024, 6, 10),
                duties: vec![duty("b")],
            },
        ];
        let columns = day_columns(week, ymd(2024, 6, 12), &buckets);
        let ids: Vec<&str> = columns[1].duties.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
