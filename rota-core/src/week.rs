use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::serde_helpers::iso_date;

/// Sunday-to-Saturday calendar week.
///
/// Always holds exactly [`WeekRange::LEN`] consecutive days, the first of
/// which is a Sunday. Serializes as an array of `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekRange {
    start: NaiveDate,
}

impl WeekRange {
    pub const LEN: usize = 7;

    /// The week containing `date`. Its first day is the most recent Sunday on
    /// or before `date`.
    ///
    /// The few days at either end of chrono's calendar that have no complete
    /// week map to the nearest complete one.
    pub fn containing(date: NaiveDate) -> Self {
        let date = date.clamp(Self::first_day(), Self::last_day());
        let offset = date.weekday().num_days_from_sunday();
        Self {
            start: date - Days::new(u64::from(offset)),
        }
    }

    /// First Sunday representable as a [`NaiveDate`].
    fn first_day() -> NaiveDate {
        let ahead = (7 - NaiveDate::MIN.weekday().num_days_from_sunday()) % 7;
        NaiveDate::MIN + Days::new(u64::from(ahead))
    }

    /// Last Saturday representable as a [`NaiveDate`].
    fn last_day() -> NaiveDate {
        let behind = (NaiveDate::MAX.weekday().num_days_from_sunday() + 1) % 7;
        NaiveDate::MAX - Days::new(u64::from(behind))
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(Self::LEN as u64 - 1)
    }

    /// Days of the week in ascending order.
    pub fn days(&self) -> [NaiveDate; Self::LEN] {
        std::array::from_fn(|i| self.start + Days::new(i as u64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    /// The week before; the first supported week is its own predecessor.
    pub fn previous(&self) -> Self {
        let day = self
            .start
            .checked_sub_days(Days::new(Self::LEN as u64))
            .unwrap_or(NaiveDate::MIN);
        Self::containing(day)
    }

    /// The week after; the last supported week is its own successor.
    pub fn next(&self) -> Self {
        let day = self
            .start
            .checked_add_days(Days::new(Self::LEN as u64))
            .unwrap_or(NaiveDate::MAX);
        Self::containing(day)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.days()
            .iter()
            .map(|d| d.format(iso_date::FORMAT).to_string())
            .collect()
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(iso_date::FORMAT),
            self.end().format(iso_date::FORMAT)
        )
    }
}

impl Serialize for WeekRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(Self::LEN))?;
        for day in self.days() {
            seq.serialize_element(&day.format(iso_date::FORMAT).to_string())?;
        }
        seq.end()
    }
}
