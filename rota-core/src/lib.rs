//! Rota core - duty scheduling data model, week arithmetic, and the state
//! behind the duty form and the weekly viewer.

pub mod crew;
pub mod duty;
pub mod form;
pub mod serde_helpers;
pub mod viewer;
pub mod week;

pub use crew::{Conductor, CrewRecord, CrewRole, CrewRoster, Driver, Vehicle};
pub use duty::{CreatedDuty, DayBucket, Duty, NewDuty};
pub use form::{Banner, DutyForm, FormField, ReferenceData, SelectOption, SubmitOutcome};
pub use viewer::{DayColumn, LoadStatus, WeekRequest, WeekView, DAY_OFF};
pub use week::WeekRange;
