//! HTTP client for the duty scheduling API.
//!
//! Wraps the four endpoints the scheduling front-end relies on: vehicle and
//! crew reference lists, duty creation, and the weekly duty listing.
//!
//! # Example
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use rota_api::{ClientConfig, RotaClient};
//! use rota_core::WeekRange;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = RotaClient::new(ClientConfig::new("http://localhost:5000/api")).unwrap();
//!
//!     let week = WeekRange::containing(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
//!     for bucket in client.fetch_week(&week).await.unwrap() {
//!         println!("{}: {} duties", bucket.date, bucket.duties.len());
//!     }
//! }
//! ```

mod client;
mod convert;
mod error;
mod types;

pub use client::RotaClient;
pub use convert::{decode_body, parse_api_error, parse_created};
pub use error::RotaError;
pub use types::{ClientConfig, DEFAULT_BASE_URL, WeekQuery};
