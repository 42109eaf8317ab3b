use rota_core::{
    CreatedDuty, CrewRecord, CrewRoster, DayBucket, NewDuty, ReferenceData, Vehicle, WeekRange,
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::convert::{decode_body, parse_api_error, parse_created};
use crate::error::RotaError;
use crate::types::{ClientConfig, WeekQuery};

/// Client for the duty scheduling API.
#[derive(Debug, Clone)]
pub struct RotaClient {
    http: reqwest::Client,
    base_url: String,
}

impl RotaClient {
    /// Creates a client from explicit connection settings.
    pub fn new(config: ClientConfig) -> Result<Self, RotaError> {
        reqwest::Url::parse(&config.base_url).map_err(|e| RotaError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Lists vehicles for the vehicle selection input.
    #[instrument(skip(self))]
    pub async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, RotaError> {
        let body = self.get("vehicles").await?;
        decode_body(&body)
    }

    /// Lists crew, split into drivers and conductors.
    #[instrument(skip(self))]
    pub async fn fetch_crew(&self) -> Result<CrewRoster, RotaError> {
        let body = self.get("crew").await?;
        let records: Vec<CrewRecord> = decode_body(&body)?;
        Ok(CrewRoster::from_records(records))
    }

    /// Fetches vehicles, then crew.
    ///
    /// Each list is independent: a failed fetch is logged and leaves only
    /// that list empty.
    pub async fn fetch_reference_data(&self) -> ReferenceData {
        let mut data = ReferenceData::default();

        match self.fetch_vehicles().await {
            Ok(vehicles) => data.vehicles = vehicles,
            Err(e) => warn!(error = %e, "Failed to fetch vehicles"),
        }

        match self.fetch_crew().await {
            Ok(crew) => {
                data.drivers = crew.drivers;
                data.conductors = crew.conductors;
            }
            Err(e) => warn!(error = %e, "Failed to fetch crew"),
        }

        data
    }

    /// Creates a duty.
    ///
    /// A rejection carries the server's `message` in [`RotaError::Api`].
    #[instrument(skip(self, duty), fields(date = %duty.date, vehicle = %duty.vehicle_id))]
    pub async fn create_duty(&self, duty: &NewDuty) -> Result<CreatedDuty, RotaError> {
        let body = self.post("duties", duty).await?;
        let created = parse_created(&body)?;
        debug!(id = ?created.id, "Duty created");
        Ok(created)
    }

    /// Fetches the duties of one week, grouped by day.
    #[instrument(skip(self, week), fields(week = %week))]
    pub async fn fetch_week(&self, week: &WeekRange) -> Result<Vec<DayBucket>, RotaError> {
        let query = WeekQuery { week_range: *week };
        let body = self.post("duties/week", &query).await?;
        decode_body(&body)
    }

    async fn get(&self, path: &str) -> Result<String, RotaError> {
        debug!(path, "GET");
        let response = self.http.get(self.endpoint(path)).send().await?;
        Self::read_body(response).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, RotaError> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<String, RotaError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &body));
        }

        debug!(status = status.as_u16(), "Received successful response");
        Ok(body)
    }
}
