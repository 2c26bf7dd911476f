//! myquran.com API models and fetchers.
//!
//! Every API response is wrapped in the same envelope:
//!
//! ```json
//! {"status": true, "request": {"path": "..."}, "data": ...}
//! ```
//!
//! A `status` of `false` carries a `message` instead of `data`.

mod cities;
mod prayer_times;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::HOST;
use crate::error_handling::NetworkError;
use crate::net::{Dial, HttpClient, Resolve};

pub use cities::{cities_path, fetch_cities, filter_cities, City};
pub use prayer_times::{
    fetch_prayer_times, prayer_times_path, DailySchedule, Period, PrayerTimes,
};

/// Errors from the API layer.
#[derive(Error, Debug)]
pub enum DomainError {
    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The API answered with a non-2xx status.
    #[error("API returned HTTP {0}")]
    UnexpectedStatus(u16),

    /// The body was not the expected JSON.
    #[error("invalid JSON in API response: {0}")]
    Json(#[from] serde_json::Error),

    /// The API reported failure in its envelope.
    #[error("API error: {0}")]
    Api(String),

    /// The city identifier cannot be placed in a request path.
    #[error("invalid city id {0:?}: expected ASCII letters and digits")]
    InvalidCityId(String),

    /// Year/month do not form a calendar month.
    #[error("invalid period {year}-{month}")]
    InvalidPeriod {
        /// Requested year
        year: i32,
        /// Requested month
        month: u32,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn into_data(self) -> Result<T, DomainError> {
        if !self.status {
            return Err(DomainError::Api(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| DomainError::Api("response has no data".to_string()))
    }
}

/// Decodes an API body and unwraps its envelope.
///
/// # Errors
///
/// `DomainError::Json` for malformed JSON, `DomainError::Api` when the
/// envelope reports failure or carries no data.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, DomainError> {
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    envelope.into_data()
}

fn get_json<T, R, D>(client: &HttpClient<R, D>, path: &str) -> Result<T, DomainError>
where
    T: DeserializeOwned,
    R: Resolve,
    D: Dial,
{
    let response = client.get(HOST, path)?;
    if !response.is_success() {
        return Err(DomainError::UnexpectedStatus(response.status_code()));
    }
    decode_envelope(response.body())
}

/// Checks that `city_id` is non-empty ASCII alphanumerics.
///
/// # Errors
///
/// `DomainError::InvalidCityId` otherwise.
pub fn validate_city_id(city_id: &str) -> Result<(), DomainError> {
    if city_id.is_empty() || !city_id.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidCityId(city_id.to_string()));
    }
    Ok(())
}

/// The API sends ids as strings in v2 and as numbers in older payloads.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or an integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
