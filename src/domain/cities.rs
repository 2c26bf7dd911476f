use log::debug;
use serde::Deserialize;

use super::{deserialize_id, get_json, DomainError};
use crate::config::{API_VERSION, CITY_ENDPOINT};
use crate::net::{Dial, HttpClient, Resolve};

/// A city known to the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct City {
    /// Identifier used in schedule requests
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name, e.g. `KOTA JAKARTA`
    #[serde(rename = "lokasi")]
    pub name: String,
}

/// Path of the city list endpoint.
pub fn cities_path() -> String {
    format!("{API_VERSION}{CITY_ENDPOINT}")
}

/// Fetches every city the API knows about.
pub fn fetch_cities<R: Resolve, D: Dial>(client: &HttpClient<R, D>) -> Result<Vec<City>, DomainError> {
    let cities: Vec<City> = get_json(client, &cities_path())?;
    debug!("Fetched {} cities", cities.len());
    Ok(cities)
}

/// Cities whose name contains `needle`, ignoring case.
pub fn filter_cities<'a>(cities: &'a [City], needle: &str) -> Vec<&'a City> {
    let needle = needle.to_lowercase();
    cities
        .iter()
        .filter(|city| city.name.to_lowercase().contains(&needle))
        .collect()
}
