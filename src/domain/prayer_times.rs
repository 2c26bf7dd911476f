use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde::Deserialize;

use super::{deserialize_id, get_json, validate_city_id, DomainError};
use crate::config::{API_VERSION, PRAYER_TIME_ENDPOINT};
use crate::net::{Dial, HttpClient, Resolve};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// # Errors
    ///
    /// `DomainError::InvalidPeriod` unless `month` is 1-12 and the year is
    /// representable.
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::from_date)
            .ok_or(DomainError::InvalidPeriod { year, month })
    }

    /// Month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Current month in local time.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }
}

/// Monthly schedule of one city.
#[derive(Debug, Clone, Deserialize)]
pub struct PrayerTimes {
    /// City identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// City name
    #[serde(rename = "lokasi")]
    pub location: String,
    /// Province
    #[serde(rename = "daerah", default)]
    pub region: String,
    /// One entry per day
    #[serde(rename = "jadwal", default)]
    pub schedule: Vec<DailySchedule>,
}

impl PrayerTimes {
    /// Entry for `date`, if the month contains it.
    pub fn for_date(&self, date: NaiveDate) -> Option<&DailySchedule> {
        self.schedule.iter().find(|day| day.date() == Some(date))
    }
}

/// Times (`HH:MM`, local) for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailySchedule {
    /// Localized label, e.g. `Senin, 02/09/2024`
    #[serde(rename = "tanggal", default)]
    pub label: String,
    /// Start of the pre-dawn fast; not sent for every city
    #[serde(default)]
    pub imsak: Option<String>,
    /// Subuh
    #[serde(rename = "subuh")]
    pub fajr: String,
    /// Terbit; absent in older payloads
    #[serde(rename = "terbit", default)]
    pub sunrise: Option<String>,
    /// Dhuha
    pub dhuha: String,
    /// Dzuhur
    #[serde(rename = "dzuhur")]
    pub dhuhr: String,
    /// Ashar
    #[serde(rename = "ashar")]
    pub asr: String,
    /// Maghrib
    pub maghrib: String,
    /// Isya
    #[serde(rename = "isya")]
    pub isha: String,
    /// ISO date, `YYYY-MM-DD`
    #[serde(rename = "date")]
    pub iso_date: String,
}

impl DailySchedule {
    /// Parsed `iso_date`, `None` if the API sent something else.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.iso_date, "%Y-%m-%d").ok()
    }
}

/// Path of the monthly schedule endpoint for `city_id`.
///
/// The month is not zero-padded.
///
/// # Errors
///
/// `DomainError::InvalidCityId` if `city_id` is empty or not alphanumeric.
pub fn prayer_times_path(city_id: &str, period: Period) -> Result<String, DomainError> {
    validate_city_id(city_id)?;
    Ok(format!(
        "{API_VERSION}{PRAYER_TIME_ENDPOINT}/{city_id}/{}/{}",
        period.year, period.month
    ))
}

/// Fetches the schedule of `city_id` for `period`.
pub fn fetch_prayer_times<R: Resolve, D: Dial>(
    client: &HttpClient<R, D>,
    city_id: &str,
    period: Period,
) -> Result<PrayerTimes, DomainError> {
    let path = prayer_times_path(city_id, period)?;
    let times: PrayerTimes = get_json(client, &path)?;
    debug!(
        "Fetched {} days for {} ({})",
        times.schedule.len(),
        times.location,
        times.id
    );
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decode_envelope;

    const BODY: &str = r#"{
        "status": true,
        "request": {"path": "/sholat/jadwal/1301/2024/9", "year": "2024", "month": "9"},
        "data": {
            "id": 1301,
            "lokasi": "KOTA JAKARTA",
            "daerah": "DKI JAKARTA",
            "jadwal": [
                {"tanggal": "Minggu, 01/09/2024", "imsak": "04:27", "subuh": "04:37",
                 "terbit": "05:51", "dhuha": "06:19", "dzuhur": "11:55", "ashar": "15:13",
                 "maghrib": "17:53", "isya": "19:03", "date": "2024-09-01"},
                {"tanggal": "Senin, 02/09/2024", "imsak": "04:26", "subuh": "04:36",
                 "terbit": "05:50", "dhuha": "06:19", "dzuhur": "11:55", "ashar": "15:12",
                 "maghrib": "17:53", "isya": "19:03", "date": "2024-09-02"}
            ]
        }
    }"#;

    #[test]
    fn test_path_is_not_zero_padded() {
        let period = Period::new(2024, 9).unwrap();
        assert_eq!(
            prayer_times_path("1301", period).unwrap(),
            "/v2/sholat/jadwal/1301/2024/9"
        );
    }

    #[test]
    fn test_path_grows_with_long_ids() {
        let id = "58a2fc6ed39fd083f55d4182bf88826d";
        let path = prayer_times_path(id, Period::new(2025, 12).unwrap()).unwrap();
        assert!(path.ends_with("/58a2fc6ed39fd083f55d4182bf88826d/2025/12"));
    }

    #[test]
    fn test_path_rejects_bad_city_id() {
        let period = Period::new(2024, 9).unwrap();
        assert!(matches!(
            prayer_times_path("13/01", period),
            Err(DomainError::InvalidCityId(_))
        ));
    }

    #[test]
    fn test_period_validation() {
        assert!(Period::new(2024, 0).is_err());
        assert!(Period::new(2024, 13).is_err());
        let p = Period::new(2024, 2).unwrap();
        assert_eq!((p.year(), p.month()), (2024, 2));
    }

    #[test]
    fn test_period_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        assert_eq!(Period::from_date(date), Period::new(2024, 11).unwrap());
    }

    #[test]
    fn test_decode_schedule() {
        let times: PrayerTimes = decode_envelope(BODY.as_bytes()).unwrap();
        assert_eq!(times.id, "1301");
        assert_eq!(times.location, "KOTA JAKARTA");
        assert_eq!(times.region, "DKI JAKARTA");
        assert_eq!(times.schedule.len(), 2);

        let first = &times.schedule[0];
        assert_eq!(first.fajr, "04:37");
        assert_eq!(first.dhuhr, "11:55");
        assert_eq!(first.isha, "19:03");
        assert_eq!(first.sunrise.as_deref(), Some("05:51"));
    }

    #[test]
    fn test_for_date() {
        let times: PrayerTimes = decode_envelope(BODY.as_bytes()).unwrap();
        let day = times
            .for_date(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap())
            .unwrap();
        assert_eq!(day.fajr, "04:36");
        assert!(times
            .for_date(NaiveDate::from_ymd_opt(2024, 9, 3).unwrap())
            .is_none());
    }
}
