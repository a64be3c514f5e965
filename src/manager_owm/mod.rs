pub mod errors;
pub mod models;

use std::time::Duration;
use chrono::FixedOffset;
use reqwest::{Client, StatusCode};
use crate::manager_forecast::{Forecast, Observation};
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::{
    CurrentConditions, CurrentResponse, ErrorResponse, ForecastResponse, Units,
};

/// Struct for managing weather data produced by OpenWeatherMap
#[derive(Clone)]
pub struct OWM {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching current conditions and
    /// forecasts from OpenWeatherMap
    ///
    /// # Arguments
    ///
    /// * 'base_url' - base URL of the OpenWeatherMap API
    /// * 'api_key' - API credential
    /// * 'timeout' - per request timeout
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<OWM, OWMError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Retrieves the current conditions for the given city.
    /// Timestamps in the result are adjusted to the location's UTC offset as
    /// reported by the API.
    ///
    /// # Arguments
    ///
    /// * 'city' - city to query, optionally suffixed with a country code
    /// * 'units' - unit system for temperatures and wind speed
    pub async fn current(&self, city: &str, units: Units) -> Result<CurrentConditions, OWMError> {
        let url = format!("{}/weather", self.base_url);
        let json = self.fetch(&url, city, units).await?;
        let response: CurrentResponse = serde_json::from_str(&json)?;

        current_conditions(response)
    }

    /// Retrieves the 5-day / 3-hour forecast for the given city.
    /// Every forecast point is converted into an observation carrying a
    /// location-local timestamp, so that downstream date bucketing always
    /// works on the location's own calendar.
    ///
    /// # Arguments
    ///
    /// * 'city' - city to query, optionally suffixed with a country code
    /// * 'units' - unit system for temperatures
    pub async fn forecast(&self, city: &str, units: Units) -> Result<Forecast, OWMError> {
        let url = format!("{}/forecast", self.base_url);
        let json = self.fetch(&url, city, units).await?;
        let response: ForecastResponse = serde_json::from_str(&json)?;

        forecast(response)
    }

    async fn fetch(&self, url: &str, city: &str, units: Units) -> Result<String, OWMError> {
        let req = self.client
            .get(url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", units.as_str())])
            .send().await?;

        let status = req.status();
        let body = req.text().await?;

        if status == StatusCode::NOT_FOUND {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| String::from("city not found"));
            return Err(OWMError::NotFound(message));
        }
        if !status.is_success() {
            return Err(OWMError::Http(format!("error while fetching from OpenWeatherMap: {}", status)));
        }

        Ok(body)
    }
}

/// Returns the public URL for an OpenWeatherMap icon code
///
/// # Arguments
///
/// * 'icon' - icon code, e.g. "02d"
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon)
}

fn utc_offset(seconds: i32) -> Result<FixedOffset, OWMError> {
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| OWMError::Document(format!("utc offset out of range: {}", seconds)))
}

fn current_conditions(response: CurrentResponse) -> Result<CurrentConditions, OWMError> {
    let offset = utc_offset(response.timezone)?;
    let weather = response.weather
        .first()
        .ok_or_else(|| OWMError::Document(String::from("empty weather list in current conditions")))?;

    Ok(CurrentConditions {
        icon_url: icon_url(&weather.icon),
        condition: weather.main.clone(),
        description: weather.description.clone(),
        icon: weather.icon.clone(),
        city: response.name,
        country: response.sys.country,
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        humidity: response.main.humidity,
        pressure: response.main.pressure,
        wind_speed: response.wind.map(|w| w.speed),
        visibility: response.visibility,
        observed_at: response.dt.with_timezone(&offset),
        sunrise: response.sys.sunrise.with_timezone(&offset),
        sunset: response.sys.sunset.with_timezone(&offset),
    })
}

fn forecast(response: ForecastResponse) -> Result<Forecast, OWMError> {
    let offset = utc_offset(response.city.timezone)?;
    let mut observations = Vec::with_capacity(response.list.len());

    for item in response.list {
        let time = item.dt;
        let weather = item.weather
            .into_iter()
            .next()
            .ok_or_else(|| OWMError::Document(format!("empty weather list in forecast point at {}", time)))?;

        observations.push(Observation {
            local_time: time.with_timezone(&offset),
            temp: item.main.temp,
            temp_min: item.main.temp_min,
            temp_max: item.main.temp_max,
            condition: weather.main,
            description: weather.description,
            icon: weather.icon,
        });
    }

    Ok(Forecast {
        city: response.city.name,
        country: response.city.country,
        utc_offset_seconds: response.city.timezone,
        observations,
    })
}
