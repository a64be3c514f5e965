use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};

/// Unit system selector passed through to OpenWeatherMap
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Default for Units {
    fn default() -> Self { Units::Metric }
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

#[derive(Deserialize)]
pub struct WeatherDescription {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u8,
}

#[serde_as]
#[derive(Deserialize)]
pub struct Sys {
    pub country: Option<String>,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunrise: DateTime<Utc>,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunset: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[serde_as]
#[derive(Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub timezone: i32,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    pub sys: Sys,
    pub weather: Vec<WeatherDescription>,
    pub main: MainBlock,
    pub wind: Option<Wind>,
    pub visibility: Option<u32>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct ForecastItem {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    pub main: MainBlock,
    pub weather: Vec<WeatherDescription>,
}

#[derive(Deserialize)]
pub struct City {
    pub name: String,
    pub country: Option<String>,
    pub timezone: i32,
}

#[derive(Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
    pub city: City,
}

/// Error body OpenWeatherMap sends alongside non-2xx statuses
#[derive(Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}

/// Display-ready current conditions for one city, timestamps in location-local time
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: Option<String>,
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub icon_url: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: Option<f64>,
    pub visibility: Option<u32>,
    pub observed_at: DateTime<FixedOffset>,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_response() {
        let json = r#"{
            "coord": {"lon": 72.85, "lat": 19.01},
            "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
            "main": {"temp": 29.3, "feels_like": 33.1, "temp_min": 28.0, "temp_max": 30.1, "pressure": 1008, "humidity": 74},
            "visibility": 6000,
            "wind": {"speed": 4.6, "deg": 260},
            "dt": 1704100500,
            "sys": {"country": "IN", "sunrise": 1704072820, "sunset": 1704112320},
            "timezone": 19800,
            "name": "Mumbai",
            "cod": 200
        }"#;

        let response: CurrentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.name, "Mumbai");
        assert_eq!(response.timezone, 19800);
        assert_eq!(response.dt.timestamp(), 1704100500);
        assert_eq!(response.sys.country.as_deref(), Some("IN"));
        assert_eq!(response.weather[0].icon, "03d");
        assert_eq!(response.main.humidity, 74);
        assert_eq!(response.wind.unwrap().speed, 4.6);
        assert_eq!(response.visibility, Some(6000));
    }

    #[test]
    fn wind_and_visibility_are_optional() {
        let json = r#"{
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 5.0, "feels_like": 3.0, "temp_min": 4.0, "temp_max": 6.0, "pressure": 1020, "humidity": 50},
            "dt": 1704100500,
            "sys": {"country": "GB", "sunrise": 1704072820, "sunset": 1704112320},
            "timezone": 0,
            "name": "London"
        }"#;

        let response: CurrentResponse = serde_json::from_str(json).unwrap();
        assert!(response.wind.is_none());
        assert!(response.visibility.is_none());
    }

    #[test]
    fn missing_temperature_is_a_parse_error() {
        let json = r#"{
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"feels_like": 3.0, "temp_min": 4.0, "temp_max": 6.0, "pressure": 1020, "humidity": 50},
            "dt": 1704100500,
            "sys": {"country": "GB", "sunrise": 1704072820, "sunset": 1704112320},
            "timezone": 0,
            "name": "London"
        }"#;

        assert!(serde_json::from_str::<CurrentResponse>(json).is_err());
    }

    #[test]
    fn non_numeric_temperature_is_a_parse_error() {
        let json = r#"{
            "list": [{
                "dt": 1704100500,
                "main": {"temp": "warm", "feels_like": 3.0, "temp_min": 4.0, "temp_max": 6.0, "pressure": 1020, "humidity": 50},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]
            }],
            "city": {"name": "London", "country": "GB", "timezone": 0}
        }"#;

        assert!(serde_json::from_str::<ForecastResponse>(json).is_err());
    }

    #[test]
    fn parses_forecast_response() {
        let json = r#"{
            "cod": "200",
            "list": [
                {
                    "dt": 1704100500,
                    "main": {"temp": 10.0, "feels_like": 9.0, "temp_min": 8.0, "temp_max": 12.0, "pressure": 1010, "humidity": 60},
                    "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}]
                },
                {
                    "dt": 1704111300,
                    "main": {"temp": 12.0, "feels_like": 11.0, "temp_min": 10.0, "temp_max": 14.0, "pressure": 1009, "humidity": 55},
                    "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
                }
            ],
            "city": {"name": "Tokyo", "country": "JP", "timezone": 32400}
        }"#;

        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.list.len(), 2);
        assert_eq!(response.city.name, "Tokyo");
        assert_eq!(response.city.timezone, 32400);
        assert_eq!(response.list[1].weather[0].icon, "10d");
    }

    #[test]
    fn units_deserialize_from_query_values() {
        assert_eq!(serde_json::from_str::<Units>("\"metric\"").unwrap(), Units::Metric);
        assert_eq!(serde_json::from_str::<Units>("\"imperial\"").unwrap(), Units::Imperial);
        assert!(serde_json::from_str::<Units>("\"kelvin\"").is_err());
        assert_eq!(Units::default(), Units::Metric);
    }
}
