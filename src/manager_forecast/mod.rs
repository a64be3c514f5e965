use std::collections::BTreeMap;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One 3-hour forecast point, carrying its location-local timestamp
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub local_time: DateTime<FixedOffset>,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub condition: String,
    pub description: String,
    pub icon: String,
}

/// A full forecast snapshot for one location
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub city: String,
    pub country: Option<String>,
    pub utc_offset_seconds: i32,
    pub observations: Vec<Observation>,
}

/// Aggregated temperatures and representative icon for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_mean: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataItem<T> {
    pub x: NaiveDate,
    pub y: T,
}

/// Chart-ready temperature series, one data point per forecast day
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureSeries {
    pub mean: Vec<DataItem<f64>>,
    pub min: Vec<DataItem<f64>>,
    pub max: Vec<DataItem<f64>>,
}

/// Aggregates 3-hourly observations into one summary per calendar date
///
/// Observations are grouped by the calendar date of their local timestamp.
/// Each summary holds the arithmetic mean of the instantaneous temperatures,
/// the minimum over the interval minima, the maximum over the interval maxima,
/// and the icon of the observation at the middle index of the group (in
/// arrival order). Summaries are returned in ascending date order.
///
/// # Arguments
///
/// * 'observations' - forecast points in upstream arrival order
pub fn build_daily_summary(observations: &[Observation]) -> Vec<DailySummary> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Observation>> = BTreeMap::new();

    for obs in observations {
        groups.entry(obs.local_time.date_naive()).or_default().push(obs);
    }

    groups
        .into_iter()
        .map(|(date, group)| {
            let temp_mean = group.iter().map(|o| o.temp).sum::<f64>() / group.len() as f64;
            let temp_min = group.iter().map(|o| o.temp_min).fold(f64::INFINITY, f64::min);
            let temp_max = group.iter().map(|o| o.temp_max).fold(f64::NEG_INFINITY, f64::max);
            let icon = group[group.len() / 2].icon.clone();

            DailySummary { date, temp_mean, temp_min, temp_max, icon }
        })
        .collect()
}

/// Turns daily summaries into the min/mean/max series the dashboard chart plots
///
/// # Arguments
///
/// * 'daily' - daily summaries in ascending date order
pub fn temperature_series(daily: &[DailySummary]) -> TemperatureSeries {
    TemperatureSeries {
        mean: daily.iter().map(|d| DataItem { x: d.date, y: d.temp_mean }).collect(),
        min: daily.iter().map(|d| DataItem { x: d.date, y: d.temp_min }).collect(),
        max: daily.iter().map(|d| DataItem { x: d.date, y: d.temp_max }).collect(),
    }
}
