use actix_web::{get, web, HttpResponse, Responder};
use log::{error, info};
use serde::Deserialize;
use crate::AppState;
use crate::manager_cache::CacheKey;
use crate::manager_forecast::{build_daily_summary, temperature_series, Forecast};
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::Units;

#[derive(Deserialize, Debug)]
pub struct WeatherQuery {
    city: String,
    #[serde(default)]
    units: Units,
}

#[derive(Deserialize, Debug)]
pub struct HourlyQuery {
    city: String,
    #[serde(default)]
    units: Units,
    limit: Option<usize>,
}

#[get("/current")]
pub async fn current(params: web::Query<WeatherQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    if params.city.trim().is_empty() {
        return HttpResponse::BadRequest().body("city must not be empty");
    }

    let key = CacheKey::new(&params.city, params.units);
    if let Some(conditions) = data.current_cache.lock().await.get(&key) {
        return HttpResponse::Ok().json(conditions);
    }

    match data.owm.current(&params.city, params.units).await {
        Ok(conditions) => {
            data.current_cache.lock().await.put(key, conditions.clone());
            HttpResponse::Ok().json(conditions)
        }
        Err(e) => error_response("failed to get current conditions", e),
    }
}

#[get("/forecast/hourly")]
pub async fn forecast_hourly(params: web::Query<HourlyQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    if params.city.trim().is_empty() {
        return HttpResponse::BadRequest().body("city must not be empty");
    }

    match cached_forecast(&params.city, params.units, &data).await {
        Ok(mut forecast) => {
            if let Some(limit) = params.limit {
                forecast.observations.truncate(limit);
            }
            HttpResponse::Ok().json(forecast)
        }
        Err(e) => error_response("failed to get hourly forecast", e),
    }
}

#[get("/forecast/daily")]
pub async fn forecast_daily(params: web::Query<WeatherQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    if params.city.trim().is_empty() {
        return HttpResponse::BadRequest().body("city must not be empty");
    }

    match cached_forecast(&params.city, params.units, &data).await {
        Ok(forecast) => HttpResponse::Ok().json(build_daily_summary(&forecast.observations)),
        Err(e) => error_response("failed to get daily forecast", e),
    }
}

#[get("/forecast/series")]
pub async fn forecast_series(params: web::Query<WeatherQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    if params.city.trim().is_empty() {
        return HttpResponse::BadRequest().body("city must not be empty");
    }

    match cached_forecast(&params.city, params.units, &data).await {
        Ok(forecast) => {
            let daily = build_daily_summary(&forecast.observations);
            HttpResponse::Ok().json(temperature_series(&daily))
        }
        Err(e) => error_response("failed to get forecast series", e),
    }
}

/// Returns the forecast snapshot for the city, from cache if a fresh one exists
///
/// # Arguments
///
/// * 'city' - city to query
/// * 'units' - unit system of the query
/// * 'data' - shared application state
async fn cached_forecast(city: &str, units: Units, data: &web::Data<AppState>) -> Result<Forecast, OWMError> {
    let key = CacheKey::new(city, units);
    if let Some(forecast) = data.forecast_cache.lock().await.get(&key) {
        return Ok(forecast);
    }

    let forecast = data.owm.forecast(city, units).await?;
    data.forecast_cache.lock().await.put(key, forecast.clone());

    Ok(forecast)
}

fn error_response(context: &str, e: OWMError) -> HttpResponse {
    error!("{}: {}", context, e);

    match e {
        OWMError::NotFound(message) => HttpResponse::NotFound().body(message),
        OWMError::Http(_) | OWMError::Document(_) => HttpResponse::BadGateway().finish(),
    }
}
