mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_cache;
mod manager_forecast;
mod manager_owm;

use std::sync::Arc;
use std::time::Duration;
use actix_web::{web, App, HttpServer};
use log::info;
use tokio::sync::Mutex;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_cache::Cache;
use crate::manager_forecast::Forecast;
use crate::manager_owm::models::CurrentConditions;
use crate::manager_owm::OWM;

pub struct AppState {
    pub owm: OWM,
    pub current_cache: Arc<Mutex<Cache<CurrentConditions>>>,
    pub forecast_cache: Arc<Mutex<Cache<Forecast>>>,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let owm = OWM::new(
        &config.weather.base_url,
        &config.weather.api_key,
        Duration::from_secs(config.weather.timeout_seconds),
    ).map_err(|e| UnrecoverableError(e.to_string()))?;

    let ttl = Duration::from_secs(config.weather.cache_ttl_seconds);
    let current_cache: Arc<Mutex<Cache<CurrentConditions>>> = Arc::new(Mutex::new(Cache::new(ttl)));
    let forecast_cache: Arc<Mutex<Cache<Forecast>>> = Arc::new(Mutex::new(Cache::new(ttl)));

    info!("starting weatherdash on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                owm: owm.clone(),
                current_cache: current_cache.clone(),
                forecast_cache: forecast_cache.clone(),
            }))
            .service(handlers::current)
            .service(handlers::forecast_hourly)
            .service(handlers::forecast_daily)
            .service(handlers::forecast_series)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
