//! OpenWeather HTTP adapter for en-route weather.

use serde::Deserialize;
use thiserror::Error;

use crate::factors::Observation;
use crate::models::Waypoint;
use crate::traits::WeatherProvider;
use crate::weather::{sample_points, summarize_samples, DEFAULT_SAMPLE_POINTS};

#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub base_url: String,
    pub api_key: String,
    /// "metric" keeps temperatures in °C.
    pub units: String,
    pub timeout_secs: u64,
    /// Interior points sampled between the two ends of a segment.
    pub sample_points: usize,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key: String::new(),
            units: "metric".to_string(),
            timeout_secs: 10,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("weather response for ({lat:.4}, {lon:.4}) has no description")]
    MissingDescription { lat: f64, lon: f64 },
    #[error("no weather samples collected")]
    NoSamples,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: OpenWeatherConfig,
    client: reqwest::blocking::Client,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Current conditions at one point.
    pub fn current(&self, lat: f64, lon: f64) -> Result<Observation, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.config.base_url);
        let body = self
            .client
            .get(url)
            .query(&[
                ("lat", format!("{:.6}", lat)),
                ("lon", format!("{:.6}", lon)),
                ("appid", self.config.api_key.clone()),
                ("units", self.config.units.clone()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<CurrentWeatherResponse>())?;

        let description = body
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or(WeatherError::MissingDescription { lat, lon })?;

        Ok(Observation::new(description, body.main.temp))
    }
}

impl WeatherProvider for OpenWeatherClient {
    type Error = WeatherError;

    /// Samples both ends and the interior points, then keeps the most common
    /// description and the mean temperature.
    fn observe_segment(&self, from: &Waypoint, to: &Waypoint) -> Result<Observation, Self::Error> {
        let samples = sample_points(from.coords(), to.coords(), self.config.sample_points)
            .into_iter()
            .map(|(lat, lon)| self.current(lat, lon))
            .collect::<Result<Vec<_>, _>>()?;

        summarize_samples(&samples).ok_or(WeatherError::NoSamples)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<WeatherCondition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}
