use std::{env, fmt, str::FromStr, time::Duration};

use fulfillment_common::{env_flag, env_or};

use crate::astronomy::{AstronomySettings, DEFAULT_APOD_URL};
use crate::error::ConfigError;
use crate::weather::{WeatherSettings, DEFAULT_METEOBLUE_URL};

/// Which upstream backs the enrichment branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Weather,
    Astronomy,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Provider::Weather => "weather",
            Provider::Astronomy => "astronomy",
        };
        write!(f, "{value}")
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weather" | "meteoblue" => Ok(Provider::Weather),
            "astronomy" | "apod" => Ok(Provider::Astronomy),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub provider: Provider,
    pub weather: WeatherSettings,
    pub astronomy: AstronomySettings,
    pub upstream_timeout: Duration,
    pub verbose_replies: bool,
    pub startup_probe: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Defaults reproduce the single-city deployment when nothing is set.
        let provider = match env::var("FULFILLMENT_PROVIDER") {
            Ok(value) => value.parse()?,
            Err(_) => Provider::Weather,
        };

        let weather = WeatherSettings {
            base_url: env::var("METEOBLUE_URL")
                .unwrap_or_else(|_| DEFAULT_METEOBLUE_URL.to_string()),
            api_key: env::var("METEOBLUE_API_KEY").unwrap_or_default(),
            lat: env_or("METEOBLUE_LAT", -23.5475),
            lon: env_or("METEOBLUE_LON", -46.6361),
            asl: env_or("METEOBLUE_ASL", 769),
        };
        let astronomy = AstronomySettings {
            base_url: env::var("APOD_URL").unwrap_or_else(|_| DEFAULT_APOD_URL.to_string()),
            api_key: env::var("APOD_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string()),
            hd: env_flag("APOD_HD", true),
        };

        Ok(Self {
            port: env_or("PORT", 5000u16),
            provider,
            weather,
            astronomy,
            upstream_timeout: Duration::from_secs(env_or("UPSTREAM_TIMEOUT_SECS", 10u64)),
            verbose_replies: env_flag("FULFILLMENT_VERBOSE_REPLIES", false),
            startup_probe: env_flag("FULFILLMENT_STARTUP_PROBE", false),
        })
    }

    pub fn missing_credentials(&self) -> bool {
        match self.provider {
            Provider::Weather => self.weather.api_key.is_empty(),
            Provider::Astronomy => self.astronomy.api_key.is_empty(),
        }
    }
}
