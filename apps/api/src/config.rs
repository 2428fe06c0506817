use anyhow::{Context, Result};

use crate::intelligence::population::{
    HireLabelMode, PopulationSpec, DEFAULT_POPULATION_SEED, DEFAULT_POPULATION_SIZE,
};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub population_seed: u64,
    pub population_size: usize,
    pub hire_label: HireLabelMode,
    /// Train the models in the background at startup instead of on first request.
    pub eager_training: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            population_seed: parse_env("POPULATION_SEED", DEFAULT_POPULATION_SEED)?,
            population_size: parse_env("POPULATION_SIZE", DEFAULT_POPULATION_SIZE)?,
            hire_label: match std::env::var("HIRE_LABEL_MODE") {
                Ok(raw) => raw
                    .parse::<HireLabelMode>()
                    .map_err(anyhow::Error::msg)
                    .context("HIRE_LABEL_MODE is invalid")?,
                Err(_) => HireLabelMode::default(),
            },
            eager_training: parse_env("EAGER_TRAINING", true)?,
        })
    }

    pub fn population_spec(&self) -> PopulationSpec {
        PopulationSpec {
            size: self.population_size,
            seed: self.population_seed,
            hire_label: self.hire_label,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
