use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub pretty: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let pretty = match std::env::var("WOD_SCORE_PRETTY") {
            Ok(value) => value
                .parse()
                .context("WOD_SCORE_PRETTY must be true or false")?,
            Err(_) => true,
        };

        Ok(Self { pretty })
    }
}
