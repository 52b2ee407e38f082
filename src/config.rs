use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    classifier::{ColourClassifier, Tolerance},
    reference_table::ReferenceTable,
};

pub const DEFAULT_LISTINGS_URL: &str = "https://www.glasgowfilm.org/";

fn default_listings_url() -> String {
    DEFAULT_LISTINGS_URL.to_string()
}

/// The env vars needed for scraping the cinema listings.
#[derive(Debug, Deserialize)]
pub struct ListingsEnv {
    #[serde(default = "default_listings_url")]
    pub listings_url: String,
}

/// The env vars needed for reading the usher timetable.
#[derive(Debug, Deserialize)]
pub struct TimetableEnv {
    pub gft_timetable_url: String,
    pub credentials_json_path: String,
}

/// The env vars tuning colour classification.
#[derive(Debug, Default, Deserialize)]
pub struct ClassifierEnv {
    #[serde(default)]
    pub colour_tolerance: f64,
}

impl ClassifierEnv {
    pub fn into_classifier(self) -> anyhow::Result<ColourClassifier> {
        let tolerance =
            Tolerance::new(self.colour_tolerance).context("invalid COLOUR_TOLERANCE")?;
        Ok(ColourClassifier::with_tolerance(
            ReferenceTable::default(),
            tolerance,
        ))
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }

    /// Same as [`LoadFromEnv::load_from_env`] but reads from the given pairs
    /// instead of the process environment.
    fn load_from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Self>(vars)
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
