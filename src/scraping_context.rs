use crate::{
    classifier::ColourClassifier,
    config::{ClassifierEnv, ListingsEnv, LoadFromEnv},
    requests::RequestClient,
};

/// Everything the commands share, loaded once at startup.
pub struct ScrapingContext {
    pub listings_env: ListingsEnv,
    pub classifier: ColourClassifier,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        let listings_env = ListingsEnv::load_from_env()?;
        let classifier = ClassifierEnv::load_from_env()?.into_classifier()?;
        let request_client = RequestClient::new()?;
        Ok(ScrapingContext {
            listings_env,
            classifier,
            request_client,
        })
    }
}
