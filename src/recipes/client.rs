use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::RecipeApiConfig;
use crate::recipes::dto::{RecipeInformation, SearchHit, SearchQuery};

#[async_trait]
pub trait RecipeClient: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<Vec<SearchHit>>;
    async fn information(&self, id: u64) -> anyhow::Result<RecipeInformation>;
}

/// Client for a Spoonacular-compatible recipe API.
pub struct SpoonacularClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    pub fn new(cfg: &RecipeApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build recipe http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }
}

#[async_trait]
impl RecipeClient for SpoonacularClient {
    async fn search(&self, query: &SearchQuery) -> anyhow::Result<Vec<SearchHit>> {
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        let mut params: Vec<(&str, String)> = vec![
            ("ingredients", query.ingredients.join(",")),
            ("number", query.number.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        if let Some(diet) = query.diet {
            params.push(("diet", diet.to_string()));
        }
        if let Some(intolerances) = query.intolerances {
            params.push(("intolerances", intolerances.to_string()));
        }

        let hits = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .context("recipe search request")?
            .error_for_status()
            .context("recipe search status")?
            .json::<Vec<SearchHit>>()
            .await
            .context("decode recipe search")?;
        debug!(hits = hits.len(), "recipe search done");
        Ok(hits)
    }

    async fn information(&self, id: u64) -> anyhow::Result<RecipeInformation> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);
        let info = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("recipe {id} information request"))?
            .error_for_status()
            .with_context(|| format!("recipe {id} information status"))?
            .json::<RecipeInformation>()
            .await
            .with_context(|| format!("decode recipe {id} information"))?;
        Ok(info)
    }
}
