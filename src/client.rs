use crate::config::DashboardConfig;
use crate::errors::DashboardError;
use crate::models::{ErrorBody, FilterState, TrendResponse};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use std::future::Future;
use tracing::debug;

/// Where trend data comes from.
pub trait TrendSource {
    fn fetch_trends(
        &self,
        filter: &FilterState,
    ) -> impl Future<Output = Result<TrendResponse, DashboardError>> + Send;
}

/// `TrendSource` backed by the `/api/trend_data` endpoint.
#[derive(Clone)]
pub struct HttpTrendSource {
    client: Client,
    api_base: String,
}

impl HttpTrendSource {
    pub fn new(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, &config.api_base))
    }

    pub fn with_client(client: Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn trend_data_url(&self, filter: &FilterState) -> String {
        format!(
            "{}/api/trend_data?region={}&category={}",
            self.api_base,
            encode_component(&filter.region),
            encode_component(&filter.category),
        )
    }
}

impl TrendSource for HttpTrendSource {
    async fn fetch_trends(&self, filter: &FilterState) -> Result<TrendResponse, DashboardError> {
        let url = self.trend_data_url(filter);
        debug!(%url, "requesting trend data");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::describe)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
            return Err(DashboardError::endpoint(status.as_u16(), message));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
