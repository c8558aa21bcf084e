use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Payload of `GET /api/trend_data`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TrendResponse {
    #[serde(default)]
    pub trending_keywords: Vec<TrendingKeyword>,
    #[serde(default)]
    pub category_distribution: BTreeMap<String, serde_json::Number>,
    #[serde(default)]
    pub top_channels: Vec<TopChannel>,
    #[serde(default)]
    pub keyword_age: Option<String>,
    #[serde(default)]
    pub category_age: Option<String>,
    #[serde(default)]
    pub channel_age: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingKeyword {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopChannel {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub subscribers: String,
}

/// Error body the trend endpoint sends with a non-success status.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn describe(self) -> Option<String> {
        match (self.error, self.message) {
            (Some(error), Some(message)) => Some(format!("{error}: {message}")),
            (Some(text), None) | (None, Some(text)) => Some(text),
            (None, None) => None,
        }
    }
}

/// Region and category as currently selected on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub region: String,
    pub category: String,
}

impl FilterState {
    pub fn new(region: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            category: category.into(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
