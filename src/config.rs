use crate::errors::DashboardError;
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_base: String,
    pub page_path: String,
    pub region: String,
    pub category: String,
    pub request_timeout: Duration,
    pub output_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:5000".to_string(),
            page_path: "/trends".to_string(),
            region: "GB".to_string(),
            category: String::new(),
            request_timeout: Duration::from_secs(10),
            output_path: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration through `lookup`, falling back to defaults for
    /// unset keys. Set-but-invalid values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DashboardError> {
        let mut config = Self::default();

        if let Some(base) = lookup("TREND_API_BASE") {
            let base = base.trim().trim_end_matches('/');
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(DashboardError::config(format!(
                    "TREND_API_BASE must be an http(s) URL, got {base:?}"
                )));
            }
            config.api_base = base.to_string();
        }
        if let Some(path) = lookup("TREND_PAGE_PATH") {
            config.page_path = path;
        }
        if let Some(region) = lookup("TREND_REGION") {
            config.region = region;
        }
        if let Some(category) = lookup("TREND_CATEGORY") {
            config.category = category;
        }
        if let Some(secs) = lookup("TREND_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|err| {
                DashboardError::config(format!("TREND_TIMEOUT_SECS={secs:?}: {err}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("TREND_OUTPUT_PATH").filter(|path| !path.is_empty()) {
            config.output_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
