pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod dom;
pub mod errors;
pub mod models;
pub mod nav;
pub mod render;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::init;
pub use client::{HttpTrendSource, TrendSource};
pub use config::DashboardConfig;
pub use controller::{RefreshOutcome, TrendDashboard, Trigger};
pub use errors::DashboardError;
pub use state::PageState;
