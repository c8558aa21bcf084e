use crate::client::TrendSource;
use crate::controller::{read_filter, TrendDashboard, Trigger};
use crate::errors::DashboardError;
use crate::nav::highlight_active_links;
use crate::render::RenderTargets;
use crate::state::PageState;
use tracing::{info, warn};

/// Startup sequence for the trends page: highlight navigation, check that the
/// page has every element the dashboard needs, then run the initial refresh.
///
/// A failed initial refresh is logged and shown on the page but does not fail
/// startup; only a page missing required elements does.
pub async fn init<S: TrendSource>(
    state: PageState,
    source: S,
) -> Result<TrendDashboard<S>, DashboardError> {
    {
        let mut doc = state.document.lock().await;
        let path = doc.location().to_string();
        let marked = highlight_active_links(&mut doc, &path);
        info!(%path, marked, "navigation highlighted");

        read_filter(&doc)?;
        RenderTargets::locate(&doc)?;
    }

    let dashboard = TrendDashboard::new(source, state);
    if let Err(err) = dashboard.handle(Trigger::Initial).await {
        warn!(error = %err, "initial trend load failed");
    }
    Ok(dashboard)
}
