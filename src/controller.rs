use crate::client::TrendSource;
use crate::dom::Document;
use crate::errors::DashboardError;
use crate::models::FilterState;
use crate::render::render_trends;
use crate::state::PageState;
use crate::ui;
use chrono::Local;
use tracing::{debug, info, warn};

/// User interactions (and the initial load) that re-fetch trend data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Initial,
    RegionChanged,
    CategoryChanged,
    KeywordSearch,
    RefreshClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { token: u64 },
    /// A newer refresh was issued while this one was in flight.
    Superseded { token: u64, latest: u64 },
}

pub struct TrendDashboard<S> {
    source: S,
    state: PageState,
}

impl<S: TrendSource> TrendDashboard<S> {
    pub fn new(source: S, state: PageState) -> Self {
        Self { source, state }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub async fn handle(&self, trigger: Trigger) -> Result<RefreshOutcome, DashboardError> {
        debug!(?trigger, "trend refresh triggered");
        self.refresh().await
    }

    /// Fetches trend data for the current filters and renders it, unless a newer
    /// refresh started in the meantime. On failure the page keeps its previous
    /// content and the status indicator shows the error.
    pub async fn refresh(&self) -> Result<RefreshOutcome, DashboardError> {
        // Token and filter are taken under one lock.
        let (filter, token) = {
            let mut doc = self.state.document.lock().await;
            match read_filter(&doc) {
                Ok(filter) => (filter, self.state.next_request()),
                Err(err) => {
                    warn!(error = %err, "trend filters unavailable");
                    set_status(&mut doc, &err.to_string(), "error");
                    return Err(err);
                }
            }
        };
        debug!(token, region = %filter.region, category = %filter.category, "fetching trends");

        let result = self.source.fetch_trends(&filter).await;

        let mut doc = self.state.document.lock().await;
        let latest = self.state.latest_request();
        if token != latest {
            debug!(token, latest, "discarding superseded trend response");
            return Ok(RefreshOutcome::Superseded { token, latest });
        }

        match result.and_then(|data| render_trends(&mut doc, &data)) {
            Ok(()) => {
                let at = Local::now().format("%H:%M:%S");
                set_status(&mut doc, &format!("Refreshed at {at}"), "ok");
                info!(
                    token,
                    region = %filter.region,
                    category = %filter.category,
                    "trends rendered"
                );
                Ok(RefreshOutcome::Applied { token })
            }
            Err(err) => {
                warn!(token, error = %err, "trend refresh failed");
                set_status(&mut doc, &err.to_string(), "error");
                Err(err)
            }
        }
    }
}

/// Reads the region and category controls. The keyword search field is not
/// part of the filter.
pub fn read_filter(doc: &Document) -> Result<FilterState, DashboardError> {
    let region = doc.require(ui::REGION_SELECT)?;
    let category = doc.require(ui::CATEGORY_SELECT)?;
    Ok(FilterState::new(doc.value(region), doc.value(category)))
}

fn set_status(doc: &mut Document, message: &str, kind: &str) {
    let Some(status) = doc.by_id(ui::STATUS) else {
        return;
    };
    doc.set_text_content(status, message);
    doc.set_attr(status, "data-type", kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::models::TrendResponse;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::oneshot;

    type Reply = Result<TrendResponse, DashboardError>;

    /// Hands out scripted replies in call order and records every filter seen.
    struct ScriptedSource {
        replies: StdMutex<VecDeque<oneshot::Receiver<Reply>>>,
        seen: StdMutex<Vec<FilterState>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<oneshot::Receiver<Reply>>) -> Self {
            Self {
                replies: StdMutex::new(replies.into()),
                seen: StdMutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<FilterState> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl TrendSource for ScriptedSource {
        async fn fetch_trends(&self, filter: &FilterState) -> Reply {
            self.seen.lock().unwrap().push(filter.clone());
            let reply = self.replies.lock().unwrap().pop_front().expect("unexpected fetch");
            reply.await.expect("reply dropped")
        }
    }

    fn ready(reply: Reply) -> oneshot::Receiver<Reply> {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(reply);
        rx
    }

    fn trends(keyword: &str) -> TrendResponse {
        serde_json::from_value(serde_json::json!({
            "trending_keywords": [{ "name": keyword }],
            "category_distribution": { "Tech": 42 },
            "top_channels": [{ "name": "Alpha", "subscribers": "1K" }],
            "keyword_age": "now"
        }))
        .unwrap()
    }

    fn page_state() -> PageState {
        PageState::new(ui::trends_page(&DashboardConfig::default()))
    }

    async fn keywords_shown(state: &PageState) -> Vec<String> {
        let doc = state.document.lock().await;
        let container = doc.by_id(ui::KEYWORDS_CONTAINER).unwrap();
        doc.element_children(container)
            .into_iter()
            .map(|badge| doc.text_content(badge))
            .collect()
    }

    async fn status(state: &PageState) -> (String, String) {
        let doc = state.document.lock().await;
        let status = doc.by_id(ui::STATUS).unwrap();
        (
            doc.text_content(status),
            doc.attr(status, "data-type").unwrap_or_default().to_string(),
        )
    }

    #[tokio::test]
    async fn refresh_renders_and_reports_applied() {
        let state = page_state();
        let source = ScriptedSource::new(vec![ready(Ok(trends("asmr")))]);
        let dashboard = TrendDashboard::new(source, state.clone());

        let outcome = dashboard.refresh().await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Applied { token: 1 });
        assert_eq!(keywords_shown(&state).await, ["asmr"]);
        let (text, kind) = status(&state).await;
        assert!(text.starts_with("Refreshed at "));
        assert_eq!(kind, "ok");
    }

    #[tokio::test]
    async fn every_trigger_fetches_current_filters() {
        let state = page_state();
        let replies = (0..5).map(|_| ready(Ok(trends("x")))).collect();
        let dashboard = TrendDashboard::new(ScriptedSource::new(replies), state.clone());

        dashboard.handle(Trigger::Initial).await.unwrap();
        {
            let mut doc = state.document.lock().await;
            let region = doc.by_id(ui::REGION_SELECT).unwrap();
            doc.set_value(region, "US");
        }
        dashboard.handle(Trigger::RegionChanged).await.unwrap();
        {
            let mut doc = state.document.lock().await;
            let category = doc.by_id(ui::CATEGORY_SELECT).unwrap();
            doc.set_value(category, "20");
            let search = doc.by_id(ui::KEYWORD_SEARCH).unwrap();
            doc.set_value(search, "minecraft");
        }
        dashboard.handle(Trigger::CategoryChanged).await.unwrap();
        dashboard.handle(Trigger::KeywordSearch).await.unwrap();
        dashboard.handle(Trigger::RefreshClicked).await.unwrap();

        assert_eq!(
            dashboard.source.seen(),
            vec![
                FilterState::new("GB", ""),
                FilterState::new("US", ""),
                FilterState::new("US", "20"),
                FilterState::new("US", "20"),
                FilterState::new("US", "20"),
            ]
        );
    }

    #[tokio::test]
    async fn latest_issued_request_wins_when_it_resolves_first() {
        let state = page_state();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let source = ScriptedSource::new(vec![first_rx, second_rx]);
        let dashboard = TrendDashboard::new(source, state.clone());

        let driver = async {
            tokio::task::yield_now().await;
            let _ = second_tx.send(Ok(trends("second")));
            tokio::task::yield_now().await;
            let _ = first_tx.send(Ok(trends("first")));
        };
        let (first, second, ()) = tokio::join!(dashboard.refresh(), dashboard.refresh(), driver);

        assert_eq!(first.unwrap(), RefreshOutcome::Superseded { token: 1, latest: 2 });
        assert_eq!(second.unwrap(), RefreshOutcome::Applied { token: 2 });
        assert_eq!(keywords_shown(&state).await, ["second"]);
    }

    #[tokio::test]
    async fn stale_response_arriving_first_is_discarded() {
        let state = page_state();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let source = ScriptedSource::new(vec![first_rx, second_rx]);
        let dashboard = TrendDashboard::new(source, state.clone());

        let driver = async {
            tokio::task::yield_now().await;
            let _ = first_tx.send(Ok(trends("first")));
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            let _ = second_tx.send(Ok(trends("second")));
        };
        let (first, second, ()) = tokio::join!(dashboard.refresh(), dashboard.refresh(), driver);

        assert!(matches!(first.unwrap(), RefreshOutcome::Superseded { token: 1, .. }));
        assert_eq!(second.unwrap(), RefreshOutcome::Applied { token: 2 });
        assert_eq!(keywords_shown(&state).await, ["second"]);
    }

    #[tokio::test]
    async fn failure_keeps_content_and_shows_error() {
        let state = page_state();
        let replies = vec![
            ready(Ok(trends("kept"))),
            ready(Err(DashboardError::endpoint(500, "Failed to fetch trend data"))),
        ];
        let dashboard = TrendDashboard::new(ScriptedSource::new(replies), state.clone());

        dashboard.refresh().await.unwrap();
        let err = dashboard.handle(Trigger::RefreshClicked).await.unwrap_err();
        assert!(matches!(err, DashboardError::Endpoint { status: 500, .. }));

        assert_eq!(keywords_shown(&state).await, ["kept"]);
        let (text, kind) = status(&state).await;
        assert_eq!(text, "trend endpoint returned 500: Failed to fetch trend data");
        assert_eq!(kind, "error");
    }

    #[tokio::test]
    async fn missing_filter_control_fails_before_fetching() {
        let state = PageState::new(Document::new("/trends"));
        let dashboard = TrendDashboard::new(ScriptedSource::new(Vec::new()), state);

        let err = dashboard.refresh().await.unwrap_err();
        assert!(matches!(err, DashboardError::MissingElement(id) if id == ui::REGION_SELECT));
        assert!(dashboard.source.seen().is_empty());
        assert_eq!(dashboard.state().latest_request(), 0);
    }

    #[tokio::test]
    async fn missing_filter_control_shows_error_status() {
        let mut doc = Document::new("/trends");
        let root = doc.root();
        doc.append_element(root, "span", &[("id", ui::STATUS)]);
        let state = PageState::new(doc);
        let dashboard = TrendDashboard::new(ScriptedSource::new(Vec::new()), state.clone());

        dashboard.refresh().await.unwrap_err();

        let (text, kind) = status(&state).await;
        assert_eq!(text, "page element #region-select is missing");
        assert_eq!(kind, "error");
    }

    #[tokio::test]
    async fn stale_failure_is_discarded_silently() {
        let state = page_state();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let source = ScriptedSource::new(vec![first_rx, second_rx]);
        let dashboard = TrendDashboard::new(source, state.clone());

        let driver = async {
            tokio::task::yield_now().await;
            let _ = second_tx.send(Ok(trends("fresh")));
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            let _ = first_tx.send(Err(DashboardError::endpoint(500, "stale failure")));
        };
        let (first, second, ()) = tokio::join!(dashboard.refresh(), dashboard.refresh(), driver);

        assert_eq!(first.unwrap(), RefreshOutcome::Superseded { token: 1, latest: 2 });
        assert_eq!(second.unwrap(), RefreshOutcome::Applied { token: 2 });
        assert_eq!(keywords_shown(&state).await, ["fresh"]);
        let (text, kind) = status(&state).await;
        assert!(text.starts_with("Refreshed at "));
        assert_eq!(kind, "ok");
    }

    #[tokio::test]
    async fn tokens_follow_filter_read_order() {
        let state = page_state();
        let (first_tx, first_rx) = oneshot::channel();
        let source = ScriptedSource::new(vec![first_rx, ready(Ok(trends("us")))]);
        let dashboard = TrendDashboard::new(source, state.clone());

        let change_then_refresh = async {
            tokio::task::yield_now().await;
            {
                let mut doc = state.document.lock().await;
                let region = doc.by_id(ui::REGION_SELECT).unwrap();
                doc.set_value(region, "US");
            }
            let outcome = dashboard.refresh().await;
            let _ = first_tx.send(Ok(trends("gb")));
            outcome
        };
        let (first, second) = tokio::join!(dashboard.refresh(), change_then_refresh);

        assert_eq!(
            dashboard.source.seen(),
            vec![FilterState::new("GB", ""), FilterState::new("US", "")]
        );
        assert_eq!(first.unwrap(), RefreshOutcome::Superseded { token: 1, latest: 2 });
        assert_eq!(second.unwrap(), RefreshOutcome::Applied { token: 2 });
        assert_eq!(keywords_shown(&state).await, ["us"]);
    }
}
