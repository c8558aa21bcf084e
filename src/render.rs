//! Projects a [`TrendResponse`] onto the trends page.

use crate::dom::{Document, NodeId};
use crate::errors::DashboardError;
use crate::models::{TopChannel, TrendResponse, TrendingKeyword};
use crate::ui;
use std::collections::BTreeMap;

/// Page regions the trend render writes into.
#[derive(Debug, Clone, Copy)]
pub struct RenderTargets {
    pub keywords: NodeId,
    pub categories: NodeId,
    pub channels: NodeId,
    pub keyword_age: NodeId,
    pub category_age: NodeId,
    pub channel_age: NodeId,
}

impl RenderTargets {
    pub fn locate(doc: &Document) -> Result<Self, DashboardError> {
        Ok(Self {
            keywords: doc.require(ui::KEYWORDS_CONTAINER)?,
            categories: doc.require(ui::CATEGORY_LIST)?,
            channels: doc.require(ui::CHANNELS_LIST)?,
            keyword_age: doc.require(ui::KEYWORDS_AGE)?,
            category_age: doc.require(ui::CATEGORY_AGE)?,
            channel_age: doc.require(ui::CHANNELS_AGE)?,
        })
    }
}

/// Replaces all three lists and the freshness labels. Every target is resolved
/// before the first mutation, so a missing element leaves the page untouched.
pub fn render_trends(doc: &mut Document, data: &TrendResponse) -> Result<(), DashboardError> {
    let targets = RenderTargets::locate(doc)?;

    render_keywords(doc, targets.keywords, &data.trending_keywords);
    render_category_distribution(doc, targets.categories, &data.category_distribution);
    render_top_channels(doc, targets.channels, &data.top_channels);

    render_age(doc, targets.keyword_age, data.keyword_age.as_deref());
    render_age(doc, targets.category_age, data.category_age.as_deref());
    render_age(doc, targets.channel_age, data.channel_age.as_deref());
    Ok(())
}

pub fn render_keywords(doc: &mut Document, container: NodeId, keywords: &[TrendingKeyword]) {
    doc.clear_children(container);
    for keyword in keywords {
        let badge = doc.append_element(
            container,
            "span",
            &[("class", "keyword-badge bg-primary text-white")],
        );
        doc.append_text(badge, &keyword.name);
    }
}

pub fn render_category_distribution(
    doc: &mut Document,
    list: NodeId,
    distribution: &BTreeMap<String, serde_json::Number>,
) {
    doc.clear_children(list);
    for (category, score) in distribution {
        let item = doc.append_element(
            list,
            "li",
            &[("class", "list-group-item d-flex justify-content-between align-items-center")],
        );
        doc.append_text(item, category);
        let badge = doc.append_element(item, "span", &[("class", "badge bg-success")]);
        doc.append_text(badge, &score.to_string());
    }
}

pub fn render_top_channels(doc: &mut Document, list: NodeId, channels: &[TopChannel]) {
    doc.clear_children(list);
    for channel in channels {
        let item = doc.append_element(
            list,
            "li",
            &[("class", "list-group-item d-flex align-items-center")],
        );
        if let Some(avatar) = channel.avatar_url.as_deref() {
            doc.append_element(
                item,
                "img",
                &[
                    ("src", avatar),
                    ("alt", channel.name.as_str()),
                    ("class", "channel-avatar me-3"),
                ],
            );
        }
        let details = doc.append_element(item, "div", &[]);
        let name_row = doc.append_element(details, "div", &[]);
        let name = doc.append_element(name_row, "strong", &[]);
        doc.append_text(name, &channel.name);
        let subscribers = doc.append_element(details, "div", &[("class", "text-muted small")]);
        doc.append_text(subscribers, &format!("{} subscribers", channel.subscribers));
    }
}

// A missing age keeps whatever the label already shows.
fn render_age(doc: &mut Document, label: NodeId, age: Option<&str>) {
    if let Some(age) = age {
        doc.set_text_content(label, &format!("Updated {age}"));
    }
}
