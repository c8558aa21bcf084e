use crate::config::DashboardConfig;
use crate::dom::{escape_text, Document, NodeId};

pub const REGION_SELECT: &str = "region-select";
pub const CATEGORY_SELECT: &str = "category-select";
pub const KEYWORD_SEARCH: &str = "keyword-search";
pub const REFRESH_BUTTON: &str = "refresh-data";
pub const KEYWORDS_CONTAINER: &str = "keywords-container";
pub const CATEGORY_LIST: &str = "category-list";
pub const CHANNELS_LIST: &str = "channels-list";
pub const KEYWORDS_AGE: &str = "keywords-age";
pub const CATEGORY_AGE: &str = "category-age";
pub const CHANNELS_AGE: &str = "channels-age";
pub const STATUS: &str = "trend-status";

const NAV_LINKS: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/trends", "Trends"),
    ("/seo", "SEO"),
    ("/analytics", "Analytics"),
    ("/competitors", "Competitors"),
];

const REGIONS: &[(&str, &str)] = &[
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("IN", "India"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("DE", "Germany"),
];

const CATEGORIES: &[(&str, &str)] = &[
    ("", "All categories"),
    ("10", "Music"),
    ("17", "Sports"),
    ("20", "Gaming"),
    ("24", "Entertainment"),
    ("28", "Science & Technology"),
];

/// Builds the trends page served at `config.page_path`, with the filters set
/// to the configured region and category.
pub fn trends_page(config: &DashboardConfig) -> Document {
    let mut doc = Document::new(config.page_path.clone());
    let root = doc.root();

    let nav = doc.append_element(root, "nav", &[("class", "navbar")]);
    for &(href, label) in NAV_LINKS {
        let link = doc.append_element(nav, "a", &[("class", "nav-link"), ("href", href)]);
        doc.append_text(link, label);
    }

    let main = doc.append_element(root, "main", &[("class", "container")]);
    let filters = doc.append_element(main, "div", &[("class", "trend-filters")]);
    let region = select(&mut doc, filters, REGION_SELECT, REGIONS);
    doc.set_value(region, &config.region);
    let category = select(&mut doc, filters, CATEGORY_SELECT, CATEGORIES);
    doc.set_value(category, &config.category);
    doc.append_element(
        filters,
        "input",
        &[
            ("id", KEYWORD_SEARCH),
            ("type", "search"),
            ("placeholder", "Search keywords"),
        ],
    );
    let refresh = doc.append_element(
        filters,
        "button",
        &[("id", REFRESH_BUTTON), ("type", "button"), ("class", "btn btn-primary")],
    );
    doc.append_text(refresh, "Refresh");
    doc.append_element(filters, "span", &[("id", STATUS), ("data-type", "")]);

    let keywords = card(&mut doc, main, "Trending Keywords", KEYWORDS_AGE);
    doc.append_element(keywords, "div", &[("id", KEYWORDS_CONTAINER)]);

    let categories = card(&mut doc, main, "Category Distribution", CATEGORY_AGE);
    doc.append_element(categories, "ul", &[("id", CATEGORY_LIST), ("class", "list-group")]);

    let channels = card(&mut doc, main, "Top Channels", CHANNELS_AGE);
    doc.append_element(channels, "ul", &[("id", CHANNELS_LIST), ("class", "list-group")]);

    doc
}

fn select(doc: &mut Document, parent: NodeId, id: &str, options: &[(&str, &str)]) -> NodeId {
    let select = doc.append_element(parent, "select", &[("id", id), ("class", "form-select")]);
    for &(value, label) in options {
        let option = doc.append_element(select, "option", &[("value", value)]);
        doc.append_text(option, label);
    }
    select
}

fn card(doc: &mut Document, parent: NodeId, title: &str, age_id: &str) -> NodeId {
    let card = doc.append_element(parent, "div", &[("class", "card trend-card")]);
    let header = doc.append_element(card, "div", &[("class", "card-header")]);
    let heading = doc.append_element(header, "h5", &[]);
    doc.append_text(heading, title);
    doc.append_element(header, "small", &[("id", age_id), ("class", "text-muted")]);
    doc.append_element(card, "div", &[("class", "card-body")])
}

/// Serializes the page into a standalone HTML document.
pub fn render_page(doc: &Document) -> String {
    PAGE_HTML
        .replace("{{TITLE}}", &escape_text("Trending Insights"))
        .replace("{{BODY}}", &doc.outer_html(doc.root()))
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    .keyword-badge {
      display: inline-block;
      margin: 0 6px 6px 0;
      padding: 4px 10px;
      border-radius: 999px;
    }

    .channel-avatar {
      width: 40px;
      height: 40px;
      border-radius: 50%;
    }

    #trend-status[data-type="error"] {
      color: #b42318;
    }

    .nav-link.active {
      font-weight: 600;
    }
  </style>
</head>
{{BODY}}
</html>
"#;
