use crate::dom::Document;

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const ACTIVE_CLASS: &str = "active";

/// Marks every `.nav-link` whose `href` equals `current_path` as active and
/// returns how many were marked. Paths are compared verbatim.
pub fn highlight_active_links(doc: &mut Document, current_path: &str) -> usize {
    let matching: Vec<_> = doc
        .elements_with_class(NAV_LINK_CLASS)
        .into_iter()
        .filter(|link| doc.attr(*link, "href") == Some(current_path))
        .collect();

    for link in &matching {
        doc.add_class(*link, ACTIVE_CLASS);
    }
    matching.len()
}
