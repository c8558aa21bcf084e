//! A small element tree standing in for the browser page.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Element ids are indexed so the
//! controllers can address page regions the way a template exposes them.

use crate::errors::DashboardError;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
    free: Vec<NodeId>,
    location: String,
}

const VOID_ELEMENTS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

impl Document {
    /// Creates an empty document whose `<body>` is the root, served at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        let body = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(Element {
                tag_name: "body".to_string(),
                attrs: BTreeMap::new(),
            }),
        };
        Self {
            nodes: vec![body],
            root: NodeId(0),
            id_index: HashMap::new(),
            free: Vec::new(),
            location: location.into(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Path of the page, as `location.pathname` would report it.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let attrs: BTreeMap<String, String> = attrs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let id_attr = attrs.get("id").cloned();
        let node = self.push_node(
            parent,
            NodeKind::Element(Element {
                tag_name: tag_name.to_string(),
                attrs,
            }),
        );
        if let Some(id) = id_attr {
            self.index_id(&id, node);
        }
        node
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(parent, NodeKind::Text(text.to_string()))
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let node = Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn require(&self, id: &str) -> Result<NodeId, DashboardError> {
        self.by_id(id)
            .ok_or_else(|| DashboardError::missing_element(id))
    }

    fn index_id(&mut self, id: &str, node: NodeId) {
        if id.is_empty() {
            return;
        }
        self.id_index.entry(id.to_string()).or_insert(node);
    }

    // Unindexes a detached subtree and returns its slots to the free list.
    fn release_subtree(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let released = std::mem::replace(
                &mut self.nodes[current.0],
                Node {
                    parent: None,
                    children: Vec::new(),
                    kind: NodeKind::Text(String::new()),
                },
            );
            if let NodeKind::Element(element) = &released.kind {
                if let Some(id) = element.attrs.get("id") {
                    if self.id_index.get(id) == Some(&current) {
                        self.id_index.remove(id);
                    }
                }
            }
            stack.extend(released.children);
            self.free.push(current);
        }
    }

    /// Elements carrying `class_name`, in document order.
    pub fn elements_with_class(&self, class_name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            if self.has_class(current, class_name) {
                found.push(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        found
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Element children only, skipping text nodes.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag_name.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|element| element.attrs.get(name))
            .map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "id" {
            if let Some(old) = self.attr(node, "id").map(str::to_string) {
                if self.id_index.get(&old) == Some(&node) {
                    self.id_index.remove(&old);
                }
            }
            self.index_id(value, node);
        }
        if let Some(element) = self.element_mut(node) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Current value of a form control.
    pub fn value(&self, node: NodeId) -> &str {
        self.attr(node, "value").unwrap_or_default()
    }

    /// Sets a form control's value; for a `<select>` this also moves `selected`.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.set_attr(node, "value", value);
        if self.tag_name(node) != Some("select") {
            return;
        }
        for option in self.element_children(node) {
            let matches = self.attr(option, "value") == Some(value);
            if let Some(element) = self.element_mut(option) {
                if matches {
                    element.attrs.insert("selected".to_string(), String::new());
                } else {
                    element.attrs.remove("selected");
                }
            }
        }
    }

    pub fn has_class(&self, node: NodeId, class_name: &str) -> bool {
        self.attr(node, "class")
            .is_some_and(|classes| class_tokens(classes).any(|name| name == class_name))
    }

    pub fn add_class(&mut self, node: NodeId, class_name: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let current = element.attrs.get("class").cloned().unwrap_or_default();
        if class_tokens(&current).any(|name| name == class_name) {
            return;
        }
        let updated = if current.trim().is_empty() {
            class_name.to_string()
        } else {
            format!("{} {class_name}", current.trim())
        };
        element.attrs.insert("class".to_string(), updated);
    }

    pub fn text_content(&self, node: NodeId) -> String {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element(_) => self.nodes[node.0]
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if !text.is_empty() {
            self.append_text(node, text);
        }
    }

    /// Removes every descendant of `node`. Their slots are reused by later
    /// appends, so ids held for removed nodes must not be used afterwards.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.release_subtree(child);
        }
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
                    return;
                }
                for child in &self.nodes[node.0].children {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
            }
        }
    }
}

fn class_tokens(classes: &str) -> impl Iterator<Item = &str> {
    classes.split_ascii_whitespace()
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(value: &str) -> String {
    escape_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
