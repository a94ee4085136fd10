//! Arena nodes.

use std::fmt;

/// Index of a node in its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

/// Element with markup attributes and live control state.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Attributes in source order; names lowercase.
    pub attrs: Vec<(String, String)>,
    /// Current value of input/textarea controls.
    pub value: String,
    pub checked: bool,
    /// Selectedness of `<option>` elements.
    pub selected: bool,
}

impl Element {
    pub fn new(tag_name: &str, attrs: Vec<(String, String)>) -> Self {
        let tag_name = tag_name.to_ascii_lowercase();
        let attrs: Vec<(String, String)> = attrs
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        let lookup = |name: &str| attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v);
        let value = lookup("value").cloned().unwrap_or_default();
        let checked = lookup("checked").is_some();
        let selected = lookup("selected").is_some();
        Self {
            tag_name,
            attrs,
            value,
            checked,
            selected,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attrs.push((name, value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }
}
