//! The document arena and its operations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use jobfill_protocols::ElementHandle;
use tracing::debug;

use crate::dom_types::{BoundingBox, DomEvent, EventKind, ViewportInfo};
use crate::error::DomError;
use crate::node::{Element, Node, NodeData, NodeId};
use crate::parse::parse_nodes;
use crate::style::{cascade, ComputedStyle, UA_HIDDEN_TAGS};

/// Instance ids start at 1; 0 marks a handle that belongs to no document.
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

const NOMINAL_WIDTH: f64 = 200.0;
const NOMINAL_HEIGHT: f64 = 24.0;

/// A parsed page with live form-control state.
#[derive(Debug)]
pub struct Document {
    instance_id: u64,
    nodes: Vec<Node>,
    viewport: ViewportInfo,
    layout: HashMap<NodeId, BoundingBox>,
    focused: Option<NodeId>,
    events: Vec<DomEvent>,
    unloaded: bool,
}

impl Document {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        let mut document = Self {
            instance_id: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            nodes: parse_nodes(html),
            viewport: ViewportInfo::default(),
            layout: HashMap::new(),
            focused: None,
            events: Vec::new(),
            unloaded: false,
        };
        document.reset_select_defaults();
        debug!(
            instance = document.instance_id,
            nodes = document.nodes.len(),
            "Parsed document"
        );
        document
    }

    /// Unique id of this document instance; handles carry it.
    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn body(&self) -> Option<NodeId> {
        self.elements_by_tag("body").into_iter().next()
    }

    /// Text of the first `<title>`, whitespace-collapsed.
    pub fn title(&self) -> String {
        self.elements_by_tag("title")
            .first()
            .map(|t| collapse_whitespace(&self.text_content(*t)))
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------

    /// Create a detached element. Attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(Element::new(tag_name, Vec::new())),
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(parent)?;
        self.node(child)?;
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest(child.0));
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Remove a node from the tree. Its handle goes stale.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.node(node)?;
        self.detach(node);
        if self.focused.is_some_and(|f| self.contains(node, f)) {
            self.focused = None;
        }
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Replace the node's children with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.element(node)?;
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
        let text_id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(node),
            children: Vec::new(),
            data: NodeData::Text(text.to_string()),
        });
        self.nodes[node.0].children.push(text_id);
        Ok(())
    }

    /// Parent element, `None` at the top of the tree.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get(node.0)?.parent?;
        match self.nodes[parent.0].data {
            NodeData::Element(_) => Some(parent),
            _ => None,
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Element children only.
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    /// Ancestor elements, nearest first.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(id) = current {
            out.push(id);
            current = self.parent(id);
        }
        out
    }

    /// All descendants of `node` in document order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Connected elements in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| self.is_element(*id))
            .collect()
    }

    pub fn elements_by_tag(&self, tag_name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|id| self.tag_name(*id).is_some_and(|t| t.eq_ignore_ascii_case(tag_name)))
            .collect()
    }

    /// First connected element with the given `id` attribute.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.elements()
            .into_iter()
            .find(|node| self.attr(*node, "id") == Some(id))
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    /// Whether the node is still reachable from the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len() && self.contains(self.root(), node)
    }

    /// Nearest element, starting at `node` itself, that satisfies `predicate`.
    pub fn closest<F>(&self, node: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(NodeId) -> bool,
    {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .filter(|id| self.is_element(*id))
            .find(|id| predicate(*id))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        match self.nodes.get(node.0).map(|n| &n.data) {
            Some(NodeData::Text(text)) => text.clone(),
            Some(_) => self
                .descendants(node)
                .into_iter()
                .filter_map(|id| match &self.nodes[id.0].data {
                    NodeData::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
            None => String::new(),
        }
    }

    /// Rendered text of a subtree: skips elements the user agent never
    /// displays and subtrees carrying `hidden`.
    pub fn inner_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_inner_text(node, &mut out);
        collapse_whitespace(&out)
    }

    fn collect_inner_text(&self, node: NodeId, out: &mut String) {
        // `None` marks the space closing an element.
        let mut stack: Vec<Option<NodeId>> =
            self.children(node).iter().rev().map(|c| Some(*c)).collect();
        while let Some(entry) = stack.pop() {
            let Some(child) = entry else {
                out.push(' ');
                continue;
            };
            match self.node_data(child) {
                Some(NodeData::Text(text)) => out.push_str(text),
                Some(NodeData::Element(el)) => {
                    if UA_HIDDEN_TAGS.contains(&el.tag_name.as_str()) || el.attr("hidden").is_some() {
                        continue;
                    }
                    out.push(' ');
                    stack.push(None);
                    stack.extend(self.children(child).iter().rev().map(|c| Some(*c)));
                }
                _ => {}
            }
        }
    }

    // ---------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node.0).map(|n| &n.data),
            Some(NodeData::Element(_))
        )
    }

    /// Lowercase tag name, `None` for non-elements.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).ok().map(|el| el.tag_name.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).ok().and_then(|el| el.attr(name))
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(node)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(node)?.remove_attr(name);
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.element(node)
            .map(|el| el.classes().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element_mut(node)?;
        if el.classes().any(|c| c == class) {
            return Ok(());
        }
        let joined = match el.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        el.set_attr("class", &joined);
        Ok(())
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), DomError> {
        let el = self.element_mut(node)?;
        let remaining: Vec<&str> = el.classes().filter(|c| *c != class).collect();
        let remaining = remaining.join(" ");
        if remaining.is_empty() {
            el.remove_attr("class");
        } else {
            el.set_attr("class", &remaining);
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Form controls
    // ---------------------------------------------------------------

    /// Current value. Selects report the value of their selected option.
    pub fn value(&self, node: NodeId) -> String {
        match self.tag_name(node) {
            Some("select") => self
                .selected_option(node)
                .map(|opt| self.option_value(opt))
                .unwrap_or_default(),
            Some(_) => self
                .element(node)
                .map(|el| el.value.clone())
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Assign the current value. On a select this picks the option with
    /// exactly that value, or clears the selection.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        if self.tag_name(node) == Some("select") {
            let target = self
                .options(node)?
                .into_iter()
                .find(|opt| self.option_value(*opt) == value);
            for opt in self.options(node)? {
                self.element_mut(opt)?.selected = Some(opt) == target;
            }
            return Ok(());
        }
        self.element_mut(node)?.value = value.to_string();
        Ok(())
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        self.element(node).map(|el| el.checked).unwrap_or(false)
    }

    /// Set checkedness. Checking a radio unchecks the rest of its group.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<(), DomError> {
        self.element(node)?;
        let is_radio = self
            .attr(node, "type")
            .is_some_and(|t| t.eq_ignore_ascii_case("radio"));
        if checked && is_radio {
            for other in self.radio_group(node) {
                if other != node {
                    self.element_mut(other)?.checked = false;
                }
            }
        }
        self.element_mut(node)?.checked = checked;
        Ok(())
    }

    fn radio_group(&self, node: NodeId) -> Vec<NodeId> {
        let Some(name) = self.attr(node, "name").filter(|n| !n.is_empty()) else {
            return vec![node];
        };
        let owner = self.form_owner(node);
        self.elements()
            .into_iter()
            .filter(|other| {
                self.tag_name(*other) == Some("input")
                    && self
                        .attr(*other, "type")
                        .is_some_and(|t| t.eq_ignore_ascii_case("radio"))
                    && self.attr(*other, "name") == Some(name)
                    && self.form_owner(*other) == owner
            })
            .collect()
    }

    /// Disabled directly or through a disabled fieldset.
    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.has_attr(node, "disabled")
            || self
                .ancestors(node)
                .into_iter()
                .any(|a| self.tag_name(a) == Some("fieldset") && self.has_attr(a, "disabled"))
    }

    pub fn is_readonly(&self, node: NodeId) -> bool {
        self.has_attr(node, "readonly")
    }

    /// `<option>` descendants of a select, in order.
    pub fn options(&self, select: NodeId) -> Result<Vec<NodeId>, DomError> {
        if self.element(select)?.tag_name != "select" {
            return Err(DomError::NotASelect(select.0));
        }
        Ok(self
            .descendants(select)
            .into_iter()
            .filter(|id| self.tag_name(*id) == Some("option"))
            .collect())
    }

    /// Option value: the `value` attribute, else its text.
    pub fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value.to_string(),
            None => self.option_text(option),
        }
    }

    /// Option label text, whitespace-collapsed.
    pub fn option_text(&self, option: NodeId) -> String {
        collapse_whitespace(&self.text_content(option))
    }

    pub fn select_option(&mut self, select: NodeId, option: NodeId) -> Result<(), DomError> {
        let options = self.options(select)?;
        if !options.contains(&option) {
            return Err(DomError::UnknownNode(option.0));
        }
        for opt in options {
            self.element_mut(opt)?.selected = opt == option;
        }
        Ok(())
    }

    pub fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        self.options(select)
            .ok()?
            .into_iter()
            .find(|opt| self.element(*opt).is_ok_and(|el| el.selected))
    }

    /// `<form>` elements in document order.
    pub fn forms(&self) -> Vec<NodeId> {
        self.elements_by_tag("form")
    }

    /// The form a control belongs to: its `form` attribute target, else the
    /// nearest enclosing form.
    pub fn form_owner(&self, node: NodeId) -> Option<NodeId> {
        if let Some(form_id) = self.attr(node, "form") {
            return self
                .by_id(form_id)
                .filter(|f| self.tag_name(*f) == Some("form"));
        }
        self.ancestors(node)
            .into_iter()
            .find(|a| self.tag_name(*a) == Some("form"))
    }

    /// Controls owned by `form`, in document order.
    pub fn form_elements(&self, form: NodeId) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|id| {
                matches!(
                    self.tag_name(*id),
                    Some("input" | "select" | "textarea" | "button")
                ) && self.form_owner(*id) == Some(form)
            })
            .collect()
    }

    fn reset_select_defaults(&mut self) {
        for select in self.elements_by_tag("select") {
            let Ok(options) = self.options(select) else {
                continue;
            };
            if self.has_attr(select, "multiple") {
                continue;
            }
            let chosen = options
                .iter()
                .rev()
                .find(|opt| self.element(**opt).is_ok_and(|el| el.selected))
                .or(options.first())
                .copied();
            for opt in options {
                if let Ok(el) = self.element_mut(opt) {
                    el.selected = Some(opt) == chosen;
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // Layout, style, focus
    // ---------------------------------------------------------------

    pub fn viewport(&self) -> ViewportInfo {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: ViewportInfo) {
        self.viewport = viewport;
    }

    /// Pin an element's box, overriding the nominal layout.
    pub fn set_layout(&mut self, node: NodeId, bounds: BoundingBox) {
        self.layout.insert(node, bounds);
    }

    /// Element box in document coordinates.
    pub fn bounding_box(&self, node: NodeId) -> BoundingBox {
        if let Some(bounds) = self.layout.get(&node) {
            return *bounds;
        }
        if !self.is_connected(node) {
            return BoundingBox::default();
        }
        let style = self.computed_style(node);
        if style.is_display_none() {
            return BoundingBox::default();
        }
        BoundingBox::new(
            0.0,
            node.0 as f64 * NOMINAL_HEIGHT,
            style.width.unwrap_or(NOMINAL_WIDTH),
            style.height.unwrap_or(NOMINAL_HEIGHT),
        )
    }

    pub fn is_in_viewport(&self, node: NodeId) -> bool {
        self.bounding_box(node)
            .is_visible_in_viewport(&self.viewport)
    }

    /// Scroll vertically so the element's center sits mid-viewport.
    pub fn scroll_into_view(&mut self, node: NodeId) -> Result<(), DomError> {
        self.element(node)?;
        let (_, center_y) = self.bounding_box(node).center();
        self.viewport.scroll_y = (center_y - self.viewport.height as f64 / 2.0).max(0.0);
        Ok(())
    }

    /// Cascade inline styles from the root down to `node`.
    pub fn computed_style(&self, node: NodeId) -> ComputedStyle {
        let mut chain = self.ancestors(node);
        chain.reverse();
        chain.push(node);

        let mut style: Option<ComputedStyle> = None;
        let mut display_none = false;
        let mut transparent = false;
        for id in chain {
            let Some(tag) = self.tag_name(id) else {
                continue;
            };
            let next = cascade(style.as_ref(), tag, self.attr(id, "style"));
            display_none |= next.is_display_none();
            transparent |= next.is_transparent();
            style = Some(next);
        }

        let mut style = style.unwrap_or_default();
        if display_none {
            style.display = "none".to_string();
        }
        if transparent {
            style.opacity = 0.0;
        }
        style
    }

    /// Rendered and perceivable: connected, no `hidden` attribute on it or an
    /// ancestor, displayed, not visibility-hidden, not transparent, non-empty box.
    pub fn is_visible(&self, node: NodeId) -> bool {
        if !self.is_connected(node) || !self.is_element(node) {
            return false;
        }
        if std::iter::once(node)
            .chain(self.ancestors(node))
            .any(|id| self.has_attr(id, "hidden"))
        {
            return false;
        }
        let style = self.computed_style(node);
        if style.is_display_none() || style.is_visibility_hidden() || style.is_transparent() {
            return false;
        }
        !self.bounding_box(node).is_empty()
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.focused
    }

    // ---------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------

    /// Dispatch a synthetic event. Focus and blur move the active element.
    pub fn dispatch(&mut self, node: NodeId, kind: EventKind) -> Result<(), DomError> {
        if self.unloaded {
            return Err(DomError::Unloaded);
        }
        self.element(node)?;
        if !self.is_connected(node) {
            return Err(DomError::Detached(node.0));
        }
        match kind {
            EventKind::Focus => self.focused = Some(node),
            EventKind::Blur if self.focused == Some(node) => self.focused = None,
            _ => {}
        }
        self.events.push(DomEvent {
            target: node,
            kind,
            bubbles: kind.bubbles(),
        });
        Ok(())
    }

    /// Every event dispatched so far, in order.
    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Event kinds dispatched at one element, in order.
    pub fn events_for(&self, node: NodeId) -> Vec<EventKind> {
        self.events
            .iter()
            .filter(|e| e.target == node)
            .map(|e| e.kind)
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // ---------------------------------------------------------------
    // Handles and lifecycle
    // ---------------------------------------------------------------

    pub fn handle(&self, node: NodeId) -> ElementHandle {
        ElementHandle::new(self.instance_id, node.0)
    }

    /// Resolve a handle issued by this document to a live element.
    pub fn resolve(&self, handle: ElementHandle) -> Result<NodeId, DomError> {
        if self.unloaded {
            return Err(DomError::Unloaded);
        }
        if handle.document() != self.instance_id {
            return Err(DomError::ForeignHandle {
                expected: self.instance_id,
                got: handle.document(),
            });
        }
        let node = NodeId(handle.node());
        self.element(node)?;
        if !self.is_connected(node) {
            return Err(DomError::Detached(node.0));
        }
        Ok(node)
    }

    /// Simulate navigation away from the page.
    pub fn unload(&mut self) {
        debug!(instance = self.instance_id, "Document unloaded");
        self.unloaded = true;
        self.focused = None;
    }

    pub fn is_unloaded(&self) -> bool {
        self.unloaded
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn node(&self, node: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(node.0).ok_or(DomError::UnknownNode(node.0))
    }

    pub(crate) fn element(&self, node: NodeId) -> Result<&Element, DomError> {
        match &self.node(node)?.data {
            NodeData::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(node.0)),
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element, DomError> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Ok(el),
            Some(_) => Err(DomError::NotAnElement(node.0)),
            None => Err(DomError::UnknownNode(node.0)),
        }
    }

    pub(crate) fn node_data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0).map(|n| &n.data)
    }
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
