//! Human-readable label lookup for one control.

use std::collections::HashMap;

use jobfill_dom::{collapse_whitespace, Document, NodeId};
use jobfill_protocols::SiteVariant;

/// Class names that mark an element as a field caption.
pub const LABEL_CLASS_SIGNATURES: &[&str] = &["label", "field-label", "inputLabel", "input-label"];

/// Classes Workday uses on its field captions.
pub const ATS_LABEL_CLASSES: &[&str] = &["css-1ud5i8o", "wd-form-label"];

/// `data-automation-id` value of Workday field captions.
pub const ATS_LABEL_AUTOMATION_ID: &str = "formLabel";

/// How many ancestors the ATS caption search climbs.
pub const ATS_SEARCH_DEPTH: usize = 5;

const NEARBY_CONTAINERS: &[&str] = &["div", "fieldset", "section"];

/// Resolves the best-effort label of a control; the first non-empty source wins.
///
/// `for` targets and `*-label` ids are indexed once, so resolving every
/// field of a page stays linear in its size.
pub struct LabelResolver<'a> {
    document: &'a Document,
    variant: SiteVariant,
    /// First `<label>` per `for` value.
    labels_for: HashMap<&'a str, NodeId>,
    /// First element per `*-label` automation id or id, in document order.
    captions: HashMap<&'a str, NodeId>,
}

impl<'a> LabelResolver<'a> {
    pub fn new(document: &'a Document, variant: SiteVariant) -> Self {
        let mut labels_for = HashMap::new();
        let mut captions = HashMap::new();
        for node in document.elements() {
            if document.tag_name(node) == Some("label") {
                if let Some(target) = document.attr(node, "for") {
                    labels_for.entry(target).or_insert(node);
                }
            }
            for attr in ["data-automation-id", "id"] {
                if let Some(key) = document.attr(node, attr).filter(|k| k.ends_with("-label")) {
                    captions.entry(key).or_insert(node);
                }
            }
        }
        Self {
            document,
            variant,
            labels_for,
            captions,
        }
    }

    /// Label text, whitespace-collapsed; empty when nothing is found.
    pub fn resolve(&self, element: NodeId) -> String {
        if let Some(label) = non_blank(self.explicit_label(element)) {
            return label;
        }
        if let Some(label) = non_blank(self.wrapping_label(element)) {
            return label;
        }
        if let Some(label) = non_blank(self.nearby_label(element)) {
            return label;
        }
        if self.variant.is_workday() {
            if let Some(label) = non_blank(self.ats_label(element)) {
                return label;
            }
        }
        self.attribute_fallback(element)
    }

    /// `<label for="id">`.
    fn explicit_label(&self, element: NodeId) -> Option<String> {
        let id = self.document.attr(element, "id").filter(|id| !id.is_empty())?;
        self.labels_for.get(id).map(|label| self.text(*label))
    }

    /// Enclosing `<label>`, minus the control's own value.
    fn wrapping_label(&self, element: NodeId) -> Option<String> {
        let label = self
            .document
            .ancestors(element)
            .into_iter()
            .find(|a| self.document.tag_name(*a) == Some("label"))?;
        let mut text = self.document.text_content(label);
        let value = self.document.value(element);
        if !value.is_empty() {
            text = text.replacen(&value, "", 1);
        }
        Some(collapse_whitespace(&text))
    }

    /// Caption-like element inside the closest div/fieldset/section.
    fn nearby_label(&self, element: NodeId) -> Option<String> {
        let container = self.document.ancestors(element).into_iter().find(|a| {
            self.document
                .tag_name(*a)
                .is_some_and(|tag| NEARBY_CONTAINERS.contains(&tag))
        })?;

        self.document
            .descendants(container)
            .into_iter()
            .filter(|candidate| self.looks_like_label(*candidate))
            .filter(|candidate| !self.document.contains(*candidate, element))
            .map(|candidate| self.text(candidate))
            .find(|text| !text.is_empty())
    }

    fn looks_like_label(&self, node: NodeId) -> bool {
        match self.document.tag_name(node) {
            Some("label" | "legend") => true,
            Some(_) => self
                .document
                .classes(node)
                .iter()
                .any(|class| LABEL_CLASS_SIGNATURES.contains(class)),
            None => false,
        }
    }

    /// Workday captions: `<automation-id>-label` / `<id>-label` siblings first,
    /// then fixed caption signatures in the surrounding containers.
    fn ats_label(&self, element: NodeId) -> Option<String> {
        let keys = [
            self.document.attr(element, "data-automation-id"),
            self.document.attr(element, "id"),
        ];
        for key in keys.into_iter().flatten().filter(|k| !k.is_empty()) {
            let wanted = format!("{key}-label");
            let found = self.captions.get(wanted.as_str());
            if let Some(text) = found.map(|node| self.text(*node)).filter(|t| !t.is_empty()) {
                return Some(text);
            }
        }

        for ancestor in self
            .document
            .ancestors(element)
            .into_iter()
            .take(ATS_SEARCH_DEPTH)
        {
            let caption = self
                .document
                .descendants(ancestor)
                .into_iter()
                .filter(|node| self.is_ats_caption(*node))
                .filter(|node| !self.document.contains(*node, element))
                .map(|node| self.text(node))
                .find(|text| !text.is_empty());
            if caption.is_some() {
                return caption;
            }
        }
        None
    }

    fn is_ats_caption(&self, node: NodeId) -> bool {
        self.document.attr(node, "data-automation-id") == Some(ATS_LABEL_AUTOMATION_ID)
            || self
                .document
                .classes(node)
                .iter()
                .any(|class| ATS_LABEL_CLASSES.contains(class))
    }

    /// aria-label, placeholder, name, id.
    fn attribute_fallback(&self, element: NodeId) -> String {
        ["aria-label", "placeholder", "name", "id"]
            .into_iter()
            .filter_map(|attr| self.document.attr(element, attr))
            .map(collapse_whitespace)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    fn text(&self, node: NodeId) -> String {
        collapse_whitespace(&self.document.text_content(node))
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
