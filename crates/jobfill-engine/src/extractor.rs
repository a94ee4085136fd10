//! Field extraction: which controls on a page are worth filling.

use std::collections::HashSet;

use jobfill_dom::{Document, NodeId};
use jobfill_protocols::{ExtractError, FieldDescriptor, InputKind, SiteVariant};
use tracing::debug;

use crate::label::{LabelResolver, ATS_SEARCH_DEPTH};

/// Generated class names of Workday form containers.
pub const ATS_CONTAINER_CLASSES: &[&str] = &["css-1ku28cn", "css-1mjmy2z", "wcpc-form"];

const CONTROL_TAGS: &[&str] = &["input", "select", "textarea"];

/// Which extraction tier produced the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Controls owned by `<form>` elements.
    FormScoped,
    /// Every control in the document.
    DocumentScoped,
    /// Workday: controls carrying `data-automation-id`.
    AutomationId,
    /// Workday: controls inside known container classes.
    ContainerSignature,
}

/// Result of one extraction pass.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub strategy: Strategy,
    pub fields: Vec<FieldDescriptor>,
}

impl Extraction {
    /// Nothing relevant on the page. A status, not an error.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Builds field descriptors for the relevant controls of a document.
pub struct FieldExtractor<'a> {
    document: &'a Document,
    variant: SiteVariant,
    labels: LabelResolver<'a>,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(document: &'a Document, variant: SiteVariant) -> Self {
        Self {
            document,
            variant,
            labels: LabelResolver::new(document, variant),
        }
    }

    pub fn extract(&self) -> Result<Extraction, ExtractError> {
        if self.document.is_unloaded() {
            return Err(ExtractError::PageUnloaded(format!(
                "document {}",
                self.document.instance_id()
            )));
        }
        if self.document.body().is_none() {
            return Err(ExtractError::NoBody);
        }

        let (strategy, nodes) = match self.variant {
            SiteVariant::Workday => self.workday_nodes(),
            SiteVariant::Generic => self.generic_nodes(),
        };
        let fields: Vec<FieldDescriptor> = nodes.into_iter().map(|n| self.describe(n)).collect();

        debug!(
            variant = ?self.variant,
            ?strategy,
            count = fields.len(),
            "Extracted form fields"
        );
        Ok(Extraction { strategy, fields })
    }

    /// Form-scoped when the page has forms, else document-scoped.
    fn generic_nodes(&self) -> (Strategy, Vec<NodeId>) {
        let forms = self.document.forms();
        if forms.is_empty() {
            return (Strategy::DocumentScoped, self.document_nodes());
        }

        let mut seen = HashSet::new();
        let nodes = forms
            .into_iter()
            .flat_map(|form| self.document.form_elements(form))
            .filter(|node| self.is_relevant(*node))
            .filter(|node| seen.insert(*node))
            .collect();
        (Strategy::FormScoped, nodes)
    }

    fn document_nodes(&self) -> Vec<NodeId> {
        self.controls()
            .into_iter()
            .filter(|node| self.is_relevant(*node))
            .collect()
    }

    /// Automation ids, then container signatures, then the whole document.
    fn workday_nodes(&self) -> (Strategy, Vec<NodeId>) {
        let relevant: Vec<NodeId> = self
            .controls()
            .into_iter()
            .filter(|node| self.is_relevant(*node))
            .collect();

        let tagged: Vec<NodeId> = relevant
            .iter()
            .copied()
            .filter(|node| {
                self.document
                    .attr(*node, "data-automation-id")
                    .is_some_and(|id| !id.is_empty())
            })
            .collect();
        if !tagged.is_empty() {
            return (Strategy::AutomationId, tagged);
        }

        let contained: Vec<NodeId> = relevant
            .iter()
            .copied()
            .filter(|node| {
                self.document
                    .ancestors(*node)
                    .into_iter()
                    .any(|a| self.has_container_class(a))
            })
            .collect();
        if !contained.is_empty() {
            return (Strategy::ContainerSignature, contained);
        }

        (Strategy::DocumentScoped, relevant)
    }

    fn controls(&self) -> Vec<NodeId> {
        self.document
            .elements()
            .into_iter()
            .filter(|node| {
                self.document
                    .tag_name(*node)
                    .is_some_and(|tag| CONTROL_TAGS.contains(&tag))
            })
            .collect()
    }

    /// Fillable kind, enabled, writable and visible.
    pub fn is_relevant(&self, node: NodeId) -> bool {
        let Some(kind) = self.kind_of(node) else {
            return false;
        };
        kind.is_fillable()
            && !self.document.is_disabled(node)
            && !self.document.is_readonly(node)
            && self.document.is_visible(node)
    }

    fn kind_of(&self, node: NodeId) -> Option<InputKind> {
        let tag = self.document.tag_name(node)?;
        if !CONTROL_TAGS.contains(&tag) {
            return None;
        }
        Some(InputKind::from_element(tag, self.document.attr(node, "type")))
    }

    fn describe(&self, node: NodeId) -> FieldDescriptor {
        let kind = self.kind_of(node).unwrap_or(InputKind::Text);
        let attr = |name: &str| self.document.attr(node, name).unwrap_or("").to_string();
        let optional = |name: &str| {
            self.document
                .attr(node, name)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let mut field = FieldDescriptor::new(kind, self.document.handle(node));
        field.id = attr("id");
        field.name = attr("name");
        field.placeholder = attr("placeholder");
        field.value = self.document.value(node);
        field.label = self.labels.resolve(node);
        field.automation_id = optional("data-automation-id");
        field.fkit_id = optional("data-fkit-id");

        if self.variant.is_workday() {
            field.container_label = self
                .ats_container(node)
                .and_then(|c| self.document.attr(c, "aria-label"))
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string);

            if let Some((group, name)) = field
                .automation_id
                .as_deref()
                .and_then(|id| id.split_once("--"))
            {
                field.field_group = Some(group.to_string()).filter(|g| !g.is_empty());
                field.field_name = Some(name.to_string()).filter(|n| !n.is_empty());
            }
        }
        field
    }

    /// Nearest ancestor that looks like a Workday field container.
    fn ats_container(&self, node: NodeId) -> Option<NodeId> {
        self.document
            .ancestors(node)
            .into_iter()
            .take(ATS_SEARCH_DEPTH)
            .find(|a| {
                self.document.has_attr(*a, "data-automation-id")
                    || self.document.has_attr(*a, "data-fkit-id")
                    || self.has_container_class(*a)
            })
    }

    fn has_container_class(&self, node: NodeId) -> bool {
        self.document
            .classes(node)
            .iter()
            .any(|class| ATS_CONTAINER_CLASSES.contains(class))
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
