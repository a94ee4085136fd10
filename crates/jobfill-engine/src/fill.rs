//! Writing one value into one control.

use jobfill_dom::{Document, DomError, EventKind, NodeId};
use jobfill_protocols::{FieldDescriptor, FillError, InputKind, ResolvedValue, SiteVariant};
use tracing::debug;

/// Value `<input type=checkbox>` reports when it has no `value` attribute.
const DEFAULT_CHECKBOX_VALUE: &str = "on";

#[derive(Debug, Clone, Copy, Default)]
pub struct FillOptions {
    /// Workday mode adds focus/click before and blur after the write.
    pub variant: SiteVariant,
    /// Replace text already present in a field.
    pub overwrite_existing: bool,
}

/// What a successful call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Written,
    /// Left alone: the field already held text.
    AlreadyFilled,
}

impl FillOutcome {
    pub fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Applies resolved values to the controls of one document.
///
/// Every failure is returned as a [`FillError`] for that field alone; the
/// document stays usable for the next one.
pub struct FillExecutor<'a> {
    document: &'a mut Document,
    options: FillOptions,
}

impl<'a> FillExecutor<'a> {
    pub fn new(document: &'a mut Document, options: FillOptions) -> Self {
        Self { document, options }
    }

    pub fn fill(
        &mut self,
        field: &FieldDescriptor,
        value: &ResolvedValue,
    ) -> Result<FillOutcome, FillError> {
        let name = field.display_name().to_string();
        let node = self
            .document
            .resolve(field.handle)
            .map_err(|e| FillError::StaleHandle(format!("{name}: {e}")))?;

        if self.document.is_disabled(node) || self.document.is_readonly(node) {
            return Err(FillError::NotEditable(name));
        }
        if value.is_blank() {
            return Err(FillError::EmptyValue(name));
        }
        if !field.kind.is_fillable() {
            return Err(FillError::UnsupportedKind(field.kind.to_string()));
        }
        if field.kind.is_text_like()
            && !self.options.overwrite_existing
            && !self.document.value(node).trim().is_empty()
        {
            debug!(field = %name, "Field already has a value, skipping");
            return Ok(FillOutcome::AlreadyFilled);
        }

        let workday = self.options.variant.is_workday();
        if workday {
            self.emit(node, &name, EventKind::Focus)?;
            if field.kind.is_text_like() {
                self.emit(node, &name, EventKind::Click)?;
            }
        }

        self.write(node, &field.kind, &name, value)?;

        self.emit(node, &name, EventKind::Input)?;
        self.emit(node, &name, EventKind::Change)?;
        if workday {
            self.emit(node, &name, EventKind::Blur)?;
        }

        debug!(field = %name, kind = %field.kind, "Filled field");
        Ok(FillOutcome::Written)
    }

    fn write(
        &mut self,
        node: NodeId,
        kind: &InputKind,
        name: &str,
        value: &ResolvedValue,
    ) -> Result<(), FillError> {
        let stale = |e: DomError| FillError::StaleHandle(format!("{name}: {e}"));
        match kind {
            InputKind::Checkbox => {
                let checked = match value {
                    ResolvedValue::Bool(flag) => *flag,
                    other => {
                        let text = other.as_text();
                        if self.own_value(node) != text {
                            self.document.set_checked(node, false).map_err(stale)?;
                            return Err(FillError::NoMatchingChoice {
                                field: name.to_string(),
                                value: text,
                            });
                        }
                        true
                    }
                };
                self.document.set_checked(node, checked).map_err(stale)
            }
            InputKind::Radio => {
                let own = self.own_value(node);
                if !value.candidates().iter().any(|candidate| *candidate == own) {
                    return Err(FillError::NoMatchingChoice {
                        field: name.to_string(),
                        value: value.as_text(),
                    });
                }
                self.document.set_checked(node, true).map_err(stale)
            }
            InputKind::Select => {
                let option = self.find_option(node, value).map_err(stale)?.ok_or_else(|| {
                    FillError::NoMatchingOption {
                        field: name.to_string(),
                        value: value.as_text(),
                    }
                })?;
                self.document.select_option(node, option).map_err(stale)
            }
            InputKind::Date => self.document.set_value(node, &value.as_text()).map_err(stale),
            kind if kind.is_text_like() => {
                self.document.set_value(node, &value.as_text()).map_err(stale)
            }
            other => Err(FillError::UnsupportedKind(other.to_string())),
        }
    }

    /// A checkbox or radio's `value` attribute.
    fn own_value(&self, node: NodeId) -> &str {
        self.document
            .attr(node, "value")
            .unwrap_or(DEFAULT_CHECKBOX_VALUE)
    }

    /// Candidates against option value and text: exact, then
    /// case-insensitive, then substring.
    fn find_option(
        &self,
        select: NodeId,
        value: &ResolvedValue,
    ) -> Result<Option<NodeId>, DomError> {
        let options: Vec<(NodeId, String, String)> = self
            .document
            .options(select)?
            .into_iter()
            .map(|opt| {
                (
                    opt,
                    self.document.option_value(opt),
                    self.document.option_text(opt),
                )
            })
            .collect();
        let candidates: Vec<String> = value
            .candidates()
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        let passes: [fn(&str, &str) -> bool; 3] = [
            |option, candidate| option == candidate,
            |option, candidate| option.to_lowercase() == candidate.to_lowercase(),
            |option, candidate| {
                !option.is_empty() && option.to_lowercase().contains(&candidate.to_lowercase())
            },
        ];
        for pass in passes {
            for candidate in &candidates {
                let hit = options
                    .iter()
                    .find(|(_, own, text)| pass(own, candidate) || pass(text, candidate));
                if let Some((option, _, _)) = hit {
                    return Ok(Some(*option));
                }
            }
        }
        Ok(None)
    }

    fn emit(&mut self, node: NodeId, name: &str, kind: EventKind) -> Result<(), FillError> {
        self.document
            .dispatch(node, kind)
            .map_err(|e| FillError::StaleHandle(format!("{name}: {e}")))
    }
}

#[cfg(test)]
#[path = "fill_tests.rs"]
mod tests;
