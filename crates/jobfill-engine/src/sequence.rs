//! Field-by-field fill run with visual progress.
//!
//! Each matched field is scrolled into view, highlighted, written and marked
//! as done while a fixed status overlay counts progress. The paced run
//! sleeps between those steps so a user can follow along; the plain run does
//! the same work without waiting.

use std::time::Duration;

use jobfill_config::FillConfig;
use jobfill_dom::{Document, NodeId};
use jobfill_protocols::{FieldDescriptor, FillError, Profile, ResolvedValue, SiteVariant};
use tracing::{debug, info, warn};

use crate::fill::{FillExecutor, FillOptions, FillOutcome};
use crate::matcher::SemanticMatcher;

pub const OVERLAY_ID: &str = "job-autofill-status";
pub const HIGHLIGHT_CLASS: &str = "job-autofill-highlight";
pub const SUCCESS_CLASS: &str = "job-autofill-success";

const OVERLAY_STYLE: &str = "position: fixed; top: 20px; right: 20px; z-index: 10000; \
     background: #fff; padding: 15px 20px; border-radius: 5px; \
     font-family: -apple-system, system-ui, sans-serif; font-size: 14px; color: #333; \
     border-left: 4px solid #2196F3";

/// A field the executor refused.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub field: String,
    pub error: FillError,
}

/// Tally of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillReport {
    /// Fields handed to the run.
    pub total: usize,
    /// Fields written.
    pub filled: usize,
    /// No rule, or no profile data for the rule's key.
    pub unmatched: usize,
    /// Already held text and overwriting is off.
    pub skipped: usize,
    pub failures: Vec<FieldFailure>,
}

struct Pending {
    index: usize,
    node: NodeId,
    value: ResolvedValue,
    scrolled: bool,
}

#[derive(Default)]
struct Progress {
    overlay: Option<NodeId>,
    written: Vec<NodeId>,
    report: FillReport,
}

/// Drives the executor over extracted fields in extraction order.
pub struct FillSequence<'a> {
    document: &'a mut Document,
    fields: Vec<FieldDescriptor>,
    profile: &'a Profile,
    matcher: SemanticMatcher,
    options: FillOptions,
    config: FillConfig,
}

impl<'a> FillSequence<'a> {
    pub fn new(
        document: &'a mut Document,
        fields: Vec<FieldDescriptor>,
        profile: &'a Profile,
        variant: SiteVariant,
        config: &FillConfig,
    ) -> Self {
        Self {
            document,
            fields,
            profile,
            matcher: SemanticMatcher::new(variant),
            options: FillOptions {
                variant,
                overwrite_existing: config.overwrite_existing,
            },
            config: config.clone(),
        }
    }

    /// Every step back to back.
    pub fn run(mut self) -> FillReport {
        let mut progress = self.begin();
        for index in 0..self.fields.len() {
            if let Some(pending) = self.prepare(index, &mut progress) {
                self.apply(pending, &mut progress);
            }
        }
        self.finish(progress)
    }

    /// Same steps with the configured pauses in between.
    pub async fn run_paced(mut self) -> FillReport {
        let mut progress = self.begin();
        for index in 0..self.fields.len() {
            let Some(pending) = self.prepare(index, &mut progress) else {
                continue;
            };
            if pending.scrolled {
                pause(self.config.scroll_settle_ms).await;
            }
            pause(self.config.step_delay_ms).await;
            self.apply(pending, &mut progress);
        }
        pause(self.config.overlay_linger_ms).await;
        self.finish(progress)
    }

    fn begin(&mut self) -> Progress {
        let mut progress = Progress {
            report: FillReport {
                total: self.fields.len(),
                ..Default::default()
            },
            ..Default::default()
        };
        progress.overlay = self.create_overlay();
        self.update_overlay(&progress);
        progress
    }

    /// Match, scroll and highlight one field. `None` when there is nothing to write.
    fn prepare(&mut self, index: usize, progress: &mut Progress) -> Option<Pending> {
        let field = &self.fields[index];
        let Some(found) = self.matcher.resolve(field, self.profile) else {
            debug!(field = field.display_name(), "No profile value for field");
            progress.report.unmatched += 1;
            return None;
        };

        let node = match self.document.resolve(field.handle) {
            Ok(node) => node,
            Err(e) => {
                let name = field.display_name().to_string();
                warn!(field = %name, error = %e, "Field vanished before filling");
                progress.report.failures.push(FieldFailure {
                    error: FillError::StaleHandle(format!("{name}: {e}")),
                    field: name,
                });
                return None;
            }
        };

        let scrolled = !self.document.is_in_viewport(node);
        if scrolled {
            let _ = self.document.scroll_into_view(node);
        }
        let _ = self.document.add_class(node, HIGHLIGHT_CLASS);

        Some(Pending {
            index,
            node,
            value: found.value,
            scrolled,
        })
    }

    fn apply(&mut self, pending: Pending, progress: &mut Progress) {
        let field = &self.fields[pending.index];
        let result = FillExecutor::new(&mut *self.document, self.options).fill(field, &pending.value);
        let _ = self.document.remove_class(pending.node, HIGHLIGHT_CLASS);

        match result {
            Ok(FillOutcome::Written) => {
                let _ = self.document.add_class(pending.node, SUCCESS_CLASS);
                progress.written.push(pending.node);
                progress.report.filled += 1;
                self.update_overlay(progress);
            }
            Ok(FillOutcome::AlreadyFilled) => progress.report.skipped += 1,
            Err(error) => {
                warn!(field = field.display_name(), %error, "Failed to fill field");
                progress.report.failures.push(FieldFailure {
                    field: field.display_name().to_string(),
                    error,
                });
            }
        }
    }

    fn finish(self, progress: Progress) -> FillReport {
        for node in &progress.written {
            let _ = self.document.remove_class(*node, SUCCESS_CLASS);
        }
        if let Some(overlay) = progress.overlay {
            let _ = self.document.remove(overlay);
        }

        let report = progress.report;
        info!(
            total = report.total,
            filled = report.filled,
            unmatched = report.unmatched,
            skipped = report.skipped,
            failed = report.failures.len(),
            "Autofill run finished"
        );
        report
    }

    fn create_overlay(&mut self) -> Option<NodeId> {
        let body = self.document.body()?;
        let overlay = self.document.create_element("div");
        let built = self
            .document
            .set_attr(overlay, "id", OVERLAY_ID)
            .and_then(|_| self.document.set_attr(overlay, "class", OVERLAY_ID))
            .and_then(|_| self.document.set_attr(overlay, "style", OVERLAY_STYLE))
            .and_then(|_| self.document.append_child(body, overlay));
        match built {
            Ok(()) => Some(overlay),
            Err(e) => {
                debug!(error = %e, "Could not attach status overlay");
                None
            }
        }
    }

    fn update_overlay(&mut self, progress: &Progress) {
        if let Some(overlay) = progress.overlay {
            let text = format!(
                "Job Autofill: {}/{} fields filled",
                progress.report.filled, progress.report.total
            );
            let _ = self.document.set_text(overlay, &text);
        }
    }
}

async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
