//! # jobfill engine
//!
//! The heuristic core: finds the fillable controls on a page, works out what
//! each one asks for, and writes profile values into them.
//!
//! ## Pipeline
//!
//! 1. [`SiteClassifier`] picks generic or Workday handling for the page.
//! 2. [`FieldExtractor`] lists relevant controls as
//!    [`FieldDescriptor`](jobfill_protocols::FieldDescriptor)s, using
//!    [`LabelResolver`] for their labels.
//! 3. [`SemanticMatcher`] maps each descriptor to a profile value.
//! 4. [`FillSequence`] drives [`FillExecutor`] over the descriptors, one
//!    field at a time.
//!
//! [`ContentScript`] wraps the pipeline behind the page message contract.

pub mod content;
pub mod detect;
pub mod extractor;
pub mod fill;
pub mod label;
pub mod legacy;
pub mod matcher;
pub mod sequence;
pub mod variant;

pub use content::ContentScript;
pub use detect::{Detection, JobPageDetector};
pub use extractor::{Extraction, FieldExtractor, Strategy};
pub use fill::{FillExecutor, FillOptions, FillOutcome};
pub use label::LabelResolver;
pub use legacy::LegacyFiller;
pub use matcher::{Match, RuleScope, SemanticMatcher};
pub use sequence::{FieldFailure, FillReport, FillSequence};
pub use variant::SiteClassifier;
