//! # JobFill Protocols
//!
//! Shared data model and message contracts for the jobfill workspace.
//! Contains only types - no DOM access and no I/O.
//!
//! ## Core Types
//!
//! - [`Profile`] - The applicant data used to populate forms
//! - [`FieldDescriptor`] - One candidate form control, as seen by the matcher
//! - [`SemanticKey`] - The profile attribute a field resolves to
//! - [`ContentRequest`] / [`ContentResponse`] - Content script message contract

pub mod error;
pub mod field;
pub mod history;
pub mod message;
pub mod profile;
pub mod semantic;

pub use error::{ExtractError, FillError, MessagingError};
pub use field::{ElementHandle, FieldDescriptor, InputKind, SiteVariant};
pub use history::{HistoryEntry, Outcome};
pub use message::{
    AnalyzeResponse, AutofillResponse, ContentRequest, ContentResponse, LegacyAutofillResponse,
};
pub use profile::{Education, PersonalInfo, Profile, WorkExperience};
pub use semantic::{ResolvedValue, SemanticKey};
