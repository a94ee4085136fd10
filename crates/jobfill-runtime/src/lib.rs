//! # jobfill runtime
//!
//! The collaborators around the engine: where profiles come from, where
//! session state is kept, and how requests reach a tab's content script.
//!
//! - [`BackendClient`] talks to the profile service over HTTP.
//! - [`LocalStore`] keeps the login flag, cached profile, ATS toggle and the
//!   rolling autofill logs in one JSON file.
//! - [`TabBridge`] routes messages to the [`ContentScript`](jobfill_engine::ContentScript)
//!   attached to each tab.
//! - [`SessionContext`] ties them together for one popup session.

pub mod backend;
pub mod bridge;
pub mod error;
pub mod session;
pub mod store;

pub use backend::{BackendClient, ProfileSource, UserStatus};
pub use bridge::{TabBridge, TabId};
pub use error::{BackendError, SessionError, StoreError};
pub use session::{AnalysisReport, PopupStatus, SessionContext, StatusKind};
pub use store::{LocalStore, StoreState};
