//! Error types shared across the workspace.

mod extract;
mod fill;
mod messaging;

pub use extract::ExtractError;
pub use fill::FillError;
pub use messaging::MessagingError;
