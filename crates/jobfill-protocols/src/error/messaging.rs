//! Message-bridge errors.

use thiserror::Error;

/// A request could not reach a content script, or its payload was unusable.
#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("No content script attached to tab {0}")]
    NotInjected(u32),

    #[error("Tab {0} navigated away or was closed")]
    TabGone(u32),

    #[error("Invalid message payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Unexpected response to {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_injected_error() {
        let err = MessagingError::NotInjected(3);
        assert!(err.to_string().contains("No content script"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_invalid_payload_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MessagingError::from(serde_err);
        assert!(err.to_string().contains("Invalid message payload"));
    }

    #[test]
    fn test_error_debug() {
        let err = MessagingError::TabGone(9);
        let debug = format!("{:?}", err);
        assert!(debug.contains("TabGone"));
    }
}
