//! Error types for the tagstream domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant. Note that parsing has no
//! error type at all: a scan of any buffer always succeeds, and malformed or
//! unclosed tags are represented in the data model, not as failures.

use thiserror::Error;

/// The top-level error type for all tagstream operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Registry errors ---
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    // --- Render errors ---
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Persistence ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Registering a descriptor fails fast at start-up when the descriptor does
/// not satisfy the required contract or duplicates an existing kind.
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    #[error("Artifact kind already registered: {0}")]
    DuplicateKind(String),

    #[error("Descriptor contract violation for {kind}: {reason}")]
    InvalidDescriptor { kind: String, reason: String },
}

/// Failures surfaced while rendering a parsed buffer.
///
/// A collaborator failure must propagate to the caller — the engine never
/// silently substitutes unescaped or wrong content.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Text renderer failed: {0}")]
    Collaborator(String),

    #[error("No descriptor registered for kind: {0}")]
    UnknownKind(String),
}

/// Failures in the streaming session state machine.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session is closed ({state}), no further updates accepted")]
    Closed { state: String },

    #[error("Upstream stream error: {0}")]
    Upstream(String),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),
}

/// Failures reported by the external message-storage collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_displays_kind() {
        let err = Error::Registration(RegistrationError::DuplicateKind("thinking".into()));
        assert!(err.to_string().contains("thinking"));
    }

    #[test]
    fn render_error_folds_into_session_error() {
        let err = SessionError::from(RenderError::Collaborator("markdown exploded".into()));
        assert!(err.to_string().contains("markdown exploded"));
    }

    #[test]
    fn invalid_descriptor_displays_reason() {
        let err = RegistrationError::InvalidDescriptor {
            kind: "custom".into(),
            reason: "empty opening pattern".into(),
        };
        assert!(err.to_string().contains("custom"));
        assert!(err.to_string().contains("empty opening pattern"));
    }
}
