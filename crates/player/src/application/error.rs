//! Command error taxonomy.
//!
//! Three classes reach the dispatcher boundary: transport failures, structured
//! API errors, and local precondition failures caught before any network call.
//! All of them collapse to one user-facing message; none are retried.

use crate::ports::outbound::ApiError;

/// A command could not be sent because the client lacks something it needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("This action has no endpoint")]
    MissingEndpoint,
    #[error("No kingdom selected")]
    MissingKingdomContext,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The server answered but reported `success: false`.
    #[error("Action rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

impl CommandError {
    pub fn user_message(&self) -> String {
        match self {
            CommandError::Api(e) => e.user_message(),
            CommandError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            CommandError::Rejected(_) => "The action could not be completed.".to_string(),
            CommandError::Precondition(e) => e.to_string(),
        }
    }

    /// True when the failure was detected without a network round-trip.
    pub fn is_local(&self) -> bool {
        matches!(self, CommandError::Precondition(_))
    }
}
