//! Build errors for event and machine builders.

use thiserror::Error;

/// Errors that can occur when building events and machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Event name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("Event '{event}' has no destination state. Call .to(state)")]
    MissingDestination { event: String },

    #[error("Event '{event}' has no source states. Call .from(state)")]
    NoSources { event: String },

    #[error("Cannot attach to undefined event '{event}'")]
    UndefinedEvent { event: String },

    #[error("Invalid machine definition: {0}")]
    InvalidDefinition(#[from] serde_json::Error),
}
