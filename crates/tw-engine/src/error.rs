//! Error types for the choice engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while resolving choices.
///
/// These are authoring or wiring errors, not player mistakes. Player-facing
/// refusals are modelled as [`crate::router::Refusal`] values and never pass
/// through this type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No menu entry carries the given label.
    #[error("no menu entry labelled '{0}'")]
    UnknownLabel(String),

    /// Two menu entries were registered under the same label.
    #[error("duplicate menu label '{0}'")]
    DuplicateLabel(String),

    /// An option was picked while its conditions or prerequisite hid it.
    /// Only the command router may select options the player did not see,
    /// and it must check selectability first.
    #[error("option '{0}' picked while hidden")]
    HiddenOption(String),

    /// An option was picked while greyed-out. Callers must route locked
    /// selections through the refusal path instead.
    #[error("option '{0}' picked while locked")]
    LockedOption(String),

    /// The input stream closed mid-prompt.
    #[error("input stream closed")]
    InputClosed,
}
