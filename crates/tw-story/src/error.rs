//! Error types for the story crate.

use thiserror::Error;
use tw_engine::EngineError;

use crate::chapter::ChapterEnding;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while driving a cycle. All of these indicate
/// broken wiring, not player mistakes; the driver aborts loudly rather
/// than guessing a fallback chapter.
#[derive(Debug, Error)]
pub enum StoryError {
    /// A debug resume was requested from an ending that terminates the
    /// cycle.
    #[error("cannot resume from final ending '{0}'")]
    ResumeFromFinal(ChapterEnding),

    /// A non-final ending reached the driver without a transition. The
    /// table is an exhaustive match, so this marks table/finality skew.
    #[error("no transition defined for ending '{0}'")]
    MissingTransition(ChapterEnding),

    /// A menu prompt committed an outcome id the chapter script does not
    /// handle.
    #[error("chapter script received unexpected outcome '{0}'")]
    UnexpectedOutcome(String),

    /// Choice engine failure.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
