//! Choice-resolution engine for Thornwood.
//!
//! Decides, at each decision point of a branching narrative, which options
//! exist, which are selectable, and how free-text commands map onto them:
//! shared-flag conditions, canonical options with aliases and
//! prerequisites, ordered menus, a pure command router, and a
//! content-warning gate. The persistent progress store and the
//! presentation layer are collaborators specified as traits; the engine
//! itself is single-threaded and synchronous.

/// The fixed free-text command vocabulary.
pub mod command;
/// Shared boolean flags and lazily-evaluated condition trees.
pub mod condition;
/// Error types for the engine.
pub mod error;
/// The presentation-layer collaborator boundary.
pub mod frontend;
/// The content-warning gate.
pub mod gate;
/// Ordered menus of options.
pub mod menu;
/// Canonical player options.
pub mod option;
/// The persistent progress collaborator.
pub mod progress;
/// The blocking menu prompt loop.
pub mod prompt;
/// Routing typed commands onto menu options.
pub mod router;

pub use command::{Intent, parse_intent, suggest};
pub use condition::{Condition, Flag};
pub use error::{EngineError, EngineResult};
pub use frontend::{Frontend, ScriptedFrontend};
pub use gate::{GateOutcome, WarningGate};
pub use menu::{MenuEntry, MenuLine, MenuMode, OptionsMenu};
pub use option::{ChoiceOption, Warning};
pub use progress::{MemoryProgress, ProgressSnapshot, ProgressStore};
pub use prompt::prompt_menu;
pub use router::{Refusal, RouteContext, route};
