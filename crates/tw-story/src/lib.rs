//! The branching story graph and the driver that walks it.
//!
//! `tw-story` owns everything narrative-shaped: the chapter set, the
//! ending→chapter transition tables, the per-chapter scripts, and the
//! cycle driver that runs them against a frontend and a progress store
//! from `tw-engine`. The engine knows nothing about chapters; this crate
//! knows nothing about terminals.

pub mod chapter;
pub mod chapters;
pub mod config;
pub mod cycle;
pub mod error;
pub mod script;
pub mod state;
pub mod transition;

pub use chapter::{Chapter, ChapterEnding, ChapterId};
pub use chapters::run_chapter;
pub use config::CycleConfig;
pub use cycle::{CycleReport, CycleRunner};
pub use error::{StoryError, StoryResult};
pub use script::SceneContext;
pub use state::{CycleState, Location, Voice};
pub use transition::{apply_entry, next_chapter};
