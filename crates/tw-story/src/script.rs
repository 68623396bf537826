//! The context a chapter script runs in.

use tw_engine::{Frontend, OptionsMenu, ProgressSnapshot, ProgressStore, WarningGate, prompt_menu};

use crate::config::CycleConfig;
use crate::error::StoryResult;
use crate::state::CycleState;

/// Everything a chapter script needs: the state vector it mutates, the
/// collaborators it calls out to, and the progress snapshot taken at
/// chapter entry. Borrowed for the duration of one chapter run.
pub struct SceneContext<'a> {
    /// The cycle's working state, mutated in place.
    pub state: &'a mut CycleState,
    /// Presentation collaborator.
    pub io: &'a mut dyn Frontend,
    /// Persistent progress collaborator (warning confirmations only,
    /// mid-chapter; reads go through the snapshot).
    pub store: &'a mut dyn ProgressStore,
    /// Session-local content-warning declines.
    pub gate: &'a mut WarningGate,
    /// Progress as of chapter entry.
    pub snapshot: ProgressSnapshot,
    /// Driver configuration.
    pub config: &'a CycleConfig,
}

impl SceneContext<'_> {
    /// Prompt the player on a menu, with routing derived from the current
    /// state vector. Returns the canonical id of the committed outcome.
    pub fn prompt(&mut self, menu: &OptionsMenu, override_line: Option<&str>) -> StoryResult<String> {
        let ctx = self.state.route_context();
        let id = prompt_menu(self.io, self.store, self.gate, menu, &ctx, override_line)?;
        Ok(id)
    }

    /// Run a section of the narrative script.
    pub fn section(&mut self, id: &str) {
        self.io.run_section(Some(id));
    }
}
