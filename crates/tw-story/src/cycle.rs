//! The cycle driver.
//!
//! Owns the chapter loop: seed the entry state, snapshot progress, run the
//! chapter, follow the transition, repeat until a final ending. Progress
//! writes happen only here, at the cycle boundary.

use serde::Serialize;
use tw_engine::{Frontend, ProgressStore, WarningGate};

use crate::chapter::{Chapter, ChapterEnding, ChapterId};
use crate::chapters::run_chapter;
use crate::config::CycleConfig;
use crate::error::{StoryError, StoryResult};
use crate::script::SceneContext;
use crate::state::CycleState;
use crate::transition::{apply_entry, next_chapter};

/// What one completed cycle looked like, for reporting and the `--json`
/// output surface.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Chapter keys, in the order they were played.
    pub route: Vec<String>,
    /// Key of the ending the cycle terminated on.
    pub ending: String,
    /// Keys of the voices awake at cycle end.
    pub voices: Vec<String>,
    /// The vessel claimed this cycle, if any.
    pub vessel: Option<String>,
    /// Whether the cycle exited through the abort ending.
    pub aborted: bool,
    /// Whether demo truncation dropped the curtain.
    pub truncated: bool,
}

impl CycleReport {
    fn from_state(state: &CycleState, ending: ChapterEnding) -> Self {
        Self {
            route: state.route.iter().map(|id| id.key().to_string()).collect(),
            ending: ending.key().to_string(),
            voices: state
                .voices
                .iter()
                .map(|voice| voice.key().to_string())
                .collect(),
            vessel: ending.vessel().map(str::to_string),
            aborted: ending.is_abort(),
            truncated: ending == ChapterEnding::DemoCurtain,
        }
    }
}

/// Drives cycles against a frontend and a progress store.
pub struct CycleRunner<'a> {
    io: &'a mut dyn Frontend,
    store: &'a mut dyn ProgressStore,
    config: CycleConfig,
}

impl<'a> CycleRunner<'a> {
    /// Create a runner. Demo flags are read off the store; override them
    /// with [`CycleRunner::with_config`].
    pub fn new(io: &'a mut dyn Frontend, store: &'a mut dyn ProgressStore) -> Self {
        let config = CycleConfig::from_store(store);
        Self { io, store, config }
    }

    /// Replace the driver configuration.
    #[must_use]
    pub fn with_config(mut self, config: CycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one full cycle from chapter 1.
    pub fn run(&mut self) -> StoryResult<CycleReport> {
        self.drive(CycleState::new(), ChapterId::TheRoad)
    }

    /// Start a cycle as though `ending` had just occurred, entering the
    /// chapter it transitions to. Seeds through the same entry-state table
    /// as the natural loop, so a resumed chapter is indistinguishable from
    /// a reached one.
    pub fn resume_at(&mut self, ending: ChapterEnding) -> StoryResult<CycleReport> {
        if ending.is_final() {
            return Err(StoryError::ResumeFromFinal(ending));
        }
        let next = next_chapter(ending).ok_or(StoryError::MissingTransition(ending))?;

        let mut state = CycleState::new();
        apply_entry(ending, &mut state);
        self.drive(state, next.id)
    }

    fn drive(&mut self, mut state: CycleState, start: ChapterId) -> StoryResult<CycleReport> {
        // The gate lives exactly as long as the cycle.
        let mut gate = WarningGate::new();
        let mut chapter = Chapter::from(start);

        loop {
            state.chapter = chapter.id;
            state.route.push(chapter.id);

            self.io.print_line(&title_card(chapter));
            self.io.run_section(Some(chapter.section));

            let snapshot = self.store.snapshot();
            let ending = {
                let mut cx = SceneContext {
                    state: &mut state,
                    io: &mut *self.io,
                    store: &mut *self.store,
                    gate: &mut gate,
                    snapshot,
                    config: &self.config,
                };
                run_chapter(chapter.id, &mut cx)?
            };

            if ending.is_abort() {
                // Early exit: no visited/voice bookkeeping survives.
                self.store.record_abort();
                return Ok(CycleReport::from_state(&state, ending));
            }

            let depth = u32::try_from(state.route.len()).unwrap_or(u32::MAX);
            let ending = if self.config.demo
                && !ending.is_final()
                && depth >= self.config.effective_depth()
            {
                self.io.run_section(Some("demo/curtain"));
                ChapterEnding::DemoCurtain
            } else {
                ending
            };

            if ending.is_final() {
                self.flush(&state, ending);
                return Ok(CycleReport::from_state(&state, ending));
            }

            let next = next_chapter(ending).ok_or(StoryError::MissingTransition(ending))?;
            apply_entry(ending, &mut state);
            chapter = next;
        }
    }

    /// Fold the finished cycle into persistent progress.
    fn flush(&mut self, state: &CycleState, ending: ChapterEnding) {
        let route: Vec<String> = state.route.iter().map(|id| id.key().to_string()).collect();
        self.store.record_visited(&route);

        let voices: Vec<String> = state
            .voices
            .iter()
            .map(|voice| voice.key().to_string())
            .collect();
        self.store.record_voices(&voices);

        if let Some(vessel) = ending.vessel() {
            self.store.claim_vessel(vessel);
        }
    }
}

fn title_card(chapter: Chapter) -> String {
    if chapter.number == 1 {
        format!("~ {} ~", chapter.id)
    } else {
        format!("~ Chapter {}: {} ~", chapter.number, chapter.id)
    }
}
