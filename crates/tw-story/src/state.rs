//! The cycle state vector.
//!
//! One explicit value threaded through every chapter call — never ambient
//! globals. Created at cycle start with documented defaults, discarded at
//! cycle end except for the fields folded into the progress store.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tw_engine::RouteContext;

use crate::chapter::{ChapterEnding, ChapterId};

/// Where the protagonist currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    /// The path through the woods.
    WoodedPath,
    /// Before the cabin door.
    CabinDoor,
    /// Inside the cabin.
    Cabin,
    /// The stairwell down.
    Stairwell,
    /// The basement, with her.
    Basement,
    /// The vault between cycles.
    Vault,
    /// Outside the story; no exits.
    Nowhere,
}

/// A narrative companion woken by story events. Purely a state flag
/// consumed by narrative text, beyond gating some options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Voice {
    /// Always present from the start.
    Hero,
    /// Woken by dying on her blade.
    Broken,
    /// Woken by slaying her.
    Cold,
    /// Woken by freeing her.
    Smitten,
    /// Woken by refusing to decide.
    Paranoid,
}

impl Voice {
    /// Stable key used by the persistent progress store.
    pub fn key(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Broken => "broken",
            Self::Cold => "cold",
            Self::Smitten => "smitten",
            Self::Paranoid => "paranoid",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hero => "the Voice of the Hero",
            Self::Broken => "the Voice of the Broken",
            Self::Cold => "the Voice of the Cold",
            Self::Smitten => "the Voice of the Smitten",
            Self::Paranoid => "the Voice of the Paranoid",
        };
        write!(f, "{name}")
    }
}

/// The engine's working memory for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleState {
    /// The active chapter.
    pub chapter: ChapterId,
    /// Current in-story location.
    pub location: Location,
    /// Whether the blade is in hand.
    pub has_blade: bool,
    /// Whether the blade lies within reach.
    pub blade_in_reach: bool,
    /// Whether she is present in the scene.
    pub princess_present: bool,
    /// Whether the protagonist has learned what she is.
    pub knows_true_nature: bool,
    /// The voices currently awake.
    pub voices: BTreeSet<Voice>,
    /// Chapters visited this cycle, in order.
    pub route: Vec<ChapterId>,
    /// The ending that led into the active chapter.
    pub prev_ending: Option<ChapterEnding>,
}

impl CycleState {
    /// The state vector at cycle start: chapter 1, on the path, unarmed,
    /// unknowing, only the Hero awake.
    pub fn new() -> Self {
        let mut voices = BTreeSet::new();
        voices.insert(Voice::Hero);
        Self {
            chapter: ChapterId::TheRoad,
            location: Location::WoodedPath,
            has_blade: false,
            blade_in_reach: false,
            princess_present: false,
            knows_true_nature: false,
            voices,
            route: Vec::new(),
            prev_ending: None,
        }
    }

    /// Wake a voice. Idempotent.
    pub fn add_voice(&mut self, voice: Voice) {
        self.voices.insert(voice);
    }

    /// Derive the routing-relevant slice of this vector.
    pub fn route_context(&self) -> RouteContext {
        RouteContext {
            target_present: self.princess_present,
            armed: self.has_blade,
            item_present: self.blade_in_reach,
            holding_item: self.has_blade,
            exit_available: !matches!(self.location, Location::Nowhere),
            fixture_present: matches!(
                self.location,
                Location::WoodedPath | Location::CabinDoor | Location::Cabin | Location::Vault
            ),
        }
    }
}

impl Default for CycleState {
    fn default() -> Self {
        Self::new()
    }
}
