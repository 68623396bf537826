//! Chapters and the endings that connect them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::Voice;

/// Identity of a chapter node in the transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChapterId {
    /// Chapter 1, the distinguished start: the woods, the cabin, her.
    TheRoad,
    /// Chapter 2 after dying on her blade.
    TheRazor,
    /// Chapter 2 after freeing her.
    TheDamsel,
    /// Chapter 2 after slaying her.
    TheSpecter,
    /// Chapter 2 after refusing to decide.
    TheNightmare,
    /// Chapter 3, where a vessel may be claimed.
    TheVault,
}

impl ChapterId {
    /// Every chapter, in graph order.
    pub const ALL: [ChapterId; 6] = [
        ChapterId::TheRoad,
        ChapterId::TheRazor,
        ChapterId::TheDamsel,
        ChapterId::TheSpecter,
        ChapterId::TheNightmare,
        ChapterId::TheVault,
    ];

    /// Chapter number, used by the title-card formatting.
    pub fn number(self) -> u32 {
        match self {
            Self::TheRoad => 1,
            Self::TheRazor | Self::TheDamsel | Self::TheSpecter | Self::TheNightmare => 2,
            Self::TheVault => 3,
        }
    }

    /// Stable key used by the persistent progress store.
    pub fn key(self) -> &'static str {
        match self {
            Self::TheRoad => "the-road",
            Self::TheRazor => "the-razor",
            Self::TheDamsel => "the-damsel",
            Self::TheSpecter => "the-specter",
            Self::TheNightmare => "the-nightmare",
            Self::TheVault => "the-vault",
        }
    }

    /// Id of the chapter's opening section in the narrative script.
    pub fn section(self) -> &'static str {
        match self {
            Self::TheRoad => "the-road/intro",
            Self::TheRazor => "the-razor/intro",
            Self::TheDamsel => "the-damsel/intro",
            Self::TheSpecter => "the-specter/intro",
            Self::TheNightmare => "the-nightmare/intro",
            Self::TheVault => "the-vault/intro",
        }
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TheRoad => "The Road",
            Self::TheRazor => "The Razor",
            Self::TheDamsel => "The Damsel",
            Self::TheSpecter => "The Specter",
            Self::TheNightmare => "The Nightmare",
            Self::TheVault => "The Vault",
        };
        write!(f, "{name}")
    }
}

/// A chapter node: identity plus its externally-owned narrative script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// The chapter's identity.
    pub id: ChapterId,
    /// Chapter number for title-card formatting.
    pub number: u32,
    /// Opening section id in the narrative script.
    pub section: &'static str,
}

impl From<ChapterId> for Chapter {
    fn from(id: ChapterId) -> Self {
        Self {
            id,
            number: id.number(),
            section: id.section(),
        }
    }
}

/// The result a chapter produces when it finishes. Each ending maps to
/// exactly one follow-on chapter (or terminates the cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChapterEnding {
    /// You drove the blade home.
    PrincessSlain,
    /// She was faster.
    SlainByHer,
    /// You cut her chains instead.
    PrincessFreed,
    /// You climbed back up without deciding.
    Hesitated,
    /// You walked off the path and out of the story. Aborts the cycle.
    StrayedFromPath,
    /// You took the shard back from her.
    RazorDefeated,
    /// The Razor finished what she started.
    TornApart,
    /// A promise exchanged in the ruined cabin.
    VowExchanged,
    /// The vow refused; the tether cut.
    HeartsSevered,
    /// The echo dispersed at last.
    EchoLaidToRest,
    /// The echo keeps the basement forever.
    HauntedForever,
    /// You opened your eyes inside the fear.
    FearFaced,
    /// You never moved again.
    Paralyzed,
    /// A vessel claimed from the vault.
    VesselClaimed,
    /// The vault left sealed.
    VaultRefused,
    /// The softened curtain dropped by demo truncation.
    DemoCurtain,
}

impl ChapterEnding {
    /// Every ending in the enumerated set.
    pub const ALL: [ChapterEnding; 16] = [
        ChapterEnding::PrincessSlain,
        ChapterEnding::SlainByHer,
        ChapterEnding::PrincessFreed,
        ChapterEnding::Hesitated,
        ChapterEnding::StrayedFromPath,
        ChapterEnding::RazorDefeated,
        ChapterEnding::TornApart,
        ChapterEnding::VowExchanged,
        ChapterEnding::HeartsSevered,
        ChapterEnding::EchoLaidToRest,
        ChapterEnding::HauntedForever,
        ChapterEnding::FearFaced,
        ChapterEnding::Paralyzed,
        ChapterEnding::VesselClaimed,
        ChapterEnding::VaultRefused,
        ChapterEnding::DemoCurtain,
    ];

    /// Whether the cycle terminates on this ending.
    pub fn is_final(self) -> bool {
        matches!(
            self,
            Self::StrayedFromPath
                | Self::TornApart
                | Self::HeartsSevered
                | Self::HauntedForever
                | Self::Paralyzed
                | Self::VesselClaimed
                | Self::VaultRefused
                | Self::DemoCurtain
        )
    }

    /// Whether this ending is the distinguished abort: the cycle exits
    /// early without the usual chapter-end bookkeeping.
    pub fn is_abort(self) -> bool {
        matches!(self, Self::StrayedFromPath)
    }

    /// The voice this ending wakes, if any.
    pub fn voice(self) -> Option<Voice> {
        match self {
            Self::PrincessSlain => Some(Voice::Cold),
            Self::SlainByHer => Some(Voice::Broken),
            Self::PrincessFreed => Some(Voice::Smitten),
            Self::Hesitated => Some(Voice::Paranoid),
            _ => None,
        }
    }

    /// The vessel this ending claims, if any.
    pub fn vessel(self) -> Option<&'static str> {
        match self {
            Self::VesselClaimed => Some("the-thorn-vessel"),
            _ => None,
        }
    }

    /// Stable key used by the persistent progress store and reports.
    pub fn key(self) -> &'static str {
        match self {
            Self::PrincessSlain => "princess-slain",
            Self::SlainByHer => "slain-by-her",
            Self::PrincessFreed => "princess-freed",
            Self::Hesitated => "hesitated",
            Self::StrayedFromPath => "strayed-from-path",
            Self::RazorDefeated => "razor-defeated",
            Self::TornApart => "torn-apart",
            Self::VowExchanged => "vow-exchanged",
            Self::HeartsSevered => "hearts-severed",
            Self::EchoLaidToRest => "echo-laid-to-rest",
            Self::HauntedForever => "haunted-forever",
            Self::FearFaced => "fear-faced",
            Self::Paralyzed => "paralyzed",
            Self::VesselClaimed => "vessel-claimed",
            Self::VaultRefused => "vault-refused",
            Self::DemoCurtain => "demo-curtain",
        }
    }
}

impl fmt::Display for ChapterEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_numbers() {
        assert_eq!(ChapterId::TheRoad.number(), 1);
        assert_eq!(ChapterId::TheSpecter.number(), 2);
        assert_eq!(ChapterId::TheVault.number(), 3);
    }

    #[test]
    fn chapter_keys_are_unique_and_name_their_sections() {
        let mut keys: Vec<&str> = ChapterId::ALL.iter().map(|c| c.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ChapterId::ALL.len());

        for id in ChapterId::ALL {
            assert!(id.section().starts_with(id.key()));
        }
    }

    #[test]
    fn abort_is_final() {
        assert!(ChapterEnding::StrayedFromPath.is_final());
        assert!(ChapterEnding::StrayedFromPath.is_abort());
        assert!(!ChapterEnding::PrincessSlain.is_abort());
    }

    #[test]
    fn road_endings_wake_voices() {
        assert_eq!(ChapterEnding::SlainByHer.voice(), Some(Voice::Broken));
        assert_eq!(ChapterEnding::RazorDefeated.voice(), None);
    }

    #[test]
    fn only_the_vault_claims_a_vessel() {
        for ending in ChapterEnding::ALL {
            let claims = ending.vessel().is_some();
            assert_eq!(claims, ending == ChapterEnding::VesselClaimed);
        }
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<&str> = ChapterEnding::ALL.iter().map(|e| e.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ChapterEnding::ALL.len());
    }
}
