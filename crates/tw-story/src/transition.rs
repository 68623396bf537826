//! The ending→chapter transition table and the per-ending entry-state
//! table.
//!
//! Both are exhaustive matches: a new ending that lacks a mapping fails to
//! compile rather than surfacing as a runtime "missing transition".

use crate::chapter::{Chapter, ChapterEnding, ChapterId};
use crate::state::{CycleState, Location};

/// Look up the chapter that follows an ending.
///
/// Pure; returns `None` exactly for final endings. Totality over
/// non-final endings is checked by the exhaustive match (and asserted in
/// tests over the full ending set).
pub fn next_chapter(ending: ChapterEnding) -> Option<Chapter> {
    use ChapterEnding::*;

    let id = match ending {
        PrincessSlain => ChapterId::TheSpecter,
        SlainByHer => ChapterId::TheRazor,
        PrincessFreed => ChapterId::TheDamsel,
        Hesitated => ChapterId::TheNightmare,
        RazorDefeated | VowExchanged | EchoLaidToRest | FearFaced => ChapterId::TheVault,
        StrayedFromPath | TornApart | HeartsSevered | HauntedForever | Paralyzed
        | VesselClaimed | VaultRefused | DemoCurtain => return None,
    };
    Some(Chapter::from(id))
}

/// Apply the entry-state effects of arriving through an ending: reset
/// transient flags, set the location, install starting inventory, wake the
/// ending's voice.
///
/// The cycle driver and the debug/resume entry point both seed through
/// this one table, so a resumed chapter starts from the same vector as a
/// naturally reached one.
pub fn apply_entry(ending: ChapterEnding, state: &mut CycleState) {
    use ChapterEnding::*;

    if let Some(voice) = ending.voice() {
        state.add_voice(voice);
    }
    state.prev_ending = Some(ending);
    state.blade_in_reach = false;

    match ending {
        PrincessSlain => {
            // The Specter: back in the basement, blade still in hand.
            state.location = Location::Basement;
            state.has_blade = true;
            state.princess_present = true;
            state.knows_true_nature = true;
        }
        SlainByHer => {
            // The Razor: she holds the blade now.
            state.location = Location::Basement;
            state.has_blade = false;
            state.princess_present = true;
            state.knows_true_nature = true;
        }
        PrincessFreed => {
            // The Damsel: upstairs together, no blade anywhere.
            state.location = Location::Cabin;
            state.has_blade = false;
            state.princess_present = true;
        }
        Hesitated => {
            // The Nightmare: frozen on the stairs, she is below and above.
            state.location = Location::Stairwell;
            state.has_blade = false;
            state.princess_present = true;
        }
        RazorDefeated | VowExchanged | EchoLaidToRest | FearFaced => {
            // The Vault: alone before the shelves.
            state.location = Location::Vault;
            state.has_blade = false;
            state.princess_present = false;
        }
        StrayedFromPath | TornApart | HeartsSevered | HauntedForever | Paralyzed
        | VesselClaimed | VaultRefused | DemoCurtain => {
            state.location = Location::Nowhere;
            state.princess_present = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_over_non_final_endings() {
        for ending in ChapterEnding::ALL {
            assert_eq!(
                next_chapter(ending).is_some(),
                !ending.is_final(),
                "ending {ending} breaks the finality/transition pairing"
            );
        }
    }

    #[test]
    fn one_chapter_per_ending() {
        // Deterministic: the same ending always yields the same chapter.
        for ending in ChapterEnding::ALL {
            assert_eq!(next_chapter(ending), next_chapter(ending));
        }
    }

    #[test]
    fn road_endings_fan_out() {
        assert_eq!(
            next_chapter(ChapterEnding::PrincessSlain).unwrap().id,
            ChapterId::TheSpecter
        );
        assert_eq!(
            next_chapter(ChapterEnding::SlainByHer).unwrap().id,
            ChapterId::TheRazor
        );
        assert_eq!(
            next_chapter(ChapterEnding::PrincessFreed).unwrap().id,
            ChapterId::TheDamsel
        );
        assert_eq!(
            next_chapter(ChapterEnding::Hesitated).unwrap().id,
            ChapterId::TheNightmare
        );
    }

    #[test]
    fn chapter_two_converges_on_the_vault() {
        for ending in [
            ChapterEnding::RazorDefeated,
            ChapterEnding::VowExchanged,
            ChapterEnding::EchoLaidToRest,
            ChapterEnding::FearFaced,
        ] {
            assert_eq!(next_chapter(ending).unwrap().id, ChapterId::TheVault);
        }
    }

    #[test]
    fn entry_state_for_the_razor() {
        let mut state = CycleState::new();
        state.has_blade = true;
        apply_entry(ChapterEnding::SlainByHer, &mut state);

        assert_eq!(state.location, Location::Basement);
        assert!(!state.has_blade);
        assert!(state.princess_present);
        assert!(state.knows_true_nature);
        assert!(state.voices.contains(&crate::state::Voice::Broken));
        assert_eq!(state.prev_ending, Some(ChapterEnding::SlainByHer));
    }

    #[test]
    fn entry_state_resets_transients() {
        let mut state = CycleState::new();
        state.blade_in_reach = true;
        apply_entry(ChapterEnding::PrincessFreed, &mut state);
        assert!(!state.blade_in_reach);
    }
}
