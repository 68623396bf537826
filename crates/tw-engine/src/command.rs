//! The fixed vocabulary of free-text player commands.

use strsim::jaro_winkler;

/// Minimum similarity score for "did you mean" suggestions (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.8;

/// The semantic intent behind a typed command.
///
/// Menus tag options with the intent they satisfy; the router maps a typed
/// verb onto whichever tagged option is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Go into or towards a place.
    Enter,
    /// Leave the current place.
    Leave,
    /// Take an item within reach.
    Take,
    /// Drop a held item.
    Drop,
    /// Throw a held item.
    Throw,
    /// Attack the target.
    Slay,
    /// Approach a fixture of the scene.
    Approach,
}

/// Verb synonyms for command parsing.
const ENTER_VERBS: &[&str] = &["enter", "go", "in", "inside", "descend"];
const LEAVE_VERBS: &[&str] = &["leave", "exit", "out", "flee", "ascend", "climb"];
const TAKE_VERBS: &[&str] = &["take", "get", "grab", "pick"];
const DROP_VERBS: &[&str] = &["drop", "discard", "sheathe"];
const THROW_VERBS: &[&str] = &["throw", "toss", "hurl"];
const SLAY_VERBS: &[&str] = &["slay", "attack", "kill", "stab", "strike", "fight"];
const APPROACH_VERBS: &[&str] = &["approach", "near", "examine"];

impl Intent {
    /// Every intent in the vocabulary.
    pub const ALL: [Intent; 7] = [
        Intent::Enter,
        Intent::Leave,
        Intent::Take,
        Intent::Drop,
        Intent::Throw,
        Intent::Slay,
        Intent::Approach,
    ];

    /// The verb synonyms recognised for this intent.
    fn verbs(self) -> &'static [&'static str] {
        match self {
            Self::Enter => ENTER_VERBS,
            Self::Leave => LEAVE_VERBS,
            Self::Take => TAKE_VERBS,
            Self::Drop => DROP_VERBS,
            Self::Throw => THROW_VERBS,
            Self::Slay => SLAY_VERBS,
            Self::Approach => APPROACH_VERBS,
        }
    }
}

/// Parse free-text input into an intent.
///
/// Only the leading verb decides the intent; trailing words ("take the
/// blade", "pick up the blade") are accepted and ignored, since every scene
/// has at most one object per intent.
pub fn parse_intent(input: &str) -> Option<Intent> {
    let verb = input.split_whitespace().next()?.to_lowercase();
    Intent::ALL
        .into_iter()
        .find(|intent| intent.verbs().contains(&verb.as_str()))
}

/// Suggest the closest known verb for an unrecognised input, if any verb
/// scores above the similarity threshold.
pub fn suggest(input: &str) -> Option<&'static str> {
    let verb = input.split_whitespace().next()?.to_lowercase();
    let mut best: Option<(&'static str, f64)> = None;
    for intent in Intent::ALL {
        for candidate in intent.verbs() {
            let score = jaro_winkler(&verb, candidate);
            if score >= SUGGEST_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
    }
    best.map(|(verb, _)| verb)
}
