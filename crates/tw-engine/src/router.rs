//! Routing typed commands onto menu options.
//!
//! A pure function from (intent, menu snapshot, state slice) to either the
//! label of the option that satisfies the intent, or a structured refusal.
//! Many scenes phrase the same action several explicit ways; routing lets
//! the single verb resolve to whichever phrasing is currently on screen.

use std::fmt;

use crate::command::Intent;
use crate::menu::{MenuMode, OptionsMenu};

/// The routing-relevant slice of the cycle state vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteContext {
    /// Someone is present to attack.
    pub target_present: bool,
    /// The player holds a weapon.
    pub armed: bool,
    /// An item is within reach to take.
    pub item_present: bool,
    /// The player is holding an item that could be dropped or thrown.
    pub holding_item: bool,
    /// The current place can be entered or left.
    pub exit_available: bool,
    /// A fixture of the scene is present to approach.
    pub fixture_present: bool,
}

/// A player-facing refusal. Expected, recoverable; drives no state change
/// beyond re-prompting the same menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refusal {
    /// No target is present for the intent.
    NoTarget,
    /// The intent needs an item the player does not hold.
    MissingItem {
        /// Display name of the missing item.
        item: String,
    },
    /// The matching route exists but is greyed-out or locked.
    PathClosed,
    /// The intent is valid but nothing on this menu satisfies it.
    NoMatchingOption,
    /// The input matched no known verb.
    UnknownCommand {
        /// The raw input.
        input: String,
        /// Closest known verb, if any scored near enough.
        suggestion: Option<String>,
    },
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTarget => write!(f, "There is no one here for that."),
            Self::MissingItem { item } => write!(f, "You do not have {item}."),
            Self::PathClosed => write!(f, "You cannot stray from this path."),
            Self::NoMatchingOption => {
                write!(f, "That is not something you can do right now.")
            }
            Self::UnknownCommand { input, suggestion } => match suggestion {
                Some(verb) => {
                    write!(f, "You do not know how to '{input}'. Did you mean '{verb}'?")
                }
                None => write!(f, "You do not know how to '{input}'."),
            },
        }
    }
}

/// Resolve an intent against the active menu.
///
/// Pure over its inputs: no pick is registered, no state mutated. On
/// success the returned label is treated exactly as if the player had
/// typed it.
pub fn route(intent: Intent, menu: &OptionsMenu, ctx: &RouteContext) -> Result<String, Refusal> {
    if menu.mode() == MenuMode::ChoiceOnly {
        return Err(Refusal::NoMatchingOption);
    }

    // State gate first: is the intent permitted at all right now?
    match intent {
        Intent::Slay => {
            if !ctx.target_present {
                return Err(Refusal::NoTarget);
            }
            if !ctx.armed {
                return Err(Refusal::MissingItem {
                    item: "the blade".to_string(),
                });
            }
        }
        Intent::Take => {
            if !ctx.item_present {
                return Err(Refusal::NoTarget);
            }
        }
        Intent::Drop | Intent::Throw => {
            if !ctx.holding_item {
                return Err(Refusal::MissingItem {
                    item: "anything to let go of".to_string(),
                });
            }
        }
        Intent::Enter | Intent::Leave => {
            if !ctx.exit_available {
                return Err(Refusal::NoTarget);
            }
        }
        Intent::Approach => {
            if !ctx.fixture_present {
                return Err(Refusal::NoTarget);
            }
        }
    }

    // First visible entry in display order whose option carries the intent.
    let hit = menu.entries().find(|entry| {
        entry.option().intent() == Some(intent) && entry.option().is_visible()
    });

    match hit {
        Some(entry) if entry.option().is_selectable() => Ok(entry.label().to_string()),
        Some(_) => Err(Refusal::PathClosed),
        None => Err(Refusal::NoMatchingOption),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::ChoiceOption;

    fn armed_ctx() -> RouteContext {
        RouteContext {
            target_present: true,
            armed: true,
            item_present: true,
            holding_item: true,
            exit_available: true,
            fixture_present: true,
        }
    }

    fn basement_menu() -> OptionsMenu {
        let mut menu = OptionsMenu::new();
        let slay = menu
            .add(
                "slay",
                "Slay the Princess.",
                ChoiceOption::new("slay-her").with_intent(Intent::Slay),
            )
            .unwrap();
        menu.add_alias("strike", "[Say nothing. Strike.]", &slay)
            .unwrap();
        menu.add(
            "refuse",
            "Climb back up the stairs.",
            ChoiceOption::new("refuse").with_intent(Intent::Leave),
        )
        .unwrap();
        menu
    }

    #[test]
    fn routes_to_first_matching_label() {
        let menu = basement_menu();
        assert_eq!(route(Intent::Slay, &menu, &armed_ctx()), Ok("slay".into()));
        assert_eq!(
            route(Intent::Leave, &menu, &armed_ctx()),
            Ok("refuse".into())
        );
    }

    #[test]
    fn no_target_refusal() {
        let menu = basement_menu();
        let ctx = RouteContext {
            target_present: false,
            ..armed_ctx()
        };
        assert_eq!(route(Intent::Slay, &menu, &ctx), Err(Refusal::NoTarget));
    }

    #[test]
    fn unarmed_refusal() {
        let menu = basement_menu();
        let ctx = RouteContext {
            armed: false,
            ..armed_ctx()
        };
        assert_eq!(
            route(Intent::Slay, &menu, &ctx),
            Err(Refusal::MissingItem {
                item: "the blade".to_string()
            })
        );
    }

    #[test]
    fn locked_match_is_path_closed() {
        let menu = basement_menu();
        menu.set_locked("slay", true).unwrap();
        assert_eq!(
            route(Intent::Slay, &menu, &armed_ctx()),
            Err(Refusal::PathClosed)
        );
        // The refusal registered no pick.
        assert!(!menu.has_picked("slay").unwrap());
    }

    #[test]
    fn no_matching_option() {
        let menu = basement_menu();
        assert_eq!(
            route(Intent::Take, &menu, &armed_ctx()),
            Err(Refusal::NoMatchingOption)
        );
    }

    #[test]
    fn choice_only_menus_disable_routing() {
        let mut menu = OptionsMenu::choice_only();
        menu.add(
            "vow",
            "Exchange vows.",
            ChoiceOption::new("vow").with_intent(Intent::Approach),
        )
        .unwrap();
        assert_eq!(
            route(Intent::Approach, &menu, &armed_ctx()),
            Err(Refusal::NoMatchingOption)
        );
    }

    #[test]
    fn routing_is_deterministic() {
        let menu = basement_menu();
        let ctx = armed_ctx();
        let first = route(Intent::Slay, &menu, &ctx);
        let second = route(Intent::Slay, &menu, &ctx);
        assert_eq!(first, second);
    }
}
