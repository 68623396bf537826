//! The content-warning gate.
//!
//! Certain options are an irreversible narrative commitment flagged as
//! sensitive. Before the option's effect is applied the gate asks the
//! confirmation collaborator once per topic per cycle. Declining locks the
//! topic's whole cluster of sibling options for the rest of the cycle —
//! including on later menus, which are built fresh per decision point and
//! so have not seen the decline — and never touches the persistent store.

use std::collections::HashSet;
use std::rc::Rc;

use crate::menu::OptionsMenu;
use crate::option::ChoiceOption;
use crate::progress::ProgressStore;

/// What the gate decided for a pick attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Unwarned, or confirmed: apply the option normally.
    Proceed,
    /// Declined. The topic's cluster is now locked for this cycle.
    Declined {
        /// A designated fallback option id, present only when the decline
        /// left the menu with no selectable entry.
        fallback: Option<String>,
    },
}

/// Session-local record of declined warning topics. Created fresh at cycle
/// start; nothing here outlives the cycle.
#[derive(Debug, Default)]
pub struct WarningGate {
    declined: HashSet<String>,
}

impl WarningGate {
    /// Create a gate with no declines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a topic has been declined this cycle.
    pub fn is_declined(&self, topic: &str) -> bool {
        self.declined.contains(topic)
    }

    /// Run the gate for an option the player just selected.
    ///
    /// Idempotent per topic: once declined, the confirmation is never
    /// asked again this cycle. A later menu resurfacing a declined topic
    /// arrives unlocked, so the gate re-locks the cluster here before
    /// refusing.
    pub fn clear(
        &mut self,
        option: &Rc<ChoiceOption>,
        menu: &OptionsMenu,
        store: &mut dyn ProgressStore,
    ) -> GateOutcome {
        let Some(warning) = option.warning() else {
            return GateOutcome::Proceed;
        };

        if self.declined.contains(&warning.topic) {
            menu.lock_topic(&warning.topic);
            return GateOutcome::Declined {
                fallback: stranded_fallback(menu, warning.fallback.as_deref()),
            };
        }

        if store.confirm_warning(&warning.topic) {
            return GateOutcome::Proceed;
        }

        self.declined.insert(warning.topic.clone());
        menu.lock_topic(&warning.topic);
        GateOutcome::Declined {
            fallback: stranded_fallback(menu, warning.fallback.as_deref()),
        }
    }
}

/// The fallback id, but only when the menu has nothing selectable left —
/// otherwise the player simply stays on the menu.
fn stranded_fallback(menu: &OptionsMenu, fallback: Option<&str>) -> Option<String> {
    if menu.any_selectable() {
        None
    } else {
        fallback.map(str::to_string)
    }
}
