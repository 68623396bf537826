//! Canonical player options.
//!
//! A [`ChoiceOption`] is the behaviourally-tracked unit of choice. Several
//! menu entries may alias one canonical option under different labels (a
//! dozen phrasings of the same strike); aliases share one `picked` and one
//! `locked` state because they share the `Rc`.

use std::cell::Cell;
use std::rc::Rc;

use crate::command::Intent;
use crate::condition::Condition;

/// A sensitive-content marker on an option.
#[derive(Debug, Clone)]
pub struct Warning {
    /// Topic handed to the confirmation collaborator.
    pub topic: String,
    /// Option id to force-route to when declining leaves no selectable
    /// path on the menu.
    pub fallback: Option<String>,
}

/// One candidate player choice.
#[derive(Debug, Default)]
pub struct ChoiceOption {
    id: String,
    conditions: Vec<Condition>,
    enabled: Cell<bool>,
    locked: Cell<bool>,
    picked: Cell<bool>,
    prerequisite: Option<Rc<ChoiceOption>>,
    intent: Option<Intent>,
    warning: Option<Warning>,
}

impl ChoiceOption {
    /// Create an option with a stable canonical id. Starts enabled,
    /// unlocked, unpicked, with no conditions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: Cell::new(true),
            ..Self::default()
        }
    }

    /// Gate visibility on a condition. All attached conditions must hold.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<Condition>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Hide this option until `parent` has been picked at least once.
    #[must_use]
    pub fn with_prerequisite(mut self, parent: &Rc<ChoiceOption>) -> Self {
        self.prerequisite = Some(Rc::clone(parent));
        self
    }

    /// Tag the option as satisfying a typed command intent.
    #[must_use]
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Mark the option as requiring a content-warning confirmation.
    #[must_use]
    pub fn with_warning(mut self, topic: impl Into<String>) -> Self {
        self.warning = Some(Warning {
            topic: topic.into(),
            fallback: None,
        });
        self
    }

    /// Mark as warned, with a fallback outcome for when declining would
    /// otherwise strand the player.
    #[must_use]
    pub fn with_warning_fallback(
        mut self,
        topic: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        self.warning = Some(Warning {
            topic: topic.into(),
            fallback: Some(fallback.into()),
        });
        self
    }

    /// Start the option greyed-out.
    #[must_use]
    pub fn starts_locked(self) -> Self {
        self.locked.set(true);
        self
    }

    /// Wrap into a shared handle suitable for aliasing and prerequisites.
    pub fn shared(self) -> Rc<ChoiceOption> {
        Rc::new(self)
    }

    /// The canonical id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The command intent this option satisfies, if any.
    pub fn intent(&self) -> Option<Intent> {
        self.intent
    }

    /// The content warning on this option, if any.
    pub fn warning(&self) -> Option<&Warning> {
        self.warning.as_ref()
    }

    /// Whether the option appears on the menu: enabled, every condition
    /// true, and the prerequisite (if any) already picked.
    pub fn is_visible(&self) -> bool {
        self.enabled.get()
            && self.conditions.iter().all(Condition::value)
            && self
                .prerequisite
                .as_ref()
                .is_none_or(|parent| parent.is_picked())
    }

    /// Whether the option can be selected: visible and not greyed-out.
    pub fn is_selectable(&self) -> bool {
        self.is_visible() && !self.locked.get()
    }

    /// Whether the option is greyed-out.
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    /// Grey the option out (or back in). Locked options stay visible but
    /// refuse selection.
    pub fn set_locked(&self, locked: bool) {
        self.locked.set(locked);
    }

    /// Toggle direct availability, independent of conditions.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Whether the option has ever been picked. Shared across aliases.
    pub fn is_picked(&self) -> bool {
        self.picked.get()
    }

    pub(crate) fn mark_picked(&self) {
        self.picked.set(true);
    }
}
