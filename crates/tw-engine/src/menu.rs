//! Ordered menus of options.
//!
//! Entry order is significant twice over: it is display order, and it is
//! the order in which the command router attempts first-match resolution.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{EngineError, EngineResult};
use crate::option::ChoiceOption;

/// How a menu treats free-text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuMode {
    /// Typed command verbs are routed onto matching options.
    #[default]
    CommandAware,
    /// Entries are choice-only; command routing is disabled.
    ChoiceOnly,
}

/// One labelled entry on a menu.
///
/// Several entries may share one canonical [`ChoiceOption`]; they then
/// share its picked and locked state.
#[derive(Debug)]
pub struct MenuEntry {
    label: String,
    text: RefCell<String>,
    option: Rc<ChoiceOption>,
}

impl MenuEntry {
    /// The entry's label, as typed by the player.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The current display text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// The canonical option behind this entry.
    pub fn option(&self) -> &Rc<ChoiceOption> {
        &self.option
    }
}

/// One line of resolved menu output, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    /// The label the player types to select this line.
    pub label: String,
    /// The display text.
    pub text: String,
    /// Whether selection would succeed.
    pub selectable: bool,
    /// Whether the line is greyed-out.
    pub locked: bool,
}

/// An ordered collection of options presented at one decision point.
#[derive(Debug, Default)]
pub struct OptionsMenu {
    entries: Vec<MenuEntry>,
    mode: MenuMode,
}

impl OptionsMenu {
    /// Create an empty command-aware menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty choice-only menu (command routing disabled).
    pub fn choice_only() -> Self {
        Self {
            entries: Vec::new(),
            mode: MenuMode::ChoiceOnly,
        }
    }

    /// The menu's input mode.
    pub fn mode(&self) -> MenuMode {
        self.mode
    }

    /// Append an entry owning a fresh canonical option. Returns the shared
    /// handle for aliasing or prerequisite wiring.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        text: impl Into<String>,
        option: ChoiceOption,
    ) -> EngineResult<Rc<ChoiceOption>> {
        let shared = option.shared();
        self.add_alias(label, text, &shared)?;
        Ok(shared)
    }

    /// Append an entry aliasing an existing canonical option.
    pub fn add_alias(
        &mut self,
        label: impl Into<String>,
        text: impl Into<String>,
        option: &Rc<ChoiceOption>,
    ) -> EngineResult<()> {
        let label = label.into();
        if self.find(&label).is_some() {
            return Err(EngineError::DuplicateLabel(label));
        }
        self.entries.push(MenuEntry {
            label,
            text: RefCell::new(text.into()),
            option: Rc::clone(option),
        });
        Ok(())
    }

    /// Resolve the menu for display: the visible entries, in order.
    pub fn resolve(&self) -> Vec<MenuLine> {
        self.entries
            .iter()
            .filter(|entry| entry.option.is_visible())
            .map(|entry| MenuLine {
                label: entry.label.clone(),
                text: entry.text(),
                selectable: entry.option.is_selectable(),
                locked: entry.option.is_locked(),
            })
            .collect()
    }

    /// Select an entry. Marks the canonical option picked and returns its
    /// canonical id, never the alias label.
    ///
    /// Picking a hidden or locked entry is a caller error; the prompt loop
    /// and router check selectability before committing a pick.
    pub fn pick(&self, label: &str) -> EngineResult<String> {
        let entry = self.entry(label)?;
        if !entry.option.is_visible() {
            return Err(EngineError::HiddenOption(entry.label.clone()));
        }
        if entry.option.is_locked() {
            return Err(EngineError::LockedOption(entry.label.clone()));
        }
        entry.option.mark_picked();
        Ok(entry.option.id().to_string())
    }

    /// Whether the canonical option behind a label has ever been picked,
    /// through any alias.
    pub fn has_picked(&self, label: &str) -> EngineResult<bool> {
        Ok(self.entry(label)?.option.is_picked())
    }

    /// Grey an entry out (or back in).
    pub fn set_locked(&self, label: &str, locked: bool) -> EngineResult<()> {
        self.entry(label)?.option.set_locked(locked);
        Ok(())
    }

    /// Toggle an entry's direct availability.
    pub fn set_enabled(&self, label: &str, enabled: bool) -> EngineResult<()> {
        self.entry(label)?.option.set_enabled(enabled);
        Ok(())
    }

    /// Override an entry's display text.
    pub fn set_text(&self, label: &str, text: impl Into<String>) -> EngineResult<()> {
        *self.entry(label)?.text.borrow_mut() = text.into();
        Ok(())
    }

    /// Grey out every entry whose option carries the given warning topic.
    /// Returns how many entries were locked.
    pub fn lock_topic(&self, topic: &str) -> usize {
        let mut locked = 0;
        for entry in &self.entries {
            if entry
                .option
                .warning()
                .is_some_and(|warning| warning.topic == topic)
            {
                entry.option.set_locked(true);
                locked += 1;
            }
        }
        locked
    }

    /// Whether any entry can currently be selected.
    pub fn any_selectable(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.option.is_selectable())
    }

    /// Iterate entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter()
    }

    /// Find an entry by label, case-insensitively.
    pub fn find(&self, label: &str) -> Option<&MenuEntry> {
        self.entries
            .iter()
            .find(|entry| entry.label.eq_ignore_ascii_case(label))
    }

    fn entry(&self, label: &str) -> EngineResult<&MenuEntry> {
        self.find(label)
            .ok_or_else(|| EngineError::UnknownLabel(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Flag;

    fn basement_menu() -> (OptionsMenu, Flag) {
        let can_stray = Flag::new(true);
        let mut menu = OptionsMenu::new();
        let slay = menu
            .add("slay", "Slay the Princess.", ChoiceOption::new("slay-her"))
            .unwrap();
        menu.add_alias("strike", "[Say nothing. Strike.]", &slay)
            .unwrap();
        menu.add(
            "stray",
            "Stray from the path.",
            ChoiceOption::new("stray").with_condition(can_stray.clone()),
        )
        .unwrap();
        (menu, can_stray)
    }

    #[test]
    fn resolve_lists_visible_in_order() {
        let (menu, _stray) = basement_menu();
        let lines = menu.resolve();
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["slay", "strike", "stray"]);
        assert!(lines.iter().all(|l| l.selectable));
    }

    #[test]
    fn hidden_entries_drop_out_of_resolve() {
        let (menu, stray) = basement_menu();
        stray.set(false);
        let lines = menu.resolve();
        assert!(lines.iter().all(|l| l.label != "stray"));
    }

    #[test]
    fn prerequisite_entry_absent_until_parent_picked() {
        let mut menu = OptionsMenu::new();
        let talk = menu
            .add("talk", "Speak with her.", ChoiceOption::new("talk"))
            .unwrap();
        menu.add(
            "trust",
            "Loosen her bindings.",
            ChoiceOption::new("trust").with_prerequisite(&talk),
        )
        .unwrap();

        assert!(menu.resolve().iter().all(|l| l.label != "trust"));
        menu.pick("talk").unwrap();
        assert!(menu.resolve().iter().any(|l| l.label == "trust"));
    }

    #[test]
    fn pick_returns_canonical_id() {
        let (menu, _stray) = basement_menu();
        assert_eq!(menu.pick("strike").unwrap(), "slay-her");
        // Alias and canonical share the picked flag.
        assert!(menu.has_picked("slay").unwrap());
    }

    #[test]
    fn pick_hidden_is_an_error() {
        let (menu, stray) = basement_menu();
        stray.set(false);
        assert!(matches!(
            menu.pick("stray"),
            Err(EngineError::HiddenOption(_))
        ));
        assert!(!menu.has_picked("stray").unwrap());
    }

    #[test]
    fn pick_locked_is_an_error() {
        let (menu, _stray) = basement_menu();
        menu.set_locked("slay", true).unwrap();
        assert!(matches!(
            menu.pick("strike"),
            Err(EngineError::LockedOption(_))
        ));
        assert!(!menu.has_picked("slay").unwrap());
    }

    #[test]
    fn locked_stays_visible() {
        let (menu, _stray) = basement_menu();
        menu.set_locked("slay", true).unwrap();
        let lines = menu.resolve();
        let slay = lines.iter().find(|l| l.label == "slay").unwrap();
        assert!(slay.locked);
        assert!(!slay.selectable);
    }

    #[test]
    fn duplicate_labels_rejected() {
        let (mut menu, _stray) = basement_menu();
        let result = menu.add("SLAY", "again", ChoiceOption::new("other"));
        assert!(matches!(result, Err(EngineError::DuplicateLabel(_))));
    }

    #[test]
    fn set_text_overrides_display() {
        let (menu, _stray) = basement_menu();
        menu.set_text("slay", "Slay her, again.").unwrap();
        let lines = menu.resolve();
        assert_eq!(lines[0].text, "Slay her, again.");
    }

    #[test]
    fn lock_topic_locks_the_cluster() {
        let mut menu = OptionsMenu::new();
        menu.add(
            "sever",
            "[Turn the blade on yourself.]",
            ChoiceOption::new("sever").with_warning("self-harm"),
        )
        .unwrap();
        menu.add(
            "sever-2",
            "[Press the edge to your wrist.]",
            ChoiceOption::new("sever-2").with_warning("self-harm"),
        )
        .unwrap();
        menu.add("free", "Free her.", ChoiceOption::new("free"))
            .unwrap();

        assert_eq!(menu.lock_topic("self-harm"), 2);
        assert!(menu.any_selectable());
        assert!(!menu.find("sever").unwrap().option().is_selectable());
        assert!(menu.find("free").unwrap().option().is_selectable());
    }

    #[test]
    fn unknown_label() {
        let (menu, _stray) = basement_menu();
        assert!(matches!(
            menu.pick("dance"),
            Err(EngineError::UnknownLabel(_))
        ));
    }
}
