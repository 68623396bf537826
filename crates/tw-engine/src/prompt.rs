//! The blocking menu prompt loop.
//!
//! Renders the resolved menu, reads input, and keeps re-prompting through
//! recoverable refusals until a pick commits. Free-text verbs are routed
//! onto the menu; the content-warning gate runs before any warned pick is
//! committed.

use std::rc::Rc;

use crate::command::{parse_intent, suggest};
use crate::error::{EngineError, EngineResult};
use crate::frontend::Frontend;
use crate::gate::{GateOutcome, WarningGate};
use crate::menu::OptionsMenu;
use crate::progress::ProgressStore;
use crate::router::{Refusal, RouteContext, route};

/// Prompt the player on a menu until a choice commits.
///
/// Returns the canonical id of the picked option — or, when declining a
/// content warning leaves no selectable path, the warned option's
/// designated fallback id (which is then never marked picked).
pub fn prompt_menu(
    io: &mut dyn Frontend,
    store: &mut dyn ProgressStore,
    gate: &mut WarningGate,
    menu: &OptionsMenu,
    ctx: &RouteContext,
    override_line: Option<&str>,
) -> EngineResult<String> {
    if let Some(line) = override_line {
        io.print_line(line);
    }

    loop {
        for line in menu.resolve() {
            io.print_line(&format!("  [{}] {}", line.label, line.text));
        }

        let raw = io.read_input()?;
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }

        // A visible label takes precedence over command routing.
        let label_hit = menu
            .resolve()
            .into_iter()
            .find(|line| line.label.eq_ignore_ascii_case(input));
        if let Some(line) = label_hit {
            if !line.selectable {
                io.print_line(&Refusal::PathClosed.to_string());
                continue;
            }
            match commit(&line.label, menu, gate, store)? {
                Committed::Id(id) => return Ok(id),
                Committed::Refused => continue,
                Committed::Closed => {
                    io.print_line(&Refusal::PathClosed.to_string());
                    continue;
                }
            }
        }

        match parse_intent(input) {
            Some(intent) => match route(intent, menu, ctx) {
                Ok(label) => match commit(&label, menu, gate, store)? {
                    Committed::Id(id) => return Ok(id),
                    Committed::Refused => continue,
                    Committed::Closed => {
                        io.print_line(&Refusal::PathClosed.to_string());
                        continue;
                    }
                },
                Err(refusal) => io.print_line(&refusal.to_string()),
            },
            None => {
                let refusal = Refusal::UnknownCommand {
                    input: input.to_string(),
                    suggestion: suggest(input).map(str::to_string),
                };
                io.print_line(&refusal.to_string());
            }
        }
    }
}

enum Committed {
    /// A canonical option id (picked) or a forced fallback id (not picked).
    Id(String),
    /// Warning declined just now with alternatives remaining; re-prompt.
    Refused,
    /// A topic declined earlier this cycle attempted again; show the
    /// closed-path refusal and re-prompt.
    Closed,
}

fn commit(
    label: &str,
    menu: &OptionsMenu,
    gate: &mut WarningGate,
    store: &mut dyn ProgressStore,
) -> EngineResult<Committed> {
    let option = menu
        .find(label)
        .map(|entry| Rc::clone(entry.option()))
        .ok_or_else(|| EngineError::UnknownLabel(label.to_string()))?;

    let pre_declined = option
        .warning()
        .is_some_and(|warning| gate.is_declined(&warning.topic));

    match gate.clear(&option, menu, store) {
        GateOutcome::Proceed => Ok(Committed::Id(menu.pick(label)?)),
        GateOutcome::Declined {
            fallback: Some(id),
        } => Ok(Committed::Id(id)),
        GateOutcome::Declined { fallback: None } if pre_declined => Ok(Committed::Closed),
        GateOutcome::Declined { fallback: None } => Ok(Committed::Refused),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Intent;
    use crate::frontend::ScriptedFrontend;
    use crate::option::ChoiceOption;
    use crate::progress::MemoryProgress;

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
            "free",
            "Free her from her chains.",
            ChoiceOption::new("free-her"),
        )
        .unwrap();
        menu
    }

    fn run(
        menu: &OptionsMenu,
        ctx: &RouteContext,
        store: &mut MemoryProgress,
        inputs: &[&str],
    ) -> (EngineResult<String>, ScriptedFrontend) {
        let mut io = ScriptedFrontend::with_inputs(inputs.iter().copied());
        let mut gate = WarningGate::new();
        let result = prompt_menu(&mut io, store, &mut gate, menu, ctx, None);
        (result, io)
    }

    #[test]
    fn label_pick_returns_canonical_id() {
        let menu = basement_menu();
        let mut store = MemoryProgress::new();
        let (result, _io) = run(&menu, &armed_ctx(), &mut store, &["strike"]);
        assert_eq!(result.unwrap(), "slay-her");
        assert!(menu.has_picked("slay").unwrap());
    }

    #[test]
    fn typed_verb_routes_onto_menu() {
        let menu = basement_menu();
        let mut store = MemoryProgress::new();
        let (result, _io) = run(&menu, &armed_ctx(), &mut store, &["attack her"]);
        assert_eq!(result.unwrap(), "slay-her");
    }

    #[test]
    fn unarmed_verb_refuses_then_reprompts() {
        let menu = basement_menu();
        let ctx = RouteContext {
            armed: false,
            ..armed_ctx()
        };
        let mut store = MemoryProgress::new();
        let (result, io) = run(&menu, &ctx, &mut store, &["attack", "free"]);

        assert_eq!(result.unwrap(), "free-her");
        assert!(io.saw("You do not have the blade."));
        assert!(!menu.has_picked("slay").unwrap());
    }

    #[test]
    fn greyed_alias_refuses_without_registering_pick() {
        let menu = basement_menu();
        menu.set_locked("slay", true).unwrap();
        let mut store = MemoryProgress::new();
        let (result, io) = run(&menu, &armed_ctx(), &mut store, &["attack", "free"]);

        assert_eq!(result.unwrap(), "free-her");
        assert!(io.saw("You cannot stray from this path."));
        assert!(!menu.has_picked("slay").unwrap());
    }

    #[test]
    fn greyed_label_refuses_too() {
        let menu = basement_menu();
        menu.set_locked("slay", true).unwrap();
        let mut store = MemoryProgress::new();
        let (result, io) = run(&menu, &armed_ctx(), &mut store, &["strike", "free"]);

        assert_eq!(result.unwrap(), "free-her");
        assert!(io.saw("You cannot stray from this path."));
    }

    #[test]
    fn unknown_input_suggests_a_verb() {
        let menu = basement_menu();
        let mut store = MemoryProgress::new();
        let (result, io) = run(&menu, &armed_ctx(), &mut store, &["slya", "slay"]);

        assert_eq!(result.unwrap(), "slay-her");
        assert!(io.saw("Did you mean 'slay'?"));
    }

    #[test]
    fn declined_warning_reprompts_when_alternatives_remain() {
        let mut menu = OptionsMenu::new();
        menu.add(
            "sever",
            "[Turn the blade on yourself.]",
            ChoiceOption::new("sever").with_warning_fallback("self-harm", "free-her"),
        )
        .unwrap();
        menu.add("free", "Free her.", ChoiceOption::new("free-her"))
            .unwrap();

        let mut store = MemoryProgress::new();
        store.decline_topic("self-harm");
        let (result, _io) = run(&menu, &armed_ctx(), &mut store, &["sever", "free"]);

        assert_eq!(result.unwrap(), "free-her");
        assert!(!menu.find("sever").unwrap().option().is_picked());
    }

    #[test]
    fn declined_warning_forces_fallback_when_stranded() {
        let mut menu = OptionsMenu::new();
        menu.add(
            "sever",
            "[Turn the blade on yourself.]",
            ChoiceOption::new("sever").with_warning_fallback("self-harm", "free-her"),
        )
        .unwrap();

        let mut store = MemoryProgress::new();
        store.decline_topic("self-harm");
        let (result, _io) = run(&menu, &armed_ctx(), &mut store, &["sever"]);

        assert_eq!(result.unwrap(), "free-her");
        assert!(!menu.find("sever").unwrap().option().is_picked());
    }

    #[test]
    fn declined_topic_refuses_on_a_later_menu() {
        let mut store = MemoryProgress::new();
        store.decline_topic("self-harm");
        let mut gate = WarningGate::new();

        let mut first = OptionsMenu::new();
        first
            .add(
                "sever",
                "[Turn the blade on yourself.]",
                ChoiceOption::new("sever").with_warning_fallback("self-harm", "free-her"),
            )
            .unwrap();
        first
            .add("free", "Free her.", ChoiceOption::new("free-her"))
            .unwrap();
        let mut io = ScriptedFrontend::with_inputs(["sever", "free"]);
        let result = prompt_menu(&mut io, &mut store, &mut gate, &first, &armed_ctx(), None);
        assert_eq!(result.unwrap(), "free-her");

        // A fresh menu resurfaces the topic: the attempt meets the
        // closed-path refusal and the entry is foreclosed, not silently
        // swallowed.
        let mut second = OptionsMenu::new();
        second
            .add(
                "end-it",
                "[Press the edge to your wrist.]",
                ChoiceOption::new("end-it").with_warning("self-harm"),
            )
            .unwrap();
        second
            .add("stay", "Stay your hand.", ChoiceOption::new("stay"))
            .unwrap();
        let mut io = ScriptedFrontend::with_inputs(["end-it", "stay"]);
        let result = prompt_menu(&mut io, &mut store, &mut gate, &second, &armed_ctx(), None);

        assert_eq!(result.unwrap(), "stay");
        assert!(io.saw("You cannot stray from this path."));
        assert!(!second.find("end-it").unwrap().option().is_picked());
        assert!(!second.find("end-it").unwrap().option().is_selectable());
    }

    #[test]
    fn declined_topic_falls_back_on_a_fresh_single_option_menu() {
        let mut store = MemoryProgress::new();
        store.decline_topic("self-harm");
        let mut gate = WarningGate::new();

        let mut first = OptionsMenu::new();
        first
            .add(
                "sever",
                "[Turn the blade on yourself.]",
                ChoiceOption::new("sever").with_warning_fallback("self-harm", "free-her"),
            )
            .unwrap();
        first
            .add("free", "Free her.", ChoiceOption::new("free-her"))
            .unwrap();
        let mut io = ScriptedFrontend::with_inputs(["sever", "free"]);
        prompt_menu(&mut io, &mut store, &mut gate, &first, &armed_ctx(), None).unwrap();

        // Later menu where the declined route is the only entry: the
        // player is force-routed to the fallback instead of stranded.
        let mut second = OptionsMenu::new();
        second
            .add(
                "end-it",
                "[Press the edge to your wrist.]",
                ChoiceOption::new("end-it").with_warning_fallback("self-harm", "free-her"),
            )
            .unwrap();
        let mut io = ScriptedFrontend::with_inputs(["end-it"]);
        let result = prompt_menu(&mut io, &mut store, &mut gate, &second, &armed_ctx(), None);

        assert_eq!(result.unwrap(), "free-her");
        assert!(!second.find("end-it").unwrap().option().is_picked());
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let menu = basement_menu();
        let mut store = MemoryProgress::new();
        let (result, _io) = run(&menu, &armed_ctx(), &mut store, &[]);
        assert!(matches!(result, Err(EngineError::InputClosed)));
    }
}
