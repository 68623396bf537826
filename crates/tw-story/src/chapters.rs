//! The chapter scripts.
//!
//! One function per chapter, dispatched exhaustively: a chapter cannot
//! finish without an ending, because the signature forbids it. Scripts
//! build menus fresh per decision point and mutate availability through
//! shared flags; the engine does the rest.

use tw_engine::{ChoiceOption, Condition, Flag, Intent, OptionsMenu};

use crate::chapter::{ChapterEnding, ChapterId};
use crate::error::{StoryError, StoryResult};
use crate::script::SceneContext;
use crate::state::Location;

/// Run one chapter to its ending.
pub fn run_chapter(id: ChapterId, cx: &mut SceneContext<'_>) -> StoryResult<ChapterEnding> {
    match id {
        ChapterId::TheRoad => the_road(cx),
        ChapterId::TheRazor => the_razor(cx),
        ChapterId::TheDamsel => the_damsel(cx),
        ChapterId::TheSpecter => the_specter(cx),
        ChapterId::TheNightmare => the_nightmare(cx),
        ChapterId::TheVault => the_vault(cx),
    }
}

fn unexpected(id: String) -> StoryError {
    StoryError::UnexpectedOutcome(id)
}

/// Chapter 1. The woods, the cabin, the blade, her.
fn the_road(cx: &mut SceneContext<'_>) -> StoryResult<ChapterEnding> {
    cx.section("the-road/path");

    // On replays the woods close in: straying is foreclosed for good.
    let first_cycle = Flag::new(!cx.snapshot.has_visited(ChapterId::TheRoad.key()));

    let mut menu = OptionsMenu::new();
    let listen = menu.add(
        "listen",
        "Listen to the voice of the Hero.",
        ChoiceOption::new("listen"),
    )?;
    menu.add(
        "ask",
        "Ask what waits below.",
        ChoiceOption::new("ask").with_prerequisite(&listen),
    )?;
    menu.add(
        "approach",
        "Approach the cabin.",
        ChoiceOption::new("approach").with_intent(Intent::Approach),
    )?;
    menu.add(
        "stray",
        "Stray from the path.",
        ChoiceOption::new("stray").with_condition(first_cycle),
    )?;

    loop {
        match cx.prompt(&menu, None)?.as_str() {
            "listen" => {
                cx.section("the-road/hero-warning");
                menu.set_enabled("listen", false)?;
            }
            "ask" => {
                cx.section("the-road/what-waits");
                cx.state.knows_true_nature = true;
                menu.set_enabled("ask", false)?;
            }
            "approach" => break,
            "stray" => {
                cx.section("the-road/stray");
                return Ok(ChapterEnding::StrayedFromPath);
            }
            id => return Err(unexpected(id.to_string())),
        }
    }

    cx.state.location = Location::CabinDoor;
    cx.section("the-road/cabin-door");

    let mut menu = OptionsMenu::new();
    menu.add(
        "enter",
        "Go inside.",
        ChoiceOption::new("enter").with_intent(Intent::Enter),
    )?;
    // The path behind is already gone; the entry stays as a closed door.
    menu.add(
        "back",
        "Turn back toward the woods.",
        ChoiceOption::new("back").with_intent(Intent::Leave).starts_locked(),
    )?;
    match cx.prompt(&menu, Some("The door hangs open."))?.as_str() {
        "enter" => {}
        id => return Err(unexpected(id.to_string())),
    }

    cx.state.location = Location::Cabin;
    cx.state.blade_in_reach = true;
    cx.section("the-road/cabin");

    let blade_on_table = Flag::new(true);
    let mut menu = OptionsMenu::new();
    menu.add(
        "take",
        "Take the blade from the table.",
        ChoiceOption::new("take-blade")
            .with_intent(Intent::Take)
            .with_condition(blade_on_table.clone()),
    )?;
    menu.add(
        "descend",
        "Descend the stairs.",
        ChoiceOption::new("descend").with_intent(Intent::Enter),
    )?;

    loop {
        match cx.prompt(&menu, None)?.as_str() {
            "take-blade" => {
                cx.section("the-road/blade");
                cx.state.has_blade = true;
                cx.state.blade_in_reach = false;
                blade_on_table.set(false);
            }
            "descend" => break,
            id => return Err(unexpected(id.to_string())),
        }
    }

    cx.state.location = Location::Basement;
    cx.state.princess_present = true;
    cx.section("the-road/basement");

    let mut menu = OptionsMenu::new();
    let slay = menu.add(
        "slay",
        "Slay the Princess.",
        ChoiceOption::new("slay-her").with_intent(Intent::Slay),
    )?;
    menu.add_alias("strike", "[Say nothing. Strike.]", &slay)?;
    if !cx.state.has_blade {
        // Empty-handed, the act is on screen but closed.
        menu.set_locked("slay", true)?;
    }
    if cx.snapshot.has_visited(ChapterId::TheRoad.key()) {
        menu.set_text("slay", "Slay the Princess. Again.")?;
    }
    let talk = menu.add("talk", "Speak with her.", ChoiceOption::new("talk"))?;
    menu.add(
        "trust",
        "Step closer and loosen her bindings.",
        ChoiceOption::new("trust").with_prerequisite(&talk),
    )?;
    menu.add("free", "Cut her chains.", ChoiceOption::new("free-her"))?;
    menu.add(
        "sever",
        "[Turn the blade on yourself.]",
        ChoiceOption::new("sever")
            .with_warning_fallback("harm-to-self", "refuse")
            .with_condition(Condition::from(cx.state.has_blade)),
    )?;
    menu.add(
        "refuse",
        "Refuse all of it. Climb back up the stairs.",
        ChoiceOption::new("refuse").with_intent(Intent::Leave),
    )?;

    loop {
        match cx.prompt(&menu, None)?.as_str() {
            "slay-her" => {
                cx.section("the-road/slain");
                return Ok(ChapterEnding::PrincessSlain);
            }
            "talk" => {
                cx.section("the-road/her-voice");
                menu.set_enabled("talk", false)?;
            }
            "trust" => {
                cx.section("the-road/her-blade");
                return Ok(ChapterEnding::SlainByHer);
            }
            "free-her" => {
                cx.section("the-road/freed");
                return Ok(ChapterEnding::PrincessFreed);
            }
            "sever" => {
                cx.section("the-road/severed");
                return Ok(ChapterEnding::SlainByHer);
            }
            "refuse" => {
                cx.section("the-road/refused");
                return Ok(ChapterEnding::Hesitated);
            }
            id => return Err(unexpected(id.to_string())),
        }
    }
}

/// Chapter 2, after dying on her blade. She holds the shard now.
fn the_razor(cx: &mut SceneContext<'_>) -> StoryResult<ChapterEnding> {
    cx.section("the-razor/intro");
    cx.state.blade_in_reach = true;

    let mut menu = OptionsMenu::new();
    let seize = menu.add(
        "seize",
        "Wrench the shard from her hand.",
        ChoiceOption::new("seize").with_intent(Intent::Take),
    )?;
    menu.add(
        "fight",
        "Fight her for the rest of it.",
        ChoiceOption::new("fight")
            .with_intent(Intent::Slay)
            .with_prerequisite(&seize),
    )?;
    menu.add("yield", "Let her finish it.", ChoiceOption::new("yield"))?;

    loop {
        match cx.prompt(&menu, None)?.as_str() {
            "seize" => {
                cx.section("the-razor/shard");
                cx.state.has_blade = true;
                cx.state.blade_in_reach = false;
            }
            "fight" => {
                cx.section("the-razor/defeated");
                return Ok(ChapterEnding::RazorDefeated);
            }
            "yield" => {
                cx.section("the-razor/torn");
                return Ok(ChapterEnding::TornApart);
            }
            id => return Err(unexpected(id.to_string())),
        }
    }
}

/// Chapter 2, after freeing her. A quiet scene: choice-only, no commands.
fn the_damsel(cx: &mut SceneContext<'_>) -> StoryResult<ChapterEnding> {
    cx.section("the-damsel/intro");

    let mut menu = OptionsMenu::choice_only();
    menu.add("vow", "Make the vow.", ChoiceOption::new("vow"))?;
    menu.add(
        "part",
        "Tell her the truth and part ways.",
        ChoiceOption::new("part"),
    )?;

    match cx.prompt(&menu, None)?.as_str() {
        "vow" => {
            cx.section("the-damsel/vow");
            Ok(ChapterEnding::VowExchanged)
        }
        "part" => {
            cx.section("the-damsel/parting");
            Ok(ChapterEnding::HeartsSevered)
        }
        id => Err(unexpected(id.to_string())),
    }
}

/// Chapter 2, after slaying her. The basement remembers.
fn the_specter(cx: &mut SceneContext<'_>) -> StoryResult<ChapterEnding> {
    cx.section("the-specter/intro");

    // Laying her to rest takes understanding, earned in this cycle or
    // bought with a vessel from an earlier one.
    let understands = Condition::from(Flag::new(cx.state.knows_true_nature))
        .or(Flag::new(cx.snapshot.vessel_count() > 0));

    let mut menu = OptionsMenu::new();
    menu.add(
        "rest",
        "Speak the words that let her rest.",
        ChoiceOption::new("rest").with_condition(understands),
    )?;
    menu.add(
        "hold",
        "Hold on to the haunting.",
        ChoiceOption::new("hold"),
    )?;

    match cx.prompt(&menu, None)?.as_str() {
        "rest" => {
            cx.section("the-specter/rest");
            Ok(ChapterEnding::EchoLaidToRest)
        }
        "hold" => {
            cx.section("the-specter/haunted");
            Ok(ChapterEnding::HauntedForever)
        }
        id => Err(unexpected(id.to_string())),
    }
}

/// Chapter 2, after refusing to decide.
fn the_nightmare(cx: &mut SceneContext<'_>) -> StoryResult<ChapterEnding> {
    cx.section("the-nightmare/intro");

    let mut menu = OptionsMenu::new();
    menu.add(
        "face",
        "Open your eyes inside the fear.",
        ChoiceOption::new("face"),
    )?;
    menu.add("freeze", "Stay perfectly still.", ChoiceOption::new("freeze"))?;
    if cx.snapshot.has_visited(ChapterId::TheNightmare.key()) {
        menu.set_text("face", "Open your eyes. It remembers you.")?;
    }

    match cx.prompt(&menu, None)?.as_str() {
        "face" => {
            cx.section("the-nightmare/faced");
            Ok(ChapterEnding::FearFaced)
        }
        "freeze" => {
            cx.section("the-nightmare/still");
            Ok(ChapterEnding::Paralyzed)
        }
        id => Err(unexpected(id.to_string())),
    }
}

/// Chapter 3. The shelves, and what the earlier cycles left on them.
fn the_vault(cx: &mut SceneContext<'_>) -> StoryResult<ChapterEnding> {
    cx.section("the-vault/intro");
    cx.state.blade_in_reach = true;

    let has_claimed_before = Flag::new(cx.snapshot.vessel_count() >= 1);
    let mut menu = OptionsMenu::new();
    menu.add(
        "claim",
        "Take a vessel from the shelf.",
        ChoiceOption::new("claim").with_intent(Intent::Take),
    )?;
    menu.add(
        "commune",
        "Listen to the vessels you have already claimed.",
        ChoiceOption::new("commune").with_condition(has_claimed_before),
    )?;
    menu.add(
        "refuse",
        "Leave the shelves untouched.",
        ChoiceOption::new("refuse-vault").with_intent(Intent::Leave),
    )?;

    loop {
        match cx.prompt(&menu, None)?.as_str() {
            "claim" => {
                cx.section("the-vault/claimed");
                return Ok(ChapterEnding::VesselClaimed);
            }
            "commune" => {
                cx.section("the-vault/commune");
                menu.set_enabled("commune", false)?;
            }
            "refuse-vault" => {
                cx.section("the-vault/sealed");
                return Ok(ChapterEnding::VaultRefused);
            }
            id => return Err(unexpected(id.to_string())),
        }
    }
}
