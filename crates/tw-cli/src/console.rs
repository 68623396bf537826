//! The terminal frontend.
//!
//! Owns all prose: section ids coming out of the story map onto short
//! built-in narration lines here. The engine and story crates never see a
//! sentence of it.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tw_engine::{EngineError, EngineResult, Frontend};

/// Frontend that prints to stdout and reads from stdin.
#[derive(Debug, Default)]
pub struct ConsoleFrontend;

impl ConsoleFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for ConsoleFrontend {
    fn run_section(&mut self, section: Option<&str>) {
        let text = section.map_or("...", narration);
        println!("{}", text.italic().dimmed());
    }

    fn print_line(&mut self, text: &str) {
        if text.starts_with("~ ") {
            println!();
            println!("{}", text.bold());
        } else {
            println!("{text}");
        }
    }

    fn read_input(&mut self) -> EngineResult<String> {
        print!("{} ", ">".cyan());
        io::stdout().flush().map_err(|_| EngineError::InputClosed)?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Err(EngineError::InputClosed),
            Ok(_) => Ok(line.trim_end().to_string()),
        }
    }
}

/// Placeholder narration, one beat per section id.
fn narration(section: &str) -> &'static str {
    match section {
        "the-road/intro" => "A path through the woods, and a voice beside you.",
        "the-road/path" => "The trees thin ahead. Somewhere past them waits a cabin.",
        "the-road/hero-warning" => "\"She is down there. You know what you have to do.\"",
        "the-road/what-waits" => "\"Not a girl. Not really. Something wearing the shape of one.\"",
        "the-road/stray" => "You step off the path, and the woods close politely behind you.",
        "the-road/cabin-door" => "The cabin leans into the hillside, door ajar.",
        "the-road/cabin" => "One room, one table, one stairway down.",
        "the-road/blade" => "The blade is lighter than it looks. It wants to be held.",
        "the-road/basement" => "She looks up from the chains. \"Oh. A visitor.\"",
        "the-road/slain" => "It is over very quickly, and then it is not over at all.",
        "the-road/her-voice" => "She talks the way water runs downhill.",
        "the-road/her-blade" => "Her hands are free before you finish the knot.",
        "the-road/freed" => "The chains ring on the stone floor.",
        "the-road/severed" => "The voice screams. The woods do not.",
        "the-road/refused" => "You climb, and the stairs climb with you.",
        "the-razor/intro" => "The basement again. She holds the blade this time, most of it.",
        "the-razor/shard" => "The edge parts your palm and comes away with you anyway.",
        "the-razor/defeated" => "She laughs while she comes apart.",
        "the-razor/torn" => "She is very thorough.",
        "the-damsel/intro" => "Sunlight in the cabin. She will not stop smiling.",
        "the-damsel/vow" => "You say the words. The cabin keeps them.",
        "the-damsel/parting" => "She takes it better than you do.",
        "the-specter/intro" => "The body is where you left it. She is standing beside it.",
        "the-specter/rest" => "She thins like morning fog, and thanks you on the way out.",
        "the-specter/haunted" => "The cold settles in to stay.",
        "the-nightmare/intro" => "The stairwell has no bottom tonight. Something breathes below.",
        "the-nightmare/faced" => "You look. It looks back. One of you blinks.",
        "the-nightmare/still" => "Stillness is also a choice. It is the last one you make.",
        "the-vault/intro" => "Shelves to the dark ceiling, and a jar with your name on it.",
        "the-vault/claimed" => "The vessel is warm. It remembers being you.",
        "the-vault/commune" => "The claimed vessels murmur about cycles you half recall.",
        "the-vault/sealed" => "You leave the shelves their silence.",
        "demo/curtain" => "The curtain falls here, softly. The rest of the woods is waiting.",
        _ => "...",
    }
}
