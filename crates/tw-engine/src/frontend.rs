//! The I/O collaborator boundary.
//!
//! The engine blocks on [`Frontend::read_input`] at every prompt; nothing
//! executes concurrently with player decision time. Narrative text lives
//! behind section ids owned by the frontend — the engine never carries
//! prose.

use std::collections::VecDeque;

use crate::error::{EngineError, EngineResult};

/// Presentation-layer collaborator consumed by the engine.
pub trait Frontend {
    /// Print whatever narrative text the story associates with a section
    /// id. `None` prints the scene's default beat. No effect on engine
    /// state.
    fn run_section(&mut self, section: Option<&str>);

    /// Print one line of engine output (menu lines, refusals).
    fn print_line(&mut self, text: &str);

    /// Block until the player enters a line.
    fn read_input(&mut self) -> EngineResult<String>;
}

/// A frontend driven by a queue of prepared inputs, recording everything
/// printed. Used by tests and scripted demos.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    inputs: VecDeque<String>,
    printed: Vec<String>,
    sections: Vec<String>,
}

impl ScriptedFrontend {
    /// Create a frontend that will feed the given inputs in order.
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            printed: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Queue another input line.
    pub fn push_input(&mut self, input: impl Into<String>) {
        self.inputs.push_back(input.into());
    }

    /// Every line printed so far.
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    /// Every section id run so far (`-` marks the default beat).
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Whether any printed line contains the needle.
    pub fn saw(&self, needle: &str) -> bool {
        self.printed.iter().any(|line| line.contains(needle))
    }
}

impl Frontend for ScriptedFrontend {
    fn run_section(&mut self, section: Option<&str>) {
        self.sections.push(section.unwrap_or("-").to_string());
    }

    fn print_line(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }

    fn read_input(&mut self) -> EngineResult<String> {
        self.inputs.pop_front().ok_or(EngineError::InputClosed)
    }
}
