//! The persistent progress collaborator.
//!
//! Progress across cycles is consumed, not owned: the engine reads it to
//! gate conditions and writes it only at cycle boundaries. Mid-chapter
//! reads go through a [`ProgressSnapshot`] taken at chapter entry, so a
//! chapter never observes its own writes.

use std::collections::{BTreeSet, HashSet};

/// Across-cycle play history, as seen and updated by the engine.
pub trait ProgressStore {
    /// Whether a chapter has ever been reached, in any cycle.
    fn has_visited(&self, chapter: &str) -> bool;

    /// Whether every listed chapter has been reached.
    fn has_visited_all(&self, chapters: &[&str]) -> bool {
        chapters.iter().all(|chapter| self.has_visited(chapter))
    }

    /// How many vessels (permanent unlocks) have been claimed.
    fn vessel_count(&self) -> u32;

    /// Capture an immutable snapshot for the duration of a chapter.
    fn snapshot(&self) -> ProgressSnapshot;

    /// Record the chapters visited in a completed cycle.
    fn record_visited(&mut self, route: &[String]);

    /// Record the voices encountered in a completed cycle.
    fn record_voices(&mut self, voices: &[String]);

    /// Claim a vessel. Claiming the same vessel twice is a no-op.
    fn claim_vessel(&mut self, vessel: &str);

    /// Record an aborted cycle.
    fn record_abort(&mut self);

    /// Ask the player to confirm a sensitive branch. Returns false on
    /// decline.
    fn confirm_warning(&mut self, topic: &str) -> bool;

    /// Whether the demo truncation policy is active.
    fn is_demo(&self) -> bool {
        false
    }

    /// Whether the stricter true-demo policy is active.
    fn is_true_demo(&self) -> bool {
        false
    }
}

/// An immutable capture of progress, taken at chapter entry.
#[derive(Debug, Clone, Default)]
pub struct ProgressSnapshot {
    visited: HashSet<String>,
    vessels: u32,
}

impl ProgressSnapshot {
    /// Build a snapshot from a visited set and a vessel count.
    pub fn new(visited: HashSet<String>, vessels: u32) -> Self {
        Self { visited, vessels }
    }

    /// Whether a chapter had been reached when the snapshot was taken.
    pub fn has_visited(&self, chapter: &str) -> bool {
        self.visited.contains(chapter)
    }

    /// Whether every listed chapter had been reached.
    pub fn has_visited_all(&self, chapters: &[&str]) -> bool {
        chapters.iter().all(|chapter| self.has_visited(chapter))
    }

    /// The vessel count at snapshot time.
    pub fn vessel_count(&self) -> u32 {
        self.vessels
    }
}

/// In-memory progress store, used by tests and by the CLI for the
/// lifetime of one process. Warning prompts answer "yes" unless the topic
/// has been configured to decline.
#[derive(Debug, Default)]
pub struct MemoryProgress {
    visited: HashSet<String>,
    voices_met: BTreeSet<String>,
    vessels: HashSet<String>,
    aborts: u32,
    demo: bool,
    true_demo: bool,
    declined_topics: HashSet<String>,
}

impl MemoryProgress {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable demo mode.
    #[must_use]
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    /// Enable true-demo mode (implies demo).
    #[must_use]
    pub fn with_true_demo(mut self, true_demo: bool) -> Self {
        self.true_demo = true_demo;
        self.demo = self.demo || true_demo;
        self
    }

    /// Answer "no" whenever the given warning topic is confirmed.
    pub fn decline_topic(&mut self, topic: impl Into<String>) {
        self.declined_topics.insert(topic.into());
    }

    /// How many cycles were aborted.
    pub fn aborts(&self) -> u32 {
        self.aborts
    }

    /// The voices met across all recorded cycles.
    pub fn voices_met(&self) -> &BTreeSet<String> {
        &self.voices_met
    }
}

impl ProgressStore for MemoryProgress {
    fn has_visited(&self, chapter: &str) -> bool {
        self.visited.contains(chapter)
    }

    fn vessel_count(&self) -> u32 {
        u32::try_from(self.vessels.len()).unwrap_or(u32::MAX)
    }

    fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(self.visited.clone(), self.vessel_count())
    }

    fn record_visited(&mut self, route: &[String]) {
        self.visited.extend(route.iter().cloned());
    }

    fn record_voices(&mut self, voices: &[String]) {
        self.voices_met.extend(voices.iter().cloned());
    }

    fn claim_vessel(&mut self, vessel: &str) {
        self.vessels.insert(vessel.to_string());
    }

    fn record_abort(&mut self) {
        self.aborts += 1;
    }

    fn confirm_warning(&mut self, topic: &str) -> bool {
        !self.declined_topics.contains(topic)
    }

    fn is_demo(&self) -> bool {
        self.demo
    }

    fn is_true_demo(&self) -> bool {
        self.true_demo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_accumulates() {
        let mut store = MemoryProgress::new();
        assert!(!store.has_visited("the-road"));

        store.record_visited(&["the-road".to_string(), "the-razor".to_string()]);
        assert!(store.has_visited("the-road"));
        assert!(store.has_visited_all(&["the-road", "the-razor"]));
        assert!(!store.has_visited_all(&["the-road", "the-vault"]));
    }

    #[test]
    fn vessels_deduplicate() {
        let mut store = MemoryProgress::new();
        store.claim_vessel("thorn");
        store.claim_vessel("thorn");
        assert_eq!(store.vessel_count(), 1);
    }

    #[test]
    fn snapshot_is_immutable() {
        let mut store = MemoryProgress::new();
        store.record_visited(&["the-road".to_string()]);
        let snapshot = store.snapshot();

        store.record_visited(&["the-vault".to_string()]);
        store.claim_vessel("thorn");

        assert!(snapshot.has_visited("the-road"));
        assert!(!snapshot.has_visited("the-vault"));
        assert_eq!(snapshot.vessel_count(), 0);
    }

    #[test]
    fn warning_answers() {
        let mut store = MemoryProgress::new();
        assert!(store.confirm_warning("self-harm"));

        store.decline_topic("self-harm");
        assert!(!store.confirm_warning("self-harm"));
    }

    #[test]
    fn demo_flags() {
        let store = MemoryProgress::new().with_true_demo(true);
        assert!(store.is_demo());
        assert!(store.is_true_demo());
    }
}
