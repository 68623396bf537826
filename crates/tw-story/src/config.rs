//! Configuration for a cycle run.

use tw_engine::ProgressStore;

/// Configuration for the cycle driver.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    /// Truncate the cycle once the route reaches the demo depth.
    pub demo: bool,
    /// The stricter demo policy: one chapter, then the curtain.
    pub true_demo: bool,
    /// Chapter depth at which demo truncation triggers.
    pub demo_depth: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            demo: false,
            true_demo: false,
            demo_depth: 2,
        }
    }
}

impl CycleConfig {
    /// Enable demo truncation.
    #[must_use]
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    /// Enable true-demo truncation (implies demo).
    #[must_use]
    pub fn with_true_demo(mut self, true_demo: bool) -> Self {
        self.true_demo = true_demo;
        self.demo = self.demo || true_demo;
        self
    }

    /// Set the demo chapter depth (clamped to at least 1).
    #[must_use]
    pub fn with_demo_depth(mut self, depth: u32) -> Self {
        self.demo_depth = depth.max(1);
        self
    }

    /// Read the demo flags off the progress collaborator.
    pub fn from_store(store: &dyn ProgressStore) -> Self {
        Self::default()
            .with_demo(store.is_demo())
            .with_true_demo(store.is_true_demo())
    }

    /// The depth at which truncation applies, accounting for true demo.
    pub fn effective_depth(&self) -> u32 {
        if self.true_demo { 1 } else { self.demo_depth }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_engine::MemoryProgress;

    #[test]
    fn default_config() {
        let cfg = CycleConfig::default();
        assert!(!cfg.demo);
        assert!(!cfg.true_demo);
        assert_eq!(cfg.demo_depth, 2);
    }

    #[test]
    fn true_demo_implies_demo() {
        let cfg = CycleConfig::default().with_true_demo(true);
        assert!(cfg.demo);
        assert_eq!(cfg.effective_depth(), 1);
    }

    #[test]
    fn depth_clamped() {
        let cfg = CycleConfig::default().with_demo_depth(0);
        assert_eq!(cfg.demo_depth, 1);
    }

    #[test]
    fn from_store_reads_flags() {
        let store = MemoryProgress::new().with_demo(true);
        let cfg = CycleConfig::from_store(&store);
        assert!(cfg.demo);
        assert!(!cfg.true_demo);
    }
}
