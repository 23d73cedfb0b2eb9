//! Configuration types for the diff engine.

/// Execution tuning for a diff run. Does not affect results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Use rayon for candidate scoring and detector execution
    pub parallel: bool,
    /// Minimum number of candidate pairs before scoring goes parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl EngineConfig {
    /// Single-threaded execution, e.g. inside an already parallel caller.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a workload of `candidates` pairs should be scored in parallel.
    #[must_use]
    pub const fn use_parallel(&self, candidates: usize) -> bool {
        self.parallel && candidates >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_threshold() {
        let config = EngineConfig::default();
        assert!(!config.use_parallel(10));
        assert!(config.use_parallel(64));
        assert!(!EngineConfig::sequential().use_parallel(10_000));
        assert!(EngineConfig::default().with_parallel_threshold(0).use_parallel(0));
    }
}
