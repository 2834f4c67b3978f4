//! Last-result memoization for interactive callers
//!
//! Form-driven front ends re-run the same estimate on every keystroke. The
//! engine itself keeps no state; this decorator remembers the most recent
//! `(fingerprint, result)` pair and returns a clone when the fingerprint of
//! the next request matches.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::calculations::{WeldItem, WeldResult};
use crate::errors::{CalcError, CalcResult};
use crate::settings::EstimatorSettings;

/// SHA-256 of the JSON-serialized item and settings, as lowercase hex.
///
/// JSON floats round-trip exactly, so two requests share a fingerprint only
/// when every input value is identical.
pub fn fingerprint(item: &WeldItem, settings: &EstimatorSettings) -> CalcResult<String> {
    let mut hasher = Sha256::new();
    let item_json = serde_json::to_vec(item).map_err(|e| CalcError::serialization(e.to_string()))?;
    let settings_json = serde_json::to_vec(settings).map_err(|e| CalcError::serialization(e.to_string()))?;
    hasher.update(&item_json);
    // Separator so (item, settings) boundaries cannot shift
    hasher.update([0u8]);
    hasher.update(&settings_json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Estimator that skips recomputation when the inputs have not changed.
///
/// # Example
///
/// ```rust
/// use weld_core::calculations::{NozzleInput, WeldItem};
/// use weld_core::memo::MemoizedEstimator;
/// use weld_core::settings::EstimatorSettings;
///
/// let mut estimator = MemoizedEstimator::new();
/// let item = WeldItem::Nozzle(NozzleInput::example());
/// let settings = EstimatorSettings::default();
///
/// let first = estimator.estimate(&item, &settings).unwrap();
/// let second = estimator.estimate(&item, &settings).unwrap();
/// assert_eq!(first, second);
/// assert_eq!(estimator.stats().hits, 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoizedEstimator {
    last: Option<(String, WeldResult)>,
    stats: MemoStats,
}

impl MemoizedEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate(&mut self, item: &WeldItem, settings: &EstimatorSettings) -> CalcResult<WeldResult> {
        let key = fingerprint(item, settings)?;
        if let Some((last_key, result)) = &self.last {
            if *last_key == key {
                self.stats.hits += 1;
                debug!(label = %item.label(), "memoized estimate reused");
                return Ok(result.clone());
            }
        }

        self.stats.misses += 1;
        let result = item.calculate(settings)?;
        self.last = Some((key, result.clone()));
        Ok(result)
    }

    /// Forget the remembered result
    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{NozzleInput, PipeButtInput};

    #[test]
    fn test_fingerprint_is_stable() {
        let item = WeldItem::Nozzle(NozzleInput::example());
        let settings = EstimatorSettings::default();
        let a = fingerprint(&item, &settings).unwrap();
        let b = fingerprint(&item, &settings).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_inputs() {
        let settings = EstimatorSettings::default();
        let mut input = NozzleInput::example();
        let before = fingerprint(&WeldItem::Nozzle(input.clone()), &settings).unwrap();
        input.root_gap_mm += 1e-9;
        let after = fingerprint(&WeldItem::Nozzle(input.clone()), &settings).unwrap();
        assert_ne!(before, after);

        let mut other = settings.clone();
        other.fallback_speed_mm_min = 151.0;
        assert_ne!(after, fingerprint(&WeldItem::Nozzle(input), &other).unwrap());
    }

    #[test]
    fn test_hits_and_misses() {
        let settings = EstimatorSettings::default();
        let nozzle = WeldItem::Nozzle(NozzleInput::example());
        let pipe = WeldItem::PipeButt(PipeButtInput::example());
        let mut estimator = MemoizedEstimator::new();

        estimator.estimate(&nozzle, &settings).unwrap();
        estimator.estimate(&nozzle, &settings).unwrap();
        estimator.estimate(&pipe, &settings).unwrap();
        estimator.estimate(&nozzle, &settings).unwrap();
        assert_eq!(estimator.stats(), MemoStats { hits: 1, misses: 3 });

        estimator.clear();
        estimator.estimate(&nozzle, &settings).unwrap();
        assert_eq!(estimator.stats().misses, 4);
    }

    #[test]
    fn test_cached_result_matches_fresh() {
        let settings = EstimatorSettings::default();
        let item = WeldItem::PipeButt(PipeButtInput::example());
        let mut estimator = MemoizedEstimator::new();
        estimator.estimate(&item, &settings).unwrap();
        let cached = estimator.estimate(&item, &settings).unwrap();
        assert_eq!(cached, item.calculate(&settings).unwrap());
    }

    #[test]
    fn test_errors_are_not_remembered() {
        let settings = EstimatorSettings::default();
        let mut input = NozzleInput::example();
        input.shell_thickness_mm = -1.0;
        let item = WeldItem::Nozzle(input);
        let mut estimator = MemoizedEstimator::new();
        assert!(estimator.estimate(&item, &settings).is_err());
        assert!(estimator.estimate(&item, &settings).is_err());
        assert_eq!(estimator.stats().hits, 0);
    }
}
