//! Validated scoring configuration.
//!
//! A [`SimilarityConfig`] is built once per comparison run and passed to every
//! scoring call. [`ConfigHandle`] lets a long-lived process swap in new
//! settings atomically while in-flight runs keep the snapshot they started with.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ConfigError;

/// Tolerance when checking that the two weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights and thresholds for geometry/text element scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityConfig {
    layout_weight: f64,
    text_weight: f64,
    slide_threshold: f64,
    element_threshold: f64,
    text_strict: bool,
}

impl SimilarityConfig {
    /// Validate and build a configuration.
    ///
    /// Fails when either weight leaves `[0, 1]`, the weights do not sum to
    /// 1.0, or a threshold leaves `[0, 1]`.
    pub fn new(
        layout_weight: f64,
        text_weight: f64,
        slide_threshold: f64,
        element_threshold: f64,
        text_strict: bool,
    ) -> Result<Self, ConfigError> {
        ConfigError::check_unit("layout_weight", layout_weight)?;
        ConfigError::check_unit("text_weight", text_weight)?;

        let sum = layout_weight + text_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum {
                layout: layout_weight,
                text: text_weight,
                sum,
            });
        }

        ConfigError::check_unit("slide_threshold", slide_threshold)?;
        ConfigError::check_unit("element_threshold", element_threshold)?;

        Ok(Self {
            layout_weight,
            text_weight,
            slide_threshold,
            element_threshold,
            text_strict,
        })
    }

    pub fn layout_weight(&self) -> f64 {
        self.layout_weight
    }

    pub fn text_weight(&self) -> f64 {
        self.text_weight
    }

    pub fn slide_threshold(&self) -> f64 {
        self.slide_threshold
    }

    pub fn element_threshold(&self) -> f64 {
        self.element_threshold
    }

    pub fn text_strict(&self) -> bool {
        self.text_strict
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            layout_weight: 0.2,
            text_weight: 0.8,
            slide_threshold: 0.8,
            element_threshold: 0.75,
            text_strict: false,
        }
    }
}

/// Shared, atomically replaceable [`SimilarityConfig`].
#[derive(Debug, Default)]
pub struct ConfigHandle {
    current: RwLock<Arc<SimilarityConfig>>,
}

impl ConfigHandle {
    pub fn new(config: SimilarityConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The configuration in effect right now.
    ///
    /// Hold on to the returned snapshot for the whole run; later updates do
    /// not affect it.
    pub fn snapshot(&self) -> Arc<SimilarityConfig> {
        self.current.read().clone()
    }

    /// Replace all five settings at once.
    ///
    /// Validation happens before the swap, so on error the previous
    /// configuration stays in effect and no reader sees a partial update.
    pub fn set_similarity_settings(
        &self,
        layout_weight: f64,
        text_weight: f64,
        slide_threshold: f64,
        element_threshold: f64,
        text_strict: bool,
    ) -> Result<(), ConfigError> {
        let next = SimilarityConfig::new(
            layout_weight,
            text_weight,
            slide_threshold,
            element_threshold,
            text_strict,
        )?;
        *self.current.write() = Arc::new(next);
        tracing::debug!(
            target: "matcher",
            "similarity settings updated: layout={layout_weight} text={text_weight} slide={slide_threshold} element={element_threshold} strict={text_strict}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let d = SimilarityConfig::default();
        let rebuilt = SimilarityConfig::new(
            d.layout_weight(),
            d.text_weight(),
            d.slide_threshold(),
            d.element_threshold(),
            d.text_strict(),
        )
        .unwrap();
        assert_eq!(d, rebuilt);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let err = SimilarityConfig::new(0.5, 0.6, 0.8, 0.75, false).unwrap_err();
        assert!(matches!(err, ConfigError::WeightSum { .. }));

        // Floating point noise is tolerated
        assert!(SimilarityConfig::new(0.7, 0.3, 0.8, 0.75, false).is_ok());
        assert!(SimilarityConfig::new(0.1 + 0.2, 0.7, 0.8, 0.75, false).is_ok());
    }

    #[test]
    fn test_negative_weight_rejected_even_if_sum_is_one() {
        let err = SimilarityConfig::new(1.5, -0.5, 0.8, 0.75, false).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                name: "layout_weight",
                ..
            }
        ));
    }

    #[test]
    fn test_thresholds_must_be_unit_interval() {
        let err = SimilarityConfig::new(0.5, 0.5, 1.2, 0.75, false).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                name: "slide_threshold",
                ..
            }
        ));

        let err = SimilarityConfig::new(0.5, 0.5, 0.8, -0.01, false).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                name: "element_threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_handle_swaps_atomically() {
        let handle = ConfigHandle::new(SimilarityConfig::default());
        let before = handle.snapshot();

        handle
            .set_similarity_settings(0.5, 0.5, 0.7, 0.8, true)
            .unwrap();
        let after = handle.snapshot();

        // The old snapshot is untouched
        assert_eq!(*before, SimilarityConfig::default());
        assert_eq!(after.layout_weight(), 0.5);
        assert_eq!(after.slide_threshold(), 0.7);
        assert_eq!(after.element_threshold(), 0.8);
        assert!(after.text_strict());
    }

    #[test]
    fn test_handle_keeps_previous_on_error() {
        let handle = ConfigHandle::new(SimilarityConfig::default());
        assert!(
            handle
                .set_similarity_settings(0.9, 0.9, 0.7, 0.8, true)
                .is_err()
        );
        assert_eq!(*handle.snapshot(), SimilarityConfig::default());
    }
}
