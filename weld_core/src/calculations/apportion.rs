//! # Layer Volume Apportionment
//!
//! Splits one zone's volume across the processes assigned to it.
//!
//! ## Width-Threshold Mode
//!
//! Each [`ProcessLayer`] takes over once the groove is at least
//! `min_width_mm` wide. Layer `i` owns the band of groove widths
//! `[max(minᵢ, gap), min(minᵢ₊₁, top)]`, and its share of the area is
//!
//! ```text
//! depth_fraction = (end − start) / (top − gap)
//! layer_area     = (start + end)/2 × depth_fraction
//! reference_area = (gap + top)/2
//! percentage     = layer_area / reference_area × 100
//! ```
//!
//! Groove width grows linearly with depth for a straight-sided bevel, so a
//! band of widths maps to a band of depths of proportional height and the
//! formula above is the exact trapezoid area of that band, not an estimate.
//! Curved or multi-angle bevels would break this.
//!
//! ## Percent Mode (legacy)
//!
//! Fixed percentages per process that must sum to 100 ± 0.1.
//!
//! ## Example
//!
//! ```rust
//! use weld_core::calculations::apportion::apportion_by_width;
//! use weld_core::processes::{ProcessLayer, WeldProcess};
//!
//! let layers = [
//!     ProcessLayer::new(WeldProcess::Gtaw, 0.0),
//!     ProcessLayer::new(WeldProcess::Saw, 10.0),
//! ];
//! let shares = apportion_by_width(1000.0, &layers, 4.0, 24.0, WeldProcess::Smaw);
//! let total: f64 = shares.iter().map(|s| s.volume_mm3).sum();
//! assert!((total - 1000.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::processes::{ProcessLayer, WeldProcess};

/// Allowed deviation of a percent-mode distribution from 100
pub const DISTRIBUTION_TOLERANCE_PCT: f64 = 0.1;

/// Deviation from 100% above which width-mode shares are rescaled
const NORMALIZE_TOLERANCE_PCT: f64 = 0.01;

/// Band of groove widths owned by a layer (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthBand {
    pub start_mm: f64,
    pub end_mm: f64,
}

/// One process's portion of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerShare {
    pub process: WeldProcess,
    /// Index of the layer or percent share this came from; `None` when the
    /// default process took the whole zone
    pub source: Option<usize>,
    /// Width band for width-threshold shares; `None` in percent mode or when
    /// the share was assigned wholesale
    pub band: Option<WidthBand>,
    /// Percent of the zone volume
    pub percentage: f64,
    pub volume_mm3: f64,
}

impl LayerShare {
    fn whole(process: WeldProcess, source: Option<usize>, volume_mm3: f64) -> Self {
        LayerShare {
            process,
            source,
            band: None,
            percentage: 100.0,
            volume_mm3,
        }
    }
}

/// Fixed percentage of a zone assigned to a process (legacy mode).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentShare {
    pub process: WeldProcess,
    pub percent: f64,
}

impl PercentShare {
    pub fn new(process: WeldProcess, percent: f64) -> Self {
        PercentShare { process, percent }
    }
}

/// True when percentages sum to 100 within ±0.1.
///
/// # Example
/// ```rust
/// use weld_core::calculations::apportion::validate_distribution;
///
/// assert!(validate_distribution(&[20.0, 50.0, 30.05]));
/// assert!(!validate_distribution(&[20.0, 50.0, 29.0]));
/// ```
pub fn validate_distribution(percentages: &[f64]) -> bool {
    let sum: f64 = percentages.iter().sum();
    (sum - 100.0).abs() <= DISTRIBUTION_TOLERANCE_PCT
}

/// Split a zone's volume across width-threshold layers.
///
/// `layers` must be sorted ascending by `min_width_mm`. An empty list puts the
/// whole volume on `default_process`; a groove that never widens beyond its
/// gap, or one where no layer owns any width band, puts it on the first layer.
pub fn apportion_by_width(
    volume_mm3: f64,
    layers: &[ProcessLayer],
    bottom_width_mm: f64,
    top_width_mm: f64,
    default_process: WeldProcess,
) -> Vec<LayerShare> {
    let volume_mm3 = volume_mm3.max(0.0);
    let first = match layers.first() {
        Some(layer) => layer,
        None => return vec![LayerShare::whole(default_process, None, volume_mm3)],
    };
    if top_width_mm <= bottom_width_mm {
        return vec![LayerShare::whole(first.process, Some(0), volume_mm3)];
    }

    let width_span = top_width_mm - bottom_width_mm;
    let reference_area = (bottom_width_mm + top_width_mm) / 2.0;

    let mut shares: Vec<LayerShare> = layers
        .iter()
        .enumerate()
        .filter_map(|(i, layer)| {
            let start = layer.min_width_mm.max(bottom_width_mm);
            let end = layers
                .get(i + 1)
                .map(|next| next.min_width_mm.min(top_width_mm))
                .unwrap_or(top_width_mm);
            if end <= start {
                return None;
            }
            let depth_fraction = (end - start) / width_span;
            let layer_area = (start + end) / 2.0 * depth_fraction;
            Some(LayerShare {
                process: layer.process,
                source: Some(i),
                band: Some(WidthBand { start_mm: start, end_mm: end }),
                percentage: layer_area / reference_area * 100.0,
                volume_mm3: 0.0,
            })
        })
        .collect();

    let sum: f64 = shares.iter().map(|s| s.percentage).sum();
    if shares.is_empty() || sum <= 0.0 {
        return vec![LayerShare::whole(first.process, Some(0), volume_mm3)];
    }
    // Volumes always use the rescaled fraction so the zone total is conserved;
    // the reported percentage is only rescaled past the tolerance.
    let rescale = (sum - 100.0).abs() > NORMALIZE_TOLERANCE_PCT;
    for share in &mut shares {
        let fraction = share.percentage / sum;
        share.volume_mm3 = volume_mm3 * fraction;
        if rescale {
            share.percentage = fraction * 100.0;
        }
    }
    shares
}

/// Split a zone's volume by fixed percentages.
///
/// Shares are scaled by their own sum, so a distribution that passed
/// [`validate_distribution`] with a small deviation still conserves volume.
pub fn apportion_by_percent(volume_mm3: f64, shares: &[PercentShare]) -> Vec<LayerShare> {
    let volume_mm3 = volume_mm3.max(0.0);
    let sum: f64 = shares.iter().map(|s| s.percent.max(0.0)).sum();
    if sum <= 0.0 {
        return Vec::new();
    }
    shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            let fraction = share.percent.max(0.0) / sum;
            LayerShare {
                process: share.process,
                source: Some(i),
                band: None,
                percentage: fraction * 100.0,
                volume_mm3: volume_mm3 * fraction,
            }
        })
        .collect()
}
