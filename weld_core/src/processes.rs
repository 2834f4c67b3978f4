//! # Welding Processes
//!
//! Process identifiers, bead cross-sections, and the width-threshold layer
//! assignments that say which process fills which part of a groove.
//!
//! ## Example
//!
//! ```rust
//! use weld_core::processes::{ProcessLayer, WeldProcess};
//!
//! let process = WeldProcess::from_str_flexible("tig").unwrap();
//! assert_eq!(process, WeldProcess::Gtaw);
//!
//! // Root with GTAW, fill with SMAW once the groove is 8 mm wide
//! let layers = vec![
//!     ProcessLayer::new(WeldProcess::Gtaw, 0.0),
//!     ProcessLayer::new(WeldProcess::Smaw, 8.0),
//! ];
//! assert!(weld_core::processes::validate_layers(&layers, "inside_layers").is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Welding process identifier.
///
/// `Skip` is a sentinel meaning "this zone is not welded": it always yields
/// zero passes and zero time regardless of the zone's volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeldProcess {
    /// Gas tungsten arc welding (TIG)
    Gtaw,
    /// Shielded metal arc welding (stick, MMA)
    Smaw,
    /// Gas metal arc welding (MIG/MAG)
    Gmaw,
    /// Flux-cored arc welding
    Fcaw,
    /// Submerged arc welding
    Saw,
    /// Zone is not welded
    Skip,
}

impl WeldProcess {
    /// All real welding processes (excludes `Skip`) for UI selection
    pub const ALL: [WeldProcess; 5] = [
        WeldProcess::Gtaw,
        WeldProcess::Smaw,
        WeldProcess::Gmaw,
        WeldProcess::Fcaw,
        WeldProcess::Saw,
    ];

    /// Whether this is the "not welded" sentinel
    pub fn is_skip(&self) -> bool {
        matches!(self, WeldProcess::Skip)
    }

    /// Short code used in files and reports (e.g., "GTAW")
    pub fn code(&self) -> &'static str {
        match self {
            WeldProcess::Gtaw => "GTAW",
            WeldProcess::Smaw => "SMAW",
            WeldProcess::Gmaw => "GMAW",
            WeldProcess::Fcaw => "FCAW",
            WeldProcess::Saw => "SAW",
            WeldProcess::Skip => "SKIP",
        }
    }

    /// Parse from common string representations and shop-floor aliases
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '_'], "-").as_str() {
            "GTAW" | "TIG" | "141" => Ok(WeldProcess::Gtaw),
            "SMAW" | "MMA" | "STICK" | "111" => Ok(WeldProcess::Smaw),
            "GMAW" | "MIG" | "MAG" | "135" => Ok(WeldProcess::Gmaw),
            "FCAW" | "FLUX-CORED" | "136" => Ok(WeldProcess::Fcaw),
            "SAW" | "SUB-ARC" | "SUBARC" | "121" => Ok(WeldProcess::Saw),
            "SKIP" | "NONE" | "-" | "" => Ok(WeldProcess::Skip),
            _ => Err(CalcError::unknown_process(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WeldProcess::Gtaw => "GTAW (TIG)",
            WeldProcess::Smaw => "SMAW (Stick)",
            WeldProcess::Gmaw => "GMAW (MIG/MAG)",
            WeldProcess::Fcaw => "FCAW (Flux-Cored)",
            WeldProcess::Saw => "SAW (Submerged Arc)",
            WeldProcess::Skip => "Not welded",
        }
    }
}

impl fmt::Display for WeldProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for WeldProcess {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeldProcess::from_str_flexible(s)
    }
}

/// Cross-section deposited by one pass, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeadSize {
    /// Bead height (mm)
    pub height_mm: f64,
    /// Bead width (mm)
    pub width_mm: f64,
}

impl BeadSize {
    pub fn new(height_mm: f64, width_mm: f64) -> Self {
        BeadSize { height_mm, width_mm }
    }

    /// Deposited cross-section per pass (mm²)
    pub fn area_mm2(&self) -> f64 {
        self.height_mm * self.width_mm
    }

    /// Validate that both dimensions are positive and finite
    pub fn validate(&self, field: &str) -> CalcResult<()> {
        if !(self.height_mm.is_finite() && self.height_mm > 0.0) {
            return Err(CalcError::invalid_input(
                format!("{}.height_mm", field),
                self.height_mm.to_string(),
                "Bead height must be positive",
            ));
        }
        if !(self.width_mm.is_finite() && self.width_mm > 0.0) {
            return Err(CalcError::invalid_input(
                format!("{}.width_mm", field),
                self.width_mm.to_string(),
                "Bead width must be positive",
            ));
        }
        Ok(())
    }
}

/// A process that takes over once the groove reaches a given width.
///
/// Read as "weld with `process` once the groove is at least `min_width_mm`
/// wide". A zone's layer list is sorted ascending by `min_width_mm`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessLayer {
    pub process: WeldProcess,
    /// Groove width at which this process becomes active (mm)
    pub min_width_mm: f64,
}

impl ProcessLayer {
    pub fn new(process: WeldProcess, min_width_mm: f64) -> Self {
        ProcessLayer { process, min_width_mm }
    }
}

/// Sort layers ascending by activation width.
pub fn sort_layers(layers: &mut [ProcessLayer]) {
    layers.sort_by(|a, b| a.min_width_mm.total_cmp(&b.min_width_mm));
}

/// Check that layer widths are finite, non-negative, and strictly increasing.
pub fn validate_layers(layers: &[ProcessLayer], field: &str) -> CalcResult<()> {
    for (i, layer) in layers.iter().enumerate() {
        if !layer.min_width_mm.is_finite() || layer.min_width_mm < 0.0 {
            return Err(CalcError::invalid_input(
                format!("{}[{}].min_width_mm", field, i),
                layer.min_width_mm.to_string(),
                "Layer width must be a non-negative number",
            ));
        }
    }
    for (i, pair) in layers.windows(2).enumerate() {
        if pair[1].min_width_mm <= pair[0].min_width_mm {
            return Err(CalcError::invalid_input(
                format!("{}[{}].min_width_mm", field, i + 1),
                pair[1].min_width_mm.to_string(),
                format!(
                    "Layer widths must be strictly increasing (previous layer starts at {})",
                    pair[0].min_width_mm
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(WeldProcess::from_str_flexible("gtaw").unwrap(), WeldProcess::Gtaw);
        assert_eq!(WeldProcess::from_str_flexible("Sub Arc").unwrap(), WeldProcess::Saw);
        assert_eq!(WeldProcess::from_str_flexible("mig").unwrap(), WeldProcess::Gmaw);
        assert_eq!("skip".parse::<WeldProcess>().unwrap(), WeldProcess::Skip);
        assert!(WeldProcess::from_str_flexible("laser").is_err());
    }

    #[test]
    fn test_process_serialization() {
        let json = serde_json::to_string(&WeldProcess::Saw).unwrap();
        assert_eq!(json, "\"SAW\"");
        let roundtrip: WeldProcess = serde_json::from_str("\"SKIP\"").unwrap();
        assert!(roundtrip.is_skip());
    }

    #[test]
    fn test_all_excludes_skip() {
        assert!(WeldProcess::ALL.iter().all(|p| !p.is_skip()));
    }

    #[test]
    fn test_bead_validation() {
        assert!(BeadSize::new(3.0, 10.0).validate("bead").is_ok());
        assert!(BeadSize::new(0.0, 10.0).validate("bead").is_err());
        assert!(BeadSize::new(3.0, f64::NAN).validate("bead").is_err());
        assert_eq!(BeadSize::new(3.0, 10.0).area_mm2(), 30.0);
    }

    #[test]
    fn test_layer_validation() {
        let ok = [
            ProcessLayer::new(WeldProcess::Gtaw, 0.0),
            ProcessLayer::new(WeldProcess::Saw, 12.0),
        ];
        assert!(validate_layers(&ok, "layers").is_ok());

        let duplicate = [
            ProcessLayer::new(WeldProcess::Gtaw, 5.0),
            ProcessLayer::new(WeldProcess::Saw, 5.0),
        ];
        assert!(validate_layers(&duplicate, "layers").is_err());

        let negative = [ProcessLayer::new(WeldProcess::Gtaw, -1.0)];
        assert!(validate_layers(&negative, "layers").is_err());
    }

    #[test]
    fn test_sort_layers() {
        let mut layers = vec![
            ProcessLayer::new(WeldProcess::Saw, 20.0),
            ProcessLayer::new(WeldProcess::Gtaw, 0.0),
            ProcessLayer::new(WeldProcess::Smaw, 8.0),
        ];
        sort_layers(&mut layers);
        let order: Vec<_> = layers.iter().map(|l| l.process).collect();
        assert_eq!(order, vec![WeldProcess::Gtaw, WeldProcess::Smaw, WeldProcess::Saw]);
        assert!(validate_layers(&layers, "layers").is_ok());
    }
}
