//! # Nozzle Weld
//!
//! Nozzle-to-shell penetration welded around the nozzle outside diameter.
//!
//! ## Assumptions
//!
//! - Bevel cut on the shell side only (width grows from one wall)
//! - Weld length = π × nozzle OD
//! - Set-in nozzles are welded from both sides; set-on nozzles from the
//!   outside only, reported as the inside zone
//! - An optional reinforcing fillet is laid along the same length
//!
//! ```text
//!        nozzle
//!        │   │
//!   ─────┘   └─────   ← outside groove (double-sided only)
//!   ─────┐   ┌─────   ← root face
//!        \   /        ← inside groove
//! ```
//!
//! ## Example
//!
//! ```rust
//! use weld_core::calculations::nozzle::{calculate, NozzleInput};
//! use weld_core::settings::EstimatorSettings;
//!
//! let input = NozzleInput::example();
//! let result = calculate(&input, &EstimatorSettings::default()).unwrap();
//! assert!((result.geometry.weld_length_mm - 1570.8).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use super::geometry::{GeometryInput, JointProfile, WeldLength};
use super::pipeline::{self, Section, WeldPlan, WeldResult, Zone, ZoneAssignment, ZonePlan};
use super::{ProcessSplit, WeldType};
use crate::errors::CalcResult;
use crate::processes::{ProcessLayer, WeldProcess};
use crate::settings::EstimatorSettings;

/// Reinforcing fillet on a nozzle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilletSpec {
    /// Fillet throat (mm)
    pub throat_mm: f64,
    pub process: WeldProcess,
}

/// Input parameters for a nozzle weld.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "N1",
///   "nozzle_od_mm": 500.0,
///   "shell_thickness_mm": 50.0,
///   "root_gap_mm": 5.0,
///   "root_face_mm": 3.0,
///   "inside_angle_deg": 45.0,
///   "outside_angle_deg": 45.0,
///   "split_ratio_pct": 70.0,
///   "double_sided": true,
///   "inside": { "mode": "layers", "processes": [
///     { "process": "GTAW", "min_width_mm": 0.0 },
///     { "process": "SMAW", "min_width_mm": 10.0 },
///     { "process": "SAW", "min_width_mm": 20.0 }
///   ] },
///   "outside": { "mode": "single", "processes": "SAW" },
///   "fillet": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NozzleInput {
    /// User label (e.g., "N1", "Manway")
    pub label: String,
    /// Nozzle outside diameter (mm)
    pub nozzle_od_mm: f64,
    /// Shell thickness at the penetration (mm)
    pub shell_thickness_mm: f64,
    pub root_gap_mm: f64,
    pub root_face_mm: f64,
    pub inside_angle_deg: f64,
    /// Ignored when `double_sided` is false
    pub outside_angle_deg: f64,
    /// Percent of thickness welded from the inside; ignored when single-sided
    pub split_ratio_pct: f64,
    /// Set-in nozzle welded from both sides
    pub double_sided: bool,
    pub inside: ProcessSplit,
    /// Ignored when `double_sided` is false
    #[serde(default)]
    pub outside: ProcessSplit,
    #[serde(default)]
    pub fillet: Option<FilletSpec>,
}

impl NozzleInput {
    /// 500 mm nozzle in a 50 mm shell, double bevel, GTAW/SMAW/SAW inside and
    /// SAW outside.
    pub fn example() -> Self {
        NozzleInput {
            label: "N1".to_string(),
            nozzle_od_mm: 500.0,
            shell_thickness_mm: 50.0,
            root_gap_mm: 5.0,
            root_face_mm: 3.0,
            inside_angle_deg: 45.0,
            outside_angle_deg: 45.0,
            split_ratio_pct: 70.0,
            double_sided: true,
            inside: ProcessSplit::Layers(vec![
                ProcessLayer::new(WeldProcess::Gtaw, 0.0),
                ProcessLayer::new(WeldProcess::Smaw, 10.0),
                ProcessLayer::new(WeldProcess::Saw, 20.0),
            ]),
            outside: ProcessSplit::Single(WeldProcess::Saw),
            fillet: None,
        }
    }

    pub fn geometry(&self) -> GeometryInput {
        GeometryInput {
            thickness_mm: self.shell_thickness_mm,
            root_gap_mm: self.root_gap_mm,
            root_face_mm: self.root_face_mm,
            inside_angle_deg: self.inside_angle_deg,
            outside_angle_deg: self.outside_angle_deg,
            split_ratio_pct: self.split_ratio_pct,
            profile: JointProfile::SingleBevel.with_sides(self.double_sided),
            length: WeldLength::Circumference { diameter_mm: self.nozzle_od_mm },
            fillet_throat_mm: self.fillet.map(|f| f.throat_mm),
        }
    }

    pub fn plan(&self) -> WeldPlan {
        let mut zones = vec![ZonePlan::new(Zone::Inside, Section::InsideGroove, self.inside.to_assignment())];
        if self.double_sided {
            zones.push(ZonePlan::new(Zone::Outside, Section::OutsideGroove, self.outside.to_assignment()));
        }
        if let Some(fillet) = self.fillet {
            zones.push(ZonePlan::new(Zone::Fillet, Section::Fillet, ZoneAssignment::Single(fillet.process)));
        }
        WeldPlan {
            label: self.label.clone(),
            weld_type: WeldType::Nozzle,
            geometry: self.geometry(),
            zones,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.plan().validate()
    }
}

/// Estimate a nozzle weld.
pub fn calculate(input: &NozzleInput, settings: &EstimatorSettings) -> CalcResult<WeldResult> {
    input.validate()?;
    pipeline::run(&input.plan(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::apportion::PercentShare;

    #[test]
    fn test_reference_nozzle() {
        let result = calculate(&NozzleInput::example(), &EstimatorSettings::default()).unwrap();
        assert!((result.geometry.weld_length_mm - 1570.8).abs() < 0.01);
        assert!(result.total_passes() >= 10 && result.total_passes() <= 200);
        assert!(result.total_hours() >= 1.0 && result.total_hours() <= 100.0);
        assert_eq!(result.geometry.profile, JointProfile::DoubleBevel);
        assert!(result.zone(Zone::Outside).is_some());
        assert!(result.zone(Zone::Fillet).is_none());
    }

    #[test]
    fn test_single_sided_has_no_outside_zone() {
        let mut input = NozzleInput::example();
        input.double_sided = false;
        input.root_face_mm = 0.0;
        let result = calculate(&input, &EstimatorSettings::default()).unwrap();
        assert_eq!(result.volumes.inside_depth_mm, 50.0);
        assert_eq!(result.volumes.outside_mm3, 0.0);
        assert!(result.zone(Zone::Outside).is_none());
        assert_eq!(result.passes.by_zone.get(&Zone::Outside).copied().unwrap_or(0), 0);
    }

    #[test]
    fn test_fillet_zone_uses_outside_factor() {
        let mut input = NozzleInput::example();
        input.fillet = Some(FilletSpec { throat_mm: 8.0, process: WeldProcess::Fcaw });
        let result = calculate(&input, &EstimatorSettings::default()).unwrap();
        let fillet = result.zone(Zone::Fillet).unwrap();
        assert!(fillet.passes > 0);
        assert_eq!(fillet.operator_factor, 2.6);
        assert!(result.volumes.fillet_mm3 > 0.0);
    }

    #[test]
    fn test_skip_outside() {
        let mut input = NozzleInput::example();
        input.outside = ProcessSplit::Single(WeldProcess::Skip);
        let result = calculate(&input, &EstimatorSettings::default()).unwrap();
        let outside = result.zone(Zone::Outside).unwrap();
        assert_eq!(outside.passes, 0);
        assert_eq!(outside.hours, 0.0);
    }

    #[test]
    fn test_percent_mode_inside() {
        let mut input = NozzleInput::example();
        input.inside = ProcessSplit::Percent(vec![
            PercentShare::new(WeldProcess::Gtaw, 5.0),
            PercentShare::new(WeldProcess::Smaw, 20.0),
            PercentShare::new(WeldProcess::Saw, 75.0),
        ]);
        assert!(calculate(&input, &EstimatorSettings::default()).is_ok());

        input.inside = ProcessSplit::Percent(vec![PercentShare::new(WeldProcess::Saw, 90.0)]);
        let err = calculate(&input, &EstimatorSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DISTRIBUTION");
    }

    #[test]
    fn test_negative_diameter_rejected() {
        let mut input = NozzleInput::example();
        input.nozzle_od_mm = -1.0;
        assert!(calculate(&input, &EstimatorSettings::default()).unwrap_err().is_input_error());
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut input = NozzleInput::example();
        input.fillet = Some(FilletSpec { throat_mm: 6.0, process: WeldProcess::Gmaw });
        let json = serde_json::to_string_pretty(&input).unwrap();
        let back: NozzleInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
