//! # Shell Seams
//!
//! Butt welds joining shell plates: longitudinal seams run along the vessel
//! axis, circumferential seams run around the shell.
//!
//! Both are vee joints (bevels cut on both plate edges). Plate seams are
//! usually welded from both sides; a single-sided seam has only the inside
//! zone.
//!
//! | Seam            | Weld length          |
//! |-----------------|----------------------|
//! | Longitudinal    | explicit length      |
//! | Circumferential | π × shell diameter   |

use serde::{Deserialize, Serialize};

use super::geometry::{GeometryInput, JointProfile, WeldLength};
use super::pipeline::{self, Section, WeldPlan, WeldResult, Zone, ZonePlan};
use super::{ProcessSplit, WeldType};
use crate::errors::CalcResult;
use crate::processes::{ProcessLayer, WeldProcess};
use crate::settings::EstimatorSettings;

/// Joint parameters shared by both seam types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeamJoint {
    /// Plate thickness (mm)
    pub thickness_mm: f64,
    pub root_gap_mm: f64,
    pub root_face_mm: f64,
    pub inside_angle_deg: f64,
    pub outside_angle_deg: f64,
    pub split_ratio_pct: f64,
    pub double_sided: bool,
    pub inside: ProcessSplit,
    #[serde(default)]
    pub outside: ProcessSplit,
}

impl SeamJoint {
    /// 30 mm plate, X-groove 60/40, GTAW root then SAW.
    pub fn example() -> Self {
        SeamJoint {
            thickness_mm: 30.0,
            root_gap_mm: 2.0,
            root_face_mm: 2.0,
            inside_angle_deg: 30.0,
            outside_angle_deg: 30.0,
            split_ratio_pct: 60.0,
            double_sided: true,
            inside: ProcessSplit::Layers(vec![
                ProcessLayer::new(WeldProcess::Gtaw, 0.0),
                ProcessLayer::new(WeldProcess::Saw, 8.0),
            ]),
            outside: ProcessSplit::Single(WeldProcess::Saw),
        }
    }

    fn geometry(&self, length: WeldLength) -> GeometryInput {
        GeometryInput {
            thickness_mm: self.thickness_mm,
            root_gap_mm: self.root_gap_mm,
            root_face_mm: self.root_face_mm,
            inside_angle_deg: self.inside_angle_deg,
            outside_angle_deg: self.outside_angle_deg,
            split_ratio_pct: self.split_ratio_pct,
            profile: JointProfile::SingleVee.with_sides(self.double_sided),
            length,
            fillet_throat_mm: None,
        }
    }

    fn plan(&self, label: &str, weld_type: WeldType, length: WeldLength) -> WeldPlan {
        let mut zones = vec![ZonePlan::new(Zone::Inside, Section::InsideGroove, self.inside.to_assignment())];
        if self.double_sided {
            zones.push(ZonePlan::new(Zone::Outside, Section::OutsideGroove, self.outside.to_assignment()));
        }
        WeldPlan {
            label: label.to_string(),
            weld_type,
            geometry: self.geometry(length),
            zones,
        }
    }
}

/// Longitudinal seam of explicit length.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "LS-1",
///   "length_mm": 2400.0,
///   "joint": { "thickness_mm": 30.0, "root_gap_mm": 2.0, "root_face_mm": 2.0,
///              "inside_angle_deg": 30.0, "outside_angle_deg": 30.0,
///              "split_ratio_pct": 60.0, "double_sided": true,
///              "inside": { "mode": "single", "processes": "SAW" },
///              "outside": { "mode": "single", "processes": "SAW" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalSeamInput {
    pub label: String,
    /// Seam length (mm)
    pub length_mm: f64,
    pub joint: SeamJoint,
}

impl LongitudinalSeamInput {
    pub fn example() -> Self {
        LongitudinalSeamInput {
            label: "LS-1".to_string(),
            length_mm: 2400.0,
            joint: SeamJoint::example(),
        }
    }

    pub fn plan(&self) -> WeldPlan {
        self.joint.plan(
            &self.label,
            WeldType::LongitudinalSeam,
            WeldLength::Linear { length_mm: self.length_mm },
        )
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.plan().validate()
    }
}

/// Circumferential seam around a shell of given diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircumferentialSeamInput {
    pub label: String,
    /// Shell diameter the seam runs around (mm)
    pub shell_diameter_mm: f64,
    pub joint: SeamJoint,
}

impl CircumferentialSeamInput {
    pub fn example() -> Self {
        CircumferentialSeamInput {
            label: "CS-1".to_string(),
            shell_diameter_mm: 2000.0,
            joint: SeamJoint::example(),
        }
    }

    pub fn plan(&self) -> WeldPlan {
        self.joint.plan(
            &self.label,
            WeldType::CircumferentialSeam,
            WeldLength::Circumference { diameter_mm: self.shell_diameter_mm },
        )
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.plan().validate()
    }
}

/// Estimate a longitudinal seam.
pub fn calculate_longitudinal(input: &LongitudinalSeamInput, settings: &EstimatorSettings) -> CalcResult<WeldResult> {
    input.validate()?;
    pipeline::run(&input.plan(), settings)
}

/// Estimate a circumferential seam.
pub fn calculate_circumferential(
    input: &CircumferentialSeamInput,
    settings: &EstimatorSettings,
) -> CalcResult<WeldResult> {
    input.validate()?;
    pipeline::run(&input.plan(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longitudinal_uses_explicit_length() {
        let result = calculate_longitudinal(&LongitudinalSeamInput::example(), &EstimatorSettings::default()).unwrap();
        assert_eq!(result.geometry.weld_length_mm, 2400.0);
        assert_eq!(result.geometry.profile, JointProfile::DoubleVee);
        assert_eq!(result.weld_type, WeldType::LongitudinalSeam);
        assert!(result.zone(Zone::Inside).unwrap().passes > 0);
        assert!(result.zone(Zone::Outside).unwrap().passes > 0);
    }

    #[test]
    fn test_circumferential_uses_circumference() {
        let result =
            calculate_circumferential(&CircumferentialSeamInput::example(), &EstimatorSettings::default()).unwrap();
        assert!((result.geometry.weld_length_mm - std::f64::consts::PI * 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_joint_scales_with_length() {
        let settings = EstimatorSettings::default();
        let short = calculate_longitudinal(&LongitudinalSeamInput::example(), &settings).unwrap();
        let mut input = LongitudinalSeamInput::example();
        input.length_mm *= 2.0;
        let long = calculate_longitudinal(&input, &settings).unwrap();
        assert!((long.volumes.total_mm3 - 2.0 * short.volumes.total_mm3).abs() < 1e-6);
        assert!(long.total_hours() > short.total_hours());
    }

    #[test]
    fn test_single_sided_seam() {
        let mut input = LongitudinalSeamInput::example();
        input.joint.double_sided = false;
        let result = calculate_longitudinal(&input, &EstimatorSettings::default()).unwrap();
        assert_eq!(result.geometry.profile, JointProfile::SingleVee);
        assert_eq!(result.volumes.outside_mm3, 0.0);
        assert_eq!(result.zones.len(), 1);
    }

    #[test]
    fn test_medium_bracket_rates() {
        let result = calculate_longitudinal(&LongitudinalSeamInput::example(), &EstimatorSettings::default()).unwrap();
        // 30 mm plate: medium speeds, r4 factors
        assert_eq!(result.rates.speed_bracket, crate::tables::SpeedBracket::Medium);
        assert_eq!(result.zone(Zone::Inside).unwrap().operator_factor, 1.9);
        assert_eq!(result.zone(Zone::Outside).unwrap().operator_factor, 2.2);
    }

    #[test]
    fn test_negative_length_rejected() {
        let mut input = LongitudinalSeamInput::example();
        input.length_mm = -5.0;
        assert!(calculate_longitudinal(&input, &EstimatorSettings::default()).is_err());
    }
}
