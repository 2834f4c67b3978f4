//! # Pipe Butt Weld
//!
//! Single-sided vee butt joint between two pipes, welded all the way around.
//!
//! The single groove is reported as three zones, each filled by its own
//! process once the groove reaches a given width:
//!
//! ```text
//!   \___________/   ← cap   (from cap_start_width_mm)
//!    \         /    ← fill  (from fill_start_width_mm)
//!     \__   __/     ← root  (from 0)
//!        | |        ← root gap
//! ```
//!
//! The outside diameter is given explicitly or as an NPS designation, using
//! the ASME B36.10 outside diameters.
//!
//! ## Example
//!
//! ```rust
//! use weld_core::calculations::pipe::{calculate, NominalPipeSize, PipeButtInput, PipeDiameter};
//! use weld_core::calculations::Zone;
//! use weld_core::settings::EstimatorSettings;
//!
//! let mut input = PipeButtInput::example();
//! input.diameter = PipeDiameter::Nps { size: NominalPipeSize::Nps6 };
//!
//! let result = calculate(&input, &EstimatorSettings::default()).unwrap();
//! assert!(result.zone(Zone::Root).is_some());
//! assert!(result.zone(Zone::Cap).is_some());
//! ```

use serde::{Deserialize, Serialize};

use super::geometry::{GeometryInput, JointProfile, WeldLength};
use super::pipeline::{self, Section, StagedLayer, WeldPlan, WeldResult, Zone, ZoneAssignment, ZonePlan};
use super::WeldType;
use crate::errors::{CalcError, CalcResult};
use crate::processes::{ProcessLayer, WeldProcess};
use crate::settings::EstimatorSettings;

const MM_PER_INCH: f64 = 25.4;

/// Nominal pipe size designation (ASME B36.10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NominalPipeSize {
    #[serde(rename = "1/2")]
    Nps1_2,
    #[serde(rename = "3/4")]
    Nps3_4,
    #[serde(rename = "1")]
    Nps1,
    #[serde(rename = "1-1/4")]
    Nps1_1_4,
    #[serde(rename = "1-1/2")]
    Nps1_1_2,
    #[serde(rename = "2")]
    Nps2,
    #[serde(rename = "2-1/2")]
    Nps2_1_2,
    #[serde(rename = "3")]
    Nps3,
    #[serde(rename = "3-1/2")]
    Nps3_1_2,
    #[serde(rename = "4")]
    Nps4,
    #[serde(rename = "5")]
    Nps5,
    #[serde(rename = "6")]
    Nps6,
    #[serde(rename = "8")]
    Nps8,
    #[serde(rename = "10")]
    Nps10,
    #[serde(rename = "12")]
    Nps12,
    #[serde(rename = "14")]
    Nps14,
    #[serde(rename = "16")]
    Nps16,
    #[serde(rename = "18")]
    Nps18,
    #[serde(rename = "20")]
    Nps20,
    #[serde(rename = "24")]
    Nps24,
}

impl NominalPipeSize {
    pub const ALL: [NominalPipeSize; 20] = [
        NominalPipeSize::Nps1_2,
        NominalPipeSize::Nps3_4,
        NominalPipeSize::Nps1,
        NominalPipeSize::Nps1_1_4,
        NominalPipeSize::Nps1_1_2,
        NominalPipeSize::Nps2,
        NominalPipeSize::Nps2_1_2,
        NominalPipeSize::Nps3,
        NominalPipeSize::Nps3_1_2,
        NominalPipeSize::Nps4,
        NominalPipeSize::Nps5,
        NominalPipeSize::Nps6,
        NominalPipeSize::Nps8,
        NominalPipeSize::Nps10,
        NominalPipeSize::Nps12,
        NominalPipeSize::Nps14,
        NominalPipeSize::Nps16,
        NominalPipeSize::Nps18,
        NominalPipeSize::Nps20,
        NominalPipeSize::Nps24,
    ];

    /// Outside diameter in inches
    pub fn od_in(&self) -> f64 {
        match self {
            NominalPipeSize::Nps1_2 => 0.840,
            NominalPipeSize::Nps3_4 => 1.050,
            NominalPipeSize::Nps1 => 1.315,
            NominalPipeSize::Nps1_1_4 => 1.660,
            NominalPipeSize::Nps1_1_2 => 1.900,
            NominalPipeSize::Nps2 => 2.375,
            NominalPipeSize::Nps2_1_2 => 2.875,
            NominalPipeSize::Nps3 => 3.500,
            NominalPipeSize::Nps3_1_2 => 4.000,
            NominalPipeSize::Nps4 => 4.500,
            NominalPipeSize::Nps5 => 5.563,
            NominalPipeSize::Nps6 => 6.625,
            NominalPipeSize::Nps8 => 8.625,
            NominalPipeSize::Nps10 => 10.750,
            NominalPipeSize::Nps12 => 12.750,
            NominalPipeSize::Nps14 => 14.000,
            NominalPipeSize::Nps16 => 16.000,
            NominalPipeSize::Nps18 => 18.000,
            NominalPipeSize::Nps20 => 20.000,
            NominalPipeSize::Nps24 => 24.000,
        }
    }

    /// Outside diameter in millimetres
    pub fn od_mm(&self) -> f64 {
        self.od_in() * MM_PER_INCH
    }

    /// Metric DN equivalent
    pub fn dn(&self) -> u16 {
        match self {
            NominalPipeSize::Nps1_2 => 15,
            NominalPipeSize::Nps3_4 => 20,
            NominalPipeSize::Nps1 => 25,
            NominalPipeSize::Nps1_1_4 => 32,
            NominalPipeSize::Nps1_1_2 => 40,
            NominalPipeSize::Nps2 => 50,
            NominalPipeSize::Nps2_1_2 => 65,
            NominalPipeSize::Nps3 => 80,
            NominalPipeSize::Nps3_1_2 => 90,
            NominalPipeSize::Nps4 => 100,
            NominalPipeSize::Nps5 => 125,
            NominalPipeSize::Nps6 => 150,
            NominalPipeSize::Nps8 => 200,
            NominalPipeSize::Nps10 => 250,
            NominalPipeSize::Nps12 => 300,
            NominalPipeSize::Nps14 => 350,
            NominalPipeSize::Nps16 => 400,
            NominalPipeSize::Nps18 => 450,
            NominalPipeSize::Nps20 => 500,
            NominalPipeSize::Nps24 => 600,
        }
    }

    /// Designation without the "NPS" prefix (e.g., "1-1/2")
    pub fn designation(&self) -> &'static str {
        match self {
            NominalPipeSize::Nps1_2 => "1/2",
            NominalPipeSize::Nps3_4 => "3/4",
            NominalPipeSize::Nps1 => "1",
            NominalPipeSize::Nps1_1_4 => "1-1/4",
            NominalPipeSize::Nps1_1_2 => "1-1/2",
            NominalPipeSize::Nps2 => "2",
            NominalPipeSize::Nps2_1_2 => "2-1/2",
            NominalPipeSize::Nps3 => "3",
            NominalPipeSize::Nps3_1_2 => "3-1/2",
            NominalPipeSize::Nps4 => "4",
            NominalPipeSize::Nps5 => "5",
            NominalPipeSize::Nps6 => "6",
            NominalPipeSize::Nps8 => "8",
            NominalPipeSize::Nps10 => "10",
            NominalPipeSize::Nps12 => "12",
            NominalPipeSize::Nps14 => "14",
            NominalPipeSize::Nps16 => "16",
            NominalPipeSize::Nps18 => "18",
            NominalPipeSize::Nps20 => "20",
            NominalPipeSize::Nps24 => "24",
        }
    }

    /// Parse "NPS 2", "2\"", "1-1/2", "1 1/2", or "DN50"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase();
        let invalid = || CalcError::invalid_input("nps", s, "Unknown nominal pipe size");

        if let Some(dn) = normalized.strip_prefix("DN") {
            let dn: u16 = dn.trim().parse().map_err(|_| invalid())?;
            return Self::ALL.iter().copied().find(|size| size.dn() == dn).ok_or_else(invalid);
        }

        let designation = normalized
            .trim_start_matches("NPS")
            .trim()
            .trim_end_matches('"')
            .trim()
            .replace(' ', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.designation() == designation)
            .ok_or_else(invalid)
    }
}

impl std::fmt::Display for NominalPipeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NPS {}", self.designation())
    }
}

/// Pipe outside diameter, explicit or by nominal size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PipeDiameter {
    Nps { size: NominalPipeSize },
    Explicit { od_mm: f64 },
}

impl PipeDiameter {
    pub fn od_mm(&self) -> f64 {
        match self {
            PipeDiameter::Nps { size } => size.od_mm(),
            PipeDiameter::Explicit { od_mm } => *od_mm,
        }
    }
}

/// Input parameters for a pipe butt weld.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "P1",
///   "diameter": { "kind": "Nps", "size": "8" },
///   "wall_thickness_mm": 12.7,
///   "root_gap_mm": 3.0,
///   "root_face_mm": 1.5,
///   "bevel_angle_deg": 37.5,
///   "root_process": "GTAW",
///   "fill_process": "SMAW",
///   "cap_process": "SMAW",
///   "fill_start_width_mm": 6.0,
///   "cap_start_width_mm": 16.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeButtInput {
    pub label: String,
    pub diameter: PipeDiameter,
    /// Pipe wall thickness (mm)
    pub wall_thickness_mm: f64,
    pub root_gap_mm: f64,
    pub root_face_mm: f64,
    /// Bevel angle on each pipe end (deg); the included angle is twice this
    pub bevel_angle_deg: f64,
    pub root_process: WeldProcess,
    pub fill_process: WeldProcess,
    pub cap_process: WeldProcess,
    /// Groove width at which the fill process takes over from the root (mm)
    pub fill_start_width_mm: f64,
    /// Groove width at which the cap process takes over from the fill (mm)
    pub cap_start_width_mm: f64,
}

impl PipeButtInput {
    /// NPS 8 standard-wall pipe, 37.5° bevels, GTAW root with SMAW fill and cap.
    pub fn example() -> Self {
        PipeButtInput {
            label: "P1".to_string(),
            diameter: PipeDiameter::Nps { size: NominalPipeSize::Nps8 },
            wall_thickness_mm: 12.7,
            root_gap_mm: 3.0,
            root_face_mm: 1.5,
            bevel_angle_deg: 37.5,
            root_process: WeldProcess::Gtaw,
            fill_process: WeldProcess::Smaw,
            cap_process: WeldProcess::Smaw,
            fill_start_width_mm: 6.0,
            cap_start_width_mm: 16.0,
        }
    }

    pub fn geometry(&self) -> GeometryInput {
        GeometryInput {
            thickness_mm: self.wall_thickness_mm,
            root_gap_mm: self.root_gap_mm,
            root_face_mm: self.root_face_mm,
            inside_angle_deg: self.bevel_angle_deg,
            outside_angle_deg: 0.0,
            split_ratio_pct: 100.0,
            profile: JointProfile::SingleVee,
            length: WeldLength::Circumference { diameter_mm: self.diameter.od_mm() },
            fillet_throat_mm: None,
        }
    }

    pub fn plan(&self) -> WeldPlan {
        let stages = vec![
            StagedLayer { zone: Zone::Root, layer: ProcessLayer::new(self.root_process, 0.0) },
            StagedLayer { zone: Zone::Fill, layer: ProcessLayer::new(self.fill_process, self.fill_start_width_mm) },
            StagedLayer { zone: Zone::Cap, layer: ProcessLayer::new(self.cap_process, self.cap_start_width_mm) },
        ];
        WeldPlan {
            label: self.label.clone(),
            weld_type: WeldType::PipeButt,
            geometry: self.geometry(),
            zones: vec![ZonePlan::new(Zone::Inside, Section::InsideGroove, ZoneAssignment::Staged(stages))],
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fill_start_width_mm > 0.0) {
            return Err(CalcError::invalid_input(
                "fill_start_width_mm",
                self.fill_start_width_mm.to_string(),
                "Fill must start above zero width",
            ));
        }
        if !(self.cap_start_width_mm > self.fill_start_width_mm) {
            return Err(CalcError::invalid_input(
                "cap_start_width_mm",
                self.cap_start_width_mm.to_string(),
                format!("Cap must start wider than fill ({} mm)", self.fill_start_width_mm),
            ));
        }
        self.plan().validate()
    }
}

/// Estimate a pipe butt weld.
pub fn calculate(input: &PipeButtInput, settings: &EstimatorSettings) -> CalcResult<WeldResult> {
    input.validate()?;
    pipeline::run(&input.plan(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nps_outside_diameters() {
        assert!((NominalPipeSize::Nps2.od_mm() - 60.325).abs() < 1e-9);
        assert!((NominalPipeSize::Nps8.od_mm() - 219.075).abs() < 1e-9);
        assert!((NominalPipeSize::Nps24.od_mm() - 609.6).abs() < 1e-9);
        // Diameters increase with nominal size
        for pair in NominalPipeSize::ALL.windows(2) {
            assert!(pair[1].od_mm() > pair[0].od_mm());
        }
    }

    #[test]
    fn test_nps_parsing() {
        assert_eq!(NominalPipeSize::from_str_flexible("NPS 8").unwrap(), NominalPipeSize::Nps8);
        assert_eq!(NominalPipeSize::from_str_flexible("1-1/2").unwrap(), NominalPipeSize::Nps1_1_2);
        assert_eq!(NominalPipeSize::from_str_flexible("1 1/2\"").unwrap(), NominalPipeSize::Nps1_1_2);
        assert_eq!(NominalPipeSize::from_str_flexible("dn50").unwrap(), NominalPipeSize::Nps2);
        assert!(NominalPipeSize::from_str_flexible("7").is_err());
        assert!(NominalPipeSize::from_str_flexible("DN").is_err());
    }

    #[test]
    fn test_nps_serialization() {
        let diameter = PipeDiameter::Nps { size: NominalPipeSize::Nps1_1_2 };
        let json = serde_json::to_string(&diameter).unwrap();
        assert_eq!(json, r#"{"kind":"Nps","size":"1-1/2"}"#);
        let back: PipeDiameter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diameter);
    }

    #[test]
    fn test_root_fill_cap_zones() {
        let result = calculate(&PipeButtInput::example(), &EstimatorSettings::default()).unwrap();
        let zones: Vec<Zone> = result.zones.iter().map(|z| z.zone).collect();
        assert_eq!(zones, vec![Zone::Root, Zone::Fill, Zone::Cap]);
        assert!((result.geometry.weld_length_mm - std::f64::consts::PI * 219.075).abs() < 1e-9);
        assert_eq!(result.volumes.outside_mm3, 0.0);

        let deposited: f64 = result.zones.iter().map(|z| z.volume_mm3).sum();
        assert!((deposited - result.geometry.inside.volume_mm3).abs() / deposited < 1e-6);
        assert_eq!(result.zone(Zone::Root).unwrap().layers[0].process, WeldProcess::Gtaw);
        // 12.7 mm wall falls in r2
        assert!(result.zones.iter().all(|z| z.operator_factor == 1.7));
    }

    #[test]
    fn test_explicit_diameter() {
        let mut input = PipeButtInput::example();
        input.diameter = PipeDiameter::Explicit { od_mm: 100.0 };
        let result = calculate(&input, &EstimatorSettings::default()).unwrap();
        assert!((result.geometry.weld_length_mm - std::f64::consts::PI * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cap_beyond_groove_is_empty() {
        let mut input = PipeButtInput::example();
        input.cap_start_width_mm = 100.0;
        let result = calculate(&input, &EstimatorSettings::default()).unwrap();
        let cap = result.zone(Zone::Cap).unwrap();
        assert_eq!(cap.volume_mm3, 0.0);
        assert_eq!(cap.passes, 0);
        assert!(result.zone(Zone::Fill).unwrap().passes > 0);
    }

    #[test]
    fn test_threshold_order_enforced() {
        let mut input = PipeButtInput::example();
        input.cap_start_width_mm = 4.0;
        assert!(calculate(&input, &EstimatorSettings::default()).is_err());

        let mut input = PipeButtInput::example();
        input.fill_start_width_mm = 0.0;
        assert!(calculate(&input, &EstimatorSettings::default()).is_err());
    }
}
