//! # Weld Calculations
//!
//! The estimation engine and the weld types built on it. Each weld type
//! follows the pattern:
//!
//! - `*Input` - Joint parameters and process assignments (JSON-serializable)
//! - `plan()` - Translate the input into a generic [`pipeline::WeldPlan`]
//! - `calculate(input, settings) -> Result<WeldResult, CalcError>` - Pure calculation function
//!
//! All four weld types share a single [`pipeline::run`]; they differ only in
//! joint profile, weld-length source, and which zones exist.
//!
//! ## Engine Stages
//!
//! - [`geometry`] - Joint parameters to depths, widths, areas, volumes
//! - [`apportion`] - Zone volume to per-process sub-volumes
//! - [`passes`] - Sub-volume and bead size to a pass count
//! - [`time`] - Passes to arc minutes and labor hours
//! - [`pipeline`] - Orchestration into one [`WeldResult`]
//!
//! ## Weld Types
//!
//! - [`nozzle`] - Nozzle-to-shell penetrations
//! - [`seam`] - Longitudinal and circumferential shell seams
//! - [`pipe`] - Pipe butt joints

pub mod apportion;
pub mod geometry;
pub mod nozzle;
pub mod passes;
pub mod pipe;
pub mod pipeline;
pub mod seam;
pub mod time;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::processes::{ProcessLayer, WeldProcess};
use crate::settings::EstimatorSettings;

pub use apportion::PercentShare;
pub use geometry::{GeometryInput, GeometryResult, JointProfile, WeldLength};
pub use nozzle::{FilletSpec, NozzleInput};
pub use pipe::{NominalPipeSize, PipeButtInput, PipeDiameter};
pub use pipeline::{WeldPlan, WeldResult, Zone};
pub use seam::{CircumferentialSeamInput, LongitudinalSeamInput, SeamJoint};

use pipeline::ZoneAssignment;

/// Kind of weld item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeldType {
    Nozzle,
    LongitudinalSeam,
    CircumferentialSeam,
    PipeButt,
}

impl WeldType {
    pub const ALL: [WeldType; 4] = [
        WeldType::Nozzle,
        WeldType::LongitudinalSeam,
        WeldType::CircumferentialSeam,
        WeldType::PipeButt,
    ];

    /// Short code used in reports (e.g., "NZ")
    pub fn code(&self) -> &'static str {
        match self {
            WeldType::Nozzle => "NZ",
            WeldType::LongitudinalSeam => "LS",
            WeldType::CircumferentialSeam => "CS",
            WeldType::PipeButt => "PB",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WeldType::Nozzle => "Nozzle",
            WeldType::LongitudinalSeam => "Longitudinal seam",
            WeldType::CircumferentialSeam => "Circumferential seam",
            WeldType::PipeButt => "Pipe butt",
        }
    }
}

impl std::fmt::Display for WeldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which processes fill a zone, as entered on an input.
///
/// ## JSON Example
///
/// ```json
/// { "mode": "layers", "processes": [
///     { "process": "GTAW", "min_width_mm": 0.0 },
///     { "process": "SAW", "min_width_mm": 12.0 }
/// ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "processes", rename_all = "snake_case")]
pub enum ProcessSplit {
    /// Width-threshold layers
    Layers(Vec<ProcessLayer>),
    /// Fixed percentages (legacy)
    Percent(Vec<PercentShare>),
    /// One process for the whole zone
    Single(WeldProcess),
}

impl ProcessSplit {
    pub(crate) fn to_assignment(&self) -> ZoneAssignment {
        match self {
            ProcessSplit::Layers(layers) => ZoneAssignment::Layers(layers.clone()),
            ProcessSplit::Percent(shares) => ZoneAssignment::Percent(shares.clone()),
            ProcessSplit::Single(process) => ZoneAssignment::Single(*process),
        }
    }
}

impl Default for ProcessSplit {
    fn default() -> Self {
        ProcessSplit::Single(WeldProcess::Smaw)
    }
}

/// Enum wrapper for all weld types.
///
/// Stores heterogeneous weld items in one collection with clean
/// `{"type": "Nozzle", ...}` serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WeldItem {
    Nozzle(NozzleInput),
    LongitudinalSeam(LongitudinalSeamInput),
    CircumferentialSeam(CircumferentialSeamInput),
    PipeButt(PipeButtInput),
}

impl WeldItem {
    /// Get the user-provided label for this item
    pub fn label(&self) -> &str {
        match self {
            WeldItem::Nozzle(n) => &n.label,
            WeldItem::LongitudinalSeam(s) => &s.label,
            WeldItem::CircumferentialSeam(s) => &s.label,
            WeldItem::PipeButt(p) => &p.label,
        }
    }

    pub fn weld_type(&self) -> WeldType {
        match self {
            WeldItem::Nozzle(_) => WeldType::Nozzle,
            WeldItem::LongitudinalSeam(_) => WeldType::LongitudinalSeam,
            WeldItem::CircumferentialSeam(_) => WeldType::CircumferentialSeam,
            WeldItem::PipeButt(_) => WeldType::PipeButt,
        }
    }

    pub fn plan(&self) -> WeldPlan {
        match self {
            WeldItem::Nozzle(n) => n.plan(),
            WeldItem::LongitudinalSeam(s) => s.plan(),
            WeldItem::CircumferentialSeam(s) => s.plan(),
            WeldItem::PipeButt(p) => p.plan(),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        match self {
            WeldItem::Nozzle(n) => n.validate(),
            WeldItem::LongitudinalSeam(s) => s.validate(),
            WeldItem::CircumferentialSeam(s) => s.validate(),
            WeldItem::PipeButt(p) => p.validate(),
        }
    }

    /// Run the estimate for this item.
    pub fn calculate(&self, settings: &EstimatorSettings) -> CalcResult<WeldResult> {
        match self {
            WeldItem::Nozzle(n) => nozzle::calculate(n, settings),
            WeldItem::LongitudinalSeam(s) => seam::calculate_longitudinal(s, settings),
            WeldItem::CircumferentialSeam(s) => seam::calculate_circumferential(s, settings),
            WeldItem::PipeButt(p) => pipe::calculate(p, settings),
        }
    }
}
