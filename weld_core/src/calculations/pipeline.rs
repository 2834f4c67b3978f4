//! # Weld Calculation Pipeline
//!
//! One implementation of the estimate, shared by every weld type:
//!
//! 1. Resolve geometry into depths, widths, areas, volumes
//! 2. Apportion each zone's volume across its processes
//! 3. Count passes per (process, volume)
//! 4. Resolve speed and operator-factor rows from the thickness
//! 5. Accumulate arc time and hours per zone, then totals
//! 6. Return one immutable [`WeldResult`]
//!
//! Weld types differ only in the [`WeldPlan`] they build: the joint profile,
//! the weld-length source, and which zones exist.
//!
//! The pipeline is a pure function of the plan and the settings. It holds no
//! state between calls and may be invoked from any number of threads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::apportion::{self, LayerShare, PercentShare, WidthBand};
use super::geometry::{self, GeometryInput, GeometryResult, GrooveSide};
use super::passes::count_passes;
use super::time::{arc_time_minutes, labor_hours, FactorSide};
use super::WeldType;
use crate::errors::{CalcError, CalcResult};
use crate::processes::{self, BeadSize, ProcessLayer, WeldProcess};
use crate::settings::EstimatorSettings;
use crate::tables::{self, ResolvedRates};
use crate::units::CuMm;

// ============================================================================
// Plan
// ============================================================================

/// Reporting zone of a weld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Inside,
    Outside,
    Fillet,
    Root,
    Fill,
    Cap,
}

impl Zone {
    pub fn factor_side(&self) -> FactorSide {
        match self {
            Zone::Outside | Zone::Fillet => FactorSide::Outside,
            Zone::Inside | Zone::Root | Zone::Fill | Zone::Cap => FactorSide::Inside,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Zone::Inside => "Inside",
            Zone::Outside => "Outside",
            Zone::Fillet => "Fillet",
            Zone::Root => "Root",
            Zone::Fill => "Fill",
            Zone::Cap => "Cap",
        }
    }
}

/// Resolved cross-section a zone draws its metal from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    InsideGroove,
    OutsideGroove,
    Fillet,
}

/// A width-threshold layer reported as its own zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagedLayer {
    pub zone: Zone,
    pub layer: ProcessLayer,
}

/// How a zone's volume is split across processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ZoneAssignment {
    /// Width-threshold layers
    Layers(Vec<ProcessLayer>),
    /// Fixed percentages (legacy mode)
    Percent(Vec<PercentShare>),
    /// The whole zone with one process
    Single(WeldProcess),
    /// Width-threshold layers, each reported as a separate zone
    Staged(Vec<StagedLayer>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePlan {
    pub zone: Zone,
    pub section: Section,
    pub assignment: ZoneAssignment,
}

impl ZonePlan {
    pub fn new(zone: Zone, section: Section, assignment: ZoneAssignment) -> Self {
        ZonePlan { zone, section, assignment }
    }
}

/// Everything the pipeline needs for one weld item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldPlan {
    pub label: String,
    pub weld_type: WeldType,
    pub geometry: GeometryInput,
    pub zones: Vec<ZonePlan>,
}

impl WeldPlan {
    /// Check geometry and every zone assignment.
    pub fn validate(&self) -> CalcResult<()> {
        self.geometry.validate()?;
        for plan in &self.zones {
            let field = format!("{}_zone", plan.zone.display_name().to_lowercase());
            match &plan.assignment {
                ZoneAssignment::Layers(layers) => {
                    processes::validate_layers(&sorted(layers), &field)?;
                }
                ZoneAssignment::Staged(staged) => {
                    let layers: Vec<ProcessLayer> = staged.iter().map(|s| s.layer).collect();
                    processes::validate_layers(&sorted(&layers), &field)?;
                }
                ZoneAssignment::Percent(shares) => {
                    let percentages: Vec<f64> = shares.iter().map(|s| s.percent).collect();
                    if shares.iter().any(|s| !s.percent.is_finite() || s.percent < 0.0)
                        || !apportion::validate_distribution(&percentages)
                    {
                        let sum: f64 = percentages.iter().sum();
                        return Err(CalcError::invalid_distribution(
                            plan.zone.display_name(),
                            sum,
                            apportion::DISTRIBUTION_TOLERANCE_PCT,
                        ));
                    }
                }
                ZoneAssignment::Single(_) => {}
            }
        }
        Ok(())
    }
}

fn sorted(layers: &[ProcessLayer]) -> Vec<ProcessLayer> {
    let mut layers = layers.to_vec();
    processes::sort_layers(&mut layers);
    layers
}

// ============================================================================
// Results
// ============================================================================

/// One process's contribution to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerResult {
    pub process: WeldProcess,
    pub band: Option<WidthBand>,
    /// Percent of the zone's geometric volume
    pub percentage: f64,
    /// Deposited volume; zero for `Skip` (mm³)
    pub volume_mm3: f64,
    pub bead: BeadSize,
    pub passes: u32,
    pub speed_mm_min: f64,
    pub arc_time_min: f64,
    pub hours: f64,
}

/// Totals for one reporting zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResult {
    pub zone: Zone,
    /// Volume of the section this zone fills, before `Skip` is applied (mm³)
    pub geometric_volume_mm3: f64,
    /// Volume actually deposited (mm³)
    pub volume_mm3: f64,
    pub operator_factor: f64,
    pub layers: Vec<LayerResult>,
    pub passes: u32,
    pub arc_time_min: f64,
    pub hours: f64,
}

impl ZoneResult {
    fn from_layers(zone: Zone, geometric_volume_mm3: f64, operator_factor: f64, layers: Vec<LayerResult>) -> Self {
        ZoneResult {
            zone,
            geometric_volume_mm3,
            volume_mm3: layers.iter().map(|l| l.volume_mm3).sum(),
            operator_factor,
            passes: layers.iter().map(|l| l.passes).fold(0, u32::saturating_add),
            arc_time_min: layers.iter().map(|l| l.arc_time_min).sum(),
            hours: layers.iter().map(|l| l.hours).sum(),
            layers,
        }
    }
}

/// Deposited volumes per groove side, with the depths that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    pub inside_mm3: f64,
    pub outside_mm3: f64,
    pub fillet_mm3: f64,
    pub total_mm3: f64,
    pub inside_depth_mm: f64,
    pub outside_depth_mm: f64,
    /// Deposited weld metal mass at the configured density (kg)
    pub deposited_mass_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassResult {
    pub by_zone: BTreeMap<Zone, u32>,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcTimeResult {
    pub by_zone: BTreeMap<Zone, f64>,
    pub total_min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeResult {
    pub by_zone: BTreeMap<Zone, f64>,
    pub total_hours: f64,
}

/// Complete estimate for one weld item.
///
/// ## JSON Example (abridged)
///
/// ```json
/// {
///   "label": "N1",
///   "weld_type": "Nozzle",
///   "volumes": { "inside_mm3": 1156299.3, "outside_mm3": 260752.1, "total_mm3": 1417051.4 },
///   "passes": { "by_zone": { "inside": 17, "outside": 4 }, "total": 21 },
///   "times": { "by_zone": { "inside": 6.1, "outside": 0.5 }, "total_hours": 6.6 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldResult {
    pub label: String,
    pub weld_type: WeldType,
    /// Resolved cross-section figures, for diagrams
    pub geometry: GeometryResult,
    pub rates: ResolvedRates,
    pub zones: Vec<ZoneResult>,
    pub volumes: VolumeResult,
    pub passes: PassResult,
    pub arc_times: ArcTimeResult,
    pub times: TimeResult,
    /// Processes whose bead size or travel speed came from the fallbacks
    pub fallbacks: Vec<WeldProcess>,
}

impl WeldResult {
    pub fn zone(&self, zone: Zone) -> Option<&ZoneResult> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    pub fn total_hours(&self) -> f64 {
        self.times.total_hours
    }

    pub fn total_passes(&self) -> u32 {
        self.passes.total
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the full estimate for a plan.
///
/// # Example
///
/// ```rust
/// use weld_core::calculations::{pipeline, WeldType};
/// use weld_core::calculations::geometry::{GeometryInput, JointProfile, WeldLength};
/// use weld_core::calculations::pipeline::{Section, WeldPlan, Zone, ZoneAssignment, ZonePlan};
/// use weld_core::processes::WeldProcess;
/// use weld_core::settings::EstimatorSettings;
///
/// let plan = WeldPlan {
///     label: "LS-1".to_string(),
///     weld_type: WeldType::LongitudinalSeam,
///     geometry: GeometryInput {
///         thickness_mm: 12.0,
///         root_gap_mm: 2.0,
///         root_face_mm: 2.0,
///         inside_angle_deg: 30.0,
///         outside_angle_deg: 30.0,
///         split_ratio_pct: 60.0,
///         profile: JointProfile::SingleVee,
///         length: WeldLength::Linear { length_mm: 2000.0 },
///         fillet_throat_mm: None,
///     },
///     zones: vec![ZonePlan::new(Zone::Inside, Section::InsideGroove, ZoneAssignment::Single(WeldProcess::Gmaw))],
/// };
///
/// let result = pipeline::run(&plan, &EstimatorSettings::default()).unwrap();
/// assert!(result.total_passes() >= 1);
/// assert!(result.total_hours() > 0.0);
/// ```
pub fn run(plan: &WeldPlan, settings: &EstimatorSettings) -> CalcResult<WeldResult> {
    plan.validate()?;
    settings.validate()?;

    let geometry = geometry::resolve(&plan.geometry);
    debug!(
        label = %plan.label,
        weld_type = ?plan.weld_type,
        weld_length_mm = geometry.weld_length_mm,
        inside_depth_mm = geometry.inside.depth_mm,
        outside_depth_mm = geometry.outside.depth_mm,
        total_volume_mm3 = geometry.total_volume_mm3(),
        "resolved geometry"
    );

    let rates = tables::resolve_rates(plan.geometry.thickness_mm, &settings.operator_factors);
    debug!(
        speed_bracket = ?rates.speed_bracket,
        factor_bracket = ?rates.factor_bracket,
        "resolved rate brackets"
    );

    let mut estimator = ZoneEstimator {
        settings,
        rates,
        weld_length_mm: geometry.weld_length_mm,
        fallbacks: Vec::new(),
    };

    let mut zones = Vec::new();
    for zone_plan in &plan.zones {
        let section = SectionFigures::of(&geometry, zone_plan.section);
        let shares = match &zone_plan.assignment {
            ZoneAssignment::Staged(staged) => {
                zones.extend(estimator.staged_zones(staged, &section));
                continue;
            }
            ZoneAssignment::Layers(layers) => apportion::apportion_by_width(
                section.volume_mm3,
                &sorted(layers),
                section.bottom_width_mm,
                section.top_width_mm,
                settings.default_process,
            ),
            ZoneAssignment::Percent(shares) => apportion::apportion_by_percent(section.volume_mm3, shares),
            ZoneAssignment::Single(process) => vec![LayerShare {
                process: *process,
                source: Some(0),
                band: None,
                percentage: 100.0,
                volume_mm3: section.volume_mm3,
            }],
        };
        zones.push(estimator.zone(zone_plan.zone, section.volume_mm3, &shares));
    }

    let fallbacks = estimator.fallbacks;
    let result = assemble(plan, geometry, rates, zones, fallbacks, settings.metal_density_kg_mm3);
    debug!(
        label = %result.label,
        passes = result.passes.total,
        arc_time_min = result.arc_times.total_min,
        hours = result.times.total_hours,
        "weld estimate complete"
    );
    Ok(result)
}

/// Volume and bounding widths of the section a zone fills.
struct SectionFigures {
    volume_mm3: f64,
    bottom_width_mm: f64,
    top_width_mm: f64,
}

impl SectionFigures {
    fn of(geometry: &GeometryResult, section: Section) -> Self {
        let groove = |side: &GrooveSide| SectionFigures {
            volume_mm3: side.volume_mm3,
            bottom_width_mm: side.bottom_width_mm,
            top_width_mm: side.top_width_mm,
        };
        match section {
            Section::InsideGroove => groove(&geometry.inside),
            Section::OutsideGroove => groove(&geometry.outside),
            Section::Fillet => {
                let (volume_mm3, leg) = geometry
                    .fillet
                    .map(|f| (f.volume_mm3, f.leg_mm))
                    .unwrap_or((0.0, 0.0));
                SectionFigures {
                    volume_mm3,
                    bottom_width_mm: 0.0,
                    top_width_mm: leg,
                }
            }
        }
    }
}

/// Per-item context for turning shares into passes and time.
struct ZoneEstimator<'a> {
    settings: &'a EstimatorSettings,
    rates: ResolvedRates,
    weld_length_mm: f64,
    fallbacks: Vec<WeldProcess>,
}

impl ZoneEstimator<'_> {
    fn layer(&mut self, share: &LayerShare, operator_factor: f64) -> LayerResult {
        let bead = tables::lookup_bead(&self.settings.bead_sizes, share.process, self.settings.fallback_bead);
        let speed = tables::lookup_speed(
            &self.settings.travel_speeds,
            self.rates.speed_bracket,
            share.process,
            self.settings.fallback_speed_mm_min,
        );
        if bead.used_fallback || speed.used_fallback {
            self.note_fallback(share.process, bead.used_fallback, speed.used_fallback);
        }

        if share.process.is_skip() {
            return LayerResult {
                process: share.process,
                band: share.band,
                percentage: share.percentage,
                volume_mm3: 0.0,
                bead: bead.value,
                passes: 0,
                speed_mm_min: 0.0,
                arc_time_min: 0.0,
                hours: 0.0,
            };
        }

        let passes = count_passes(share.volume_mm3, bead.value, self.weld_length_mm);
        let arc_time_min = arc_time_minutes(passes, self.weld_length_mm, speed.value);
        LayerResult {
            process: share.process,
            band: share.band,
            percentage: share.percentage,
            volume_mm3: share.volume_mm3,
            bead: bead.value,
            passes,
            speed_mm_min: speed.value,
            arc_time_min,
            hours: labor_hours(arc_time_min, operator_factor),
        }
    }

    fn note_fallback(&mut self, process: WeldProcess, bead: bool, speed: bool) {
        if !self.fallbacks.contains(&process) {
            warn!(
                process = %process,
                bead_fallback = bead,
                speed_fallback = speed,
                fallback_speed_mm_min = self.settings.fallback_speed_mm_min,
                "process missing from settings tables, using fallback values"
            );
            self.fallbacks.push(process);
        }
    }

    fn zone(&mut self, zone: Zone, geometric_volume_mm3: f64, shares: &[LayerShare]) -> ZoneResult {
        let factor = zone.factor_side().pick(self.rates.operator_factor);
        let layers: Vec<LayerResult> = shares.iter().map(|share| self.layer(share, factor)).collect();
        let result = ZoneResult::from_layers(zone, geometric_volume_mm3, factor, layers);
        debug!(
            zone = ?zone,
            volume_mm3 = result.volume_mm3,
            passes = result.passes,
            hours = result.hours,
            "zone estimated"
        );
        result
    }

    /// One zone per staged layer, in staged order; a stage that owns no part
    /// of the groove still reports an empty zone.
    fn staged_zones(&mut self, staged: &[StagedLayer], section: &SectionFigures) -> Vec<ZoneResult> {
        let mut order: Vec<usize> = (0..staged.len()).collect();
        order.sort_by(|a, b| staged[*a].layer.min_width_mm.total_cmp(&staged[*b].layer.min_width_mm));
        let layers: Vec<ProcessLayer> = order.iter().map(|i| staged[*i].layer).collect();
        let shares = apportion::apportion_by_width(
            section.volume_mm3,
            &layers,
            section.bottom_width_mm,
            section.top_width_mm,
            self.settings.default_process,
        );

        staged
            .iter()
            .enumerate()
            .map(|(original, stage)| {
                let own: Vec<LayerShare> = shares
                    .iter()
                    .filter(|share| share.source.map(|s| order[s]) == Some(original))
                    .copied()
                    .collect();
                let geometric: f64 = own.iter().map(|s| s.volume_mm3).sum();
                self.zone(stage.zone, geometric, &own)
            })
            .collect()
    }
}

fn assemble(
    plan: &WeldPlan,
    geometry: GeometryResult,
    rates: ResolvedRates,
    zones: Vec<ZoneResult>,
    fallbacks: Vec<WeldProcess>,
    density_kg_mm3: f64,
) -> WeldResult {
    let section_of = |zone: Zone| {
        plan.zones
            .iter()
            .find(|p| {
                p.zone == zone
                    || matches!(&p.assignment, ZoneAssignment::Staged(staged) if staged.iter().any(|s| s.zone == zone))
            })
            .map(|p| p.section)
    };

    let mut inside_mm3 = 0.0;
    let mut outside_mm3 = 0.0;
    let mut fillet_mm3 = 0.0;
    for zone in &zones {
        match section_of(zone.zone) {
            Some(Section::InsideGroove) => inside_mm3 += zone.volume_mm3,
            Some(Section::OutsideGroove) => outside_mm3 += zone.volume_mm3,
            Some(Section::Fillet) => fillet_mm3 += zone.volume_mm3,
            None => {}
        }
    }
    let total_mm3 = inside_mm3 + outside_mm3 + fillet_mm3;

    let volumes = VolumeResult {
        inside_mm3,
        outside_mm3,
        fillet_mm3,
        total_mm3,
        inside_depth_mm: geometry.inside.depth_mm,
        outside_depth_mm: geometry.outside.depth_mm,
        deposited_mass_kg: CuMm(total_mm3).mass_at(density_kg_mm3).value(),
    };

    let mut passes = PassResult { by_zone: BTreeMap::new(), total: 0 };
    let mut arc_times = ArcTimeResult { by_zone: BTreeMap::new(), total_min: 0.0 };
    let mut times = TimeResult { by_zone: BTreeMap::new(), total_hours: 0.0 };
    for zone in &zones {
        let by_zone = passes.by_zone.entry(zone.zone).or_insert(0);
        *by_zone = by_zone.saturating_add(zone.passes);
        *arc_times.by_zone.entry(zone.zone).or_insert(0.0) += zone.arc_time_min;
        *times.by_zone.entry(zone.zone).or_insert(0.0) += zone.hours;
        passes.total = passes.total.saturating_add(zone.passes);
        arc_times.total_min += zone.arc_time_min;
        times.total_hours += zone.hours;
    }

    WeldResult {
        label: plan.label.clone(),
        weld_type: plan.weld_type,
        geometry,
        rates,
        zones,
        volumes,
        passes,
        arc_times,
        times,
        fallbacks,
    }
}
