//! # Joint Geometry
//!
//! Resolves joint parameters into per-side groove figures (depth, bevel
//! width, bottom/top width, areas) and volumes. Every intermediate figure is
//! kept in the result so diagram rendering can draw the cross-section without
//! recomputing geometry.
//!
//! ## Profiles
//!
//! | Profile        | Sides  | Width grows from |
//! |----------------|--------|------------------|
//! | `SingleBevel`  | 1      | one wall         |
//! | `DoubleBevel`  | 2      | one wall         |
//! | `SingleVee`    | 1      | both walls       |
//! | `DoubleVee`    | 2      | both walls       |
//!
//! ## Example
//!
//! ```rust
//! use weld_core::calculations::geometry::{resolve, GeometryInput, JointProfile, WeldLength};
//!
//! let input = GeometryInput {
//!     thickness_mm: 50.0,
//!     root_gap_mm: 5.0,
//!     root_face_mm: 3.0,
//!     inside_angle_deg: 45.0,
//!     outside_angle_deg: 45.0,
//!     split_ratio_pct: 70.0,
//!     profile: JointProfile::DoubleBevel,
//!     length: WeldLength::Circumference { diameter_mm: 500.0 },
//!     fillet_throat_mm: None,
//! };
//!
//! let geometry = resolve(&input);
//! assert!((geometry.weld_length_mm - 1570.8).abs() < 0.1);
//! assert!((geometry.inside.depth_mm - 33.5).abs() < 1e-9);
//! assert!((geometry.outside.depth_mm - 13.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::groove;
use crate::errors::{CalcError, CalcResult};

/// Groove profile of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointProfile {
    /// One bevelled wall, welded from one side (e.g., set-on nozzle)
    SingleBevel,
    /// One bevelled wall, welded from both sides (e.g., set-in nozzle)
    DoubleBevel,
    /// Both walls bevelled, welded from one side (e.g., pipe butt)
    SingleVee,
    /// Both walls bevelled, welded from both sides (X-groove plate seam)
    DoubleVee,
}

impl JointProfile {
    pub const ALL: [JointProfile; 4] = [
        JointProfile::SingleBevel,
        JointProfile::DoubleBevel,
        JointProfile::SingleVee,
        JointProfile::DoubleVee,
    ];

    /// Welded from both the inside and the outside
    pub fn is_double_sided(&self) -> bool {
        matches!(self, JointProfile::DoubleBevel | JointProfile::DoubleVee)
    }

    /// Width grows symmetrically from both walls
    pub fn is_symmetric(&self) -> bool {
        matches!(self, JointProfile::SingleVee | JointProfile::DoubleVee)
    }

    /// Profile with the same bevel/vee shape, welded from one or both sides
    pub fn with_sides(&self, double_sided: bool) -> Self {
        match (self.is_symmetric(), double_sided) {
            (false, false) => JointProfile::SingleBevel,
            (false, true) => JointProfile::DoubleBevel,
            (true, false) => JointProfile::SingleVee,
            (true, true) => JointProfile::DoubleVee,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            JointProfile::SingleBevel => "Single bevel",
            JointProfile::DoubleBevel => "Double bevel",
            JointProfile::SingleVee => "Single vee",
            JointProfile::DoubleVee => "Double vee",
        }
    }
}

/// Source of the weld length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WeldLength {
    /// Circular joint: length = π × diameter
    Circumference { diameter_mm: f64 },
    /// Straight joint of explicit length
    Linear { length_mm: f64 },
}

impl WeldLength {
    pub fn length_mm(&self) -> f64 {
        match self {
            WeldLength::Circumference { diameter_mm } => groove::circumference(*diameter_mm),
            WeldLength::Linear { length_mm } => *length_mm,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        let (field, value) = match self {
            WeldLength::Circumference { diameter_mm } => ("diameter_mm", *diameter_mm),
            WeldLength::Linear { length_mm } => ("length_mm", *length_mm),
        };
        if !value.is_finite() || value < 0.0 {
            return Err(CalcError::invalid_input(field, value.to_string(), "Must be zero or positive"));
        }
        Ok(())
    }
}

/// Joint parameters for one weld item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryInput {
    /// Wall/shell thickness (mm)
    pub thickness_mm: f64,
    /// Root gap (mm)
    pub root_gap_mm: f64,
    /// Root face / land (mm)
    pub root_face_mm: f64,
    /// Bevel angle of the inside groove, or the only groove when single-sided (deg)
    pub inside_angle_deg: f64,
    /// Bevel angle of the outside groove; ignored when single-sided (deg)
    pub outside_angle_deg: f64,
    /// Percent of thickness welded from the inside; ignored when single-sided
    pub split_ratio_pct: f64,
    pub profile: JointProfile,
    pub length: WeldLength,
    /// Throat of a reinforcing fillet, when the joint carries one (mm)
    #[serde(default)]
    pub fillet_throat_mm: Option<f64>,
}

impl GeometryInput {
    /// Reject inputs outside the domain. Degenerate-but-valid geometry
    /// (root face thicker than the wall, zero gap) passes and is clamped later.
    pub fn validate(&self) -> CalcResult<()> {
        check_non_negative("thickness_mm", self.thickness_mm)?;
        check_non_negative("root_gap_mm", self.root_gap_mm)?;
        check_non_negative("root_face_mm", self.root_face_mm)?;
        check_angle("inside_angle_deg", self.inside_angle_deg)?;
        if self.profile.is_double_sided() {
            check_angle("outside_angle_deg", self.outside_angle_deg)?;
            if !self.split_ratio_pct.is_finite() || !(0.0..=100.0).contains(&self.split_ratio_pct) {
                return Err(CalcError::invalid_input(
                    "split_ratio_pct",
                    self.split_ratio_pct.to_string(),
                    "Split ratio must be between 0 and 100 percent",
                ));
            }
        }
        if let Some(throat) = self.fillet_throat_mm {
            check_non_negative("fillet_throat_mm", throat)?;
        }
        self.length.validate()
    }
}

fn check_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be zero or positive"));
    }
    Ok(())
}

fn check_angle(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || !(0.0..90.0).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Bevel angle must be at least 0° and below 90°",
        ));
    }
    Ok(())
}

/// Resolved figures for one side of a groove.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrooveSide {
    /// Bevelled depth (mm)
    pub depth_mm: f64,
    /// Bevel angle used (deg)
    pub angle_deg: f64,
    /// depth × tan(angle) (mm)
    pub bevel_width_mm: f64,
    /// Width at the root, equal to the root gap (mm)
    pub bottom_width_mm: f64,
    /// Width at the surface (mm)
    pub top_width_mm: f64,
    /// Share of the root face attributed to this side (mm)
    pub root_face_height_mm: f64,
    /// Trapezoidal groove area (mm²)
    pub groove_area_mm2: f64,
    /// Rectangular root-face area (mm²)
    pub root_face_area_mm2: f64,
    /// groove + root-face area (mm²)
    pub area_mm2: f64,
    /// area × weld length (mm³)
    pub volume_mm3: f64,
}

impl GrooveSide {
    fn build(
        depth_mm: f64,
        angle_deg: f64,
        root_gap_mm: f64,
        root_face_height_mm: f64,
        symmetric: bool,
        weld_length_mm: f64,
    ) -> Self {
        let bevel_width_mm = groove::bevel_width(depth_mm, angle_deg);
        let bottom_width_mm = root_gap_mm.max(0.0);
        let top_width_mm = groove::groove_top_width(root_gap_mm, bevel_width_mm, symmetric);
        let groove_area_mm2 = groove::trapezoid_area(top_width_mm, bottom_width_mm, depth_mm);
        let root_face_area_mm2 = groove::root_face_area(root_gap_mm, root_face_height_mm);
        let area_mm2 = groove_area_mm2 + root_face_area_mm2;
        GrooveSide {
            depth_mm,
            angle_deg,
            bevel_width_mm,
            bottom_width_mm,
            top_width_mm,
            root_face_height_mm: root_face_height_mm.max(0.0),
            groove_area_mm2,
            root_face_area_mm2,
            area_mm2,
            volume_mm3: groove::swept_volume(area_mm2, weld_length_mm),
        }
    }

    /// Side that is not welded at all
    fn empty(root_gap_mm: f64) -> Self {
        GrooveSide {
            bottom_width_mm: root_gap_mm.max(0.0),
            top_width_mm: root_gap_mm.max(0.0),
            ..GrooveSide::default()
        }
    }
}

/// Resolved reinforcing fillet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilletSection {
    pub throat_mm: f64,
    pub leg_mm: f64,
    pub area_mm2: f64,
    pub volume_mm3: f64,
}

/// Everything the geometry resolver derives for one joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryResult {
    pub profile: JointProfile,
    pub thickness_mm: f64,
    pub weld_length_mm: f64,
    /// Inside groove (the only groove for single-sided joints)
    pub inside: GrooveSide,
    /// Outside groove; all zero for single-sided joints
    pub outside: GrooveSide,
    pub fillet: Option<FilletSection>,
}

impl GeometryResult {
    pub fn fillet_volume_mm3(&self) -> f64 {
        self.fillet.map(|f| f.volume_mm3).unwrap_or(0.0)
    }

    pub fn total_volume_mm3(&self) -> f64 {
        self.inside.volume_mm3 + self.outside.volume_mm3 + self.fillet_volume_mm3()
    }
}

/// Resolve joint parameters into groove figures and volumes.
///
/// Assumes `input` has passed [`GeometryInput::validate`]; anything that is
/// still degenerate (e.g., root face thicker than the wall) clamps to zero.
pub fn resolve(input: &GeometryInput) -> GeometryResult {
    let weld_length_mm = input.length.length_mm().max(0.0);
    let symmetric = input.profile.is_symmetric();
    // The land can never be taller than the wall it is cut from
    let land_mm = input.root_face_mm.clamp(0.0, input.thickness_mm.max(0.0));

    let (inside, outside) = if input.profile.is_double_sided() {
        let (inside_depth, outside_depth) =
            groove::double_sided_depths(input.thickness_mm, input.root_face_mm, input.split_ratio_pct);
        let half_face = land_mm / 2.0;
        (
            GrooveSide::build(
                inside_depth,
                input.inside_angle_deg,
                input.root_gap_mm,
                half_face,
                symmetric,
                weld_length_mm,
            ),
            GrooveSide::build(
                outside_depth,
                input.outside_angle_deg,
                input.root_gap_mm,
                half_face,
                symmetric,
                weld_length_mm,
            ),
        )
    } else {
        let depth = groove::single_sided_depth(input.thickness_mm, input.root_face_mm);
        (
            GrooveSide::build(
                depth,
                input.inside_angle_deg,
                input.root_gap_mm,
                land_mm,
                symmetric,
                weld_length_mm,
            ),
            GrooveSide::empty(input.root_gap_mm),
        )
    };

    let fillet = input.fillet_throat_mm.map(|throat| {
        let area_mm2 = groove::fillet_area(throat);
        FilletSection {
            throat_mm: throat.max(0.0),
            leg_mm: groove::fillet_leg(throat),
            area_mm2,
            volume_mm3: groove::swept_volume(area_mm2, weld_length_mm),
        }
    });

    GeometryResult {
        profile: input.profile,
        thickness_mm: input.thickness_mm,
        weld_length_mm,
        inside,
        outside,
        fillet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double_bevel() -> GeometryInput {
        GeometryInput {
            thickness_mm: 50.0,
            root_gap_mm: 5.0,
            root_face_mm: 3.0,
            inside_angle_deg: 45.0,
            outside_angle_deg: 45.0,
            split_ratio_pct: 70.0,
            profile: JointProfile::DoubleBevel,
            length: WeldLength::Circumference { diameter_mm: 500.0 },
            fillet_throat_mm: None,
        }
    }

    #[test]
    fn test_double_bevel_figures() {
        let g = resolve(&double_bevel());
        assert!((g.weld_length_mm - 1570.796).abs() < 0.001);

        // inside: d = 35 - 1.5 = 33.5, b = 33.5, top = 38.5
        assert!((g.inside.depth_mm - 33.5).abs() < 1e-9);
        assert!((g.inside.top_width_mm - 38.5).abs() < 1e-9);
        // A = (38.5 + 5)/2 × 33.5 + 5 × 1.5 = 728.625 + 7.5
        assert!((g.inside.area_mm2 - 736.125).abs() < 1e-9);

        // outside: d = 15 - 1.5 = 13.5, top = 18.5
        assert!((g.outside.depth_mm - 13.5).abs() < 1e-9);
        assert!((g.outside.area_mm2 - (23.5 / 2.0 * 13.5 + 7.5)).abs() < 1e-9);

        assert!((g.inside.volume_mm3 - g.inside.area_mm2 * g.weld_length_mm).abs() < 1e-6);
        assert!(g.fillet.is_none());
    }

    #[test]
    fn test_double_sided_split_without_root_face() {
        let mut input = double_bevel();
        input.root_face_mm = 0.0;
        let g = resolve(&input);
        assert!((g.inside.depth_mm - 35.0).abs() < 1e-9);
        assert!((g.outside.depth_mm - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_ratio_monotonic() {
        let mut input = double_bevel();
        input.split_ratio_pct = 60.0;
        let g60 = resolve(&input);
        input.split_ratio_pct = 80.0;
        let g80 = resolve(&input);
        assert!(g80.inside.depth_mm > g60.inside.depth_mm);
        assert!(g80.outside.depth_mm < g60.outside.depth_mm);
    }

    #[test]
    fn test_single_sided_full_penetration() {
        let mut input = double_bevel();
        input.profile = JointProfile::SingleBevel;
        input.root_face_mm = 0.0;
        let g = resolve(&input);
        assert_eq!(g.inside.depth_mm, 50.0);
        assert_eq!(g.outside.volume_mm3, 0.0);
        assert_eq!(g.outside.depth_mm, 0.0);
    }

    #[test]
    fn test_vee_is_wider_than_bevel() {
        let mut input = double_bevel();
        input.profile = JointProfile::SingleBevel;
        let bevel = resolve(&input);
        input.profile = JointProfile::SingleVee;
        let vee = resolve(&input);
        assert!((vee.inside.top_width_mm - (5.0 + 2.0 * bevel.inside.bevel_width_mm)).abs() < 1e-9);
        assert!(vee.inside.volume_mm3 > bevel.inside.volume_mm3);
    }

    #[test]
    fn test_root_face_exceeds_thickness() {
        let mut input = double_bevel();
        input.profile = JointProfile::SingleVee;
        input.root_face_mm = 60.0;
        let g = resolve(&input);
        assert_eq!(g.inside.depth_mm, 0.0);
        assert_eq!(g.inside.groove_area_mm2, 0.0);
        // Land is capped at the wall thickness
        assert_eq!(g.inside.root_face_height_mm, 50.0);
        assert_eq!(g.inside.root_face_area_mm2, 5.0 * 50.0);
    }

    #[test]
    fn test_fillet_section() {
        let mut input = double_bevel();
        input.fillet_throat_mm = Some(8.0);
        let g = resolve(&input);
        let fillet = g.fillet.unwrap();
        assert!((fillet.leg_mm - 11.3137).abs() < 1e-4);
        assert!((fillet.area_mm2 - 64.0).abs() < 1e-9);
        assert!((g.total_volume_mm3() - (g.inside.volume_mm3 + g.outside.volume_mm3 + fillet.volume_mm3)).abs() < 1e-6);
    }

    #[test]
    fn test_linear_length() {
        let mut input = double_bevel();
        input.length = WeldLength::Linear { length_mm: 2400.0 };
        assert_eq!(resolve(&input).weld_length_mm, 2400.0);
    }

    #[test]
    fn test_validation() {
        assert!(double_bevel().validate().is_ok());

        let mut input = double_bevel();
        input.thickness_mm = -1.0;
        assert!(input.validate().is_err());

        let mut input = double_bevel();
        input.length = WeldLength::Circumference { diameter_mm: -10.0 };
        assert!(input.validate().is_err());

        let mut input = double_bevel();
        input.inside_angle_deg = 90.0;
        assert!(input.validate().is_err());

        let mut input = double_bevel();
        input.split_ratio_pct = 150.0;
        assert!(input.validate().is_err());
        input.split_ratio_pct = 100.0;
        assert!(input.validate().is_ok());

        // Split ratio is ignored for single-sided joints
        let mut input = double_bevel();
        input.profile = JointProfile::SingleBevel;
        input.split_ratio_pct = 250.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_profile_flags() {
        assert!(JointProfile::DoubleVee.is_double_sided());
        assert!(JointProfile::DoubleVee.is_symmetric());
        assert!(!JointProfile::SingleBevel.is_symmetric());
        assert_eq!(JointProfile::SingleVee.with_sides(true), JointProfile::DoubleVee);
        assert_eq!(JointProfile::DoubleBevel.with_sides(false), JointProfile::SingleBevel);
    }

    #[test]
    fn test_weld_length_serialization() {
        let json = serde_json::to_string(&WeldLength::Linear { length_mm: 1200.0 }).unwrap();
        assert_eq!(json, r#"{"kind":"Linear","length_mm":1200.0}"#);
    }
}
