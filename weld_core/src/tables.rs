//! # Productivity Tables
//!
//! Thickness brackets and the lookup tables keyed by them: travel speed per
//! process and operator factors per zone side.
//!
//! ## Bracket Boundaries
//!
//! Boundaries are half-open, so every thickness belongs to exactly one bracket:
//!
//! | Table            | Brackets                                                  |
//! |------------------|-----------------------------------------------------------|
//! | Travel speed     | thin `< 20`, medium `20 ≤ t < 40`, thick `≥ 40`            |
//! | Operator factor  | r1 `< 12`, r2 `< 18`, r3 `< 25`, r4 `< 35`, r5 `< 50`, r6 |
//!
//! ## Example
//!
//! ```rust
//! use weld_core::tables::{FactorBracket, SpeedBracket};
//!
//! assert_eq!(SpeedBracket::from_thickness(19.9), SpeedBracket::Thin);
//! assert_eq!(SpeedBracket::from_thickness(20.0), SpeedBracket::Medium);
//! assert_eq!(SpeedBracket::from_thickness(40.0), SpeedBracket::Thick);
//! assert_eq!(FactorBracket::from_thickness(50.0), FactorBracket::R6);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::processes::{BeadSize, WeldProcess};

/// Upper bound (exclusive) of the thin speed bracket, mm
pub const THIN_LIMIT_MM: f64 = 20.0;
/// Upper bound (exclusive) of the medium speed bracket, mm
pub const MEDIUM_LIMIT_MM: f64 = 40.0;
/// Upper bounds (exclusive) of operator-factor brackets r1..r5, mm
pub const FACTOR_LIMITS_MM: [f64; 5] = [12.0, 18.0, 25.0, 35.0, 50.0];

// ============================================================================
// Brackets
// ============================================================================

/// Thickness bracket for travel speed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedBracket {
    Thin,
    Medium,
    Thick,
}

impl SpeedBracket {
    pub fn from_thickness(thickness_mm: f64) -> Self {
        if thickness_mm < THIN_LIMIT_MM {
            SpeedBracket::Thin
        } else if thickness_mm < MEDIUM_LIMIT_MM {
            SpeedBracket::Medium
        } else {
            SpeedBracket::Thick
        }
    }
}

impl fmt::Display for SpeedBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedBracket::Thin => write!(f, "thin (< {} mm)", THIN_LIMIT_MM),
            SpeedBracket::Medium => write!(f, "medium ({}-{} mm)", THIN_LIMIT_MM, MEDIUM_LIMIT_MM),
            SpeedBracket::Thick => write!(f, "thick (≥ {} mm)", MEDIUM_LIMIT_MM),
        }
    }
}

/// Thickness bracket for operator factor lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorBracket {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
}

impl FactorBracket {
    pub const ALL: [FactorBracket; 6] = [
        FactorBracket::R1,
        FactorBracket::R2,
        FactorBracket::R3,
        FactorBracket::R4,
        FactorBracket::R5,
        FactorBracket::R6,
    ];

    pub fn from_thickness(thickness_mm: f64) -> Self {
        FACTOR_LIMITS_MM
            .iter()
            .position(|limit| thickness_mm < *limit)
            .map(|i| FactorBracket::ALL[i])
            .unwrap_or(FactorBracket::R6)
    }
}

// ============================================================================
// Travel Speeds
// ============================================================================

/// Travel speed (mm/min) per process, one map per thickness bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSpeedTable {
    pub thin: BTreeMap<WeldProcess, f64>,
    pub medium: BTreeMap<WeldProcess, f64>,
    pub thick: BTreeMap<WeldProcess, f64>,
}

impl TravelSpeedTable {
    /// Row for a bracket
    pub fn row(&self, bracket: SpeedBracket) -> &BTreeMap<WeldProcess, f64> {
        match bracket {
            SpeedBracket::Thin => &self.thin,
            SpeedBracket::Medium => &self.medium,
            SpeedBracket::Thick => &self.thick,
        }
    }

    /// Raw lookup without fallback
    pub fn get(&self, bracket: SpeedBracket, process: WeldProcess) -> Option<f64> {
        self.row(bracket).get(&process).copied()
    }

    pub fn validate(&self) -> CalcResult<()> {
        for (name, row) in [("thin", &self.thin), ("medium", &self.medium), ("thick", &self.thick)] {
            for (process, speed) in row {
                if !(speed.is_finite() && *speed > 0.0) {
                    return Err(CalcError::invalid_input(
                        format!("travel_speeds.{}.{}", name, process),
                        speed.to_string(),
                        "Travel speed must be positive",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for TravelSpeedTable {
    fn default() -> Self {
        use WeldProcess::*;
        TravelSpeedTable {
            thin: BTreeMap::from([(Gtaw, 80.0), (Smaw, 150.0), (Gmaw, 250.0), (Fcaw, 300.0), (Saw, 450.0)]),
            medium: BTreeMap::from([(Gtaw, 70.0), (Smaw, 140.0), (Gmaw, 230.0), (Fcaw, 280.0), (Saw, 500.0)]),
            thick: BTreeMap::from([(Gtaw, 60.0), (Smaw, 130.0), (Gmaw, 220.0), (Fcaw, 260.0), (Saw, 550.0)]),
        }
    }
}

// ============================================================================
// Operator Factors
// ============================================================================

/// Labor-time multipliers applied to raw arc time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatorFactor {
    /// Applied to inside (and pipe root/fill/cap) zones
    pub inside: f64,
    /// Applied to outside and fillet zones
    pub outside: f64,
}

impl OperatorFactor {
    pub fn new(inside: f64, outside: f64) -> Self {
        OperatorFactor { inside, outside }
    }
}

/// Operator factors for brackets r1..r6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorFactorTable {
    pub r1: OperatorFactor,
    pub r2: OperatorFactor,
    pub r3: OperatorFactor,
    pub r4: OperatorFactor,
    pub r5: OperatorFactor,
    pub r6: OperatorFactor,
}

impl OperatorFactorTable {
    pub fn get(&self, bracket: FactorBracket) -> OperatorFactor {
        match bracket {
            FactorBracket::R1 => self.r1,
            FactorBracket::R2 => self.r2,
            FactorBracket::R3 => self.r3,
            FactorBracket::R4 => self.r4,
            FactorBracket::R5 => self.r5,
            FactorBracket::R6 => self.r6,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        for bracket in FactorBracket::ALL {
            let factor = self.get(bracket);
            for (side, value) in [("inside", factor.inside), ("outside", factor.outside)] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(CalcError::invalid_input(
                        format!("operator_factors.{:?}.{}", bracket, side).to_lowercase(),
                        value.to_string(),
                        "Operator factor must be positive",
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for OperatorFactorTable {
    fn default() -> Self {
        OperatorFactorTable {
            r1: OperatorFactor::new(1.6, 1.8),
            r2: OperatorFactor::new(1.7, 1.9),
            r3: OperatorFactor::new(1.8, 2.0),
            r4: OperatorFactor::new(1.9, 2.2),
            r5: OperatorFactor::new(2.0, 2.4),
            r6: OperatorFactor::new(2.2, 2.6),
        }
    }
}

// ============================================================================
// Lookups
// ============================================================================

/// Outcome of a table lookup that may fall back to a configured default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup<T> {
    pub value: T,
    pub used_fallback: bool,
}

/// Travel speed for a process. `Skip` resolves to 0; a missing key resolves to
/// `fallback_mm_min`.
pub fn lookup_speed(
    table: &TravelSpeedTable,
    bracket: SpeedBracket,
    process: WeldProcess,
    fallback_mm_min: f64,
) -> Lookup<f64> {
    if process.is_skip() {
        return Lookup { value: 0.0, used_fallback: false };
    }
    match table.get(bracket, process) {
        Some(value) => Lookup { value, used_fallback: false },
        None => Lookup { value: fallback_mm_min, used_fallback: true },
    }
}

/// Bead size for a process, falling back to `fallback` when missing.
pub fn lookup_bead(
    beads: &BTreeMap<WeldProcess, BeadSize>,
    process: WeldProcess,
    fallback: BeadSize,
) -> Lookup<BeadSize> {
    match beads.get(&process) {
        Some(bead) => Lookup { value: *bead, used_fallback: false },
        None => Lookup { value: fallback, used_fallback: !process.is_skip() },
    }
}

/// Speed and factor rows resolved once per weld item from its thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRates {
    pub thickness_mm: f64,
    pub speed_bracket: SpeedBracket,
    pub factor_bracket: FactorBracket,
    pub operator_factor: OperatorFactor,
}

pub fn resolve_rates(thickness_mm: f64, factors: &OperatorFactorTable) -> ResolvedRates {
    let factor_bracket = FactorBracket::from_thickness(thickness_mm);
    ResolvedRates {
        thickness_mm,
        speed_bracket: SpeedBracket::from_thickness(thickness_mm),
        factor_bracket,
        operator_factor: factors.get(factor_bracket),
    }
}
