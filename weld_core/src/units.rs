//! # Unit Types
//!
//! Type-safe wrappers for the units used by the estimator. These are thin
//! `f64` newtypes that serialize as bare numbers.
//!
//! ## Metric Units (Primary)
//!
//! Weldtime works in millimeters and minutes internally:
//! - Length: millimeters (mm), meters (m)
//! - Area: square millimeters (mm²)
//! - Volume: cubic millimeters (mm³), cubic centimeters (cm³)
//! - Travel speed: millimeters per minute (mm/min)
//! - Time: minutes (min), hours (h)
//! - Mass: kilograms (kg)
//!
//! ## Example
//!
//! ```rust
//! use weld_core::units::{Hours, Minutes, Millimeters, Meters};
//!
//! let arc: Hours = Minutes(90.0).into();
//! assert_eq!(arc.0, 1.5);
//!
//! let length: Meters = Millimeters(1500.0).into();
//! assert_eq!(length.0, 1.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Volume in cubic millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuMm(pub f64);

/// Volume in cubic centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuCm(pub f64);

impl From<CuMm> for CuCm {
    fn from(mm3: CuMm) -> Self {
        CuCm(mm3.0 / 1000.0)
    }
}

impl From<CuCm> for CuMm {
    fn from(cm3: CuCm) -> Self {
        CuMm(cm3.0 * 1000.0)
    }
}

impl SqMm {
    /// Sweep a cross-section along a weld length
    pub fn along(self, length: Millimeters) -> CuMm {
        CuMm(self.0 * length.0)
    }
}

impl CuMm {
    /// Mass of this volume at a density given in kg/mm³
    pub fn mass_at(self, density_kg_mm3: f64) -> Kilograms {
        Kilograms(self.0 * density_kg_mm3)
    }
}

// ============================================================================
// Speed and Time Units
// ============================================================================

/// Travel speed in millimeters per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MmPerMin(pub f64);

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl From<Minutes> for Hours {
    fn from(min: Minutes) -> Self {
        Hours(min.0 / 60.0)
    }
}

impl From<Hours> for Minutes {
    fn from(h: Hours) -> Self {
        Minutes(h.0 * 60.0)
    }
}

impl MmPerMin {
    /// Time to travel a distance once at this speed. Zero speed gives zero time.
    pub fn time_for(self, distance: Millimeters) -> Minutes {
        if self.0 > 0.0 {
            Minutes(distance.0 / self.0)
        } else {
            Minutes(0.0)
        }
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SqMm);
impl_arithmetic!(CuMm);
impl_arithmetic!(CuCm);
impl_arithmetic!(MmPerMin);
impl_arithmetic!(Minutes);
impl_arithmetic!(Hours);
impl_arithmetic!(Kilograms);
