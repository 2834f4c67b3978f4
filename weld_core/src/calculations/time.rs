//! # Arc Time and Labor Hours
//!
//! ```text
//! arc_minutes = passes × L / speed      passes > 0, speed > 0
//! hours       = arc_minutes / 60 × operator_factor
//! ```
//!
//! Inside zones (and the root/fill/cap zones of pipe joints) take the inside
//! operator factor; outside and fillet zones take the outside factor.

use crate::tables::OperatorFactor;
use crate::units::{Hours, Millimeters, Minutes, MmPerMin};

/// Which operator factor a zone uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorSide {
    Inside,
    Outside,
}

impl FactorSide {
    pub fn pick(&self, factor: OperatorFactor) -> f64 {
        match self {
            FactorSide::Inside => factor.inside,
            FactorSide::Outside => factor.outside,
        }
    }
}

/// Arc time for a number of passes along the weld.
///
/// # Example
/// ```rust
/// use weld_core::calculations::time::arc_time_minutes;
///
/// assert_eq!(arc_time_minutes(4, 1500.0, 300.0), 20.0);
/// assert_eq!(arc_time_minutes(4, 1500.0, 0.0), 0.0);
/// ```
pub fn arc_time_minutes(passes: u32, weld_length_mm: f64, speed_mm_min: f64) -> f64 {
    if passes == 0 || !(speed_mm_min > 0.0) {
        return 0.0;
    }
    let per_pass = MmPerMin(speed_mm_min).time_for(Millimeters(weld_length_mm.max(0.0)));
    (per_pass * passes as f64).value()
}

/// Labor hours from arc time and an operator factor.
///
/// # Example
/// ```rust
/// use weld_core::calculations::time::labor_hours;
///
/// assert_eq!(labor_hours(90.0, 2.0), 3.0);
/// ```
pub fn labor_hours(arc_minutes: f64, operator_factor: f64) -> f64 {
    let arc: Hours = Minutes(arc_minutes.max(0.0)).into();
    (arc * operator_factor.max(0.0)).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_time() {
        assert_eq!(arc_time_minutes(1, 1000.0, 200.0), 5.0);
        assert_eq!(arc_time_minutes(3, 1000.0, 200.0), 15.0);
        assert_eq!(arc_time_minutes(0, 1000.0, 200.0), 0.0);
        assert_eq!(arc_time_minutes(3, 1000.0, -10.0), 0.0);
        assert_eq!(arc_time_minutes(3, 1000.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_labor_hours() {
        assert_eq!(labor_hours(60.0, 1.0), 1.0);
        assert_eq!(labor_hours(30.0, 2.2), 1.1);
        assert_eq!(labor_hours(0.0, 2.2), 0.0);
    }

    #[test]
    fn test_factor_side() {
        let factor = OperatorFactor::new(1.8, 2.0);
        assert_eq!(FactorSide::Inside.pick(factor), 1.8);
        assert_eq!(FactorSide::Outside.pick(factor), 2.0);
    }
}
