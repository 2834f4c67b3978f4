//! # Manual Activities
//!
//! Non-arc work entered by the estimator (fit-up, preheat, grinding, NDE)
//! that is summed alongside the arc-derived labor hours of a weld item.

use serde::{Deserialize, Serialize};

use crate::calculations::{WeldResult, WeldType};
use crate::errors::{CalcError, CalcResult};

/// Manually entered hours for one weld item (per item, before quantity).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualActivities {
    pub fit_up_hours: f64,
    pub preheat_hours: f64,
    pub grinding_hours: f64,
    /// Non-destructive examination
    pub nde_hours: f64,
    pub other_hours: f64,
}

impl ManualActivities {
    pub fn total_hours(&self) -> f64 {
        self.fit_up_hours + self.preheat_hours + self.grinding_hours + self.nde_hours + self.other_hours
    }

    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("fit_up_hours", self.fit_up_hours),
            ("preheat_hours", self.preheat_hours),
            ("grinding_hours", self.grinding_hours),
            ("nde_hours", self.nde_hours),
            ("other_hours", self.other_hours),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Hours must be zero or positive"));
            }
        }
        Ok(())
    }
}

/// Estimate of one project item: arc hours from the engine plus manual hours,
/// multiplied by the item quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEstimate {
    pub label: String,
    pub weld_type: WeldType,
    pub quantity: u32,
    pub weld: WeldResult,
    pub activities: ManualActivities,
    /// Arc-derived labor hours for one item
    pub weld_hours_each: f64,
    /// Manual hours for one item
    pub manual_hours_each: f64,
    /// (weld + manual) × quantity
    pub total_hours: f64,
}

impl ItemEstimate {
    /// # Example
    /// ```rust
    /// use weld_core::activities::{ItemEstimate, ManualActivities};
    /// use weld_core::calculations::{nozzle, NozzleInput};
    /// use weld_core::settings::EstimatorSettings;
    ///
    /// let weld = nozzle::calculate(&NozzleInput::example(), &EstimatorSettings::default()).unwrap();
    /// let activities = ManualActivities { fit_up_hours: 2.0, ..Default::default() };
    /// let estimate = ItemEstimate::new(weld.clone(), activities, 3);
    /// assert!((estimate.total_hours - 3.0 * (weld.total_hours() + 2.0)).abs() < 1e-9);
    /// ```
    pub fn new(weld: WeldResult, activities: ManualActivities, quantity: u32) -> Self {
        let weld_hours_each = weld.total_hours();
        let manual_hours_each = activities.total_hours();
        ItemEstimate {
            label: weld.label.clone(),
            weld_type: weld.weld_type,
            quantity,
            total_hours: (weld_hours_each + manual_hours_each) * quantity as f64,
            weld,
            activities,
            weld_hours_each,
            manual_hours_each,
        }
    }

    pub fn total_weld_hours(&self) -> f64 {
        self.weld_hours_each * self.quantity as f64
    }

    pub fn total_manual_hours(&self) -> f64 {
        self.manual_hours_each * self.quantity as f64
    }

    pub fn total_passes(&self) -> u64 {
        self.weld.total_passes() as u64 * self.quantity as u64
    }

    pub fn total_mass_kg(&self) -> f64 {
        self.weld.volumes.deposited_mass_kg * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{seam, LongitudinalSeamInput};
    use crate::settings::EstimatorSettings;

    #[test]
    fn test_manual_total() {
        let activities = ManualActivities {
            fit_up_hours: 1.5,
            preheat_hours: 0.5,
            grinding_hours: 1.0,
            nde_hours: 2.0,
            other_hours: 0.25,
        };
        assert!((activities.total_hours() - 5.25).abs() < 1e-12);
        assert!(activities.validate().is_ok());
        assert_eq!(ManualActivities::default().total_hours(), 0.0);
    }

    #[test]
    fn test_negative_hours_rejected() {
        let activities = ManualActivities { nde_hours: -1.0, ..Default::default() };
        let err = activities.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_quantity_multiplies() {
        let weld =
            seam::calculate_longitudinal(&LongitudinalSeamInput::example(), &EstimatorSettings::default()).unwrap();
        let activities = ManualActivities { grinding_hours: 1.0, ..Default::default() };
        let one = ItemEstimate::new(weld.clone(), activities, 1);
        let four = ItemEstimate::new(weld, activities, 4);
        assert!((four.total_hours - 4.0 * one.total_hours).abs() < 1e-9);
        assert_eq!(four.total_passes(), 4 * one.total_passes());
        assert_eq!(four.total_manual_hours(), 4.0);

        let none = ItemEstimate::new(one.weld.clone(), activities, 0);
        assert_eq!(none.total_hours, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let activities: ManualActivities = serde_json::from_str(r#"{"preheat_hours": 3.0}"#).unwrap();
        assert_eq!(activities.preheat_hours, 3.0);
        assert_eq!(activities.fit_up_hours, 0.0);
    }
}
