//! # Project Data Structures
//!
//! The `Project` struct is the root container for an estimate. Projects
//! serialize to `.wtp` (Weldtime project) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, estimator, job info, timestamps)
//! ├── settings: EstimatorSettings (bead sizes, speed and factor tables)
//! └── items: HashMap<Uuid, ProjectItem> (weld items with manual hours and quantity)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use weld_core::calculations::{NozzleInput, WeldItem};
//! use weld_core::project::Project;
//!
//! let mut project = Project::new("Jane Estimator", "25-042", "ACME Vessels");
//! project.add_item(WeldItem::Nozzle(NozzleInput::example()));
//!
//! let estimate = project.estimate().unwrap();
//! assert_eq!(estimate.items.len(), 1);
//! assert!(estimate.total_hours > 0.0);
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::activities::{ItemEstimate, ManualActivities};
use crate::calculations::WeldItem;
use crate::errors::CalcResult;
use crate::processes::WeldProcess;
use crate::settings::EstimatorSettings;

/// Current schema version for .wtp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map so they keep stable identities
/// when edited or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    /// Settings every item in this project is estimated with
    #[serde(default)]
    pub settings: EstimatorSettings,

    pub items: HashMap<Uuid, ProjectItem>,
}

impl Project {
    /// Create a new empty project with default settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use weld_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.estimator, "John Doe");
    /// ```
    pub fn new(estimator: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: EstimatorSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Project holding one item of every weld type.
    pub fn demo() -> Self {
        use crate::calculations::{CircumferentialSeamInput, LongitudinalSeamInput, NozzleInput, PipeButtInput};

        let mut project = Project::new("Demo Estimator", "DEMO-001", "Demo Client");
        project.add_entry(ProjectItem {
            item: WeldItem::Nozzle(NozzleInput::example()),
            activities: ManualActivities { fit_up_hours: 2.0, preheat_hours: 1.0, ..Default::default() },
            quantity: 2,
        });
        project.add_entry(ProjectItem {
            item: WeldItem::LongitudinalSeam(LongitudinalSeamInput::example()),
            activities: ManualActivities { grinding_hours: 1.5, nde_hours: 1.0, ..Default::default() },
            quantity: 1,
        });
        project.add_item(WeldItem::CircumferentialSeam(CircumferentialSeamInput::example()));
        project.add_entry(ProjectItem {
            item: WeldItem::PipeButt(PipeButtInput::example()),
            activities: ManualActivities { fit_up_hours: 0.5, ..Default::default() },
            quantity: 6,
        });
        project
    }

    /// Add a weld item with quantity 1 and no manual hours.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: WeldItem) -> Uuid {
        self.add_entry(ProjectItem::new(item))
    }

    /// Add a fully specified project item.
    pub fn add_entry(&mut self, entry: ProjectItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, entry);
        self.touch();
        id
    }

    /// Remove an item by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<ProjectItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&ProjectItem> {
        self.items.get(id)
    }

    /// Get a mutable reference to an item.
    ///
    /// Marks the project as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut ProjectItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Item ids ordered by label, then id, for stable reports.
    pub fn sorted_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.items.keys().copied().collect();
        ids.sort_by(|a, b| {
            let la = self.items[a].item.label();
            let lb = self.items[b].item.label();
            la.cmp(lb).then(a.cmp(b))
        });
        ids
    }

    /// Estimate every item with the project settings.
    ///
    /// Stops at the first invalid item.
    pub fn estimate(&self) -> CalcResult<ProjectEstimate> {
        self.estimate_with(&self.settings)
    }

    /// Estimate every item with explicit settings (e.g., a shop-wide TOML
    /// file overriding the embedded ones).
    pub fn estimate_with(&self, settings: &EstimatorSettings) -> CalcResult<ProjectEstimate> {
        settings.validate()?;
        let mut lines = Vec::with_capacity(self.items.len());
        for id in self.sorted_ids() {
            let entry = &self.items[&id];
            let estimate = entry.estimate(settings).inspect_err(|e| {
                warn!(item = %entry.item.label(), error = %e, "item estimate failed");
            })?;
            lines.push(ProjectLine { id, estimate });
        }
        let estimate = ProjectEstimate::from_lines(&self.meta.job_id, lines);
        debug!(
            job_id = %estimate.job_id,
            items = estimate.items.len(),
            total_hours = estimate.total_hours,
            "project estimate complete"
        );
        Ok(estimate)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Person responsible for the estimate
    pub estimator: String,

    pub job_id: String,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

fn default_quantity() -> u32 {
    1
}

/// A weld item with its manual hours and how many identical welds it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub item: WeldItem,
    #[serde(default)]
    pub activities: ManualActivities,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ProjectItem {
    pub fn new(item: WeldItem) -> Self {
        ProjectItem {
            item,
            activities: ManualActivities::default(),
            quantity: 1,
        }
    }

    pub fn estimate(&self, settings: &EstimatorSettings) -> CalcResult<ItemEstimate> {
        self.activities.validate()?;
        let weld = self.item.calculate(settings)?;
        Ok(ItemEstimate::new(weld, self.activities, self.quantity))
    }
}

/// One estimated project item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectLine {
    pub id: Uuid,
    pub estimate: ItemEstimate,
}

/// Per-item estimates and grand totals for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEstimate {
    pub job_id: String,
    pub items: Vec<ProjectLine>,
    /// Arc-derived labor hours, quantities applied
    pub total_weld_hours: f64,
    pub total_manual_hours: f64,
    pub total_hours: f64,
    pub total_passes: u64,
    pub total_mass_kg: f64,
    /// Arc-derived labor hours per process, quantities applied
    pub hours_by_process: BTreeMap<WeldProcess, f64>,
}

impl ProjectEstimate {
    fn from_lines(job_id: &str, items: Vec<ProjectLine>) -> Self {
        let mut hours_by_process = BTreeMap::new();
        for line in &items {
            let quantity = line.estimate.quantity as f64;
            for zone in &line.estimate.weld.zones {
                for layer in zone.layers.iter().filter(|l| !l.process.is_skip()) {
                    *hours_by_process.entry(layer.process).or_insert(0.0) += layer.hours * quantity;
                }
            }
        }
        ProjectEstimate {
            job_id: job_id.to_string(),
            total_weld_hours: items.iter().map(|l| l.estimate.total_weld_hours()).sum(),
            total_manual_hours: items.iter().map(|l| l.estimate.total_manual_hours()).sum(),
            total_hours: items.iter().map(|l| l.estimate.total_hours).sum(),
            total_passes: items.iter().map(|l| l.estimate.total_passes()).fold(0, u64::saturating_add),
            total_mass_kg: items.iter().map(|l| l.estimate.total_mass_kg()).sum(),
            hours_by_process,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{LongitudinalSeamInput, NozzleInput};

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.estimator, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings, EstimatorSettings::default());
    }

    #[test]
    fn test_project_serialization() {
        let project = Project::demo();
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Demo Estimator"));
        assert!(json.contains("\"type\": \"PipeButt\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, project);
    }

    #[test]
    fn test_item_defaults_when_omitted() {
        let json = serde_json::to_string(&WeldItem::Nozzle(NozzleInput::example())).unwrap();
        let entry: ProjectItem = serde_json::from_str(&format!(r#"{{"item": {}}}"#, json)).unwrap();
        assert_eq!(entry.quantity, 1);
        assert_eq!(entry.activities, ManualActivities::default());
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Estimator", "25-001", "Client");
        let id = project.add_item(WeldItem::Nozzle(NozzleInput::example()));
        assert_eq!(project.item_count(), 1);
        assert!(project.get_item(&id).is_some());

        project.get_item_mut(&id).unwrap().quantity = 3;
        assert_eq!(project.get_item(&id).unwrap().quantity, 3);

        assert!(project.remove_item(&id).is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_estimate_totals() {
        let project = Project::demo();
        let estimate = project.estimate().unwrap();
        assert_eq!(estimate.items.len(), 4);

        let sum: f64 = estimate.items.iter().map(|l| l.estimate.total_hours).sum();
        assert!((estimate.total_hours - sum).abs() < 1e-9);
        assert!((estimate.total_hours - (estimate.total_weld_hours + estimate.total_manual_hours)).abs() < 1e-9);

        let by_process: f64 = estimate.hours_by_process.values().sum();
        assert!((by_process - estimate.total_weld_hours).abs() < 1e-6);
        assert!(estimate.total_mass_kg > 0.0);
    }

    #[test]
    fn test_estimate_order_is_stable() {
        let project = Project::demo();
        let labels: Vec<String> = project
            .estimate()
            .unwrap()
            .items
            .iter()
            .map(|l| l.estimate.label.clone())
            .collect();
        assert_eq!(labels, vec!["CS-1", "LS-1", "N1", "P1"]);
    }

    #[test]
    fn test_invalid_item_fails_estimate() {
        let mut project = Project::new("Estimator", "25-001", "Client");
        let mut seam = LongitudinalSeamInput::example();
        seam.joint.thickness_mm = -3.0;
        project.add_item(WeldItem::LongitudinalSeam(seam));
        assert!(project.estimate().is_err());
    }

    #[test]
    fn test_estimate_with_override_settings() {
        let project = Project::demo();
        let mut slow = EstimatorSettings::default();
        for factor in [
            &mut slow.operator_factors.r1,
            &mut slow.operator_factors.r2,
            &mut slow.operator_factors.r3,
            &mut slow.operator_factors.r4,
            &mut slow.operator_factors.r5,
            &mut slow.operator_factors.r6,
        ] {
            factor.inside *= 2.0;
            factor.outside *= 2.0;
        }
        let base = project.estimate().unwrap();
        let doubled = project.estimate_with(&slow).unwrap();
        assert!((doubled.total_weld_hours - 2.0 * base.total_weld_hours).abs() < 1e-6);
    }
}
