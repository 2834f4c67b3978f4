//! # weld_core - Weld Labor Estimation Engine
//!
//! `weld_core` estimates the labor time of welding joints in pressure-vessel
//! fabrication: nozzle penetrations, longitudinal and circumferential shell
//! seams, and pipe butt joints. From joint geometry and the processes assigned
//! to each zone it computes weld-metal volume, pass counts, arc time, and
//! labor hours.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of (input, settings); identical inputs give bit-identical results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit Settings**: Tables travel with every call, never as globals
//!
//! ## Quick Start
//!
//! ```rust
//! use weld_core::calculations::{NozzleInput, WeldItem};
//! use weld_core::settings::EstimatorSettings;
//!
//! let item = WeldItem::Nozzle(NozzleInput::example());
//! let result = item.calculate(&EstimatorSettings::default()).unwrap();
//!
//! println!("{} passes, {:.1} h", result.passes.total, result.times.total_hours);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! # assert!(json.contains("total_hours"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Estimation pipeline and the four weld types
//! - [`equations`] - Groove geometry formulas
//! - [`processes`] - Welding processes, bead sizes, width-threshold layers
//! - [`tables`] - Thickness brackets, travel speeds, operator factors
//! - [`settings`] - Estimator configuration (TOML)
//! - [`activities`] - Manually entered non-arc hours
//! - [`project`] - Project container and project-wide estimates
//! - [`file_io`] - Atomic project saves and version-checked loads
//! - [`memo`] - Last-result memoization for interactive callers
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod activities;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod memo;
pub mod processes;
pub mod project;
pub mod settings;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{WeldItem, WeldResult, WeldType};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use processes::WeldProcess;
pub use project::{Project, ProjectEstimate, ProjectMetadata};
pub use settings::EstimatorSettings;
