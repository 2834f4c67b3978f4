//! # Weld Geometry Equations
//!
//! Fundamental formulas used by the geometry resolver. Keeping them in one
//! place lets each be checked against a sketch of the joint in isolation.
//!
//! ## Modules
//!
//! - [`groove`] - Groove depths, bevel widths, trapezoid/root-face/fillet areas
//!
//! ## Conventions
//!
//! - **Lengths**: millimeters
//! - **Angles**: degrees, measured from the joint axis (0° = square edge)
//! - **Negative geometry**: clamped to zero, never propagated

pub mod groove;

pub use groove::{
    bevel_width,
    circumference,
    double_sided_depths,
    fillet_area,
    fillet_leg,
    groove_top_width,
    root_face_area,
    single_sided_depth,
    swept_volume,
    trapezoid_area,
};
