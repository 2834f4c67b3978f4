//! # Groove and Fillet Geometry Formulas
//!
//! Closed-form geometry of weld cross-sections. Every function here is pure
//! and clamps negative geometry to zero instead of propagating it.
//!
//! ## Notation
//!
//! - `t` = Wall/shell thickness
//! - `g` = Root gap (bottom width of the groove)
//! - `f` = Root face (land) height
//! - `d` = Groove depth (bevelled height of one side)
//! - `α` = Bevel angle measured from the joint axis
//! - `b` = Bevel width = d × tan(α)
//! - `s` = Split ratio, percent of `t` welded from the inside
//!
//! ## Cross-Section (double-sided bevel)
//!
//! ```text
//!          ┌── b_in ──┐
//!     ─────\          |─────   ← inside surface
//!           \  d_in   |
//!            \        |
//!     ─────── |  g  | ───────  ← root face f (split f/2 per side)
//!            /        |
//!           /  d_out  |
//!     ─────/          |─────   ← outside surface
//! ```
//!
//! A bevel grows from one wall only; a vee grows from both walls, so its top
//! width carries the bevel width twice.

use std::f64::consts::{PI, SQRT_2};

use crate::units::{Millimeters, SqMm};

/// Weld length of a circular joint: L = π × D
///
/// # Example
/// ```rust
/// use weld_core::equations::groove::circumference;
///
/// let length = circumference(500.0);
/// assert!((length - 1570.796).abs() < 0.001);
/// ```
#[inline]
pub fn circumference(diameter: f64) -> f64 {
    PI * diameter
}

/// Horizontal width a bevel adds over a given depth: b = d × tan(α)
///
/// # Example
/// ```rust
/// use weld_core::equations::groove::bevel_width;
///
/// assert!((bevel_width(20.0, 45.0) - 20.0).abs() < 1e-9);
/// assert!((bevel_width(20.0, 30.0) - 11.547).abs() < 0.001);
/// ```
#[inline]
pub fn bevel_width(depth: f64, angle_deg: f64) -> f64 {
    (depth.max(0.0) * angle_deg.to_radians().tan()).max(0.0)
}

/// Depth of a single-sided groove: d = t − f, clamped to ≥ 0
#[inline]
pub fn single_sided_depth(thickness: f64, root_face: f64) -> f64 {
    (thickness - root_face).max(0.0)
}

/// Depths of a double-sided groove as `(inside, outside)`.
///
/// # Formula
/// ```text
/// d_in  = t × s/100       − f/2
/// d_out = t × (1 − s/100) − f/2
/// ```
///
/// # Example
/// ```rust
/// use weld_core::equations::groove::double_sided_depths;
///
/// let (inside, outside) = double_sided_depths(50.0, 0.0, 70.0);
/// assert!((inside - 35.0).abs() < 1e-9);
/// assert!((outside - 15.0).abs() < 1e-9);
/// ```
#[inline]
pub fn double_sided_depths(thickness: f64, root_face: f64, split_ratio_pct: f64) -> (f64, f64) {
    let fraction = split_ratio_pct / 100.0;
    let inside = thickness * fraction - root_face / 2.0;
    let outside = thickness * (1.0 - fraction) - root_face / 2.0;
    (inside.max(0.0), outside.max(0.0))
}

/// Top width of a groove side.
///
/// - Bevel (one wall): g + b
/// - Vee (both walls): g + 2b
#[inline]
pub fn groove_top_width(root_gap: f64, bevel_width: f64, symmetric: bool) -> f64 {
    let gap = root_gap.max(0.0);
    let bevel = bevel_width.max(0.0);
    if symmetric {
        gap + 2.0 * bevel
    } else {
        gap + bevel
    }
}

/// Trapezoidal area: A = (top + bottom)/2 × d
#[inline]
pub fn trapezoid_area(top_width: f64, bottom_width: f64, depth: f64) -> f64 {
    ((top_width.max(0.0) + bottom_width.max(0.0)) / 2.0 * depth.max(0.0)).max(0.0)
}

/// Rectangular root-face area: A = g × h
#[inline]
pub fn root_face_area(root_gap: f64, height: f64) -> f64 {
    root_gap.max(0.0) * height.max(0.0)
}

/// Fillet leg from its throat: leg = a × √2
#[inline]
pub fn fillet_leg(throat: f64) -> f64 {
    throat.max(0.0) * SQRT_2
}

/// Area of an equal-leg fillet: A = ½ × leg²
///
/// # Example
/// ```rust
/// use weld_core::equations::groove::fillet_area;
///
/// // a = 5 → leg = 7.07, A = 25
/// assert!((fillet_area(5.0) - 25.0).abs() < 1e-9);
/// ```
#[inline]
pub fn fillet_area(throat: f64) -> f64 {
    let leg = fillet_leg(throat);
    0.5 * leg * leg
}

/// Volume of a constant cross-section swept along the weld: V = A × L
#[inline]
pub fn swept_volume(area: f64, weld_length: f64) -> f64 {
    SqMm(area).along(Millimeters(weld_length)).value().max(0.0)
}
