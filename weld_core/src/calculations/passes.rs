//! # Pass Counting
//!
//! Converts a deposited volume into a whole number of passes.
//!
//! ```text
//! passes = ceil(V / (h × w × L))     V, h, w, L > 0
//!        = 0                         otherwise
//! ```
//!
//! Any strictly positive volume yields at least one pass, even when the bead
//! is larger than the metal it has to deposit.

use crate::processes::BeadSize;

/// Number of passes needed to deposit `volume_mm3` with `bead` along
/// `weld_length_mm`.
///
/// # Example
/// ```rust
/// use weld_core::calculations::passes::count_passes;
/// use weld_core::processes::BeadSize;
///
/// let bead = BeadSize::new(3.0, 10.0);
/// // 30 mm² per pass over 1000 mm → 30 000 mm³ per pass
/// assert_eq!(count_passes(90_000.0, bead, 1000.0), 3);
/// assert_eq!(count_passes(90_001.0, bead, 1000.0), 4);
/// assert_eq!(count_passes(1.0, bead, 1000.0), 1);
/// assert_eq!(count_passes(0.0, bead, 1000.0), 0);
/// ```
pub fn count_passes(volume_mm3: f64, bead: BeadSize, weld_length_mm: f64) -> u32 {
    let valid = |x: f64| x.is_finite() && x > 0.0;
    if !(valid(volume_mm3) && valid(bead.height_mm) && valid(bead.width_mm) && valid(weld_length_mm)) {
        return 0;
    }
    let per_pass = bead.area_mm2() * weld_length_mm;
    let raw = (volume_mm3 / per_pass).ceil();
    if raw >= u32::MAX as f64 {
        u32::MAX
    } else {
        (raw as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_iff_any_input_non_positive() {
        let bead = BeadSize::new(3.0, 10.0);
        assert_eq!(count_passes(0.0, bead, 1000.0), 0);
        assert_eq!(count_passes(-5.0, bead, 1000.0), 0);
        assert_eq!(count_passes(100.0, BeadSize::new(0.0, 10.0), 1000.0), 0);
        assert_eq!(count_passes(100.0, BeadSize::new(3.0, -1.0), 1000.0), 0);
        assert_eq!(count_passes(100.0, bead, 0.0), 0);
        assert!(count_passes(100.0, bead, 1000.0) > 0);
    }

    #[test]
    fn test_tiny_volume_gets_one_pass() {
        assert_eq!(count_passes(1e-9, BeadSize::new(5.0, 20.0), 5000.0), 1);
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(count_passes(300_000.0, BeadSize::new(3.0, 10.0), 2000.0), 5);
    }

    #[test]
    fn test_monotonic_in_volume() {
        let bead = BeadSize::new(3.0, 10.0);
        let mut last = 0;
        for i in 0..200 {
            let passes = count_passes(i as f64 * 1_000.0, bead, 500.0);
            assert!(passes >= last);
            last = passes;
        }
    }

    #[test]
    fn test_non_increasing_in_bead_and_length() {
        let volume = 250_000.0;
        let mut last = u32::MAX;
        for h in 1..10 {
            let passes = count_passes(volume, BeadSize::new(h as f64, 10.0), 1000.0);
            assert!(passes <= last);
            last = passes;
        }
        let mut last = u32::MAX;
        for w in 1..20 {
            let passes = count_passes(volume, BeadSize::new(3.0, w as f64), 1000.0);
            assert!(passes <= last);
            last = passes;
        }
        let mut last = u32::MAX;
        for l in 1..50 {
            let passes = count_passes(volume, BeadSize::new(3.0, 10.0), l as f64 * 100.0);
            assert!(passes <= last);
            last = passes;
        }
    }
}
