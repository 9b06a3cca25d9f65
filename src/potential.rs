//! CPU model of the per-pixel potential pass.
//!
//! These functions compute exactly what `fs_main` in the generated WGSL
//! computes, using the same constants, so the banding and grid can be checked
//! without a GPU. All positions are GL pixel coordinates (y up, pixel centers
//! at `+0.5`).

use glam::{Vec2, Vec3, Vec4};

use crate::charge::{Charge, MAX_CHARGES};

/// Number of bands per unit of `|potential|^BAND_EXPONENT`.
pub const BAND_COUNT: f32 = 25.0;
/// Power applied to `|potential|` before banding, spreading the near-zero range.
pub const BAND_EXPONENT: f32 = 0.3;
/// Spacing of the fine grid lines, in pixels.
pub const GRID_MINOR: f32 = 20.0;
/// Spacing of the coarse grid lines, in pixels.
pub const GRID_MAJOR: f32 = 100.0;
/// How much each grid level darkens a pixel lying on it.
pub const GRID_DARKEN: f32 = 0.2;

/// WGSL `sign`: zero stays zero.
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// WGSL `step(edge, x)`.
fn step(edge: f32, x: f32) -> f32 {
    if x >= edge {
        1.0
    } else {
        0.0
    }
}

/// WGSL `fract`.
fn fract(v: Vec2) -> Vec2 {
    v - v.floor()
}

/// Sum of `sign / |p - c|` over the first [`MAX_CHARGES`] charges.
pub fn potential_at(p: Vec2, charges: &[Charge]) -> f32 {
    charges
        .iter()
        .take(MAX_CHARGES)
        .map(|c| c.sign.as_f32() / (p - c.position).length())
        .sum()
}

/// Snap a potential onto its equipotential band, roughly in `[-1, 1]`.
pub fn quantize(potential: f32) -> f32 {
    sign(potential) * (potential.abs().powf(BAND_EXPONENT) * BAND_COUNT).floor() / BAND_COUNT
}

/// Red for positive bands, blue for negative ones, white at zero.
pub fn band_color(q: f32) -> Vec3 {
    Vec3::new(q, 0.0, -q) + Vec3::splat(1.0 - q.abs())
}

/// Amount subtracted from every channel for the coordinate grid.
pub fn grid_darkening(p: Vec2) -> f32 {
    let minor = fract(p / GRID_MINOR);
    let major = fract(p / GRID_MAJOR);
    (step(minor.x.min(minor.y), 1.0 / GRID_MINOR) + step(major.x.min(major.y), 1.0 / GRID_MAJOR))
        * GRID_DARKEN
}

/// Final RGBA for the pixel centered at `p`.
pub fn shade(p: Vec2, charges: &[Charge]) -> Vec4 {
    let q = quantize(potential_at(p, charges));
    let rgb = band_color(q) - Vec3::splat(grid_darkening(p));
    rgb.extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_empty_field_is_zero() {
        for &(x, y) in &[(0.5, 0.5), (123.5, 456.5), (999.5, 599.5)] {
            assert_eq!(potential_at(Vec2::new(x, y), &[]), 0.0);
        }
        assert_eq!(quantize(0.0), 0.0);
    }

    #[test]
    fn test_empty_field_is_white_off_grid() {
        let color = shade(Vec2::new(37.5, 53.5), &[]);
        assert_eq!(color, Vec4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_field_only_grid_darkens() {
        for y in 0..60 {
            for x in 0..120 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let color = shade(p, &[]);
                let expected = 1.0 - grid_darkening(p);
                assert!((color.x - expected).abs() < EPS);
                assert!((color.y - expected).abs() < EPS);
                assert!((color.z - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_single_charge_falls_off_monotonically() {
        let center = Vec2::new(500.0, 300.0);
        let charges = [Charge::new(center, crate::charge::Sign::Positive)];

        let mut last_potential = f32::INFINITY;
        let mut last_band = f32::INFINITY;
        for d in 1..400 {
            let p = center + Vec2::new(d as f32 + 0.5, 0.0);
            let potential = potential_at(p, &charges);
            let band = quantize(potential);
            assert!(potential > 0.0);
            assert!(potential < last_potential, "potential rose at distance {}", d);
            assert!(band <= last_band, "band rose at distance {}", d);
            last_potential = potential;
            last_band = band;
        }
    }

    #[test]
    fn test_tint_lives_in_red_and_blue() {
        let charges = [Charge::positive(500.0, 300.0), Charge::negative(200.0, 300.0)];
        for x in (0..1000).step_by(7) {
            let p = Vec2::new(x as f32 + 0.5, 301.5);
            let q = quantize(potential_at(p, &charges));
            let rgb = band_color(q);
            assert!((rgb.x - rgb.y - q).abs() < EPS);
            assert!((rgb.y - rgb.z - q).abs() < EPS);
            assert!(rgb.y <= rgb.x.max(rgb.z) + EPS);
        }
    }

    #[test]
    fn test_negative_charge_tints_blue() {
        let charges = [Charge::negative(500.0, 300.0)];
        let color = shade(Vec2::new(505.5, 307.5), &charges);
        assert!(color.z > color.x);
    }

    #[test]
    fn test_quantize_bands() {
        // 1.0^0.3 * 25 = 25 exactly
        assert!((quantize(1.0) - 1.0).abs() < EPS);
        assert!((quantize(-1.0) + 1.0).abs() < EPS);
        let q = quantize(0.01);
        assert!((q * BAND_COUNT - (q * BAND_COUNT).round()).abs() < EPS);
        assert!(q > 0.0 && q < 1.0);
    }

    #[test]
    fn test_grid_lines() {
        // Column 100 lies on both grids, column 20 on the fine one only.
        assert!((grid_darkening(Vec2::new(100.5, 37.5)) - 2.0 * GRID_DARKEN).abs() < EPS);
        assert!((grid_darkening(Vec2::new(20.5, 37.5)) - GRID_DARKEN).abs() < EPS);
        assert!((grid_darkening(Vec2::new(37.5, 40.5)) - GRID_DARKEN).abs() < EPS);
        assert_eq!(grid_darkening(Vec2::new(37.5, 37.5)), 0.0);
    }

    #[test]
    fn test_charges_past_capacity_ignored() {
        let mut charges: Vec<Charge> = (0..MAX_CHARGES)
            .map(|i| Charge::positive(i as f32 * 10.0, 100.0))
            .collect();
        let p = Vec2::new(333.5, 222.5);
        let bounded = potential_at(p, &charges);

        charges.push(Charge::negative(333.0, 222.0));
        assert_eq!(potential_at(p, &charges), bounded);
    }
}
