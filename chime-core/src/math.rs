//! Math backend selection and small helpers shared by the DSP primitives.
//!
//! Design goals:
//! - `no_std` ready (guarded by the crate feature `no-std`)
//! - Math backend selection that works in both `std` and `no_std` contexts
//! - Optional `fast-math` approximations for hot paths
//! - Clean, side-effect free helpers that are easy to test
//!
//! Features used by this file:
//! - `fast-math` : enables a polynomial sine approximation (faster, approx.)
//! - `micromath` : prefer micromath intrinsics over libm on no_std targets
//!
//! Conventions:
//! - All functions are `#[inline]` where useful to help the optimizer.
//! - Argument and return domains are documented per function.

#![allow(clippy::excessive_precision)]

use core::f32::consts::PI;

use cfg_if::cfg_if;

// ----------------------------- Math backend selection -----------------------------

cfg_if! {
    // micromath preferred if explicitly requested (works in no_std)
    if #[cfg(feature = "micromath")] {
        use micromath::F32Ext as _;
        #[inline] fn m_sin(x: f32) -> f32 { x.sin() }
        #[inline] fn m_exp(x: f32) -> f32 { x.exp() }
        #[inline] fn m_ln(x: f32) -> f32 { x.ln() }
    // libm (C math) in no_std
    } else if #[cfg(feature = "no-std")] {
        #[inline] fn m_sin(x: f32) -> f32 { libm::sinf(x) }
        #[inline] fn m_exp(x: f32) -> f32 { libm::expf(x) }
        #[inline] fn m_ln(x: f32) -> f32 { libm::logf(x) }
    // std backend
    } else {
        #[inline] fn m_sin(x: f32) -> f32 { x.sin() }
        #[inline] fn m_exp(x: f32) -> f32 { x.exp() }
        #[inline] fn m_ln(x: f32) -> f32 { x.ln() }
    }
}

// --------------------------------- Constants -------------------------------------

/// 2π (commonly useful)
pub const TAU: f32 = 2.0 * PI;

/// A very small epsilon used in silence detection and safe divisions.
pub const EPS_SMALL: f32 = 1.0e-20;

// --------------------------------- Utilities -------------------------------------

/// Clamp into the unit interval. Volumes and envelope levels live in [0,1].
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Snap a decayed amplitude to exact zero once it is inaudible.
/// Keeps release tails from lingering as denormals.
#[inline]
pub fn snap_silent(x: f32, floor: f32) -> f32 {
    if x.abs() < floor {
        0.0
    } else {
        x
    }
}

// --------------------------------- Transcendentals -------------------------------

/// Sine through the selected backend.
#[inline]
pub fn sin(x: f32) -> f32 {
    m_sin(x)
}

/// `x^y` for `x > 0`, via `exp(y ln x)`. Used for per-sample exponential
/// decay ratios, where `x` is a gain ratio in (0, 1].
#[inline]
pub fn powf_pos(x: f32, y: f32) -> f32 {
    if x <= EPS_SMALL {
        return 0.0;
    }
    m_exp(y * m_ln(x))
}

/// Fast sine with range reduction into [-π, π] and a 5th-order odd polynomial.
/// Max abs error ~1e-3 for musical uses when `fast-math` is enabled; falls
/// back to the exact backend otherwise.
#[inline]
pub fn fast_sin(x: f32) -> f32 {
    cfg_if! {
        if #[cfg(feature = "fast-math")] {
            // Range reduce to [-π, π] without making the parameter mutable in the signature.
            let mut xr = x;
            let k = (xr / TAU).round();
            xr -= k * TAU;

            // 5th-order odd polynomial: sin(x) ≈ x * (a + b x^2 + c x^4)
            let x2 = xr * xr;
            xr * (0.999_979_313_3 + x2 * (-0.166_624_432_0 + x2 * 0.008_308_978_98))
        } else {
            m_sin(x)
        }
    }
}

// --------------------------------- Tests (std only) ------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(0.3), 0.3);
    }

    #[test]
    fn powf_pos_matches_std() {
        for (x, y) in [(0.001_f32, 0.5_f32), (0.5, 2.0), (0.9, 100.0)] {
            let got = powf_pos(x, y);
            let want = x.powf(y);
            assert!((got - want).abs() < 1e-5, "x={x} y={y} got={got} want={want}");
        }
    }

    #[test]
    fn snap_silent_kills_tails() {
        assert_eq!(snap_silent(1.0e-4, 1.0e-3), 0.0);
        assert_eq!(snap_silent(0.5, 1.0e-3), 0.5);
    }
}
