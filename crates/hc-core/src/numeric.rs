/// Floating point type used throughout the system.
pub type Real = f64;

#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Looser bounds for values coming back from the LP solver.
    pub fn solver() -> Self {
        Self {
            abs: 1e-6,
            rel: 1e-5,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Round to a fixed number of decimal places.
pub fn round_to(v: Real, precision: u32) -> Real {
    let scale = 10_f64.powi(precision as i32);
    (v * scale).round() / scale
}
