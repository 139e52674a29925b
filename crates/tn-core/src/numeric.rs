use crate::TnError;

/// Travel cost along a segment or path. `INFINITY` means "no connection".
pub type Cost = f64;

/// Tolerances for comparing accumulated costs.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Cost,
    pub rel: Cost,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Cost, b: Cost, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Cost, what: &'static str) -> Result<Cost, TnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TnError::NonFinite { what, value: v })
    }
}

/// Accepts finite costs >= 0.
pub fn ensure_cost(v: Cost, what: &'static str) -> Result<Cost, TnError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(TnError::NegativeCost { what, value: v });
    }
    Ok(v)
}

/// Like `ensure_cost`, but `+inf` is allowed and means "unreachable".
pub fn ensure_cost_or_infinite(v: Cost, what: &'static str) -> Result<Cost, TnError> {
    if v == Cost::INFINITY {
        Ok(v)
    } else {
        ensure_cost(v, what)
    }
}
