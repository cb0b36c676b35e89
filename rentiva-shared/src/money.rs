/// Round to 2 decimal places, half away from zero.
///
/// Applied only at the sales-tax and order-total steps; per-day and per-line
/// amounts stay unrounded so repeated recomputation cannot drift.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
