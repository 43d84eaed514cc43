use std::cmp::Ordering;

/// Percentage change of `delta` relative to `reference`.
/// None when the reference is zero
pub fn pct_change(delta: f64, reference: f64) -> Option<f64> {
    if reference == 0.0 {
        None
    } else {
        Some(delta / reference * 100.0)
    }
}

/// Descending order on floats, ties fall back to `tie`
pub fn cmp_desc(a: f64, b: f64, tie: Ordering) -> Ordering {
    b.total_cmp(&a).then(tie)
}
