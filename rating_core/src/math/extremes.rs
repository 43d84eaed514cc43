/// Positions of the maximum and minimum of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extremes {
    pub max_idx: usize,
    pub min_idx: usize,
}

/// Find the extremes, the earliest occurrence wins on ties.
/// None for an empty input
pub fn find_extremes(values: &[f64]) -> Option<Extremes> {
    let first = *values.first()?;
    let mut res = Extremes {
        max_idx: 0,
        min_idx: 0,
    };
    let (mut max, mut min) = (first, first);

    for (idx, &v) in values.iter().enumerate().skip(1) {
        if v > max {
            max = v;
            res.max_idx = idx;
        }
        if v < min {
            min = v;
            res.min_idx = idx;
        }
    }
    Some(res)
}
