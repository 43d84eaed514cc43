use crate::common::enums::SmoothingAlignment;

/// Fixed-size moving average.
///
/// A position only gets a value when the whole window fits inside the input,
/// there is no partial-window averaging at the edges.
#[derive(Debug, Clone, Copy)]
pub struct RollingMean {
    window: usize,
    alignment: SmoothingAlignment,
}

impl RollingMean {
    pub fn new(window: usize, alignment: SmoothingAlignment) -> Self {
        Self { window, alignment }
    }

    /// Index range `[begin, end)` averaged for position `i`, if it fits in `len` values
    fn bounds(&self, i: usize, len: usize) -> Option<(usize, usize)> {
        let (before, after) = match self.alignment {
            // the extra point of an even window goes to the left
            SmoothingAlignment::Centered => (self.window / 2, (self.window - 1) / 2),
            SmoothingAlignment::Trailing => (self.window - 1, 0),
        };
        let begin = i.checked_sub(before)?;
        let end = i + after + 1;
        (end <= len).then_some((begin, end))
    }

    pub fn apply(&self, values: &[f64]) -> Vec<Option<f64>> {
        if self.window == 0 {
            return vec![None; values.len()];
        }

        (0..values.len())
            .map(|i| {
                self.bounds(i, values.len()).map(|(begin, end)| {
                    values[begin..end].iter().sum::<f64>() / self.window as f64
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_one_is_identity() {
        let values = [1500.3, 1550.7, 1600.1];
        for alignment in [SmoothingAlignment::Centered, SmoothingAlignment::Trailing] {
            let out = RollingMean::new(1, alignment).apply(&values);
            assert_eq!(out, vec![Some(1500.3), Some(1550.7), Some(1600.1)]);
        }
    }

    #[test]
    fn test_centered_odd_window() {
        let out = RollingMean::new(3, SmoothingAlignment::Centered).apply(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out, vec![None, Some(2.0), Some(3.0), Some(4.0), None]);
    }

    #[test]
    fn test_centered_even_window() {
        let out = RollingMean::new(2, SmoothingAlignment::Centered).apply(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(out, vec![None, Some(1.5), Some(2.5), Some(3.5)]);

        let out = RollingMean::new(4, SmoothingAlignment::Centered)
            .apply(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(out, vec![None, None, Some(2.5), Some(3.5), Some(4.5), None]);
    }

    #[test]
    fn test_trailing_window() {
        let out = RollingMean::new(3, SmoothingAlignment::Trailing).apply(&[3.0, 6.0, 9.0, 12.0]);
        assert_eq!(out, vec![None, None, Some(6.0), Some(9.0)]);
    }

    #[test]
    fn test_full_length_window() {
        let out = RollingMean::new(3, SmoothingAlignment::Centered).apply(&[1.0, 2.0, 6.0]);
        assert_eq!(out, vec![None, Some(3.0), None]);
    }

    #[test]
    fn test_zero_window_yields_nothing() {
        let out = RollingMean::new(0, SmoothingAlignment::Centered).apply(&[1.0, 2.0]);
        assert_eq!(out, vec![None, None]);
    }
}
