/// Running sum of squares, fed one chunk at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct RmsAccumulator {
    sum_of_squares: f64,
    count: usize,
}

impl RmsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, samples: &[f32]) {
        self.sum_of_squares += samples
            .iter()
            .map(|&s| f64::from(s) * f64::from(s))
            .sum::<f64>();
        self.count += samples.len();
    }

    /// RMS of everything pushed so far. NaN when nothing was pushed: there is no
    /// signal data to measure.
    pub fn rms(&self) -> f32 {
        if self.count == 0 {
            return f32::NAN;
        }
        (self.sum_of_squares / self.count as f64).sqrt() as f32
    }
}

/// Root mean square of `samples`. Empty input yields NaN.
pub fn calculate_rms(samples: &[f32]) -> f32 {
    let mut acc = RmsAccumulator::new();
    acc.push(samples);
    acc.rms()
}

/// Linear amplitude to decibels relative to full scale. Zero maps to -inf.
pub fn to_dbfs(value: f32) -> f32 {
    20.0 * value.abs().log10()
}
