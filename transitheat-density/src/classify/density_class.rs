use std::fmt::Display;

/// one of `steps + 1` evenly spaced density levels in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DensityClass {
    level: u32,
    steps: u32,
}

impl DensityClass {
    /// quantizes a normalized density sample. halfway samples round to the
    /// even level, and samples outside [0, 1] are clamped first.
    pub fn quantize(sample: f64, steps: u32) -> DensityClass {
        let clamped = if sample.is_nan() {
            0.0
        } else {
            sample.clamp(0.0, 1.0)
        };
        let level = (clamped * steps as f64).round_ties_even() as u32;
        DensityClass {
            level: level.min(steps),
            steps,
        }
    }

    pub fn zero(steps: u32) -> DensityClass {
        DensityClass { level: 0, steps }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// the class as a density value, `level / steps`
    pub fn value(&self) -> f64 {
        self.level as f64 / self.steps as f64
    }

    /// strict comparison of class values, `|a - b| < epsilon`
    pub fn within(&self, other: &DensityClass, epsilon: f64) -> bool {
        (self.value() - other.value()).abs() < epsilon
    }
}

impl Display for DensityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
