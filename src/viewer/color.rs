use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Value `fraction` of the way from `min` to `max`, never leaving the
    /// range. The endpoints are returned exactly.
    pub fn interpolate(&self, fraction: f64) -> f64 {
        if fraction <= 0.0 {
            return self.min;
        }
        if fraction >= 1.0 {
            return self.max;
        }
        let span = self.span();
        let value = if span.is_finite() {
            span * fraction + self.min
        } else {
            // f64::MIN..f64::MAX overflows the span
            self.min * (1.0 - fraction) + self.max * fraction
        };
        value.clamp(self.min, self.max)
    }

    /// Sub-range between two fractions of this range.
    pub fn narrow(&self, low: f64, high: f64) -> Self {
        Self::new(self.interpolate(low), self.interpolate(high))
    }
}
