/// Tolerances used when comparing generated geometry.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
    /// Tolerance on the length of unit vectors
    pub unit: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_UNIT: f64 = 1e-5;

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            unit: Self::DEFAULT_UNIT,
        }
    }

    /// Check if a vector length counts as unit length
    pub fn is_unit(self, length: f64) -> bool {
        (length - 1.0).abs() <= self.unit
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
