use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConditionsError {
    #[error("pH {0} is outside the physical range [0, 14]")]
    PhOutOfRange(f64),
}

/// The fixed experimental conditions a measurement was taken under.
///
/// KINOMEscan panels are run at a single pH, so for now this is the only
/// condition tracked. Two measurements are comparable only when their
/// conditions compare equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssayConditions {
    ph: f64,
}

impl AssayConditions {
    /// Creates conditions with the given pH.
    ///
    /// # Errors
    ///
    /// Returns [`ConditionsError::PhOutOfRange`] when the value is not a
    /// finite number in `[0, 14]`.
    pub fn new(ph: f64) -> Result<Self, ConditionsError> {
        if !ph.is_finite() || !(0.0..=14.0).contains(&ph) {
            return Err(ConditionsError::PhOutOfRange(ph));
        }
        Ok(Self { ph })
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }
}

impl Default for AssayConditions {
    /// KINOMEscan assays are run at physiological pH 7.0.
    fn default() -> Self {
        Self { ph: 7.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_physical_ph() {
        let conditions = AssayConditions::new(7.4).unwrap();
        assert_eq!(conditions.ph(), 7.4);
    }

    #[test]
    fn new_rejects_out_of_range_ph() {
        assert!(AssayConditions::new(-0.5).is_err());
        assert!(AssayConditions::new(14.5).is_err());
        assert!(AssayConditions::new(f64::NAN).is_err());
    }

    #[test]
    fn default_is_physiological_ph() {
        assert_eq!(AssayConditions::default().ph(), 7.0);
    }
}
