use super::complex::ProteinLigandComplex;
use super::conditions::AssayConditions;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum MeasurementError {
    #[error("Percentage displacement for {complex} is not a finite number")]
    NonFinite { complex: String },
}

/// A percentage-displacement readout for one protein-ligand complex.
///
/// The value records how much the ligand displaces the reference probe from
/// the kinase. Values outside `[0, 100]` are kept as-is: negative and
/// above-100 displacements occur in real KINOMEscan sheets and carry
/// signal. Only non-finite values are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentDisplacement {
    value: f64,
    conditions: AssayConditions,
    complex: ProteinLigandComplex,
}

impl PercentDisplacement {
    /// Binds a scalar readout to a complex and its assay conditions.
    ///
    /// # Errors
    ///
    /// Returns [`MeasurementError::NonFinite`] for NaN or infinite values.
    pub fn new(
        value: f64,
        conditions: AssayConditions,
        complex: ProteinLigandComplex,
    ) -> Result<Self, MeasurementError> {
        if !value.is_finite() {
            return Err(MeasurementError::NonFinite {
                complex: complex.to_string(),
            });
        }
        Ok(Self {
            value,
            conditions,
            complex,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn conditions(&self) -> &AssayConditions {
        &self.conditions
    }

    pub fn complex(&self) -> &ProteinLigandComplex {
        &self.complex
    }
}

impl std::fmt::Display for PercentDisplacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}% displacement for {}", self.value, self.complex)
    }
}
