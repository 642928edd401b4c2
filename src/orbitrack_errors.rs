use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrbitrackError {
    #[error("Invalid eccentricity {0}: closed orbits require 0 <= e < 1")]
    InvalidEccentricity(f64),

    #[error("Invalid semi-major axis {0}: must be finite and > 0")]
    InvalidSemiMajorAxis(f64),

    #[error("Orbital element is not finite: {0}")]
    NonFiniteElement(String),

    #[error("Invalid path resolution {0}: at least one segment is required")]
    InvalidPathResolution(usize),

    #[error("Invalid propagation parameter: {0}")]
    InvalidPropagationParameter(String),

    #[error("Unable to parse orbital element `{field}` from {value:?}")]
    ParseElement { field: String, value: String },

    #[error("Unknown orbit preset: {0}")]
    UnknownPreset(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for OrbitrackError {
    fn eq(&self, other: &Self) -> bool {
        use OrbitrackError::*;
        match (self, other) {
            (InvalidEccentricity(a), InvalidEccentricity(b)) => a.to_bits() == b.to_bits(),
            (InvalidSemiMajorAxis(a), InvalidSemiMajorAxis(b)) => a.to_bits() == b.to_bits(),
            (NonFiniteElement(a), NonFiniteElement(b)) => a == b,
            (InvalidPathResolution(a), InvalidPathResolution(b)) => a == b,
            (InvalidPropagationParameter(a), InvalidPropagationParameter(b)) => a == b,
            (
                ParseElement {
                    field: fa,
                    value: va,
                },
                ParseElement {
                    field: fb,
                    value: vb,
                },
            ) => fa == fb && va == vb,
            (UnknownPreset(a), UnknownPreset(b)) => a == b,

            // Wrapped foreign errors: equal if same variant
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
