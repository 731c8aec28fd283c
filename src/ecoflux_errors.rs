use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcofluxError {
    #[error("Timestamp has no time-of-day component: {0}")]
    MissingTimeOfDay(String),

    #[error("Invalid civil timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Temperature error, no ice exists at {0} K (above the triple point)")]
    NoIceAboveTriplePoint(f64),

    #[error("Invalid saturation vapor pressure method: {0}")]
    InvalidSatVapMethod(String),

    #[error("Invalid Dixon's Q confidence level: {0}")]
    InvalidConfidenceLevel(String),

    #[error("Invalid arccos domain mode: {0}")]
    InvalidAcosDomain(String),

    #[error("Sample size too small: at least {min} data points are required, got {got}")]
    SampleTooSmall { min: usize, got: usize },

    #[error("Sample size too large: at most {max} data points are allowed, got {got}")]
    SampleTooLarge { max: usize, got: usize },

    #[error("At least one of the two tails, `left` or `right`, must be tested")]
    NoTailSelected,

    #[error("Window size ({window}) larger than data size ({len})")]
    WindowLargerThanSeries { window: usize, len: usize },

    #[error("Input lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Not enough finite samples: {needed} needed, got {got}")]
    NotEnoughFiniteSamples { needed: usize, got: usize },

    #[error("Cannot regress on a constant predictor (all x values are identical)")]
    ConstantRegressor,

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),
}

impl PartialEq for EcofluxError {
    fn eq(&self, other: &Self) -> bool {
        use EcofluxError::*;
        match (self, other) {
            (MissingTimeOfDay(a), MissingTimeOfDay(b)) => a == b,
            (InvalidTimestamp(a), InvalidTimestamp(b)) => a == b,
            (NoIceAboveTriplePoint(a), NoIceAboveTriplePoint(b)) => a == b,
            (InvalidSatVapMethod(a), InvalidSatVapMethod(b)) => a == b,
            (InvalidConfidenceLevel(a), InvalidConfidenceLevel(b)) => a == b,
            (InvalidAcosDomain(a), InvalidAcosDomain(b)) => a == b,
            (
                SampleTooSmall { min: a, got: b },
                SampleTooSmall { min: c, got: d },
            ) => a == c && b == d,
            (
                SampleTooLarge { max: a, got: b },
                SampleTooLarge { max: c, got: d },
            ) => a == c && b == d,
            (
                WindowLargerThanSeries { window: a, len: b },
                WindowLargerThanSeries { window: c, len: d },
            ) => a == c && b == d,
            (
                LengthMismatch { left: a, right: b },
                LengthMismatch { left: c, right: d },
            ) => a == c && b == d,
            (
                NotEnoughFiniteSamples { needed: a, got: b },
                NotEnoughFiniteSamples { needed: c, got: d },
            ) => a == c && b == d,
            (RootFindingError(a), RootFindingError(b)) => a == b,

            (NoTailSelected, NoTailSelected) => true,
            (ConstantRegressor, ConstantRegressor) => true,

            _ => false,
        }
    }
}
