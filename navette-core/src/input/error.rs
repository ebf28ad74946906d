#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} is required")]
    Empty { field: &'static str },
    #[error("{field} value '{value}' is not a number")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} value '{value}' is not a whole number")]
    NotAnInteger { field: &'static str, value: String },
    #[error("{field} value '{value}' is not finite")]
    NotFinite { field: &'static str, value: String },
    #[error("{field} value '{value}' must be {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("expected 'lat,lon' coordinate pair, found '{0}'")]
    MalformedCoordinatePair(String),
    #[error("optimization needs at least {required} delivery points, found {found}")]
    TooFewDeliveryPoints { found: usize, required: usize },
    #[error("no delivery point at index {index}, collector holds {len}")]
    NoSuchPoint { index: usize, len: usize },
}
