use crate::params::ParameterField;

/// Rejected galaxy or background parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A float parameter was NaN or infinite.
    NonFinite { field: &'static str, value: f32 },
    /// A parameter that must be strictly positive was zero or negative.
    NotPositive { field: &'static str, value: f32 },
    /// A parameter that must be non-negative was negative.
    Negative { field: &'static str, value: f32 },
    /// A color string was not `#rrggbb`.
    InvalidColor(String),
    /// A settings key did not name any parameter.
    UnknownField(String),
    /// A numeric value was supplied for a color field or the reverse.
    WrongValueType {
        field: ParameterField,
        expected: &'static str,
    },
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterError::NonFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
            ParameterError::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero, got {}", field, value)
            }
            ParameterError::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            ParameterError::InvalidColor(raw) => {
                write!(f, "invalid color '{}', expected #rrggbb", raw)
            }
            ParameterError::UnknownField(key) => write!(f, "unknown parameter '{}'", key),
            ParameterError::WrongValueType { field, expected } => {
                write!(f, "{} expects a {} value", field.key(), expected)
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Failure to read or interpret a galaxy preset file.
#[derive(Debug)]
pub enum PresetError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    InvalidParameters(ParameterError),
}

impl From<std::io::Error> for PresetError {
    fn from(err: std::io::Error) -> Self {
        PresetError::IoError(err)
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(err: serde_json::Error) -> Self {
        PresetError::JsonError(err)
    }
}

impl From<ParameterError> for PresetError {
    fn from(err: ParameterError) -> Self {
        PresetError::InvalidParameters(err)
    }
}

impl std::fmt::Display for PresetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetError::IoError(e) => write!(f, "IO error: {}", e),
            PresetError::JsonError(e) => write!(f, "JSON error: {}", e),
            PresetError::InvalidParameters(e) => write!(f, "Invalid parameters: {}", e),
        }
    }
}

impl std::error::Error for PresetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresetError::IoError(e) => Some(e),
            PresetError::JsonError(e) => Some(e),
            PresetError::InvalidParameters(e) => Some(e),
        }
    }
}
