use thiserror::Error;

use crate::models::{Field, RegionKey};
use crate::reference::region;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown region `{0}`")]
    UnknownRegion(String),
    #[error("unknown field `{field}` for region {region:?}")]
    UnknownField { region: RegionKey, field: String },
    #[error("field {0:?} cannot be compared across regions")]
    NotComparable(Field),
    #[error("no field could be detected in `{0}`")]
    NoFieldDetected(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

pub const RUNTIME_FALLBACK: &str =
    "I encountered an error. Please try rephrasing your question.";

impl CoreError {
    pub fn apology(&self) -> String {
        match self {
            Self::UnknownRegion(_) => "I don't have information about that ocean.".to_string(),
            Self::UnknownField { region: key, field } => format!(
                "I don't have {} information for the {}.",
                field,
                region(*key).name
            ),
            Self::NotComparable(_) => {
                "I can only compare temperature, salinity, oxygen, or depth across oceans."
                    .to_string()
            }
            Self::NoFieldDetected(_) => RUNTIME_FALLBACK.to_string(),
        }
    }
}
