//! Error types for the garden app.
//!
//! Store lookups never fail (unknown ids are no-ops); these errors cover the
//! edges where text from the page or from storage is turned into typed values.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GardenError>;

#[derive(Error, Debug)]
pub enum GardenError {
    #[error("unknown tree species: '{0}'")]
    UnknownSpecies(String),

    #[error("unknown growth stage: '{0}'")]
    UnknownStage(String),

    #[error("unknown challenge category: '{0}'")]
    UnknownCategory(String),

    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("browser API unavailable: {0}")]
    Dom(String),
}

impl From<wasm_bindgen::JsValue> for GardenError {
    fn from(v: wasm_bindgen::JsValue) -> Self {
        GardenError::Dom(v.as_string().unwrap_or_else(|| format!("{:?}", v)))
    }
}
