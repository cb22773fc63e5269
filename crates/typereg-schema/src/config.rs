//! # Validator Configuration
//!
//! Knobs for how failures are labeled and how much detail array checks
//! report. Defaults reproduce the established reporting contract exactly;
//! every field is optional when deserializing.
//!
//! ```
//! use typereg_schema::{ArrayReporting, ValidatorConfig};
//!
//! let config: ValidatorConfig =
//!     serde_json::from_str(r#"{ "array_reporting": "per_element" }"#).unwrap();
//! assert_eq!(config.array_reporting, ArrayReporting::PerElement);
//! ```

use serde::{Deserialize, Serialize};
use typereg_core::Value;

/// Configuration for the validator engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Path label of a failure when a bare value (not a field) mismatches.
    pub primitive_label: PrimitiveLabel,
    /// Detail level of array union failures.
    pub array_reporting: ArrayReporting,
}

/// How to label a failure that has no field path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveLabel {
    /// Use the value's own display form, e.g. `"2"` or `"undefined"`.
    #[default]
    ValueDisplay,
    /// Use a fixed sentinel string.
    Fixed(String),
}

impl PrimitiveLabel {
    /// Label for `value` under this policy.
    pub fn label(&self, value: &Value) -> String {
        match self {
            Self::ValueDisplay => value.to_string(),
            Self::Fixed(sentinel) => sentinel.clone(),
        }
    }
}

/// Detail level for array union checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayReporting {
    /// One failure for the whole array; offending elements are not named.
    #[default]
    Coarse,
    /// One failure per element that matches no member of the union.
    PerElement,
}
