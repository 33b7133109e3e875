//! Generation options read from the model document's `options` block.

use serde::{Deserialize, Serialize};

use crate::error::ValuegenError;
use crate::property::is_java_identifier;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// How property names are derived from getter method names.
pub enum GetterConvention {
    /// Strip `get`/`is` prefixes only when every getter uses them.
    #[default]
    Auto,
    /// Strip prefixes wherever present.
    Prefixed,
    /// Use method names verbatim.
    Plain,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Options controlling one planning pass.
pub struct PlanOptions {
    #[serde(default)]
    pub getter_convention: GetterConvention,
    /// Simple name of the user's nested builder class.
    #[serde(default = "default_builder_name")]
    pub builder_name: String,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            getter_convention: GetterConvention::default(),
            builder_name: default_builder_name(),
        }
    }
}

impl PlanOptions {
    /// Rejects option values that would produce invalid Java names.
    pub fn validate(&self) -> Result<(), ValuegenError> {
        if !is_java_identifier(&self.builder_name) {
            return Err(ValuegenError::ConfigError(format!(
                "options.builder_name '{}' is not a valid Java identifier",
                self.builder_name
            )));
        }
        Ok(())
    }
}

fn default_builder_name() -> String {
    "Builder".to_string()
}
