//! Chosen names for generated members.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Access level of a generated member. Never private.
pub enum GeneratedVisibility {
    Public,
    Package,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// A generated member name together with the access level it must use.
pub struct NameAndVisibility {
    name: String,
    visibility: GeneratedVisibility,
}

impl NameAndVisibility {
    pub fn new(name: impl Into<String>, visibility: GeneratedVisibility) -> Self {
        Self {
            name: name.into(),
            visibility,
        }
    }

    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, GeneratedVisibility::Public)
    }

    pub fn package(name: impl Into<String>) -> Self {
        Self::new(name, GeneratedVisibility::Package)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> GeneratedVisibility {
        self.visibility
    }
}

impl fmt::Display for NameAndVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.visibility {
            GeneratedVisibility::Public => write!(f, "public {}", self.name),
            GeneratedVisibility::Package => write!(f, "{}", self.name),
        }
    }
}
