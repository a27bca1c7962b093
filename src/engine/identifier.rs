// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::consts::{DEFAULT_VERSION, IDENTIFIER_SEPARATOR};
use crate::errors::ConfigurationError;

/// Names a unit of data flowing through the workflow graph.
///
/// Identifiers are the sole routing key used during wiring: a step producing
/// `X@1.0` is connected to every step consuming `X@1.0`. Equality and hashing are
/// structural over both fields.
///
/// In configuration files an identifier may be written either as a
/// `"name@version"` string or as a `{ name, version }` map. A string without a
/// version gets [`DEFAULT_VERSION`].
///
/// # Example
/// ```
/// use asyncflow::engine::Identifier;
///
/// let a: Identifier = "A@1.0".parse().unwrap();
/// assert_eq!(a, Identifier::new("A", "1.0"));
/// assert_eq!(a.to_string(), "A@1.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "IdentifierRepr")]
pub struct Identifier {
    name: String,
    version: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, IDENTIFIER_SEPARATOR, self.version)
    }
}

impl FromStr for Identifier {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigurationError::InvalidIdentifier {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (name, version) = match s.split_once(IDENTIFIER_SEPARATOR) {
            Some((name, version)) => (name.trim(), version.trim()),
            None => (s.trim(), DEFAULT_VERSION),
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if version.is_empty() {
            return Err(invalid("version is empty"));
        }
        if version.contains(IDENTIFIER_SEPARATOR) {
            return Err(invalid("more than one version separator"));
        }

        Ok(Identifier::new(name, version))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdentifierRepr {
    Text(String),
    Full { name: String, version: String },
}

impl TryFrom<IdentifierRepr> for Identifier {
    type Error = ConfigurationError;

    fn try_from(repr: IdentifierRepr) -> Result<Self, Self::Error> {
        match repr {
            IdentifierRepr::Text(text) => text.parse(),
            IdentifierRepr::Full { name, version } => {
                Identifier::from_str(&format!("{}{}{}", name, IDENTIFIER_SEPARATOR, version))
            }
        }
    }
}
