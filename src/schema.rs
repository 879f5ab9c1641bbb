//! Self-describing data structure parsing.
//!
//! A data structure document declares its own registry coordinates in a
//! `self` section (vendor, name, format, version). This module extracts
//! those coordinates into a [`Deployment`] descriptor, handling both bare
//! documents and documents already wrapped in a `{meta, data}` envelope.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

/// Errors from extracting a deployment descriptor out of a document.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpecError {
    /// The document is not an object, the `self` (or `data.self`) section
    /// is absent, or a required field is missing or not a string.
    #[error("data structure does not include a correct 'self' element")]
    Shape,
    /// The version string is not three `-`-separated non-negative integers.
    #[error("data structure spec is incorrect: vendor, name, format or version is invalid")]
    Value,
}

/// Registry coordinates of a data structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStructure {
    pub vendor: String,
    pub name: String,
    pub format: String,
}

/// A data structure version in `model-revision-addition` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub model: u64,
    pub revision: u64,
    pub addition: u64,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.model, self.revision, self.addition)
    }
}

impl FromStr for Version {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(SpecError::Value);
        }
        let component = |p: &str| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SpecError::Value);
            }
            p.parse::<u64>().map_err(|_| SpecError::Value)
        };
        Ok(Version {
            model: component(parts[0])?,
            revision: component(parts[1])?,
            addition: component(parts[2])?,
        })
    }
}

/// Everything the promotion endpoint needs to identify a schema version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub data_structure: DataStructure,
    pub version: Version,
}

/// Reads a data structure document and extracts its self-describing section.
///
/// With `includes_meta` the `self` section is expected under `data.self`
/// (the document carries a meta envelope); without it, at the top level.
/// A document whose shape does not match the flag is an error; the two
/// are never reconciled silently.
pub fn resolve(document: &Value, includes_meta: bool) -> Result<Deployment, SpecError> {
    let root = document.as_object().ok_or(SpecError::Shape)?;
    let self_section = if includes_meta {
        root.get("data")
            .and_then(Value::as_object)
            .and_then(|data| data.get("self"))
    } else {
        root.get("self")
    }
    .and_then(Value::as_object)
    .ok_or(SpecError::Shape)?;

    let field = |key: &str| {
        self_section
            .get(key)
            .and_then(Value::as_str)
            .ok_or(SpecError::Shape)
    };

    let data_structure = DataStructure {
        vendor: field("vendor")?.to_string(),
        name: field("name")?.to_string(),
        format: field("format")?.to_string(),
    };
    let version: Version = field("version")?.parse()?;

    Ok(Deployment {
        data_structure,
        version,
    })
}
