// Built-in FAQ catalogs
// Each catalog is a TOML file compiled into the binary and parsed on demand

#[cfg(test)]
mod tests;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::database::sqlite::models::FaqRecord;
use crate::{LoaderError, Result};

const CODE_STUDY_TOML: &str = include_str!("../../catalogs/code_study.toml");
const STUDIES_5_8_TOML: &str = include_str!("../../catalogs/studies_5_8.toml");
const EIFFEL_ORG_TOML: &str = include_str!("../../catalogs/eiffel_org.toml");

/// A fixed, ordered batch of records loaded in one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Origin tag applied to records that do not name their own
    pub default_source_origin: String,
    #[serde(default, rename = "faq")]
    pub records: Vec<FaqRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuiltinCatalog {
    CodeStudy,
    #[value(name = "studies-5-8")]
    Studies5To8,
    EiffelOrg,
}

impl BuiltinCatalog {
    pub const ALL: [BuiltinCatalog; 3] = [
        BuiltinCatalog::CodeStudy,
        BuiltinCatalog::Studies5To8,
        BuiltinCatalog::EiffelOrg,
    ];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            BuiltinCatalog::CodeStudy => "code-study",
            BuiltinCatalog::Studies5To8 => "studies-5-8",
            BuiltinCatalog::EiffelOrg => "eiffel-org",
        }
    }

    fn source(self) -> &'static str {
        match self {
            BuiltinCatalog::CodeStudy => CODE_STUDY_TOML,
            BuiltinCatalog::Studies5To8 => STUDIES_5_8_TOML,
            BuiltinCatalog::EiffelOrg => EIFFEL_ORG_TOML,
        }
    }

    #[inline]
    pub fn load(self) -> Result<Catalog> {
        Catalog::from_toml(self.source())
    }
}

impl fmt::Display for BuiltinCatalog {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinCatalog {
    type Err = LoaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        BuiltinCatalog::ALL
            .into_iter()
            .find(|catalog| catalog.name() == s)
            .ok_or_else(|| LoaderError::Catalog(format!("Unknown catalog: {s}")))
    }
}

impl Catalog {
    #[inline]
    pub fn new(
        name: impl Into<String>,
        default_source_origin: impl Into<String>,
        records: Vec<FaqRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            default_source_origin: default_source_origin.into(),
            records,
        }
    }

    #[inline]
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LoaderError::Catalog(e.to_string()))
    }

    #[inline]
    pub fn builtin(name: &str) -> Result<Self> {
        name.parse::<BuiltinCatalog>()?.load()
    }

    /// Every built-in catalog, in load order
    #[inline]
    pub fn builtin_all() -> Result<Vec<Self>> {
        BuiltinCatalog::ALL
            .into_iter()
            .map(BuiltinCatalog::load)
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
