//! Relay contract variants.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Authorization policy of a deployed relay contract.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(into = "String", try_from = "String")]
#[strum(
    ascii_case_insensitive,
    serialize_all = "lowercase",
    parse_err_fn = ParseError::from,
    parse_err_ty = ParseError
)]
pub enum Variant {
    /// Only the deploying owner may emit events.
    Admin,
    /// Any caller may emit events; provenance comes from the `from` field.
    Public,
}

impl Variant {
    /// Returns string representation of the variant.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Name of the Solidity contract implementing this variant.
    pub fn contract_name(&self) -> &'static str {
        match self {
            Variant::Admin => "AdminContract",
            Variant::Public => "DataContract",
        }
    }
}

impl From<Variant> for String {
    fn from(value: Variant) -> Self {
        value.as_str().to_string()
    }
}

impl TryFrom<String> for Variant {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parse error for invalid variant strings.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError(String);

impl From<&str> for ParseError {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let unsupported = &self.0;
        let supported = Vec::from_iter(Variant::iter().map(|v| v.as_str())).join(", ");
        write!(
            f,
            "Unsupported relay variant `{unsupported}`, expect one of [{supported}]",
        )
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("admin".parse::<Variant>().unwrap(), Variant::Admin);
        assert_eq!("Public".parse::<Variant>().unwrap(), Variant::Public);
        assert!("multisig".parse::<Variant>().is_err());
    }

    #[test]
    fn contract_names_match_artifacts() {
        assert_eq!(Variant::Admin.contract_name(), "AdminContract");
        assert_eq!(Variant::Public.contract_name(), "DataContract");
    }
}
