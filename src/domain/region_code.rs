use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ISO 3166-1 alpha-2 country code, as accepted by the `regionCode` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct RegionCode(String);

impl RegionCode {
    pub fn parse(s: String) -> Result<Self, String> {
        let code = s.trim();

        if code.is_empty() {
            Err(format!("Region code {:?} has no non-whitespace characters.", s))
        } else if code.chars().count() != 2 {
            Err(format!("Region code {:?} must be exactly two letters.", s))
        } else if !code.chars().all(|c| c.is_ascii_alphabetic()) {
            Err(format!("Region code {:?} contains non-letter characters.", s))
        } else {
            Ok(Self(code.to_ascii_uppercase()))
        }
    }
}

impl AsRef<str> for RegionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.to_owned())
    }
}

impl TryFrom<String> for RegionCode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}
