use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

pub const DEFAULT_REGION: &str = "us-east-1";

pub const SUPPORTED_REGIONS: [&str; 16] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ca-central-1",
    "eu-west-1",
    "eu-central-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-2",
    "ap-northeast-1",
    "ap-south-1",
    "sa-east-1",
];

/// An AWS region offered by the setup form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Region(&'static str);

// Equivalent to `#[serde(try_from = "String")]`; the derive would demand `'de: 'static`
impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Region::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl Region {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        SUPPORTED_REGIONS
            .iter()
            .find(|region| **region == value)
            .map(|region| Region(*region))
            .ok_or_else(|| ValidationError::UnsupportedRegion(value.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Region(DEFAULT_REGION)
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::new(s)
    }
}

impl TryFrom<String> for Region {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Region::new(&value)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0.to_string()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region() {
        assert_eq!(Region::default().as_str(), "us-east-1");
    }

    #[test]
    fn test_supported_and_unsupported_regions() {
        assert_eq!(Region::new("eu-north-1").unwrap().as_str(), "eu-north-1");
        assert_eq!(
            Region::new("mars-central-1"),
            Err(ValidationError::UnsupportedRegion("mars-central-1".to_string()))
        );
    }

    #[test]
    fn test_region_deserializes_with_validation() {
        let region: Region = serde_json::from_str("\"ap-south-1\"").unwrap();
        assert_eq!(region.as_str(), "ap-south-1");
        assert!(serde_json::from_str::<Region>("\"nowhere\"").is_err());
    }
}
