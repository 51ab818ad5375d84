use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// S3 storage classes accepted for uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageClass {
    #[default]
    Standard,
    ReducedRedundancy,
    StandardIa,
    OnezoneIa,
    IntelligentTiering,
    GlacierIr,
    Glacier,
    DeepArchive,
}

impl StorageClass {
    pub const ALL: [StorageClass; 8] = [
        StorageClass::Standard,
        StorageClass::ReducedRedundancy,
        StorageClass::StandardIa,
        StorageClass::OnezoneIa,
        StorageClass::IntelligentTiering,
        StorageClass::GlacierIr,
        StorageClass::Glacier,
        StorageClass::DeepArchive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Standard => "STANDARD",
            StorageClass::ReducedRedundancy => "REDUCED_REDUNDANCY",
            StorageClass::StandardIa => "STANDARD_IA",
            StorageClass::OnezoneIa => "ONEZONE_IA",
            StorageClass::IntelligentTiering => "INTELLIGENT_TIERING",
            StorageClass::GlacierIr => "GLACIER_IR",
            StorageClass::Glacier => "GLACIER",
            StorageClass::DeepArchive => "DEEP_ARCHIVE",
        }
    }
}

impl FromStr for StorageClass {
    type Err = ValidationError;

    // Matching is exact: the backend only understands the upper-case names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStorageClass(s.to_string()))
    }
}

impl TryFrom<String> for StorageClass {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StorageClass> for String {
    fn from(class: StorageClass) -> Self {
        class.as_str().to_string()
    }
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_parses_from_its_name() {
        for class in StorageClass::ALL {
            assert_eq!(class.as_str().parse::<StorageClass>(), Ok(class));
        }
    }

    #[test]
    fn test_unknown_classes_are_rejected() {
        for bad in ["", "standard", "COLD", "GLACIER_DEEP", " STANDARD"] {
            assert_eq!(
                bad.parse::<StorageClass>(),
                Err(ValidationError::UnknownStorageClass(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(StorageClass::default(), StorageClass::Standard);
    }
}
