use crate::domain::errors::ValidationError;

/// A validated S3 bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketName(String);

impl BucketName {
    /// Create a new BucketName.
    ///
    /// Character rules follow S3 bucket naming. Length must be 1..=63, the
    /// three character minimum is left to the backend.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();

        if value.is_empty() {
            return Err(ValidationError::BucketNameTooShort { actual: 0, min: 1 });
        }

        if value.len() > 63 {
            return Err(ValidationError::BucketNameTooLong {
                actual: value.len(),
                max: 63,
            });
        }

        // Must start and end with lowercase letter or number
        if !value
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::BucketNameInvalidStart);
        }

        if !value
            .chars()
            .last()
            .map_or(false, |c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::BucketNameInvalidEnd);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != '.' {
                return Err(ValidationError::BucketNameInvalidCharacter(c));
            }
        }

        if value.contains("..") {
            return Err(ValidationError::BucketNameConsecutivePeriods);
        }

        if Self::looks_like_ip_address(&value) {
            return Err(ValidationError::BucketNameLooksLikeIpAddress);
        }

        Ok(Self(value))
    }

    /// Get the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn looks_like_ip_address(s: &str) -> bool {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return false;
        }

        parts.iter().all(|part| part.parse::<u8>().is_ok())
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BucketName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        assert!(BucketName::new("b1").is_ok());
        assert!(BucketName::new("my-bucket").is_ok());
        assert!(BucketName::new("123bucket").is_ok());
        assert!(BucketName::new("logs.example.com").is_ok());
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert_eq!(
            BucketName::new(""),
            Err(ValidationError::BucketNameTooShort { actual: 0, min: 1 })
        );
        assert!(BucketName::new("a".repeat(64)).is_err());
        assert!(BucketName::new("-bucket").is_err());
        assert!(BucketName::new("bucket.").is_err());
        assert!(BucketName::new("Bucket").is_err());
        assert!(BucketName::new("my_bucket").is_err());
        assert!(BucketName::new("my..bucket").is_err());
        assert_eq!(
            BucketName::new("192.168.1.1"),
            Err(ValidationError::BucketNameLooksLikeIpAddress)
        );
    }
}
