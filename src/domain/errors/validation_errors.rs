/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),
    ObjectKeyStartsWithSlash,
    ObjectKeyContainsDoubleSlash,
    InvalidObjectKeyPath(String),

    // BucketName validation errors
    BucketNameTooShort {
        actual: usize,
        min: usize,
    },
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidStart,
    BucketNameInvalidEnd,
    BucketNameInvalidCharacter(char),
    BucketNameConsecutivePeriods,
    BucketNameLooksLikeIpAddress,

    // StorageClass / Region validation errors
    UnknownStorageClass(String),
    UnsupportedRegion(String),

    // Tagging validation errors
    MalformedTag(String),
    EmptyTagKey,

    // Presign validation errors
    InvalidExpiry {
        seconds: u64,
        max: u64,
    },

    // EntryId validation errors
    InvalidEntryId(String),

    // Connection validation errors
    MissingField(&'static str),
    InvalidEndpoint(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }
            ValidationError::ObjectKeyStartsWithSlash => {
                write!(f, "Object key cannot start with '/'")
            }
            ValidationError::ObjectKeyContainsDoubleSlash => {
                write!(f, "Object key cannot contain '//'")
            }
            ValidationError::InvalidObjectKeyPath(key) => {
                write!(
                    f,
                    "Object key '{}' cannot end with '/' or contain '.' or '..' segments",
                    key
                )
            }

            // BucketName errors
            ValidationError::BucketNameTooShort { actual, min } => {
                write!(
                    f,
                    "Bucket name too short: {} characters (min: {})",
                    actual, min
                )
            }
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidStart => {
                write!(f, "Bucket name must start with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidEnd => {
                write!(f, "Bucket name must end with lowercase letter or number")
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only lowercase letters, numbers, periods and hyphens allowed",
                    c
                )
            }
            ValidationError::BucketNameConsecutivePeriods => {
                write!(f, "Bucket name cannot contain consecutive periods")
            }
            ValidationError::BucketNameLooksLikeIpAddress => {
                write!(f, "Bucket name cannot be formatted as an IP address")
            }

            ValidationError::UnknownStorageClass(class) => {
                write!(f, "Invalid storage class {}", class)
            }
            ValidationError::UnsupportedRegion(region) => {
                write!(f, "Unsupported region {}", region)
            }

            ValidationError::MalformedTag(tag) => {
                write!(f, "Malformed tag '{}' (expected key=value)", tag)
            }
            ValidationError::EmptyTagKey => write!(f, "Tag key cannot be empty"),

            ValidationError::InvalidExpiry { seconds, max } => {
                write!(
                    f,
                    "Presigned URL duration must be between 1 and {} seconds, got {}",
                    max, seconds
                )
            }

            ValidationError::InvalidEntryId(id) => write!(f, "Invalid config entry id: {}", id),

            ValidationError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ValidationError::InvalidEndpoint(endpoint) => {
                write!(f, "Endpoint URL must start with http:// or https://: {}", endpoint)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
