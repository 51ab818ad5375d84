use std::str::FromStr;

use crate::domain::errors::ValidationError;

/// Object tags given in S3's `Tagging` form: `key1=value1&key2=value2`.
///
/// Keys and values are URL-encoded in that form and held decoded here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectTags(Vec<(String, String)>);

impl ObjectTags {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for ObjectTags {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tags = Vec::new();
        for pair in s.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ValidationError::MalformedTag(pair.to_string()))?;
            let key = decode_component(key, pair)?;
            if key.is_empty() {
                return Err(ValidationError::EmptyTagKey);
            }
            tags.push((key, decode_component(value, pair)?));
        }
        Ok(Self(tags))
    }
}

/// Form decoding: `+` is a space, `%XX` a byte; any other `%` is malformed
fn decode_component(raw: &str, pair: &str) -> Result<String, ValidationError> {
    let malformed = || ValidationError::MalformedTag(pair.to_string());

    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3).ok_or_else(malformed)?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return Err(malformed());
        }
    }

    urlencoding::decode(&raw.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|_| malformed())
}

impl std::fmt::Display for ObjectTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}
