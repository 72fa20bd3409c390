use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A `KEY=VALUE` pair forwarded verbatim to the client entry point behind
/// `--set`. The launcher never interprets keys or values; last-wins semantics
/// for duplicate keys belong to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Override {
    pub key: String,
    pub value: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    #[error("override must be KEY=VALUE, got `{0}`")]
    MissingSeparator(String),
    #[error("override has an empty key: `{0}`")]
    EmptyKey(String),
}

impl FromStr for Override {
    type Err = OverrideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // split on the first `=` only; values may contain `=` themselves
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| OverrideError::MissingSeparator(s.to_string()))?;
        if key.is_empty() {
            return Err(OverrideError::EmptyKey(s.to_string()));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl Serialize for Override {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Override {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
