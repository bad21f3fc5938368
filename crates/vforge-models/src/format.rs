//! Content format selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Content shape produced by the pipeline.
///
/// Affects viral-score normalization and generation parameters: `short`
/// is brief vertical content with high expected view velocity, `long`
/// is extended horizontal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    #[default]
    Short,
    Long,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Short => "short",
            ContentFormat::Long => "long",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown format label.
#[derive(Debug, Error)]
#[error("unknown content format: {0}")]
pub struct FormatParseError(pub String);

impl FromStr for ContentFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(ContentFormat::Short),
            "long" => Ok(ContentFormat::Long),
            other => Err(FormatParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!("short".parse::<ContentFormat>().unwrap(), ContentFormat::Short);
        assert_eq!("LONG".parse::<ContentFormat>().unwrap(), ContentFormat::Long);
        assert!("vertical".parse::<ContentFormat>().is_err());
    }

    #[test]
    fn test_format_serde_labels() {
        assert_eq!(serde_json::to_string(&ContentFormat::Short).unwrap(), "\"short\"");
        assert_eq!(serde_json::to_string(&ContentFormat::Long).unwrap(), "\"long\"");
    }
}
