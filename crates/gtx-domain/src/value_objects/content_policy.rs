//! Content-policy classes
//!
//! Providers advertise how permissive they are toward sensitive source text;
//! requests carry the class they require. Classes are ordered from the most
//! restrictive to the most permissive so that compatibility is a comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How permissive a provider is toward sensitive content
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ContentPolicy {
    /// Only safe-for-work content
    #[default]
    Strict,
    /// Mild mature content is accepted
    Moderate,
    /// Unrestricted content is accepted
    Relaxed,
}

impl ContentPolicy {
    /// All classes, most restrictive first
    pub const ALL: [ContentPolicy; 3] = [Self::Strict, Self::Moderate, Self::Relaxed];

    /// Whether a provider of this class may serve a request requiring `required`
    ///
    /// The provider class must be at least as permissive as the requirement.
    pub fn permits(self, required: ContentPolicy) -> bool {
        self >= required
    }

    /// Lowercase name used in configuration and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Moderate => "moderate",
            Self::Relaxed => "relaxed",
        }
    }
}

impl fmt::Display for ContentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" | "sfw" => Ok(Self::Strict),
            "moderate" => Ok(Self::Moderate),
            "relaxed" | "nsfw" => Ok(Self::Relaxed),
            other => Err(Error::invalid_argument(format!(
                "Unknown content policy '{other}'. Use strict, moderate, or relaxed"
            ))),
        }
    }
}
