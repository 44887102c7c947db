//! Semantic version carried in the `version` field of a score.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::load::ScoreError;

/// `major.minor.patch[-prerelease][+build]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: Vec<String>,
    pub build: Vec<String>,
}

impl Version {
    /// Format version written by this crate.
    pub const CURRENT: Version = Version::new(1, 2, 12);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }
}

impl FromStr for Version {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScoreError::InvalidVersion(s.to_string());

        let (rest, build) = match s.split_once('+') {
            Some((rest, build)) => (rest, identifiers(build).ok_or_else(invalid)?),
            None => (s, Vec::new()),
        };
        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) => (core, identifiers(pre).ok_or_else(invalid)?),
            None => (rest, Vec::new()),
        };

        let mut parts = core.split('.');
        let mut component = || -> Result<u32, ScoreError> {
            parts
                .next()
                .filter(|part| is_numeric_identifier(part))
                .and_then(|part| part.parse::<u32>().ok())
                .ok_or_else(invalid)
        };
        let major = component()?;
        let minor = component()?;
        let patch = component()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }
}

/// Digits only, without a leading zero unless the component is `0`.
fn is_numeric_identifier(part: &str) -> bool {
    !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'))
}

fn identifiers(text: &str) -> Option<Vec<String>> {
    let ids: Vec<String> = text.split('.').map(str::to_string).collect();
    if ids.iter().any(String::is_empty) {
        None
    } else {
        Some(ids)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease.join("."))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_prerelease_and_build_metadata() {
        let version: Version = "1.2.12-beta.1+abc123".parse().unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 12);
        assert_eq!(version.prerelease, vec!["beta".to_string(), "1".to_string()]);
        assert_eq!(version.build, vec!["abc123".to_string()]);
        assert_eq!(version.to_string(), "1.2.12-beta.1+abc123");
    }

    #[test]
    fn build_metadata_may_contain_dashes() {
        let version: Version = "0.2.0+build-7".parse().unwrap();
        assert!(version.prerelease.is_empty());
        assert_eq!(version.build, vec!["build-7".to_string()]);
    }

    #[test]
    fn rejects_incomplete_versions() {
        for text in ["", "1", "1.2", "1.2.x", "1.2.3.4", "1.2.3-", "-1.2.3", "01.2.3", "1.02.3", "1.2.+3"] {
            assert!(text.parse::<Version>().is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn zero_components_display_unchanged() {
        let version: Version = "0.10.0".parse().unwrap();
        assert_eq!(version.to_string(), "0.10.0");
    }

    #[test]
    fn current_version_serializes_as_string() {
        let json = serde_json::to_string(&Version::CURRENT).unwrap();
        assert_eq!(json, "\"1.2.12\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Version::CURRENT);
    }
}
