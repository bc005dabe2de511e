//! Folder map metadata: version, bump policy and summary.
//!
//! The prior document is the only persisted state. Its fields are parsed here
//! into a [`MapMetadata`] value and passed explicitly to rendering; nothing in
//! this module touches the filesystem. A missing or malformed field falls back
//! to its default, so a hand-edited document heals on the next run. The one
//! exception is a well-formed version whose components do not fit in `u64`:
//! falling back would reset the version, so it is rejected instead.

use crate::error::MetadataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Summary used when none is supplied or the supplied one is blank.
pub const DEFAULT_SUMMARY: &str = "Regenerated folder map snapshot";

const VERSION_FIELD: &str = "- map_version:";
const BUMP_FIELD: &str = "- bump:";
const SUMMARY_FIELD: &str = "- summary:";

/// Semantic version triple; ordering is lexicographic over (major, minor, patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MapVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl MapVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Advance the version under a bump policy. Lower components reset on a
    /// higher-order bump. Fails instead of wrapping when the bumped component
    /// is already `u64::MAX`.
    pub fn bump(self, bump: Bump) -> Result<Self, MetadataError> {
        let overflow = || MetadataError::VersionOverflow {
            version: self.to_string(),
            bump: bump.as_str(),
        };
        let next = match bump {
            Bump::None => self,
            Bump::Patch => Self::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            Bump::Minor => Self::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0),
            Bump::Major => Self::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        };
        Ok(next)
    }
}

impl fmt::Display for MapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for MapVersion {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MetadataError::InvalidVersion(s.to_string());
        let mut parts = s.split('.');
        let mut next = || -> Result<u64, MetadataError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            // Digits only, so the sole remaining failure is a value above u64::MAX.
            part.parse()
                .map_err(|_| MetadataError::VersionOutOfRange(s.to_string()))
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

/// Version bump policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl Bump {
    pub const ALL: [Bump; 4] = [Bump::None, Bump::Patch, Bump::Minor, Bump::Major];

    pub fn as_str(self) -> &'static str {
        match self {
            Bump::None => "none",
            Bump::Patch => "patch",
            Bump::Minor => "minor",
            Bump::Major => "major",
        }
    }
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bump {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bump::ALL
            .into_iter()
            .find(|bump| bump.as_str() == s)
            .ok_or_else(|| MetadataError::InvalidBump(s.to_string()))
    }
}

/// Metadata fields of a folder map. Counts are never stored here; they are
/// always recomputed from the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapMetadata {
    pub version: MapVersion,
    pub bump: Bump,
    pub summary: String,
}

impl Default for MapMetadata {
    fn default() -> Self {
        Self {
            version: MapVersion::default(),
            bump: Bump::None,
            summary: DEFAULT_SUMMARY.to_string(),
        }
    }
}

impl MapMetadata {
    /// Metadata of the prior document, or defaults when there is none.
    pub fn load(prior: Option<&str>) -> Result<Self, MetadataError> {
        prior.map_or_else(|| Ok(Self::default()), Self::parse)
    }

    /// Parse metadata out of document text. Each field is taken from the first
    /// line that carries a well-formed value for it.
    ///
    /// Fails only with [`MetadataError::VersionOutOfRange`].
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let version = first_version(text)?.unwrap_or_default();
        let bump = first_field(text, BUMP_FIELD, |v| v.parse().ok()).unwrap_or_default();
        let summary = first_field(text, SUMMARY_FIELD, |v| Some(v.to_string()))
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

        Ok(Self {
            version,
            bump,
            summary,
        })
    }

    /// Metadata for a regeneration: bumped version, new policy, resolved summary.
    pub fn next(&self, bump: Bump, explicit_summary: Option<&str>) -> Result<Self, MetadataError> {
        Ok(Self {
            version: self.version.bump(bump)?,
            bump,
            summary: resolve_summary(explicit_summary, &self.summary),
        })
    }

    /// Metadata for a drift check: version and policy held at their prior values.
    pub fn for_check(&self, explicit_summary: Option<&str>) -> Self {
        Self {
            version: self.version,
            bump: self.bump,
            summary: resolve_summary(explicit_summary, &self.summary),
        }
    }
}

/// Pick the explicit summary over the prior one, falling back to the
/// placeholder when the result is blank. Line breaks fold into single spaces
/// so the summary stays on its metadata line.
pub fn resolve_summary(explicit: Option<&str>, prior: &str) -> String {
    let chosen = explicit.unwrap_or(prior);
    let folded = chosen
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if folded.is_empty() {
        DEFAULT_SUMMARY.to_string()
    } else {
        folded
    }
}

fn first_field<T>(text: &str, field: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    field_values(text, field).find_map(parse)
}

// Malformed version lines are skipped like any other field; an out-of-range
// one stops the scan.
fn first_version(text: &str) -> Result<Option<MapVersion>, MetadataError> {
    for value in field_values(text, VERSION_FIELD) {
        match value.parse::<MapVersion>() {
            Ok(version) => return Ok(Some(version)),
            Err(e @ MetadataError::VersionOutOfRange(_)) => return Err(e),
            Err(_) => continue,
        }
    }
    Ok(None)
}

fn field_values<'a>(text: &'a str, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.lines()
        .filter_map(move |line| line.strip_prefix(field))
        .map(str::trim)
}
