//! Firmware version parsing and range checks.
//!
//! Mirrors `luxtronik.common.parse_version` / `version_in_range` from the
//! original Python source: versions are 4-tuples `(major, minor, patch,
//! build)`, with missing trailing components defaulting to zero.

use std::fmt;

/// First firmware version known to support the smart-home interface.
pub const FIRST_VERSION_WITH_SHI: Version = Version(3, 90, 1, 0);

/// Latest firmware version this crate was written against. Used as the
/// default when the caller asks for `"latest"`.
pub const LATEST_VERSION: Version = Version(3, 92, 1, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(pub u32, pub u32, pub u32, pub u32);

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Version(major, minor, patch, build)
    }

    /// Parse a version from either a dotted string (`"a.b.c.d"`, extra
    /// parts ignored, missing parts zero-filled) or from an already-known
    /// tuple. Returns `None` on malformed input, matching the Python
    /// implementation's tolerant-but-total behavior.
    pub fn parse(input: &str) -> Option<Version> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.is_empty() || parts.iter().any(|p| !p.chars().all(|c| c.is_ascii_digit()) || p.is_empty()) {
            return None;
        }
        let mut nums = [0u32; 4];
        for (i, p) in parts.iter().take(4).enumerate() {
            nums[i] = p.parse().ok()?;
        }
        Some(Version(nums[0], nums[1], nums[2], nums[3]))
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.0, self.1, self.2, self.3)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0, self.1, self.2, self.3)
    }
}

/// Check whether `version` falls within `[since, until]` (both inclusive,
/// either bound optional). A `None` version always passes (trial-and-error
/// mode: no filtering is applied at all).
pub fn version_in_range(version: Option<Version>, since: Option<Version>, until: Option<Version>) -> bool {
    let Some(v) = version else {
        return true;
    };
    if let Some(s) = since {
        if v < s {
            return false;
        }
    }
    if let Some(u) = until {
        if v > u {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_versions() {
        assert_eq!(Version::parse("1"), Some(Version(1, 0, 0, 0)));
        assert_eq!(Version::parse("2.1"), Some(Version(2, 1, 0, 0)));
        assert_eq!(Version::parse("3.2.1"), Some(Version(3, 2, 1, 0)));
        assert_eq!(Version::parse("1.2.3.4"), Some(Version(1, 2, 3, 4)));
        assert_eq!(Version::parse("1.2.3.4.5"), Some(Version(1, 2, 3, 4)));
    }

    #[test]
    fn rejects_non_numeric_versions() {
        assert_eq!(Version::parse("a.b"), None);
        assert_eq!(Version::parse(""), None);
    }

    #[test]
    fn none_version_always_in_range() {
        assert!(version_in_range(None, Some(Version(1, 0, 0, 0)), Some(Version(2, 0, 0, 0))));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let since = Some(Version(3, 90, 1, 0));
        let until = Some(Version(3, 92, 1, 0));
        assert!(version_in_range(Some(Version(3, 90, 1, 0)), since, until));
        assert!(version_in_range(Some(Version(3, 92, 1, 0)), since, until));
        assert!(!version_in_range(Some(Version(3, 90, 0, 9)), since, until));
        assert!(!version_in_range(Some(Version(3, 92, 1, 1)), since, until));
    }
}
